//! Primitive GL drawing services for FFGL plugins.
//!
//! Everything here assumes it runs inside a host render callback with the
//! host's OpenGL context current: shader compile/link ([`shader`]), a
//! full-screen textured quad ([`quad`]), scoped binding guards that put the
//! context back the way the host left it ([`scope`]), and context
//! bookkeeping ([`context`]).

use thiserror::Error;

pub mod context;
pub mod quad;
pub mod scope;
pub mod shader;

pub use quad::ScreenQuad;
pub use scope::{Scoped2DTextureBinding, ScopedSamplerActivation, ScopedShaderBinding, ScopedVaoBinding};
pub use shader::GlShader;

/// Failures while building draw resources. All of these are fatal for the
/// plugin instance being constructed.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("shader compilation failed: {0}")]
    Compile(String),
    #[error("shader program link failed: {0}")]
    Link(String),
    #[error("GL object allocation failed")]
    Allocation,
}
