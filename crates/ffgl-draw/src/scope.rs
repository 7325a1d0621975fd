//! Scoped GL binding guards.
//!
//! The host assumes a known-default context after each render call, so every
//! binding changed during a draw is captured on construction and restored on
//! drop, including early-return paths.

use gl::types::{GLenum, GLint, GLuint};

/// Binds a shader program, restoring the previously bound program on drop.
pub struct ScopedShaderBinding {
    previous: GLint,
}

impl ScopedShaderBinding {
    pub fn new(program: GLuint) -> Self {
        let mut previous = 0;
        unsafe {
            gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut previous);
            gl::UseProgram(program);
        }
        Self { previous }
    }
}

impl Drop for ScopedShaderBinding {
    fn drop(&mut self) {
        unsafe { gl::UseProgram(self.previous as GLuint) }
    }
}

/// Activates a texture sampler unit, restoring the previously active unit on
/// drop.
pub struct ScopedSamplerActivation {
    previous: GLint,
}

impl ScopedSamplerActivation {
    pub fn new(unit: u32) -> Self {
        let mut previous = 0;
        unsafe {
            gl::GetIntegerv(gl::ACTIVE_TEXTURE, &mut previous);
            gl::ActiveTexture(gl::TEXTURE0 + unit);
        }
        Self { previous }
    }
}

impl Drop for ScopedSamplerActivation {
    fn drop(&mut self) {
        unsafe { gl::ActiveTexture(self.previous as GLenum) }
    }
}

/// Binds a 2D texture on the active unit, restoring the previous binding on
/// drop.
pub struct Scoped2DTextureBinding {
    previous: GLint,
}

impl Scoped2DTextureBinding {
    pub fn new(texture: GLuint) -> Self {
        let mut previous = 0;
        unsafe {
            gl::GetIntegerv(gl::TEXTURE_BINDING_2D, &mut previous);
            gl::BindTexture(gl::TEXTURE_2D, texture);
        }
        Self { previous }
    }
}

impl Drop for Scoped2DTextureBinding {
    fn drop(&mut self) {
        unsafe { gl::BindTexture(gl::TEXTURE_2D, self.previous as GLuint) }
    }
}

/// Binds a vertex array object, restoring the previous binding on drop.
pub struct ScopedVaoBinding {
    previous: GLint,
}

impl ScopedVaoBinding {
    pub fn new(vao: GLuint) -> Self {
        let mut previous = 0;
        unsafe {
            gl::GetIntegerv(gl::VERTEX_ARRAY_BINDING, &mut previous);
            gl::BindVertexArray(vao);
        }
        Self { previous }
    }
}

impl Drop for ScopedVaoBinding {
    fn drop(&mut self) {
        unsafe { gl::BindVertexArray(self.previous as GLuint) }
    }
}
