//! Per-frame hand-off between a host's render loop and a named
//! texture-sharing channel.
//!
//! Two symmetric bridges, composed by thin plugin adapters:
//!
//! - [`SenderBridge`] publishes the host's input texture under a
//!   user-assigned channel name, every frame.
//! - [`ReceiverBridge`] discovers the currently selected channel, keeps a
//!   local cached texture matched to the source's dimensions, and draws it
//!   into the host's frame.
//!
//! GPU effects go through the [`TexturePainter`] seam so the control flow
//! here stays independent of live GL state; transport calls go through the
//! traits in [`texshare_transport`]. Everything runs synchronously inside
//! the host's render callback.

pub mod error;
pub mod frame;
pub mod painter;
pub mod receiver;
pub mod self_loop;
pub mod sender;

#[cfg(test)]
mod test_support;

pub use error::BridgeError;
pub use frame::{FrameInput, InputTexture};
pub use painter::{GlPainter, TexturePainter};
pub use receiver::{FrameOutcome, ReceiverBridge};
pub use self_loop::{originates_from_host, DEFAULT_HOST_MARKER};
pub use sender::{SendOutcome, SenderBridge};
