//! Bridge error taxonomy.
//!
//! Only two conditions are errors. A missing channel and a detected
//! self-loop are ordinary per-frame outcomes, reported through
//! [`crate::FrameOutcome`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The host supplied no input texture this call. The frame is reported
    /// as failed; the host retries next frame.
    #[error("no input texture supplied by the host")]
    NoInput,

    /// Shader or quad setup failed. Fatal for the instance being built.
    #[error("draw resource setup failed: {0}")]
    Init(#[from] ffgl_draw::DrawError),
}
