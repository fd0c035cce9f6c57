// One error enum for the whole app; every variant states *where* things
// went wrong. Nothing here is fatal: every failure is recoverable at
// the call site that saw it.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The canvas was asked to compose or snapshot before it ever
    /// learned its dimensions. Hosts treat this as "skip this frame".
    #[error("canvas has no surface yet (dimensions unknown)")]
    InvalidDimensions,

    /// JPEG encoding of a snapshot failed.
    #[error("image encode error: {0}")]
    ExportEncode(String),

    /// Writing the encoded image to its destination failed. The
    /// in-memory drawing is untouched; saving again is safe.
    #[error("image write error: {0}")]
    ExportIo(#[from] std::io::Error),

    /// Creating the window failed
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("window update error: {0}")]
    WindowUpdate(String),
}
