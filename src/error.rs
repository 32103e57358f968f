use alloc::string::String;

use crate::format::TextureCompression;

/// Errors from texture compression dispatch.
///
/// Every variant is detected before any work is handed to the task queue, so
/// an `Err` always means the destination was left untouched.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CompressionError {
    #[error("no decoder for {0:?}")]
    NoDecoder(TextureCompression),

    #[error("no encoder for {0:?}")]
    NoEncoder(TextureCompression),

    #[error("compressed input too small: need {needed} bytes, got {actual}")]
    InputTooSmall { needed: usize, actual: usize },

    #[error("compressed output too small: need {needed} bytes, got {actual}")]
    OutputTooSmall { needed: usize, actual: usize },

    #[error("invalid surface: {0}")]
    InvalidSurface(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("{0:?} has an empty block footprint")]
    EmptyBlock(TextureCompression),

    #[error("duplicate registry entry for {0:?}")]
    DuplicateEntry(TextureCompression),

    #[error("failed to build task queue: {0}")]
    QueueBuild(String),
}
