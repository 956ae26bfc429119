use thiserror::Error;

use crate::io::ChunkTag;

/// Everything that can abort a decode pass.
///
/// None of these are recoverable: the first error ends the decode and no
/// partial model is returned.
#[derive(Error, Debug)]
pub enum VoxError {
    /// The file does not start with `VOX `.
    #[error("invalid magic {:?}, expected \"VOX \"", String::from_utf8_lossy(.found))]
    InvalidMagic { found: [u8; 4] },

    /// A fixed-size read ran past the end of the data.
    #[error(
        "unexpected end of data at offset {offset}: needed {needed} bytes, {available} available"
    )]
    UnexpectedEndOfData {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A payload is too short for its tag's layout, or a chunk overruns its parent.
    #[error("malformed {tag} chunk: {reason}")]
    MalformedChunk { tag: ChunkTag, reason: String },

    /// Chunks are nested deeper than the configured limit.
    #[error("chunk nesting depth {depth} exceeds limit {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VoxError {
    pub(crate) fn malformed(tag: ChunkTag, reason: impl Into<String>) -> Self {
        VoxError::MalformedChunk {
            tag,
            reason: reason.into(),
        }
    }
}

pub type VoxResult<T> = Result<T, VoxError>;
