pub mod consts;
mod cursor;
pub mod chunk;
pub mod export;
pub mod import;
mod options;
pub mod payload;
mod tag;
pub mod walker;

pub use chunk::{Chunk, ChunkHeader};
pub use cursor::ByteCursor;
pub use options::DecodeOptions;
pub use payload::{Record, decode_payload};
pub use tag::ChunkTag;
pub use walker::{ChunkWalker, RecordSink};
