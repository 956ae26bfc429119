use log::debug;

use crate::error::{VoxError, VoxResult};
use crate::io::consts::CHUNK_HEADER_SIZE;
use crate::io::{ByteCursor, Chunk, ChunkHeader, ChunkTag, DecodeOptions, Record, decode_payload};

/// Receives every decoded record, in file order.
pub trait RecordSink {
    fn accept(&mut self, header: &ChunkHeader, record: Record);
}

impl<F> RecordSink for F
where
    F: FnMut(&ChunkHeader, Record),
{
    fn accept(&mut self, header: &ChunkHeader, record: Record) {
        self(header, record)
    }
}

/// The enclosing chunk's tag and the absolute end of its children section.
#[derive(Debug, Clone, Copy)]
struct Parent {
    tag: ChunkTag,
    children_end: usize,
}

/// Recursive chunk walker.
///
/// Frames a chunk, decodes its payload, hands the record to a [`RecordSink`],
/// then walks its children until the cursor reaches the chunk's children end.
/// A child may never extend past its parent's children section.
pub struct ChunkWalker<'a> {
    cursor: ByteCursor<'a>,
    options: DecodeOptions,
}

impl<'a> ChunkWalker<'a> {
    #[must_use]
    pub fn new(cursor: ByteCursor<'a>, options: DecodeOptions) -> Self {
        Self { cursor, options }
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    /// Reads top-level chunks until the data is exhausted.
    ///
    /// Running out of data between two chunks ends the walk; running out
    /// inside a chunk is [`VoxError::UnexpectedEndOfData`].
    pub fn walk<S: RecordSink>(&mut self, sink: &mut S) -> VoxResult<()> {
        while !self.cursor.is_exhausted() {
            self.read_chunk(0, None, sink)?;
        }
        Ok(())
    }

    fn read_chunk<S: RecordSink>(
        &mut self,
        depth: usize,
        parent: Option<Parent>,
        sink: &mut S,
    ) -> VoxResult<()> {
        if depth > self.options.max_nesting_depth {
            return Err(VoxError::NestingTooDeep {
                depth,
                limit: self.options.max_nesting_depth,
            });
        }

        let start = self.cursor.offset();

        if let Some(parent) = parent {
            let left = parent.children_end - start;
            if left < CHUNK_HEADER_SIZE {
                return Err(VoxError::malformed(
                    parent.tag,
                    format!("{left} stray bytes at the end of the children section"),
                ));
            }
        }

        let header = ChunkHeader::read(&mut self.cursor)?;
        self.check_span(start, &header, parent)?;

        let chunk = Chunk::read_body(&mut self.cursor, header)?;

        debug!(
            "{:indent$}{} @{start}: content {} bytes, children {} bytes",
            "",
            header.tag,
            header.content_len,
            header.children_len,
            indent = depth * 2
        );

        let record = decode_payload(chunk.tag(), chunk.payload)?;
        sink.accept(&chunk.header, record);

        if !chunk.has_children() {
            return Ok(());
        }

        let this = Parent {
            tag: chunk.tag(),
            children_end: chunk.children_end,
        };

        while self.cursor.offset() < chunk.children_end {
            self.read_chunk(depth + 1, Some(this), sink)?;
        }

        Ok(())
    }

    /// Rejects a chunk whose declared lengths run past the data or past its
    /// parent, before any of its payload is read.
    fn check_span(
        &self,
        start: usize,
        header: &ChunkHeader,
        parent: Option<Parent>,
    ) -> VoxResult<()> {
        let end = start as u64 + header.total_len();

        if end > self.cursor.source_len() as u64 {
            let needed = header.content_len as u64 + header.children_len as u64;
            return Err(VoxError::UnexpectedEndOfData {
                offset: self.cursor.offset(),
                needed: usize::try_from(needed).unwrap_or(usize::MAX),
                available: self.cursor.remaining(),
            });
        }

        if let Some(parent) = parent {
            if end > parent.children_end as u64 {
                return Err(VoxError::malformed(
                    header.tag,
                    format!(
                        "chunk at offset {start} spans {} bytes, only {} left inside {}",
                        header.total_len(),
                        parent.children_end - start,
                        parent.tag
                    ),
                ));
            }
        }

        Ok(())
    }
}
