use crate::error::{VoxError, VoxResult};
use crate::io::consts::CHUNK_HEADER_SIZE;
use crate::io::{ByteCursor, ChunkTag};

/// Header preceding every chunk: tag, payload length and children length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub tag: ChunkTag,
    pub content_len: u32,
    pub children_len: u32,
}

impl ChunkHeader {
    pub fn read(cursor: &mut ByteCursor<'_>) -> VoxResult<Self> {
        let tag = ChunkTag::from_bytes(cursor.read_tag()?);
        let content_len = cursor.read_u32()?;
        let children_len = cursor.read_u32()?;

        Ok(Self {
            tag,
            content_len,
            children_len,
        })
    }

    /// Bytes covered by this chunk: header, payload and children.
    #[must_use]
    pub fn total_len(&self) -> u64 {
        CHUNK_HEADER_SIZE as u64 + self.content_len as u64 + self.children_len as u64
    }
}

/// A framed chunk: its header, its payload bytes, and the absolute offset at
/// which its children section ends.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    pub header: ChunkHeader,
    pub payload: &'a [u8],
    pub children_end: usize,
}

impl<'a> Chunk<'a> {
    /// Reads one header and exactly `content_len` payload bytes.
    ///
    /// The cursor is left at the first byte of the children section. The tag is
    /// not interpreted.
    pub fn read(cursor: &mut ByteCursor<'a>) -> VoxResult<Self> {
        let header = ChunkHeader::read(cursor)?;
        Self::read_body(cursor, header)
    }

    /// Reads the payload for an already consumed `header`.
    pub fn read_body(cursor: &mut ByteCursor<'a>, header: ChunkHeader) -> VoxResult<Self> {
        let payload = cursor.read_bytes(header.content_len as usize)?;

        let children_end = cursor
            .offset()
            .checked_add(header.children_len as usize)
            .ok_or_else(|| {
                VoxError::malformed(header.tag, "children length overflows the address space")
            })?;

        Ok(Self {
            header,
            payload,
            children_end,
        })
    }

    #[must_use]
    #[inline(always)]
    pub fn tag(&self) -> ChunkTag {
        self.header.tag
    }

    #[must_use]
    #[inline(always)]
    pub fn has_children(&self) -> bool {
        self.header.children_len > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_bytes(tag: &[u8; 4], content: &[u8], children_len: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(tag);
        data.extend_from_slice(&(content.len() as u32).to_le_bytes());
        data.extend_from_slice(&children_len.to_le_bytes());
        data.extend_from_slice(content);
        data
    }

    #[test]
    fn test_read_header() {
        let data = chunk_bytes(b"SIZE", &[0; 12], 0);
        let mut cursor = ByteCursor::new(&data);
        let header = ChunkHeader::read(&mut cursor).unwrap();

        assert_eq!(header.tag, ChunkTag::Size);
        assert_eq!(header.content_len, 12);
        assert_eq!(header.children_len, 0);
        assert_eq!(header.total_len(), 24);
        assert_eq!(cursor.offset(), CHUNK_HEADER_SIZE);
    }

    #[test]
    fn test_payload_and_children_end() {
        let mut data = chunk_bytes(b"MAIN", &[9, 8, 7], 5);
        data.extend_from_slice(&[0; 5]);
        let mut cursor = ByteCursor::new(&data);

        let chunk = Chunk::read(&mut cursor).unwrap();
        assert_eq!(chunk.tag(), ChunkTag::Main);
        assert_eq!(chunk.payload, &[9, 8, 7]);
        assert_eq!(cursor.offset(), CHUNK_HEADER_SIZE + 3);
        assert_eq!(chunk.children_end, CHUNK_HEADER_SIZE + 3 + 5);
        assert!(chunk.has_children());
    }

    #[test]
    fn test_children_end_is_absolute() {
        let mut data = vec![0xaa; 16];
        data.extend(chunk_bytes(b"nGRP", &[1, 2], 24));
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(16).unwrap();

        let chunk = Chunk::read(&mut cursor).unwrap();
        assert_eq!(chunk.children_end, 16 + CHUNK_HEADER_SIZE + 2 + 24);
    }

    #[test]
    fn test_truncated_header() {
        let data = b"XYZI\x04\x00".to_vec();
        let mut cursor = ByteCursor::new(&data);
        assert!(matches!(
            Chunk::read(&mut cursor),
            Err(VoxError::UnexpectedEndOfData { .. })
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let mut data = chunk_bytes(b"RGBA", &[0; 8], 0);
        data.truncate(data.len() - 3);
        let mut cursor = ByteCursor::new(&data);

        let err = Chunk::read(&mut cursor).unwrap_err();
        assert!(matches!(
            err,
            VoxError::UnexpectedEndOfData {
                offset: 12,
                needed: 8,
                available: 5
            }
        ));
    }
}
