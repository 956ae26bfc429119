/// Four-character chunk identifier.
///
/// Tags with a payload decoder (`SIZE`, `XYZI`, `RGBA`, `MATL`) and tags that are
/// only recognized by name both get their own variant. Anything else is kept
/// verbatim in [`ChunkTag::Unknown`] so it can be reported and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChunkTag {
    Main,
    Pack,
    Size,
    Xyzi,
    Rgba,
    Matl,
    Matt,
    Camera,
    RenderObject,
    Transform,
    Group,
    Shape,
    Layer,
    IndexMap,
    Note,
    Unknown([u8; 4]),
}

impl ChunkTag {
    /// Every tag recognized by name, in no particular order.
    pub const KNOWN: [ChunkTag; 15] = [
        ChunkTag::Main,
        ChunkTag::Pack,
        ChunkTag::Size,
        ChunkTag::Xyzi,
        ChunkTag::Rgba,
        ChunkTag::Matl,
        ChunkTag::Matt,
        ChunkTag::Camera,
        ChunkTag::RenderObject,
        ChunkTag::Transform,
        ChunkTag::Group,
        ChunkTag::Shape,
        ChunkTag::Layer,
        ChunkTag::IndexMap,
        ChunkTag::Note,
    ];

    #[must_use]
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        match &bytes {
            b"MAIN" => ChunkTag::Main,
            b"PACK" => ChunkTag::Pack,
            b"SIZE" => ChunkTag::Size,
            b"XYZI" => ChunkTag::Xyzi,
            b"RGBA" => ChunkTag::Rgba,
            b"MATL" => ChunkTag::Matl,
            b"MATT" => ChunkTag::Matt,
            b"rCAM" => ChunkTag::Camera,
            b"rOBJ" => ChunkTag::RenderObject,
            b"nTRN" => ChunkTag::Transform,
            b"nGRP" => ChunkTag::Group,
            b"nSHP" => ChunkTag::Shape,
            b"LAYR" => ChunkTag::Layer,
            b"IMAP" => ChunkTag::IndexMap,
            b"NOTE" => ChunkTag::Note,
            _ => ChunkTag::Unknown(bytes),
        }
    }

    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 4] {
        match self {
            ChunkTag::Main => *b"MAIN",
            ChunkTag::Pack => *b"PACK",
            ChunkTag::Size => *b"SIZE",
            ChunkTag::Xyzi => *b"XYZI",
            ChunkTag::Rgba => *b"RGBA",
            ChunkTag::Matl => *b"MATL",
            ChunkTag::Matt => *b"MATT",
            ChunkTag::Camera => *b"rCAM",
            ChunkTag::RenderObject => *b"rOBJ",
            ChunkTag::Transform => *b"nTRN",
            ChunkTag::Group => *b"nGRP",
            ChunkTag::Shape => *b"nSHP",
            ChunkTag::Layer => *b"LAYR",
            ChunkTag::IndexMap => *b"IMAP",
            ChunkTag::Note => *b"NOTE",
            ChunkTag::Unknown(bytes) => *bytes,
        }
    }

    /// `true` for tags that have a payload decoder.
    #[must_use]
    pub const fn has_decoder(&self) -> bool {
        matches!(
            self,
            ChunkTag::Size | ChunkTag::Xyzi | ChunkTag::Rgba | ChunkTag::Matl
        )
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, ChunkTag::Unknown(_))
    }
}

impl From<[u8; 4]> for ChunkTag {
    #[inline]
    fn from(bytes: [u8; 4]) -> Self {
        ChunkTag::from_bytes(bytes)
    }
}

impl std::fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.to_bytes() {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roundtrip() {
        for tag in ChunkTag::KNOWN {
            assert!(tag.is_known());
            assert_eq!(ChunkTag::from_bytes(tag.to_bytes()), tag);
        }
    }

    #[test]
    fn test_unknown() {
        let tag = ChunkTag::from_bytes(*b"ZZZZ");
        assert_eq!(tag, ChunkTag::Unknown(*b"ZZZZ"));
        assert!(!tag.is_known());
        assert!(!tag.has_decoder());
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(ChunkTag::from_bytes(*b"rCAM"), ChunkTag::Camera);
        assert_eq!(ChunkTag::from_bytes(*b"RCAM"), ChunkTag::Unknown(*b"RCAM"));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ChunkTag::Transform), "nTRN");
        assert_eq!(format!("{}", ChunkTag::Unknown([b'A', 0, b'B', 0xff])), "A\\x00B\\xff");
    }

    #[test]
    fn test_has_decoder() {
        assert!(ChunkTag::Xyzi.has_decoder());
        assert!(ChunkTag::Matl.has_decoder());
        assert!(!ChunkTag::Main.has_decoder());
        assert!(!ChunkTag::Note.has_decoder());
    }
}
