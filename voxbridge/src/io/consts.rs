pub const VOX_MAGIC: [u8; 4] = *b"VOX ";
pub const VOX_VERSION: u32 = 150;

/// Magic + version.
pub const FILE_HEADER_SIZE: usize = 8;
/// Tag + content length + children length.
pub const CHUNK_HEADER_SIZE: usize = 12;

pub const SIZE_CONTENT_LEN: usize = 12;
pub const RGBA_CONTENT_LEN: usize = 256 * 4;
/// Material id + reserved word preceding the property dictionary.
pub const MATL_PREFIX_LEN: usize = 8;

pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;
