use std::path::Path;

use log::{debug, info};

use crate::error::{VoxError, VoxResult};
use crate::io::consts::VOX_MAGIC;
use crate::io::{ByteCursor, ChunkWalker, DecodeOptions};
use crate::model::{ModelBuilder, VoxModel};

/// Validates the `VOX ` magic and returns the file version.
///
/// The magic is checked before the version is read, so a file starting with
/// anything else fails with [`VoxError::InvalidMagic`] even when it is shorter
/// than a full header.
pub fn read_file_header(cursor: &mut ByteCursor<'_>) -> VoxResult<u32> {
    let magic = cursor.read_tag()?;
    if magic != VOX_MAGIC {
        return Err(VoxError::InvalidMagic { found: magic });
    }

    cursor.read_u32()
}

/// Decodes `.vox` data with a fixed set of [`DecodeOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VoxImporter {
    options: DecodeOptions,
}

impl VoxImporter {
    #[must_use]
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    pub fn import_bytes(&self, data: &[u8]) -> VoxResult<VoxModel> {
        let mut cursor = ByteCursor::new(data);
        let version = read_file_header(&mut cursor)?;
        debug!("VOX version {version}, {} bytes of chunks", cursor.remaining());

        let mut builder = ModelBuilder::new();
        let mut walker = ChunkWalker::new(cursor, self.options);
        walker.walk(&mut builder)?;

        let model = builder.finish(version);

        info!(
            "Decoded {} voxels, {} materials, {} palette",
            model.voxel_count(),
            model.materials.len(),
            if model.explicit_palette {
                "explicit"
            } else {
                "default"
            }
        );

        Ok(model)
    }

    pub fn import_file<P: AsRef<Path>>(&self, path: &P) -> VoxResult<VoxModel> {
        info!("Importing VOX model from {}", path.as_ref().display());

        let data = std::fs::read(path)?;
        self.import_bytes(&data)
    }
}

pub fn import_model_from_vox<P: AsRef<Path>>(path: &P) -> VoxResult<VoxModel> {
    VoxImporter::default().import_file(path)
}

pub fn import_model_from_bytes(data: &[u8]) -> VoxResult<VoxModel> {
    VoxImporter::default().import_bytes(data)
}
