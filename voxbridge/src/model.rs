use rustc_hash::FxHashMap;

use crate::core::{DEFAULT_PALETTE, Extent, GridSize, Material, Palette, Rgba, Voxel};
use crate::io::{ChunkHeader, ChunkTag, Record, RecordSink};

/// The decoded contents of a `.vox` file.
///
/// Produced once by [`ModelBuilder::finish`] and not mutated afterwards by the
/// decoder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxModel {
    pub version: u32,
    /// Dimensions from the last `SIZE` chunk, if any.
    pub size: Option<GridSize>,
    /// Voxels of every `XYZI` chunk, in file order.
    pub voxels: Vec<Voxel>,
    pub palette: Palette,
    /// `true` when `palette` came from an `RGBA` chunk rather than the default.
    pub explicit_palette: bool,
    pub materials: Vec<Material>,
    pub extent: Extent,
    /// Number of chunks seen per recognized tag. Unrecognized tags are not
    /// recorded.
    pub census: FxHashMap<ChunkTag, usize>,
}

impl VoxModel {
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Palette color of `voxel`.
    #[must_use]
    pub fn color_of(&self, voxel: &Voxel) -> Rgba {
        self.palette.get(voxel.color_index)
    }

    /// The last material decoded with `id`.
    #[must_use]
    pub fn material(&self, id: i32) -> Option<&Material> {
        self.materials.iter().rev().find(|material| material.id == id)
    }

    #[must_use]
    pub fn chunk_count(&self, tag: ChunkTag) -> usize {
        self.census.get(&tag).copied().unwrap_or(0)
    }

    /// Distinct palette indices referenced by voxels, in first-use order.
    #[must_use]
    pub fn referenced_indices(&self) -> Vec<u8> {
        let mut seen = [false; 256];
        let mut indices = Vec::new();

        for voxel in &self.voxels {
            let slot = &mut seen[voxel.color_index as usize];
            if !*slot {
                *slot = true;
                indices.push(voxel.color_index);
            }
        }

        indices
    }
}

/// Accumulates decoded records into a [`VoxModel`].
///
/// None of its operations can fail; whatever the payload decoders produce is
/// accepted as is.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    size: Option<GridSize>,
    voxels: Vec<Voxel>,
    palette: Option<Box<Palette>>,
    explicit_palette_seen: bool,
    materials: Vec<Material>,
    extent: Extent,
    census: FxHashMap<ChunkTag, usize>,
}

impl ModelBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a voxel and grows the extent to cover it.
    #[inline]
    pub fn append_voxel(&mut self, voxel: Voxel) {
        self.extent.include(voxel.position());
        self.voxels.push(voxel);
    }

    pub fn append_voxels<I: IntoIterator<Item = Voxel>>(&mut self, voxels: I) {
        let voxels = voxels.into_iter();
        self.voxels.reserve(voxels.size_hint().0);
        for voxel in voxels {
            self.append_voxel(voxel);
        }
    }

    /// Replaces the palette and marks it as explicit.
    pub fn set_palette(&mut self, palette: Palette) {
        self.replace_palette(Box::new(palette));
    }

    fn replace_palette(&mut self, palette: Box<Palette>) {
        self.palette = Some(palette);
        self.explicit_palette_seen = true;
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.push(material);
    }

    pub fn record_grid_size(&mut self, size: GridSize) {
        self.size = Some(size);
    }

    pub fn record_chunk(&mut self, tag: ChunkTag) {
        *self.census.entry(tag).or_insert(0) += 1;
    }

    #[must_use]
    pub fn explicit_palette_seen(&self) -> bool {
        self.explicit_palette_seen
    }

    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    #[must_use]
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Finalizes the model, falling back to [`DEFAULT_PALETTE`] when no `RGBA`
    /// chunk was seen.
    #[must_use]
    pub fn finish(self, version: u32) -> VoxModel {
        let palette = match self.palette {
            Some(palette) => *palette,
            None => DEFAULT_PALETTE,
        };

        VoxModel {
            version,
            size: self.size,
            voxels: self.voxels,
            palette,
            explicit_palette: self.explicit_palette_seen,
            materials: self.materials,
            extent: self.extent,
            census: self.census,
        }
    }
}

impl RecordSink for ModelBuilder {
    fn accept(&mut self, header: &ChunkHeader, record: Record) {
        if let Record::Skipped(_) = record {
            return;
        }

        self.record_chunk(header.tag);

        match record {
            Record::Size(size) => self.record_grid_size(size),
            Record::Voxels(voxels) => self.append_voxels(voxels),
            Record::Palette(palette) => self.replace_palette(palette),
            Record::Material(material) => self.add_material(material),
            Record::Marker(_) | Record::Skipped(_) => {}
        }
    }
}
