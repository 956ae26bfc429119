//! Decoder for MagicaVoxel `.vox` files.
//!
//! A `.vox` file is a `VOX ` magic, a version, and a tree of length-delimited
//! chunks. [`io::import`] walks that tree and accumulates the chunks it
//! understands into a [`VoxModel`]: voxels, palette, materials, grid size and the
//! voxel extent. [`scene`] turns a model into renderer-neutral scene elements.
//!
//! ```rust
//! use voxbridge::{ModelBuilder, Voxel, io::export::encode_model, import_model_from_bytes};
//!
//! let mut builder = ModelBuilder::new();
//! builder.append_voxel(Voxel::new(1, 2, 3, 79));
//! let bytes = encode_model(&builder.finish(150)).unwrap();
//!
//! let model = import_model_from_bytes(&bytes).unwrap();
//! assert_eq!(model.voxels, vec![Voxel::new(1, 2, 3, 79)]);
//! assert!(!model.explicit_palette);
//! ```

pub mod core;
pub mod error;
pub mod io;
pub mod model;
pub mod scene;

pub use crate::core::{
    DEFAULT_PALETTE, Extent, GridSize, Material, MaterialKind, Palette, PropertyValue, Rgba, Voxel,
};
pub use crate::error::{VoxError, VoxResult};
pub use crate::io::import::{VoxImporter, import_model_from_bytes, import_model_from_vox};
pub use crate::model::{ModelBuilder, VoxModel};
