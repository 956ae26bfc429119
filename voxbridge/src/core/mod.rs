mod extent;
mod material;
mod palette;
mod voxel;

pub use extent::Extent;
pub use material::{
    Coercion, Material, MaterialKind, PropertyValue, coerce_property, coercion_for,
};
pub use palette::{DEFAULT_PALETTE, PALETTE_LEN, Palette, Rgba};
pub use voxel::{GridSize, Voxel};
