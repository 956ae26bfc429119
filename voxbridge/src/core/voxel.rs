//! Module `core::voxel`
//!
//! Defines the [`Voxel`] struct, a single colored cube on the model grid, and
//! [`GridSize`], the declared dimensions of that grid.
//!
//! # Examples
//!
//! ```rust
//! use voxbridge::Voxel;
//!
//! let voxel = Voxel::new(1, 2, 3, 79);
//! assert_eq!(voxel.position().to_array(), [1, 2, 3]);
//! assert_eq!(voxel.color_index, 79);
//! ```

use glam::UVec3;

/// A voxel as stored in an `XYZI` chunk: grid coordinates plus a palette index.
///
/// Palette index `0` is conventionally "unused" in the default palette, but it is
/// carried through unchanged.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voxel {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub color_index: u8,
}

impl Voxel {
    /// Size of one voxel record inside an `XYZI` payload.
    pub const ENCODED_SIZE: usize = 4;

    #[must_use]
    #[inline(always)]
    pub const fn new(x: u8, y: u8, z: u8, color_index: u8) -> Self {
        Self {
            x,
            y,
            z,
            color_index,
        }
    }

    /// Creates a voxel from its on-disk layout `[x, y, z, index]`.
    #[must_use]
    #[inline(always)]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Returns the on-disk layout `[x, y, z, index]`.
    #[must_use]
    #[inline(always)]
    pub const fn to_bytes(&self) -> [u8; 4] {
        [self.x, self.y, self.z, self.color_index]
    }

    /// Grid position widened to `UVec3`.
    #[must_use]
    #[inline(always)]
    pub fn position(&self) -> UVec3 {
        UVec3::new(self.x as u32, self.y as u32, self.z as u32)
    }
}

impl std::fmt::Display for Voxel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}) #{}",
            self.x, self.y, self.z, self.color_index
        )
    }
}

/// Grid dimensions declared by a `SIZE` chunk.
///
/// Informational only: voxel coordinates are not checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl GridSize {
    #[must_use]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn as_uvec3(&self) -> UVec3 {
        UVec3::new(self.x, self.y, self.z)
    }

    /// Number of cells in the grid, saturating on overflow.
    #[must_use]
    pub fn volume(&self) -> u64 {
        (self.x as u64)
            .saturating_mul(self.y as u64)
            .saturating_mul(self.z as u64)
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}
