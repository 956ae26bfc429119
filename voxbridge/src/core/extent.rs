//! Module `core::extent`
//!
//! Defines [`Extent`], the running axis-aligned bounds of every decoded voxel.
//!
//! # Examples
//!
//! ```rust
//! use glam::UVec3;
//! use voxbridge::Extent;
//!
//! let mut extent = Extent::default();
//! assert!(extent.is_empty());
//!
//! extent.include(UVec3::new(1, 2, 3));
//! extent.include(UVec3::new(5, 0, 9));
//! assert_eq!(extent.min(), Some(UVec3::new(1, 0, 3)));
//! assert_eq!(extent.max(), Some(UVec3::new(5, 2, 9)));
//! ```

use glam::{UVec3, Vec3};

/// Per-axis min/max over all seen voxel coordinates.
///
/// An extent that has not seen any voxel reports itself as empty; the first
/// [`Extent::include`] seeds both corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    bounds: Option<(UVec3, UVec3)>,
}

impl Extent {
    #[must_use]
    pub const fn empty() -> Self {
        Self { bounds: None }
    }

    #[must_use]
    pub fn from_bounds(min: UVec3, max: UVec3) -> Self {
        Self {
            bounds: Some((min.min(max), min.max(max))),
        }
    }

    /// Grows the extent to cover `point`.
    #[inline]
    pub fn include(&mut self, point: UVec3) {
        self.bounds = Some(match self.bounds {
            None => (point, point),
            Some((min, max)) => (min.min(point), max.max(point)),
        });
    }

    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    #[must_use]
    #[inline(always)]
    pub fn min(&self) -> Option<UVec3> {
        self.bounds.map(|(min, _)| min)
    }

    #[must_use]
    #[inline(always)]
    pub fn max(&self) -> Option<UVec3> {
        self.bounds.map(|(_, max)| max)
    }

    #[must_use]
    pub fn bounds(&self) -> Option<(UVec3, UVec3)> {
        self.bounds
    }

    /// Number of grid cells spanned per axis (`max - min + 1`).
    #[must_use]
    pub fn dimensions(&self) -> Option<UVec3> {
        self.bounds.map(|(min, max)| max - min + UVec3::ONE)
    }

    /// Center of the covered cells, treating each voxel as the unit cube
    /// `[p, p + 1]`.
    #[must_use]
    pub fn center(&self) -> Option<Vec3> {
        self.bounds
            .map(|(min, max)| (min.as_vec3() + max.as_vec3() + Vec3::ONE) * 0.5)
    }

    /// Radius of the sphere enclosing all covered cells.
    #[must_use]
    pub fn radius(&self) -> Option<f32> {
        self.dimensions().map(|dims| dims.as_vec3().length() * 0.5)
    }
}

impl std::fmt::Display for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.bounds {
            None => write!(f, "empty"),
            Some((min, max)) => write!(
                f,
                "[{}, {}, {}]..=[{}, {}, {}]",
                min.x, min.y, min.z, max.x, max.y, max.z
            ),
        }
    }
}
