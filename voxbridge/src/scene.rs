//! Neutral scene construction from a decoded [`VoxModel`].
//!
//! A renderer backend implements [`SceneBuilder`]; [`build_scene`] drives it with
//! one material per referenced palette index, one instance per voxel and a
//! camera framing derived from the model's extent. [`ScenePlan`] is an
//! in-memory builder that simply records what it is given.

use glam::Vec3;
use log::debug;
use rustc_hash::FxHashMap;

use crate::core::{Extent, Material};
use crate::model::VoxModel;

/// Where a camera should look and how far the content reaches from there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub target: Vec3,
    pub radius: f32,
}

impl CameraFraming {
    /// Frames the cells covered by `extent`; `None` when it is empty.
    #[must_use]
    pub fn from_extent(extent: &Extent) -> Option<Self> {
        Some(Self {
            target: extent.center()?,
            radius: extent.radius()?,
        })
    }

    /// Camera position at `distance_factor` radii from the target along `direction`.
    #[must_use]
    pub fn eye(&self, direction: Vec3, distance_factor: f32) -> Vec3 {
        self.target + direction.normalize_or_zero() * self.radius * distance_factor
    }
}

/// Receives scene elements from [`build_scene`].
pub trait SceneBuilder {
    /// Called once per distinct palette index, before any instance uses it.
    fn add_material(&mut self, index: u8, color: [f64; 4], source: Option<&Material>);

    /// Called once per voxel, in file order.
    fn add_instance(&mut self, ordinal: usize, position: Vec3, material_index: u8);

    /// Called at most once, after all instances, when the model has voxels.
    fn set_camera(&mut self, framing: CameraFraming);
}

/// Feeds `model` into `builder`.
///
/// Materials are created lazily in first-reference order. A [`Material`] whose
/// id equals the palette index is passed along as the material's source.
pub fn build_scene<B: SceneBuilder + ?Sized>(model: &VoxModel, builder: &mut B) {
    let mut created = [false; 256];

    for (ordinal, voxel) in model.voxels.iter().enumerate() {
        let index = voxel.color_index;

        if !created[index as usize] {
            created[index as usize] = true;
            let color = model.palette.get(index).to_unit();
            builder.add_material(index, color, model.material(index as i32));
        }

        builder.add_instance(ordinal, voxel.position().as_vec3(), index);
    }

    if let Some(framing) = CameraFraming::from_extent(&model.extent) {
        debug!(
            "Camera target {:?}, radius {:.3}",
            framing.target, framing.radius
        );
        builder.set_camera(framing);
    }
}

/// A material planned for a palette index.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedMaterial {
    pub index: u8,
    pub color: [f64; 4],
    pub source: Option<Material>,
}

/// A voxel instance bound to a planned material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedInstance {
    pub ordinal: usize,
    pub position: Vec3,
    pub material_index: u8,
}

/// [`SceneBuilder`] that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct ScenePlan {
    pub materials: Vec<PlannedMaterial>,
    pub instances: Vec<PlannedInstance>,
    pub camera: Option<CameraFraming>,
    lookup: FxHashMap<u8, usize>,
}

impl ScenePlan {
    #[must_use]
    pub fn from_model(model: &VoxModel) -> Self {
        let mut plan = Self::default();
        build_scene(model, &mut plan);
        plan
    }

    /// The material an instance is bound to.
    #[must_use]
    pub fn material_for(&self, instance: &PlannedInstance) -> Option<&PlannedMaterial> {
        self.lookup
            .get(&instance.material_index)
            .map(|slot| &self.materials[*slot])
    }
}

impl SceneBuilder for ScenePlan {
    fn add_material(&mut self, index: u8, color: [f64; 4], source: Option<&Material>) {
        self.lookup.insert(index, self.materials.len());
        self.materials.push(PlannedMaterial {
            index,
            color,
            source: source.cloned(),
        });
    }

    fn add_instance(&mut self, ordinal: usize, position: Vec3, material_index: u8) {
        self.instances.push(PlannedInstance {
            ordinal,
            position,
            material_index,
        });
    }

    fn set_camera(&mut self, framing: CameraFraming) {
        self.camera = Some(framing);
    }
}
