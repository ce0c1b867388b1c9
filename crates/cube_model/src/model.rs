use axes::{Axis, Face, NUM_GLOBAL_LAYERS, NUM_LAYERS};
use glam::{Quat, Vec3};
use rand::Rng;
use render_api::MaterialId;
use std::f32::consts::FRAC_PI_2;
use thiserror::Error;

use crate::cube::SubCube;
use crate::pick::{self, Ray};
use crate::{CUBE_LENGTH, HALF_FACE_LENGTH, LAYER_GAP, PLANE_EPSILON};

#[derive(Debug, Error)]
pub enum CubeModelError {
    #[error("a twist gesture is already in progress")]
    TwistInProgress,
    #[error("piece center {0} does not fall inside any layer bin")]
    LayerClassification(Vec3),
}

/// The assembled puzzle: 27 pieces plus the mutual-exclusion flag that
/// keeps shuffle and restore out of a live twist gesture.
#[derive(Debug)]
pub struct CubeModel {
    cubes: Vec<SubCube>,
    twisting: bool,
}

impl CubeModel {
    /// Assemble a solved puzzle centered on the origin.
    pub fn new() -> Self {
        let mut model = Self {
            cubes: Vec::with_capacity(27),
            twisting: false,
        };
        model.assemble();
        model
    }

    fn assemble(&mut self) {
        self.cubes.clear();
        let pitch = CUBE_LENGTH + LAYER_GAP;
        for k in 0..NUM_LAYERS {
            for j in 0..NUM_LAYERS {
                for i in 0..NUM_LAYERS {
                    let min = Vec3::new(
                        i as f32 * pitch - HALF_FACE_LENGTH,
                        j as f32 * pitch - HALF_FACE_LENGTH,
                        k as f32 * pitch - HALF_FACE_LENGTH,
                    );
                    let max = min + Vec3::splat(CUBE_LENGTH);
                    let mut cube = SubCube::new(min, max);
                    cube.set_layers([
                        Axis::X.global_layer(i),
                        Axis::Y.global_layer(j),
                        Axis::Z.global_layer(k),
                    ]);
                    self.cubes.push(cube);
                }
            }
        }
        self.assign_face_materials();
    }

    pub fn cubes(&self) -> &[SubCube] {
        &self.cubes
    }

    pub fn half_face_length(&self) -> f32 {
        HALF_FACE_LENGTH
    }

    /// Whether a twist gesture currently owns the model.
    pub fn is_twisting(&self) -> bool {
        self.twisting
    }

    /// Claim the model for a twist gesture.
    pub fn begin_rotation(&mut self) -> Result<(), CubeModelError> {
        if self.twisting {
            return Err(CubeModelError::TwistInProgress);
        }
        self.twisting = true;
        Ok(())
    }

    /// Release the claim taken by [`begin_rotation`](Self::begin_rotation).
    pub fn finish_rotation(&mut self) {
        self.twisting = false;
    }

    /// Per-axis layer bin for a coordinate translated into `[0, FACE_LENGTH]`.
    ///
    /// Bins are the piece extents along the axis, bounds inclusive; a
    /// coordinate landing exactly in an inter-layer gap belongs to no bin.
    pub fn layer_bin(coord: f32) -> Option<u8> {
        let pitch = CUBE_LENGTH + LAYER_GAP;
        for bin in 0..NUM_LAYERS {
            let lower = bin as f32 * pitch;
            let upper = (bin + 1) as f32 * pitch - LAYER_GAP;
            if coord >= lower && coord <= upper {
                return Some(bin);
            }
        }
        None
    }

    /// Global layer containing `point` along `axis`, if any.
    pub fn layer_for_point(axis: Axis, point: Vec3) -> Option<u8> {
        Self::layer_bin(axis.component(point) + HALF_FACE_LENGTH).map(|bin| axis.global_layer(bin))
    }

    /// Recompute every piece's three layer ids from its center.
    pub fn reclassify_layers(&mut self) -> Result<(), CubeModelError> {
        for cube in &mut self.cubes {
            let center = cube.center();
            let mut layers = [0u8; 3];
            for (slot, axis) in Axis::ALL.into_iter().enumerate() {
                let bin = Self::layer_bin(axis.component(center) + HALF_FACE_LENGTH)
                    .ok_or(CubeModelError::LayerClassification(center))?;
                layers[slot] = axis.global_layer(bin);
            }
            cube.set_layers(layers);
        }
        Ok(())
    }

    /// Assign the six outer materials to the piece faces lying on the hull.
    ///
    /// Interior faces get `None`. Materials stay attached to piece-local
    /// faces afterwards; twists reorient them through the world matrix.
    pub fn assign_face_materials(&mut self) {
        for cube in &mut self.cubes {
            for face in Face::ALL {
                let on_hull = match face {
                    Face::Front => (cube.min_corner().z + HALF_FACE_LENGTH).abs() < PLANE_EPSILON,
                    Face::Back => (cube.max_corner().z - HALF_FACE_LENGTH).abs() < PLANE_EPSILON,
                    Face::Left => (cube.min_corner().x + HALF_FACE_LENGTH).abs() < PLANE_EPSILON,
                    Face::Right => (cube.max_corner().x - HALF_FACE_LENGTH).abs() < PLANE_EPSILON,
                    Face::Top => (cube.max_corner().y - HALF_FACE_LENGTH).abs() < PLANE_EPSILON,
                    Face::Bottom => (cube.min_corner().y + HALF_FACE_LENGTH).abs() < PLANE_EPSILON,
                };
                let material = on_hull.then(|| MaterialId(face.index() as u8));
                cube.set_face_material(face, material);
            }
        }
    }

    /// Fold a visual rotation into every piece of a layer.
    ///
    /// Logical footprints and layer ids are untouched; this is the live
    /// feedback path of a drag in progress.
    pub fn rotate_layer(&mut self, layer: u8, rotation: Quat) {
        for cube in self.cubes.iter_mut().filter(|c| c.in_layer(layer)) {
            cube.rotate(rotation);
        }
    }

    /// Commit `quarters` quarter turns of a layer to the logical state.
    ///
    /// Rotates the member footprints by the exact multiple of 90 degrees
    /// and reclassifies. The visual orientation is not touched here; by the
    /// time a gesture commits, the live rotation already sums to the same
    /// multiple.
    pub fn apply_quarter_turn(&mut self, layer: u8, quarters: u8) -> Result<(), CubeModelError> {
        let quarters = quarters % 4;
        if quarters == 0 {
            return Ok(());
        }
        let Some(axis) = Axis::of_global_layer(layer) else {
            return Ok(());
        };
        let rotation = Quat::from_axis_angle(axis.vector(), quarters as f32 * FRAC_PI_2);
        for cube in self.cubes.iter_mut().filter(|c| c.in_layer(layer)) {
            cube.rotate_corners(rotation);
        }
        self.reclassify_layers()
    }

    /// Nearest outer face hit by a model-space ray.
    pub fn pick(&self, ray: &Ray) -> Option<(Face, Vec3)> {
        pick::pick_face(ray, HALF_FACE_LENGTH)
    }

    /// Apply `twists` random quarter turns, one random layer each, with no
    /// animation.
    pub fn shuffle<R: Rng + ?Sized>(
        &mut self,
        twists: u32,
        rng: &mut R,
    ) -> Result<(), CubeModelError> {
        if self.twisting {
            return Err(CubeModelError::TwistInProgress);
        }
        for _ in 0..twists {
            let layer = rng.random_range(0..NUM_GLOBAL_LAYERS);
            if let Some(axis) = Axis::of_global_layer(layer) {
                let rotation = Quat::from_axis_angle(axis.vector(), FRAC_PI_2);
                self.rotate_layer(layer, rotation);
            }
            self.apply_quarter_turn(layer, 1)?;
        }
        tracing::debug!(twists, "puzzle shuffled");
        Ok(())
    }

    /// Rebuild the solved puzzle from scratch. Not an undo.
    pub fn restore(&mut self) -> Result<(), CubeModelError> {
        if self.twisting {
            return Err(CubeModelError::TwistInProgress);
        }
        self.assemble();
        tracing::debug!("puzzle restored");
        Ok(())
    }
}

impl Default for CubeModel {
    fn default() -> Self {
        Self::new()
    }
}
