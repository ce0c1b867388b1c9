use axes::Face;
use glam::{Mat4, Quat, Vec3};
use render_api::MaterialId;

/// One of the 27 pieces of the puzzle.
///
/// The piece's logical footprint is an axis-aligned box in assembly space;
/// its accumulated twists live in a unit quaternion, renormalized after
/// every composition, and the world matrix is derived from it on demand.
#[derive(Debug, Clone)]
pub struct SubCube {
    min_corner: Vec3,
    max_corner: Vec3,
    center: Vec3,
    orientation: Quat,
    /// Global layer id per axis: one in 0..3 (X), one in 3..6 (Y), one in
    /// 6..9 (Z).
    layers: [u8; 3],
    face_materials: [Option<MaterialId>; 6],
}

impl SubCube {
    pub fn new(min_corner: Vec3, max_corner: Vec3) -> Self {
        Self {
            min_corner,
            max_corner,
            center: (min_corner + max_corner) / 2.0,
            orientation: Quat::IDENTITY,
            layers: [0; 3],
            face_materials: [None; 6],
        }
    }

    pub fn min_corner(&self) -> Vec3 {
        self.min_corner
    }

    pub fn max_corner(&self) -> Vec3 {
        self.max_corner
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation)
    }

    pub fn layers(&self) -> [u8; 3] {
        self.layers
    }

    pub fn set_layers(&mut self, layers: [u8; 3]) {
        self.layers = layers;
    }

    pub fn in_layer(&self, layer: u8) -> bool {
        self.layers.contains(&layer)
    }

    pub fn face_material(&self, face: Face) -> Option<MaterialId> {
        self.face_materials[face.index()]
    }

    pub fn face_materials(&self) -> [Option<MaterialId>; 6] {
        self.face_materials
    }

    pub fn set_face_material(&mut self, face: Face, material: Option<MaterialId>) {
        self.face_materials[face.index()] = material;
    }

    /// Fold a rotation into the piece's visual orientation.
    pub fn rotate(&mut self, rotation: Quat) {
        self.orientation = (rotation * self.orientation).normalize();
    }

    /// Rotate the logical footprint.
    ///
    /// Both corners move through the rotation and the result is re-sorted
    /// componentwise so min stays min. Only exact quarter turns keep the
    /// footprint axis-aligned; callers must not pass anything else.
    pub fn rotate_corners(&mut self, rotation: Quat) {
        let a = rotation * self.min_corner;
        let b = rotation * self.max_corner;
        self.min_corner = a.min(b);
        self.max_corner = a.max(b);
        self.center = (self.min_corner + self.max_corner) / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn corner_rotation_keeps_min_below_max() {
        let mut cube = SubCube::new(Vec3::new(5.15, -5.0, -15.15), Vec3::new(15.15, 5.0, -5.15));
        let quarter = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        cube.rotate_corners(quarter);
        assert!(cube.min_corner().x <= cube.max_corner().x);
        assert!(cube.min_corner().y <= cube.max_corner().y);
        assert!(cube.min_corner().z <= cube.max_corner().z);
        let center = (cube.min_corner() + cube.max_corner()) / 2.0;
        assert!((center - cube.center()).length() < 1e-6);
    }

    #[test]
    fn four_quarter_turns_restore_the_footprint() {
        let initial = SubCube::new(Vec3::new(5.15, -5.0, -15.15), Vec3::new(15.15, 5.0, -5.15));
        let mut cube = initial.clone();
        let quarter = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        for _ in 0..4 {
            cube.rotate_corners(quarter);
        }
        assert!((cube.min_corner() - initial.min_corner()).length() < 1e-4);
        assert!((cube.max_corner() - initial.max_corner()).length() < 1e-4);
    }

    #[test]
    fn orientation_stays_normalized() {
        let mut cube = SubCube::new(Vec3::splat(-5.0), Vec3::splat(5.0));
        let step = Quat::from_axis_angle(Vec3::new(0.6, 0.8, 0.0), 0.013);
        for _ in 0..10_000 {
            cube.rotate(step);
        }
        assert!((cube.orientation().length() - 1.0).abs() < 1e-5);
    }
}
