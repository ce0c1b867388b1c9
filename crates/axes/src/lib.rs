use glam::Vec3;

/// Number of layers along one axis of the puzzle.
pub const NUM_LAYERS: u8 = 3;
/// Total number of twistable layers: three per axis.
pub const NUM_GLOBAL_LAYERS: u8 = NUM_LAYERS * 3;

/// One of the three world axes a layer can rotate about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub const fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }

    pub const fn vector(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Offset of this axis's layer block in the global layer numbering.
    ///
    /// Layers are numbered X-first: `0..3` along X, `3..6` along Y,
    /// `6..9` along Z.
    pub const fn layer_offset(self) -> u8 {
        match self {
            Axis::X => 0,
            Axis::Y => NUM_LAYERS,
            Axis::Z => 2 * NUM_LAYERS,
        }
    }

    /// Global layer index for the given per-axis bin (`0..NUM_LAYERS`).
    pub const fn global_layer(self, bin: u8) -> u8 {
        self.layer_offset() + bin
    }

    /// Axis owning a global layer index, or `None` when out of range.
    pub const fn of_global_layer(layer: u8) -> Option<Axis> {
        match layer {
            0..=2 => Some(Axis::X),
            3..=5 => Some(Axis::Y),
            6..=8 => Some(Axis::Z),
            _ => None,
        }
    }

    /// Component of `v` along this axis.
    pub const fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// One of the six outer faces of the assembled puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    pub const fn index(self) -> usize {
        match self {
            Face::Front => 0,
            Face::Back => 1,
            Face::Left => 2,
            Face::Right => 3,
            Face::Top => 4,
            Face::Bottom => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Left => "left",
            Face::Right => "right",
            Face::Top => "top",
            Face::Bottom => "bottom",
        }
    }

    /// Outward unit normal of the face.
    ///
    /// The puzzle uses a left-handed view space: front is the face nearest
    /// the default camera, at negative Z.
    pub const fn normal(self) -> Vec3 {
        match self {
            Face::Front => Vec3::NEG_Z,
            Face::Back => Vec3::Z,
            Face::Left => Vec3::NEG_X,
            Face::Right => Vec3::X,
            Face::Top => Vec3::Y,
            Face::Bottom => Vec3::NEG_Y,
        }
    }

    /// Resolve which face a picking hit point lies on.
    ///
    /// A hit point returned by the face-rectangle intersection sits on one
    /// of the six planes `±half_face_length`; compare each coordinate
    /// against that plane within `epsilon`.
    pub fn from_hit_point(hit: Vec3, half_face_length: f32, epsilon: f32) -> Option<Face> {
        if (hit.z + half_face_length).abs() < epsilon {
            Some(Face::Front)
        } else if (hit.z - half_face_length).abs() < epsilon {
            Some(Face::Back)
        } else if (hit.x + half_face_length).abs() < epsilon {
            Some(Face::Left)
        } else if (hit.x - half_face_length).abs() < epsilon {
            Some(Face::Right)
        } else if (hit.y - half_face_length).abs() < epsilon {
            Some(Face::Top)
        } else if (hit.y + half_face_length).abs() < epsilon {
            Some(Face::Bottom)
        } else {
            None
        }
    }

    /// Choose the twist axis from the in-face drag delta.
    ///
    /// A drag predominantly along one in-face direction spins the layer
    /// about the perpendicular in-plane axis: on the front/back faces the X
    /// and Y deltas compete, on left/right Y and Z, on top/bottom X and Z.
    pub fn twist_axis(self, previous_hit: Vec3, current_hit: Vec3) -> Axis {
        let abs_dx = (previous_hit.x - current_hit.x).abs();
        let abs_dy = (previous_hit.y - current_hit.y).abs();
        let abs_dz = (previous_hit.z - current_hit.z).abs();

        match self {
            Face::Front | Face::Back => {
                if abs_dx < abs_dy {
                    Axis::X
                } else {
                    Axis::Y
                }
            }
            Face::Left | Face::Right => {
                if abs_dy < abs_dz {
                    Axis::Y
                } else {
                    Axis::Z
                }
            }
            Face::Top | Face::Bottom => {
                if abs_dx < abs_dz {
                    Axis::X
                } else {
                    Axis::Z
                }
            }
        }
    }

    /// Twist direction for a pointer-motion delta on this face.
    ///
    /// `delta` is `previous_vector - current_vector` in model space.
    /// Clockwise is positive when looking along the axis toward the origin.
    /// Face/axis combinations that cannot drive a twist yield `Unknown` and
    /// must contribute a zero angle for that sample.
    pub fn twist_direction(self, axis: Axis, delta: Vec3) -> TwistDirection {
        use TwistDirection::{Clockwise, CounterClockwise, Unknown};

        match (axis, self) {
            (Axis::X, Face::Front) => signed(delta.y > 0.0, CounterClockwise, Clockwise),
            (Axis::X, Face::Back) => signed(delta.y < 0.0, CounterClockwise, Clockwise),
            (Axis::X, Face::Top) => signed(delta.z > 0.0, CounterClockwise, Clockwise),
            (Axis::X, Face::Bottom) => signed(delta.z < 0.0, CounterClockwise, Clockwise),
            (Axis::X, Face::Left) | (Axis::X, Face::Right) => Unknown,

            (Axis::Y, Face::Front) => signed(delta.x < 0.0, CounterClockwise, Clockwise),
            (Axis::Y, Face::Back) => signed(delta.x > 0.0, CounterClockwise, Clockwise),
            (Axis::Y, Face::Left) => signed(delta.z > 0.0, CounterClockwise, Clockwise),
            (Axis::Y, Face::Right) => signed(delta.z < 0.0, CounterClockwise, Clockwise),
            (Axis::Y, Face::Top) | (Axis::Y, Face::Bottom) => Unknown,

            (Axis::Z, Face::Left) => signed(delta.y < 0.0, CounterClockwise, Clockwise),
            (Axis::Z, Face::Right) => signed(delta.y > 0.0, CounterClockwise, Clockwise),
            (Axis::Z, Face::Top) => signed(delta.x < 0.0, CounterClockwise, Clockwise),
            (Axis::Z, Face::Bottom) => signed(delta.x > 0.0, CounterClockwise, Clockwise),
            (Axis::Z, Face::Front) | (Axis::Z, Face::Back) => Unknown,
        }
    }
}

const fn signed(
    counter: bool,
    if_counter: TwistDirection,
    otherwise: TwistDirection,
) -> TwistDirection {
    if counter {
        if_counter
    } else {
        otherwise
    }
}

/// Sense of an in-progress layer twist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwistDirection {
    Clockwise,
    CounterClockwise,
    /// The face/axis combination cannot determine a direction; treat the
    /// sample as a zero-angle contribution.
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_layer_numbering_is_axis_major() {
        assert_eq!(Axis::X.global_layer(0), 0);
        assert_eq!(Axis::X.global_layer(2), 2);
        assert_eq!(Axis::Y.global_layer(0), 3);
        assert_eq!(Axis::Z.global_layer(2), 8);

        for layer in 0..NUM_GLOBAL_LAYERS {
            let axis = Axis::of_global_layer(layer).expect("layer in range");
            assert!(layer >= axis.layer_offset());
            assert!(layer < axis.layer_offset() + NUM_LAYERS);
        }
        assert_eq!(Axis::of_global_layer(NUM_GLOBAL_LAYERS), None);
    }

    #[test]
    fn hit_point_resolves_to_face_planes() {
        let half = 15.15;
        let hit = Vec3::new(3.0, -4.0, -half);
        assert_eq!(Face::from_hit_point(hit, half, 1e-3), Some(Face::Front));

        let hit = Vec3::new(half, 0.0, 0.0);
        assert_eq!(Face::from_hit_point(hit, half, 1e-3), Some(Face::Right));

        // An interior point is on no face plane.
        let hit = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Face::from_hit_point(hit, half, 1e-3), None);
    }

    #[test]
    fn dominant_in_face_delta_picks_perpendicular_axis() {
        let a = Vec3::new(0.0, 0.0, -15.15);
        // Horizontal drag on the front face spins about Y.
        let b = Vec3::new(5.0, 0.5, -15.15);
        assert_eq!(Face::Front.twist_axis(a, b), Axis::Y);
        // Vertical drag on the front face spins about X.
        let b = Vec3::new(0.5, 5.0, -15.15);
        assert_eq!(Face::Front.twist_axis(a, b), Axis::X);

        let a = Vec3::new(15.15, 0.0, 0.0);
        // Depth-dominant drag on the right face spins about Y.
        let b = Vec3::new(15.15, 0.5, 6.0);
        assert_eq!(Face::Right.twist_axis(a, b), Axis::Y);
        // Vertical drag spins about Z.
        let b = Vec3::new(15.15, 6.0, 0.5);
        assert_eq!(Face::Right.twist_axis(a, b), Axis::Z);

        let a = Vec3::new(0.0, 15.15, 0.0);
        let b = Vec3::new(6.0, 15.15, 0.5);
        assert_eq!(Face::Top.twist_axis(a, b), Axis::Z);
    }

    #[test]
    fn direction_table_matches_reference_cases() {
        // Drag upward on the front face (previous below current): delta.y < 0
        // spins clockwise about X.
        let delta = Vec3::new(0.0, -1.0, 0.0);
        assert_eq!(
            Face::Front.twist_direction(Axis::X, delta),
            TwistDirection::Clockwise
        );
        assert_eq!(
            Face::Front.twist_direction(Axis::X, -delta),
            TwistDirection::CounterClockwise
        );

        let delta = Vec3::new(-1.0, 0.0, 0.0);
        assert_eq!(
            Face::Top.twist_direction(Axis::Z, delta),
            TwistDirection::CounterClockwise
        );

        // A face that lies in the rotation plane of the axis cannot decide.
        assert_eq!(
            Face::Left.twist_direction(Axis::X, delta),
            TwistDirection::Unknown
        );
        assert_eq!(
            Face::Back.twist_direction(Axis::Z, delta),
            TwistDirection::Unknown
        );
    }
}
