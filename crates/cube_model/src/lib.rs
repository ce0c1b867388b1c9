//! Puzzle model: the 27-piece cube, face picking, and the twist gesture
//! resolver.

pub mod cube;
pub mod model;
pub mod pick;
pub mod twist;

pub use cube::SubCube;
pub use model::{CubeModel, CubeModelError};
pub use pick::Ray;
pub use twist::{TwistController, TwistOutcome};

/// Edge length of one sub-cube.
pub const CUBE_LENGTH: f32 = 10.0;
/// Visual gap between adjacent layers.
pub const LAYER_GAP: f32 = 0.15;
/// Edge length of the assembled puzzle, gaps included.
pub const FACE_LENGTH: f32 = 3.0 * CUBE_LENGTH + 2.0 * LAYER_GAP;
/// Distance from the puzzle center to each outer face plane.
pub const HALF_FACE_LENGTH: f32 = FACE_LENGTH / 2.0;

/// Tolerance for point-on-plane tests against the outer face planes.
pub const PLANE_EPSILON: f32 = 1.0e-3;
