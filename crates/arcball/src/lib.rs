use glam::{Quat, Vec2, Vec3};

/// Quaternion rotations below this dot-product threshold collapse to
/// identity rather than producing a degenerate axis.
const MIN_ROTATION_EPSILON: f32 = 1.0e-6;

/// Virtual trackball mapping pointer drags to rotations.
///
/// Screen points project onto a hemisphere of `radius` (in fractions of the
/// half-viewport) facing the viewer; the rotation between two projected
/// points is the drag's incremental rotation. Points outside the sphere
/// silhouette are rescaled onto its rim, so every projection is unit length.
#[derive(Debug, Clone)]
pub struct ArcBall {
    width: f32,
    height: f32,
    radius: f32,
    dragging: bool,
    current_point: Vec3,
    rotation: Quat,
    last_increment: Quat,
}

impl ArcBall {
    pub fn new(width: f32, height: f32, radius: f32) -> Self {
        Self {
            width,
            height,
            radius,
            dragging: false,
            current_point: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            last_increment: Quat::IDENTITY,
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Cumulative rotation, including the drag in progress.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Rotation contributed by the most recent `update` alone.
    pub fn last_increment(&self) -> Quat {
        self.last_increment
    }

    /// Begin a drag at a screen position.
    ///
    /// Presses outside the viewport are ignored; the bottom edge is
    /// exclusive, matching the pixel rows actually drawn.
    pub fn begin(&mut self, screen: Vec2) {
        let inside = screen.x >= 0.0
            && screen.x <= self.width
            && screen.y >= 0.0
            && screen.y < self.height;
        if !inside {
            return;
        }
        self.dragging = true;
        self.current_point = self.screen_to_sphere(screen);
        self.last_increment = Quat::IDENTITY;
    }

    /// Advance the drag to a new screen position, folding the incremental
    /// rotation into the cumulative one.
    pub fn update(&mut self, screen: Vec2) {
        if !self.dragging {
            return;
        }
        let point = self.screen_to_sphere(screen);
        let increment = rotation_between(self.current_point, point);
        // Ball-point quaternions telescope: composing the per-sample
        // increments equals the single rotation from the drag's start
        // point to the current one, so the start point is not kept.
        self.rotation = (increment * self.rotation).normalize();
        self.last_increment = increment;
        self.current_point = point;
    }

    pub fn end(&mut self) {
        self.dragging = false;
    }

    /// Drop all accumulated rotation and any drag in progress.
    pub fn reset(&mut self) {
        self.dragging = false;
        self.current_point = Vec3::ZERO;
        self.rotation = Quat::IDENTITY;
        self.last_increment = Quat::IDENTITY;
    }

    /// Project a screen point onto the trackball hemisphere.
    ///
    /// X is mirrored so that dragging right rotates the scene the way the
    /// viewer expects; Y grows downward in screen space and is kept as-is.
    /// The result is always unit length: inside the silhouette the Z
    /// component completes the sphere, outside the point is rescaled onto
    /// the rim.
    pub fn screen_to_sphere(&self, screen: Vec2) -> Vec3 {
        let scale_x = self.radius * self.width / 2.0;
        let scale_y = self.radius * self.height / 2.0;
        let u = -(screen.x - self.width / 2.0) / scale_x;
        let v = (screen.y - self.height / 2.0) / scale_y;

        let mag = u * u + v * v;
        if mag > 1.0 {
            let scale = 1.0 / mag.sqrt();
            Vec3::new(u * scale, v * scale, 0.0)
        } else {
            Vec3::new(u, v, (1.0 - mag).sqrt())
        }
    }
}

/// Rotation carrying unit vector `from` onto unit vector `to`.
///
/// Built directly from the cross and dot products; coincident inputs fall
/// back to identity instead of normalizing a zero axis.
pub fn rotation_between(from: Vec3, to: Vec3) -> Quat {
    let axis = from.cross(to);
    let w = from.dot(to);
    let q = Quat::from_xyzw(axis.x, axis.y, axis.z, w);
    if q.length_squared() < MIN_ROTATION_EPSILON {
        Quat::IDENTITY
    } else {
        q.normalize()
    }
}
