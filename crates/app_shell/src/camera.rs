use arcball::ArcBall;
use cube_model::Ray;
use glam::{Mat4, Vec2, Vec3};
use settings::CameraSettings;

/// One wheel notch as reported by the platform.
pub const WHEEL_NOTCH: f32 = 120.0;

/// Orbit camera around a fixed look-at point.
///
/// Right-button drags feed the trackball; the camera eye is the look-at
/// point pushed back along the inverse-rotated view axis. Wheel deltas
/// accumulate across events and are consumed exactly once per frame, so
/// zoom speed does not depend on how the platform batches wheel events.
pub struct OrbitCamera {
    arcball: ArcBall,
    lookat: Vec3,
    radius: f32,
    min_radius: f32,
    max_radius: f32,
    zoom_sensitivity: f32,
    pending_wheel: f32,
    fov_y: f32,
    near_plane: f32,
    far_plane: f32,
    width: f32,
    height: f32,
    view: Mat4,
    projection: Mat4,
}

impl OrbitCamera {
    pub fn new(settings: &CameraSettings, width: f32, height: f32) -> Self {
        let mut camera = Self {
            arcball: ArcBall::new(width, height, 1.0),
            lookat: Vec3::ZERO,
            radius: settings.initial_radius,
            min_radius: settings.min_radius,
            max_radius: settings.max_radius,
            zoom_sensitivity: settings.zoom_sensitivity,
            pending_wheel: 0.0,
            fov_y: settings.fov_degrees.to_radians(),
            near_plane: settings.near_plane,
            far_plane: settings.far_plane,
            width,
            height,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.refresh_view();
        camera.refresh_projection();
        camera
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
        self.arcball.set_viewport(self.width, self.height);
        self.refresh_projection();
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn eye(&self) -> Vec3 {
        let inverse = self.arcball.rotation().inverse();
        self.lookat - (inverse * Vec3::Z) * self.radius
    }

    pub fn begin_orbit(&mut self, pointer: Vec2) {
        self.arcball.begin(pointer);
    }

    pub fn orbit_to(&mut self, pointer: Vec2) {
        self.arcball.update(pointer);
        self.refresh_view();
    }

    pub fn end_orbit(&mut self) {
        self.arcball.end();
    }

    pub fn is_orbiting(&self) -> bool {
        self.arcball.is_dragging()
    }

    /// Queue a wheel delta, in notch units of [`WHEEL_NOTCH`].
    pub fn on_wheel(&mut self, delta: f32) {
        self.pending_wheel += delta;
    }

    /// Per-frame tick: consume the queued wheel delta and rebuild the view.
    pub fn on_frame(&mut self) {
        if self.pending_wheel != 0.0 {
            self.radius -= self.pending_wheel * self.radius * 0.1 / 360.0 * self.zoom_sensitivity;
            self.radius = self.radius.clamp(self.min_radius, self.max_radius);
            self.pending_wheel = 0.0;
        }
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        let inverse = self.arcball.rotation().inverse();
        let eye = self.lookat - (inverse * Vec3::Z) * self.radius;
        let up = inverse * Vec3::Y;
        self.view = Mat4::look_at_lh(eye, self.lookat, up);
    }

    fn refresh_projection(&mut self) {
        let aspect = self.width / self.height;
        self.projection = Mat4::perspective_lh(self.fov_y, aspect, self.near_plane, self.far_plane);
    }

    /// View-space direction of a screen position, before the view inverse.
    fn view_direction(&self, screen: Vec2) -> Vec3 {
        let p00 = self.projection.x_axis.x;
        let p11 = self.projection.y_axis.y;
        Vec3::new(
            ((2.0 * screen.x / self.width) - 1.0) / p00,
            ((-2.0 * screen.y / self.height) + 1.0) / p11,
            1.0,
        )
    }

    /// Model-space picking ray under the cursor.
    pub fn picking_ray(&self, screen: Vec2) -> Ray {
        let inverse = self.view.inverse();
        Ray {
            origin: inverse.transform_point3(Vec3::ZERO),
            direction: inverse
                .transform_vector3(self.view_direction(screen))
                .normalize(),
        }
    }

    /// Model-space screen vector used by the twist direction tables.
    ///
    /// The view-space point at depth one is carried through the view
    /// inverse as a point and then normalized, matching the picking-ray
    /// unprojection contract.
    pub fn screen_vector(&self, screen: Vec2) -> Vec3 {
        self.view
            .inverse()
            .transform_point3(self.view_direction(screen))
            .normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(&CameraSettings::default(), 800.0, 600.0)
    }

    #[test]
    fn default_placement_looks_down_positive_z() {
        let camera = camera();
        assert!((camera.eye() - Vec3::new(0.0, 0.0, -100.0)).length() < 1e-4);
        // The look-at point sits straight ahead in view space.
        let target = camera.view().transform_point3(Vec3::ZERO);
        assert!(target.x.abs() < 1e-4 && target.y.abs() < 1e-4);
        assert!((target.z - 100.0).abs() < 1e-3);
    }

    #[test]
    fn wheel_delta_is_consumed_once_per_frame() {
        let mut camera = camera();
        camera.on_wheel(WHEEL_NOTCH);
        camera.on_wheel(WHEEL_NOTCH * 2.0);
        camera.on_frame();
        let radius = camera.radius();
        assert!((radius - 90.0).abs() < 1e-3, "radius {radius}");

        // A second frame with no wheel input leaves the radius alone.
        camera.on_frame();
        assert_eq!(camera.radius(), radius);
    }

    #[test]
    fn zoom_is_clamped_to_the_radius_limits() {
        let mut camera = camera();
        camera.on_wheel(-WHEEL_NOTCH * 10_000.0);
        camera.on_frame();
        assert_eq!(camera.radius(), 300.0);

        camera.on_wheel(WHEEL_NOTCH * 10_000.0);
        camera.on_frame();
        assert_eq!(camera.radius(), 50.0);
    }

    #[test]
    fn center_screen_ray_runs_through_the_lookat_point() {
        let camera = camera();
        let ray = camera.picking_ray(Vec2::new(400.0, 300.0));
        assert!((ray.origin - Vec3::new(0.0, 0.0, -100.0)).length() < 1e-3);
        assert!((ray.direction - Vec3::Z).length() < 1e-4);

        let vector = camera.screen_vector(Vec2::new(400.0, 300.0));
        assert!((vector - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn off_center_ray_tilts_toward_the_cursor() {
        let camera = camera();
        let right = camera.picking_ray(Vec2::new(600.0, 300.0));
        assert!(right.direction.x > 0.0);
        let up = camera.picking_ray(Vec2::new(400.0, 150.0));
        assert!(up.direction.y > 0.0);
        assert!((right.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn orbit_drag_moves_the_eye_off_axis() {
        let mut camera = camera();
        camera.begin_orbit(Vec2::new(400.0, 300.0));
        camera.orbit_to(Vec2::new(500.0, 300.0));
        camera.end_orbit();
        camera.on_frame();
        let eye = camera.eye();
        assert!(eye.x.abs() > 1.0);
        assert!((eye.length() - 100.0).abs() < 1e-3);
    }
}
