use axes::Face;
use glam::Vec3;

/// Rays with a determinant below this are parallel to the triangle plane.
const DETERMINANT_EPSILON: f32 = 1.0e-4;

/// Model-space picking ray. `direction` is unit length.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Möller–Trumbore ray/triangle intersection, both windings accepted.
///
/// Division is deferred until the barycentric tests pass; the determinant
/// sign is folded into the translation vector so one code path handles
/// front and back faces.
pub fn ray_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Vec3> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let p = ray.direction.cross(edge2);
    let mut det = edge1.dot(p);

    let translation = if det > 0.0 {
        ray.origin - v0
    } else {
        det = -det;
        v0 - ray.origin
    };
    if det < DETERMINANT_EPSILON {
        return None;
    }

    let u = translation.dot(p);
    if u < 0.0 || u > det {
        return None;
    }
    let q = translation.cross(edge1);
    let v = ray.direction.dot(q);
    if v < 0.0 || u + v > det {
        return None;
    }

    let distance = edge2.dot(q) / det;
    if distance < 0.0 {
        return None;
    }
    Some(ray.origin + ray.direction * distance)
}

/// One outer face of the puzzle hull as a pickable rectangle.
#[derive(Debug, Clone, Copy)]
pub struct FaceRect {
    pub face: Face,
    corners: [Vec3; 4],
}

impl FaceRect {
    /// The hull rectangle of `face` for a puzzle of the given half extent.
    pub fn of(face: Face, half: f32) -> Self {
        let corners = match face {
            Face::Front => [
                Vec3::new(-half, -half, -half),
                Vec3::new(half, -half, -half),
                Vec3::new(half, half, -half),
                Vec3::new(-half, half, -half),
            ],
            Face::Back => [
                Vec3::new(-half, -half, half),
                Vec3::new(half, -half, half),
                Vec3::new(half, half, half),
                Vec3::new(-half, half, half),
            ],
            Face::Left => [
                Vec3::new(-half, -half, -half),
                Vec3::new(-half, -half, half),
                Vec3::new(-half, half, half),
                Vec3::new(-half, half, -half),
            ],
            Face::Right => [
                Vec3::new(half, -half, -half),
                Vec3::new(half, -half, half),
                Vec3::new(half, half, half),
                Vec3::new(half, half, -half),
            ],
            Face::Top => [
                Vec3::new(-half, half, -half),
                Vec3::new(half, half, -half),
                Vec3::new(half, half, half),
                Vec3::new(-half, half, half),
            ],
            Face::Bottom => [
                Vec3::new(-half, -half, -half),
                Vec3::new(half, -half, -half),
                Vec3::new(half, -half, half),
                Vec3::new(-half, -half, half),
            ],
        };
        Self { face, corners }
    }

    /// Intersection as two triangles sharing the 0-2 diagonal.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let [c0, c1, c2, c3] = self.corners;
        ray_triangle(ray, c0, c1, c2).or_else(|| ray_triangle(ray, c0, c2, c3))
    }
}

/// Nearest outer face hit by the ray, by squared distance from its origin.
///
/// Ties keep the first face in enumeration order; that order is incidental,
/// not contractual.
pub fn pick_face(ray: &Ray, half: f32) -> Option<(Face, Vec3)> {
    let mut best: Option<(Face, Vec3, f32)> = None;
    for face in Face::ALL {
        if let Some(hit) = FaceRect::of(face, half).intersect(ray) {
            let dist_sq = (hit - ray.origin).length_squared();
            if best.map_or(true, |(_, _, d)| dist_sq < d) {
                best = Some((face, hit, dist_sq));
            }
        }
    }
    best.map(|(face, hit, _)| (face, hit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HALF_FACE_LENGTH;

    #[test]
    fn axial_ray_hits_the_near_face() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, -100.0),
            direction: Vec3::Z,
        };
        let (face, hit) = pick_face(&ray, HALF_FACE_LENGTH).expect("hit");
        assert_eq!(face, Face::Front);
        assert!((hit - Vec3::new(0.0, 0.0, -HALF_FACE_LENGTH)).length() < 1e-4);
    }

    #[test]
    fn ray_past_the_hull_misses() {
        let ray = Ray {
            origin: Vec3::new(HALF_FACE_LENGTH * 2.0, 0.0, -100.0),
            direction: Vec3::Z,
        };
        assert!(pick_face(&ray, HALF_FACE_LENGTH).is_none());
    }

    #[test]
    fn parallel_ray_is_rejected_by_the_determinant_guard() {
        let rect = FaceRect::of(Face::Front, HALF_FACE_LENGTH);
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, -HALF_FACE_LENGTH),
            direction: Vec3::X,
        };
        assert!(rect.intersect(&ray).is_none());
    }

    #[test]
    fn triangle_hit_lands_on_the_triangle_plane() {
        let ray = Ray {
            origin: Vec3::new(0.2, 0.3, -5.0),
            direction: Vec3::Z,
        };
        let hit = ray_triangle(
            &ray,
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .expect("hit");
        assert!(hit.z.abs() < 1e-5);
        assert!((hit.x - 0.2).abs() < 1e-5);

        // Behind the origin: no hit.
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::Z,
        };
        assert!(ray_triangle(
            &ray,
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn oblique_ray_prefers_the_nearer_face() {
        // From the front-left, aimed at the center: front and back both lie
        // on the ray, the front hit is closer.
        let origin = Vec3::new(-40.0, 0.0, -100.0);
        let ray = Ray {
            origin,
            direction: (-origin).normalize(),
        };
        let (face, _) = pick_face(&ray, HALF_FACE_LENGTH).expect("hit");
        assert!(face == Face::Front || face == Face::Left);
    }
}
