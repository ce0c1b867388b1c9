use arcball::ArcBall;
use axes::{Axis, Face, TwistDirection};
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::model::{CubeModel, CubeModelError};
use crate::pick::{FaceRect, Ray};

/// Result of a completed twist gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwistOutcome {
    pub layer: u8,
    /// Committed quarter turns, normalized into `0..4`.
    pub quarter_turns: u8,
    /// Corrective rotation applied on release to land on the snap point.
    pub residual: f32,
}

#[derive(Debug, Clone, Copy)]
enum TwistState {
    Idle,
    /// The press hit a face; axis and layer are still undecided.
    Aiming { face: Face, hit_point: Vec3 },
    /// Axis and layer are frozen; the angle accumulates.
    Twisting {
        face: Face,
        axis: Axis,
        layer: u8,
        total_angle: f32,
    },
}

/// Resolves a left-button drag into a layer twist.
///
/// The face is frozen at the press from the picking hit; the axis and layer
/// freeze at the first motion sample from the in-face hit-point motion,
/// re-intersecting the frozen face with each sample's ray. The direction is
/// re-derived every sample from the model-space screen vectors. On release
/// the accumulated angle snaps to the nearest quarter turn and the turn
/// count is committed to the model.
#[derive(Debug)]
pub struct TwistController {
    arcball: ArcBall,
    rotate_speed: f32,
    pointer_down: bool,
    previous_vector: Vec3,
    state: TwistState,
}

impl TwistController {
    pub fn new(width: f32, height: f32, arcball_radius: f32, rotate_speed: f32) -> Self {
        Self {
            arcball: ArcBall::new(width, height, arcball_radius),
            rotate_speed,
            pointer_down: false,
            previous_vector: Vec3::ZERO,
            state: TwistState::Idle,
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.arcball.set_viewport(width, height);
    }

    pub fn is_active(&self) -> bool {
        self.pointer_down
    }

    /// Start a gesture at a pointer press.
    ///
    /// `ray` and `screen_vector` are the press position unprojected into
    /// model space. The model is claimed for the whole press, hit or miss,
    /// so a shuffle cannot slide under a drag that started on empty space.
    /// Presses outside the viewport are ignored entirely.
    pub fn begin(
        &mut self,
        model: &mut CubeModel,
        ray: &Ray,
        pointer: Vec2,
        screen_vector: Vec3,
    ) -> Result<(), CubeModelError> {
        if self.pointer_down {
            return Ok(());
        }
        self.arcball.begin(pointer);
        if !self.arcball.is_dragging() {
            return Ok(());
        }
        model.begin_rotation()?;
        self.pointer_down = true;
        self.previous_vector = screen_vector;

        match model.pick(ray) {
            Some((face, hit_point)) => {
                tracing::debug!(face = face.label(), ?hit_point, "twist gesture armed");
                self.state = TwistState::Aiming { face, hit_point };
            }
            None => {
                self.state = TwistState::Idle;
            }
        }
        Ok(())
    }

    /// Feed a pointer-motion sample into the gesture.
    ///
    /// `ray` is the sample's picking ray; while the gesture is still
    /// aiming it re-intersects the frozen face so the axis comes from the
    /// hit-point motion across that face, not from the screen vectors.
    pub fn update(&mut self, model: &mut CubeModel, ray: &Ray, pointer: Vec2, screen_vector: Vec3) {
        if !self.pointer_down {
            return;
        }
        self.arcball.update(pointer);
        let current_vector = screen_vector;

        if let TwistState::Aiming { face, hit_point } = self.state {
            let rect = FaceRect::of(face, model.half_face_length());
            let Some(current_hit) = rect.intersect(ray) else {
                // The cursor slid off the picked face; keep aiming.
                self.previous_vector = current_vector;
                return;
            };
            let axis = face.twist_axis(hit_point, current_hit);
            match CubeModel::layer_for_point(axis, hit_point) {
                Some(layer) => {
                    tracing::debug!(axis = axis.label(), layer, "twist axis frozen");
                    self.state = TwistState::Twisting {
                        face,
                        axis,
                        layer,
                        total_angle: 0.0,
                    };
                }
                // The hit sits in an inter-layer gap; stay unarmed.
                None => {
                    self.previous_vector = current_vector;
                    return;
                }
            }
        }

        if let TwistState::Twisting {
            face,
            axis,
            layer,
            ref mut total_angle,
        } = self.state
        {
            let delta = self.previous_vector - current_vector;
            let magnitude =
                2.0 * self.arcball.last_increment().w.clamp(-1.0, 1.0).acos() * self.rotate_speed;
            let angle = match face.twist_direction(axis, delta) {
                TwistDirection::Clockwise => magnitude,
                TwistDirection::CounterClockwise => -magnitude,
                TwistDirection::Unknown => 0.0,
            };
            if angle != 0.0 {
                model.rotate_layer(layer, Quat::from_axis_angle(axis.vector(), angle));
                *total_angle += angle;
            }
        }

        self.previous_vector = current_vector;
    }

    /// Finish the gesture at pointer release, snapping to a quarter turn.
    pub fn end(&mut self, model: &mut CubeModel) -> Result<Option<TwistOutcome>, CubeModelError> {
        if !self.pointer_down {
            return Ok(None);
        }
        self.arcball.end();
        self.pointer_down = false;

        let state = std::mem::replace(&mut self.state, TwistState::Idle);
        let outcome = if let TwistState::Twisting {
            axis,
            layer,
            total_angle,
            ..
        } = state
        {
            let (residual, quarter_turns) = snap_to_quarter(total_angle);
            if residual != 0.0 {
                model.rotate_layer(layer, Quat::from_axis_angle(axis.vector(), residual));
            }
            model.apply_quarter_turn(layer, quarter_turns)?;
            tracing::debug!(layer, quarter_turns, residual, "twist committed");
            Some(TwistOutcome {
                layer,
                quarter_turns,
                residual,
            })
        } else {
            None
        };
        model.finish_rotation();
        Ok(outcome)
    }

    /// A cancelled gesture (focus loss, pointer capture break) ends exactly
    /// like a release.
    pub fn cancel(&mut self, model: &mut CubeModel) -> Result<(), CubeModelError> {
        self.end(model).map(|_| ())
    }
}

/// Reduce an accumulated drag angle to its nearest quarter-turn snap.
///
/// Returns the corrective rotation still to apply and the number of
/// committed quarter turns, normalized into `0..4` (a negative turn count
/// wraps: one counter-clockwise turn commits as three clockwise).
pub fn snap_to_quarter(total_angle: f32) -> (f32, u8) {
    let mut angle = total_angle;
    let mut turns: i32 = 0;
    let residual;

    if angle >= 0.0 {
        while angle >= FRAC_PI_2 {
            angle -= FRAC_PI_2;
            turns += 1;
        }
        if angle <= FRAC_PI_4 {
            residual = -angle;
        } else {
            turns += 1;
            residual = FRAC_PI_2 - angle;
        }
    } else {
        while angle <= -FRAC_PI_2 {
            angle += FRAC_PI_2;
            turns -= 1;
        }
        if angle >= -FRAC_PI_4 {
            residual = -angle;
        } else {
            turns -= 1;
            residual = -FRAC_PI_2 - angle;
        }
    }

    while turns < 0 {
        turns += 4;
    }
    (residual, (turns % 4) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_snap(total: f32, expected_turns: u8, expected_final: f32) {
        let (residual, turns) = snap_to_quarter(total);
        assert_eq!(turns, expected_turns, "turns for total {total}");
        let snapped = total + residual;
        assert!(
            (snapped - expected_final).abs() < 1e-5,
            "total {total} snapped to {snapped}, expected {expected_final}"
        );
    }

    #[test]
    fn small_angles_snap_back_to_zero() {
        assert_snap(0.0, 0, 0.0);
        assert_snap(0.3, 0, 0.0);
        assert_snap(-0.3, 0, 0.0);
        assert_snap(FRAC_PI_4, 0, 0.0);
    }

    #[test]
    fn angles_past_forty_five_degrees_commit_a_turn() {
        assert_snap(FRAC_PI_4 + 0.01, 1, FRAC_PI_2);
        assert_snap(FRAC_PI_2, 1, FRAC_PI_2);
        assert_snap(FRAC_PI_2 + 0.2, 1, FRAC_PI_2);
        assert_snap(3.0 * FRAC_PI_2 - 0.1, 3, 3.0 * FRAC_PI_2);
    }

    #[test]
    fn negative_turns_wrap_into_zero_to_three() {
        assert_snap(-FRAC_PI_2, 3, -FRAC_PI_2);
        assert_snap(-FRAC_PI_4 - 0.01, 3, -FRAC_PI_2);
        assert_snap(-2.0 * FRAC_PI_2 - 0.05, 2, -2.0 * FRAC_PI_2);
        assert_snap(-4.0 * FRAC_PI_2, 0, -4.0 * FRAC_PI_2);
    }

    #[test]
    fn full_revolutions_commit_no_net_turn() {
        assert_snap(4.0 * FRAC_PI_2, 0, 4.0 * FRAC_PI_2);
        assert_snap(5.0 * FRAC_PI_2 + 0.1, 1, 5.0 * FRAC_PI_2);
    }
}
