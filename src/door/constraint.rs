/***************************************/
/*        3rd party libraries          */
/***************************************/
use nalgebra::Translation3;
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{DoorDirection, Pose};

/**
 * Rectangular bound on the door's planar position.
 *
 * Computed once from the spawn pose. A left door travels from its spawn
 * point towards +X/+Y, a right door towards -X/-Y, so the spawn point is
 * always one corner of the rectangle.
 *
 * The door has no engine-side position limit. Travel is bounded only by
 * re-applying `clamp_pose` after every physics step.
 */
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct TravelEnvelope {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl TravelEnvelope {
    /// `max_trans_dist` must be non-negative, which keeps `min <= max`.
    pub fn from_spawn(
        spawn_x: f64,
        spawn_y: f64,
        direction: DoorDirection,
        max_trans_dist: f64,
    ) -> TravelEnvelope {
        match direction {
            DoorDirection::Right => TravelEnvelope {
                min_x: spawn_x - max_trans_dist,
                max_x: spawn_x,
                min_y: spawn_y - max_trans_dist,
                max_y: spawn_y,
            },
            DoorDirection::Left => TravelEnvelope {
                min_x: spawn_x,
                max_x: spawn_x + max_trans_dist,
                min_y: spawn_y,
                max_y: spawn_y + max_trans_dist,
            },
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Returns `pose` with X and Y pulled into the envelope. Z and the
    /// rotation are copied through untouched.
    pub fn clamp_pose(&self, pose: &Pose) -> Pose {
        let position = pose.translation.vector;
        let x = clamp_axis(position.x, self.min_x, self.max_x);
        let y = clamp_axis(position.y, self.min_y, self.max_y);

        Pose::from_parts(Translation3::new(x, y, position.z), pose.rotation)
    }
}

/// A NaN coordinate has no meaningful side, it lands on `min`.
fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if value > max {
        max
    } else if value < min {
        min
    } else if value.is_nan() {
        min
    } else {
        value
    }
}
