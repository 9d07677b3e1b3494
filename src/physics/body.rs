/***************************************/
/*        3rd party libraries          */
/***************************************/
use nalgebra::{UnitQuaternion, Vector3};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Pose, Velocity};

/**
 * Capability a physics engine exposes for a single rigid body.
 *
 * Controllers never own bodies. They hold a `BodyId` and borrow the body
 * through a `PhysicsWorld` for the duration of one phase of a tick. Each
 * supported engine binding provides one implementation of this trait.
 */
pub trait RigidBody {
    fn world_pose(&self) -> Pose;
    fn set_world_pose(&mut self, pose: Pose);
    fn linear_velocity(&self) -> Velocity;
    fn set_linear_velocity(&mut self, velocity: Velocity);

    fn world_position(&self) -> Vector3<f64> {
        self.world_pose().translation.vector
    }

    fn set_world_position(&mut self, position: Vector3<f64>) {
        let mut pose = self.world_pose();
        pose.translation.vector = position;
        self.set_world_pose(pose);
    }

    fn orientation(&self) -> UnitQuaternion<f64> {
        self.world_pose().rotation
    }

    fn set_orientation(&mut self, orientation: UnitQuaternion<f64>) {
        let mut pose = self.world_pose();
        pose.rotation = orientation;
        self.set_world_pose(pose);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

/// Owner of all bodies. Advances simulation time in `step`.
pub trait PhysicsWorld {
    type Body: RigidBody;

    fn find_body(&self, name: &str) -> Option<BodyId>;
    fn body(&self, id: BodyId) -> Option<&Self::Body>;
    fn body_mut(&mut self, id: BodyId) -> Option<&mut Self::Body>;
    fn step(&mut self, dt: f64);
}
