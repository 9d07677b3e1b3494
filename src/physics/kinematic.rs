/***************************************/
/*        3rd party libraries          */
/***************************************/
use nalgebra::Vector3;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::physics::body::{BodyId, PhysicsWorld, RigidBody};
use crate::shared::{Pose, Velocity};

/// Free body with no mass, collisions or joint limits. Position follows velocity.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    name: String,
    pose: Pose,
    velocity: Velocity,
}

impl KinematicBody {
    pub fn new(name: &str, pose: Pose) -> KinematicBody {
        KinematicBody {
            name: name.to_string(),
            pose,
            velocity: Vector3::zeros(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl RigidBody for KinematicBody {
    fn world_pose(&self) -> Pose {
        self.pose
    }

    fn set_world_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    fn linear_velocity(&self) -> Velocity {
        self.velocity
    }

    fn set_linear_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }
}

/**
 * Minimal integrator used by the simulation host.
 *
 * Bodies are addressed by index and are never removed, so a `BodyId`
 * handed out by `spawn` stays valid for the lifetime of the world.
 */
#[derive(Debug, Default)]
pub struct KinematicWorld {
    bodies: Vec<KinematicBody>,
    elapsed: f64,
}

impl KinematicWorld {
    pub fn new() -> KinematicWorld {
        KinematicWorld::default()
    }

    pub fn spawn(&mut self, name: &str, pose: Pose) -> BodyId {
        self.bodies.push(KinematicBody::new(name, pose));
        BodyId(self.bodies.len() - 1)
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl PhysicsWorld for KinematicWorld {
    type Body = KinematicBody;

    fn find_body(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|body| body.name() == name)
            .map(BodyId)
    }

    fn body(&self, id: BodyId) -> Option<&KinematicBody> {
        self.bodies.get(id.0)
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut KinematicBody> {
        self.bodies.get_mut(id.0)
    }

    fn step(&mut self, dt: f64) {
        for body in self.bodies.iter_mut() {
            body.pose.translation.vector += body.velocity * dt;
        }
        self.elapsed += dt;
    }
}
