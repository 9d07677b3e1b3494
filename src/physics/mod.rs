pub mod body;
pub mod kinematic;

pub use body::{BodyId, PhysicsWorld, RigidBody};
pub use kinematic::KinematicWorld;
