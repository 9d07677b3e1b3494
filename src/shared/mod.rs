pub mod macros;
pub mod structs;

pub use structs::Direction;
pub use structs::DoorCommand;
pub use structs::DoorDirection;
pub use structs::ElevatorId;
pub use structs::Pose;
pub use structs::Velocity;
pub use structs::UNKNOWN_FLOOR;
