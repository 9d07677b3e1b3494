pub mod activation;
pub mod constraint;
pub mod controller;
pub mod params;
pub mod state;

pub mod state_tests;

pub use activation::DoorMotion;
pub use controller::DoorController;
pub use state::ControllerState;
