pub mod car;
pub mod car_tests;

pub use car::CarDriver;
