pub mod scenario;
pub mod simulation;
pub mod trace;


pub use simulation::{forward_quit, Simulation};
pub use trace::TraceWriter;
