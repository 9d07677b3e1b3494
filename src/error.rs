//! Setup-time failures.
//!
//! Every variant is fatal: the host logs it and exits before the first tick.
//! Nothing on the tick path returns a `SetupError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    /// The door does not name the elevator it belongs to.
    #[error("door '{door}': elevator name not specified, an auto door can only exist with a corresponding elevator")]
    MissingElevatorName { door: String },

    /// The shared `elevator_domain_space` parameter is absent.
    #[error("parameter 'elevator_domain_space' does not exist, check the [shared] section")]
    MissingElevatorDomainSpace,

    /// The elevator name does not carry a numeric id after the domain prefix.
    #[error("elevator name '{name}' does not match domain space '{domain_space}' followed by a number")]
    InvalidElevatorName { name: String, domain_space: String },

    #[error("no body named '{0}' in the world")]
    UnknownBody(String),

    #[error("door '{door}': maximum translation distance {value} must be finite and non-negative")]
    InvalidTravelDistance { door: String, value: f64 },

    /// A negative speed would swap the open and close directions.
    #[error("door '{door}': sliding speed {value} must be finite and non-negative")]
    InvalidSlideSpeed { door: String, value: f64 },

    #[error("elevator '{elevator}': lift speed {value} must be finite and non-negative")]
    InvalidLiftSpeed { elevator: String, value: f64 },

    #[error("elevator '{0}': floor heights not specified, the car cannot function without known floor heights")]
    MissingFloorHeights(String),

    #[error("failed to read configuration file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to open trace file '{path}': {source}")]
    TraceOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
