/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::error::SetupError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default)]
    pub shared: SharedConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub elevators: Vec<ElevatorConfig>,
    #[serde(default)]
    pub doors: Vec<DoorConfig>,
    #[serde(default)]
    pub scenario: Vec<ScenarioStep>,
}

/// Parameters shared by every plugin in the process, resolved once by the host.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct SharedConfig {
    pub elevator_domain_space: Option<String>,
}

impl SharedConfig {
    pub fn elevator_domain_space(&self) -> Result<&str, SetupError> {
        self.elevator_domain_space
            .as_deref()
            .ok_or(SetupError::MissingElevatorDomainSpace)
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_period_ms: u64,
    pub dt: f64,
    pub ticks: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            tick_period_ms: 10,
            dt: 0.01,
            ticks: 1000,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ElevatorConfig {
    pub name: String,
    #[serde(default)]
    pub spawn: [f64; 3],
    #[serde(default)]
    pub floor_heights: Vec<f64>,
    pub speed: Option<f64>,
}

/// One `[[doors]]` entry. Every plugin field is optional here so that
/// defaults can be applied, with a warning, when the door is set up.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct DoorConfig {
    pub name: String,
    #[serde(default)]
    pub spawn: [f64; 3],
    #[serde(default)]
    pub yaw: f64,
    pub model_domain_space: Option<String>,
    pub elevator_name: Option<String>,
    pub door_direction: Option<String>,
    pub max_trans_dist: Option<f64>,
    pub speed: Option<f64>,
    #[serde(default)]
    pub gate_on_active: bool,
}

/**
 * Inbound messages published by the host when `tick` is reached.
 *
 * `dispatch` sends the cars to a floor the way a dispatcher does: the door
 * override is released first, then the target floor follows. `target_floor`
 * publishes the floor alone and leaves any door override in place.
 */
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ScenarioStep {
    pub tick: u64,
    pub dispatch: Option<i32>,
    pub target_floor: Option<i32>,
    pub door: Option<u8>,
    pub active: Option<Vec<u32>>,
    pub speed: Option<f64>,
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &str) -> Result<Config, SetupError> {
    let config_str = fs::read_to_string(path).map_err(|source| SetupError::ConfigRead {
        path: path.to_string(),
        source,
    })?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, SetupError> {
    Ok(toml::from_str(config_str)?)
}
