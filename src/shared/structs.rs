/***************************************/
/*        3rd party libraries          */
/***************************************/
use nalgebra::{Isometry3, Vector3};
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*             Constants               */
/***************************************/
pub const ELEV_DOOR_STATE_CLOSE: u8 = 0;
pub const ELEV_DOOR_STATE_OPEN: u8 = 1;
pub const ELEV_DOOR_STATE_FREE: u8 = 2;

/// Reported by a car whose height matches none of its floors.
pub const UNKNOWN_FLOOR: i32 = -100;

/***************************************/
/*       Public data structures        */
/***************************************/
pub type Pose = Isometry3<f64>;
pub type Velocity = Vector3<f64>;

/// Numeric elevator reference, parsed from a car name such as `elevator_3`.
pub type ElevatorId = u32;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DoorCommand {
    Free,
    ForceOpen,
    ForceClose,
}

impl DoorCommand {
    pub fn to_u8(&self) -> u8 {
        match *self {
            DoorCommand::ForceClose => ELEV_DOOR_STATE_CLOSE,
            DoorCommand::ForceOpen => ELEV_DOOR_STATE_OPEN,
            DoorCommand::Free => ELEV_DOOR_STATE_FREE,
        }
    }
}

impl Default for DoorCommand {
    fn default() -> Self {
        DoorCommand::Free
    }
}

/// Wire values outside the three known states come back as `Err(raw)`.
impl TryFrom<u8> for DoorCommand {
    type Error = u8;

    fn try_from(item: u8) -> Result<Self, Self::Error> {
        match item {
            ELEV_DOOR_STATE_CLOSE => Ok(DoorCommand::ForceClose),
            ELEV_DOOR_STATE_OPEN => Ok(DoorCommand::ForceOpen),
            ELEV_DOOR_STATE_FREE => Ok(DoorCommand::Free),
            other => Err(other),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DoorDirection {
    Left,
    Right,
}

impl DoorDirection {
    pub fn parse(value: &str) -> Option<DoorDirection> {
        match value {
            "left" => Some(DoorDirection::Left),
            "right" => Some(DoorDirection::Right),
            _ => None,
        }
    }
}

impl Default for DoorDirection {
    fn default() -> Self {
        DoorDirection::Left
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Stop,
}
