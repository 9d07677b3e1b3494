/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::door::state::ControllerState;
use crate::shared::DoorCommand;

/// Largest car/door height difference at which the car counts as level.
pub const HEIGHT_LEVEL_TOLERANCE: f64 = 1.5;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DoorMotion {
    Open,
    Close,
}

pub fn is_level(car_height: f64, door_height: f64) -> bool {
    (car_height - door_height).abs() <= HEIGHT_LEVEL_TOLERANCE
}

/**
 * Decides the door motion for one tick. First matching rule wins:
 *
 * 1. Car not level with the door, or not at the target floor: close.
 * 2. `ForceOpen`: open.
 * 3. `ForceClose`: close.
 * 4. `Free`: open.
 *
 * With `gate_on_active` set, a car outside the active set closes the door
 * before rule 1 is checked. Without it `is_active` is not consulted.
 */
pub fn decide(
    state: &ControllerState,
    car_height: f64,
    door_height: f64,
    gate_on_active: bool,
) -> DoorMotion {
    if gate_on_active && !state.is_active {
        return DoorMotion::Close;
    }

    // The car must be behind the door
    if !is_level(car_height, door_height)
        || state.estimated_current_floor != state.target_floor
    {
        return DoorMotion::Close;
    }

    match state.door_command {
        DoorCommand::ForceOpen => DoorMotion::Open,
        DoorCommand::ForceClose => DoorMotion::Close,
        DoorCommand::Free => DoorMotion::Open,
    }
}
