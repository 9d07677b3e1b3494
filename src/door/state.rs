/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{DoorCommand, ElevatorId, UNKNOWN_FLOOR};
use crate::transport::InboundEvent;

/**
 * Inputs of the activation rules, written only by inbound events.
 *
 * # Fields
 * - `target_floor`:            Floor the dispatcher sent the cars to.
 * - `estimated_current_floor`: Floor this door's car reports being at.
 * - `door_command`:            Manual override, `Free` when none.
 * - `is_active`:               This door's car is in the published active set.
 */
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    pub target_floor: i32,
    pub estimated_current_floor: i32,
    pub door_command: DoorCommand,
    pub is_active: bool,
}

impl Default for ControllerState {
    fn default() -> Self {
        ControllerState {
            target_floor: 0,
            estimated_current_floor: UNKNOWN_FLOOR,
            door_command: DoorCommand::Free,
            is_active: false,
        }
    }
}

/// What a single inbound event did to the state.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Updated,
    /// Estimated floor of another car, or a topic doors do not follow.
    Ignored,
    /// Unknown door command byte, previous command kept.
    Rejected(u8),
}

impl ControllerState {
    /// Applies one inbound event. Every update replaces the previous value.
    pub fn apply(
        &mut self,
        event: &InboundEvent,
        elevator_name: &str,
        elevator_id: ElevatorId,
    ) -> Applied {
        match event {
            InboundEvent::TargetFloor(floor) => {
                self.target_floor = *floor;
                Applied::Updated
            }
            InboundEvent::EstimatedFloor { elevator, floor } => {
                if elevator != elevator_name {
                    return Applied::Ignored;
                }
                self.estimated_current_floor = *floor;
                Applied::Updated
            }
            InboundEvent::DoorCommand(raw) => match DoorCommand::try_from(*raw) {
                Ok(command) => {
                    self.door_command = command;
                    Applied::Updated
                }
                Err(raw) => Applied::Rejected(raw),
            },
            InboundEvent::ActiveCars(active) => {
                self.is_active = active.iter().any(|id| *id == elevator_id);
                Applied::Updated
            }
            InboundEvent::CarParams { .. } => Applied::Ignored,
        }
    }
}
