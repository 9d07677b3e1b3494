/*
 * Unit tests for the inbound update handlers
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_initial_state
 * - test_floor_updates_overwrite
 * - test_estimated_floor_of_other_car_ignored
 * - test_car_params_leave_state_untouched
 * - test_door_command_updates
 * - test_unknown_door_command_keeps_previous
 * - test_active_set_membership
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod state_tests {
    use crate::door::state::Applied;
    use crate::door::ControllerState;
    use crate::shared::{DoorCommand, UNKNOWN_FLOOR};
    use crate::transport::InboundEvent;

    const ELEVATOR: &str = "elevator_2";
    const ELEVATOR_ID: u32 = 2;

    fn apply(state: &mut ControllerState, event: InboundEvent) -> Applied {
        state.apply(&event, ELEVATOR, ELEVATOR_ID)
    }

    #[test]
    fn test_initial_state() {
        let state = ControllerState::default();

        assert_eq!(state.target_floor, 0);
        assert_eq!(state.estimated_current_floor, UNKNOWN_FLOOR);
        assert_eq!(state.door_command, DoorCommand::Free);
        assert!(!state.is_active);
    }

    #[test]
    fn test_floor_updates_overwrite() {
        // Arrange
        let mut state = ControllerState::default();

        // Act
        apply(&mut state, InboundEvent::TargetFloor(4));
        apply(&mut state, InboundEvent::TargetFloor(-2));
        let applied = apply(
            &mut state,
            InboundEvent::EstimatedFloor {
                elevator: ELEVATOR.to_string(),
                floor: 7,
            },
        );

        // Assert
        assert_eq!(applied, Applied::Updated);
        assert_eq!(state.target_floor, -2);
        assert_eq!(state.estimated_current_floor, 7);
    }

    #[test]
    fn test_estimated_floor_of_other_car_ignored() {
        // Arrange
        let mut state = ControllerState::default();
        apply(
            &mut state,
            InboundEvent::EstimatedFloor {
                elevator: ELEVATOR.to_string(),
                floor: 1,
            },
        );

        // Act
        let applied = apply(
            &mut state,
            InboundEvent::EstimatedFloor {
                elevator: "elevator_3".to_string(),
                floor: 5,
            },
        );

        // Assert
        assert_eq!(applied, Applied::Ignored);
        assert_eq!(state.estimated_current_floor, 1);
    }

    #[test]
    fn test_car_params_leave_state_untouched() {
        let mut state = ControllerState::default();

        let applied = apply(&mut state, InboundEvent::CarParams { speed: 3.0 });

        assert_eq!(applied, Applied::Ignored);
        assert_eq!(state, ControllerState::default());
    }

    #[test]
    fn test_door_command_updates() {
        let mut state = ControllerState::default();

        apply(&mut state, InboundEvent::DoorCommand(1));
        assert_eq!(state.door_command, DoorCommand::ForceOpen);

        apply(&mut state, InboundEvent::DoorCommand(0));
        assert_eq!(state.door_command, DoorCommand::ForceClose);

        apply(&mut state, InboundEvent::DoorCommand(2));
        assert_eq!(state.door_command, DoorCommand::Free);
    }

    #[test]
    fn test_unknown_door_command_keeps_previous() {
        // Arrange
        let mut state = ControllerState::default();
        apply(&mut state, InboundEvent::DoorCommand(1));

        // Act
        let applied = apply(&mut state, InboundEvent::DoorCommand(9));

        // Assert
        assert_eq!(applied, Applied::Rejected(9));
        assert_eq!(state.door_command, DoorCommand::ForceOpen);
    }

    #[test]
    fn test_active_set_membership() {
        // Purpose: each active set replaces the previous one

        // Arrange
        let mut state = ControllerState::default();

        // Act + Assert
        apply(&mut state, InboundEvent::ActiveCars(vec![1, ELEVATOR_ID, 3]));
        assert!(state.is_active);

        apply(&mut state, InboundEvent::ActiveCars(vec![1, 3]));
        assert!(!state.is_active);

        apply(&mut state, InboundEvent::ActiveCars(vec![ELEVATOR_ID]));
        assert!(state.is_active);

        apply(&mut state, InboundEvent::ActiveCars(vec![]));
        assert!(!state.is_active);
    }
}
