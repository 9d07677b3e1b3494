/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, trace, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{DoorConfig, SharedConfig};
use crate::door::activation::{decide, DoorMotion};
use crate::door::params::DoorParams;
use crate::door::state::{Applied, ControllerState};
use crate::error::SetupError;
use crate::physics::{BodyId, PhysicsWorld, RigidBody};
use crate::shared::Pose;
use crate::transport::InboundEvent;

/**
 * Drives one sliding elevator door.
 *
 * The host calls `pre_step` before the physics step and `post_step` after
 * it, never concurrently. Inbound events queue up between ticks and are
 * drained once at the start of `pre_step`, so the whole tick works on a
 * single snapshot of the controller state.
 *
 * # Fields
 * - `params`:          Immutable door parameters resolved at setup.
 * - `door_body`:       Handle of the door body, owned by the world.
 * - `car_body`:        Handle of the elevator car body, owned by the world.
 * - `inbound_rx`:      Queue of events from the topic bus.
 * - `state`:           Latest values written by inbound events.
 * - `last_motion`:     Motion commanded on the previous tick.
 * - `missing_reported`: A vanished body has already been logged.
 */
pub struct DoorController {
    params: DoorParams,
    door_body: BodyId,
    car_body: BodyId,
    inbound_rx: cbc::Receiver<InboundEvent>,
    state: ControllerState,
    last_motion: Option<DoorMotion>,
    missing_reported: bool,
}

impl DoorController {
    pub fn new<W: PhysicsWorld>(
        config: &DoorConfig,
        shared: &SharedConfig,
        world: &W,
        inbound_rx: cbc::Receiver<InboundEvent>,
    ) -> Result<DoorController, SetupError> {
        let door_body = world
            .find_body(&config.name)
            .ok_or_else(|| SetupError::UnknownBody(config.name.clone()))?;
        let spawn = world
            .body(door_body)
            .map(|door| door.world_pose())
            .ok_or_else(|| SetupError::UnknownBody(config.name.clone()))?;

        let params = DoorParams::resolve(config, shared, &spawn)?;

        let car_body = world
            .find_body(&params.elevator_name)
            .ok_or_else(|| SetupError::UnknownBody(params.elevator_name.clone()))?;

        Ok(DoorController {
            params,
            door_body,
            car_body,
            inbound_rx,
            state: ControllerState::default(),
            last_motion: None,
            missing_reported: false,
        })
    }

    pub fn params(&self) -> &DoorParams {
        &self.params
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn last_motion(&self) -> Option<DoorMotion> {
        self.last_motion
    }

    /// Drains the inbound queue and commands the slide velocity for this tick.
    /// Returns `None` only if a body has disappeared from the world.
    pub fn pre_step<W: PhysicsWorld>(&mut self, world: &mut W) -> Option<DoorMotion> {
        let snapshot = self.drain_inbound();

        let car_height = match world.body(self.car_body) {
            Some(car) => car.world_position().z,
            None => {
                self.report_missing_body(self.car_body);
                return None;
            }
        };

        let door = match world.body_mut(self.door_body) {
            Some(door) => door,
            None => {
                self.report_missing_body(self.door_body);
                return None;
            }
        };

        let motion = decide(
            &snapshot,
            car_height,
            door.world_position().z,
            self.params.gate_on_active,
        );

        // Both planar axes: the door may face either X or Y
        let slide = self.params.velocity_for(motion);
        let mut velocity = door.linear_velocity();
        velocity.x = slide;
        velocity.y = slide;
        door.set_linear_velocity(velocity);

        if self.last_motion != Some(motion) {
            debug!("Door {}: {:?} ({:?})", self.params.door_ref, motion, snapshot);
        }
        self.last_motion = Some(motion);

        Some(motion)
    }

    /// Pulls the integrated door position back into the travel envelope.
    pub fn post_step<W: PhysicsWorld>(&mut self, world: &mut W) -> Option<Pose> {
        let door = match world.body_mut(self.door_body) {
            Some(door) => door,
            None => {
                self.report_missing_body(self.door_body);
                return None;
            }
        };

        let pose = door.world_pose();
        let constrained = self.params.envelope.clamp_pose(&pose);
        if !self
            .params
            .envelope
            .contains(pose.translation.vector.x, pose.translation.vector.y)
        {
            trace!(
                "Door {}: clamped ({:.4}, {:.4}) to ({:.4}, {:.4})",
                self.params.door_ref,
                pose.translation.vector.x,
                pose.translation.vector.y,
                constrained.translation.vector.x,
                constrained.translation.vector.y
            );
        }
        door.set_world_pose(constrained);

        Some(constrained)
    }

    fn drain_inbound(&mut self) -> ControllerState {
        for event in self.inbound_rx.try_iter() {
            let was_active = self.state.is_active;

            let applied =
                self.state
                    .apply(&event, &self.params.elevator_name, self.params.elevator_id);
            if let Applied::Rejected(raw) = applied {
                warn!(
                    "Door {}: unknown door command {}, keeping {:?}",
                    self.params.door_ref, raw, self.state.door_command
                );
            }

            if self.state.is_active != was_active {
                info!(
                    "Door {}: elevator {} is now {}",
                    self.params.door_ref,
                    self.params.elevator_id,
                    if self.state.is_active { "active" } else { "inactive" }
                );
            }
        }

        self.state
    }

    fn report_missing_body(&mut self, body: BodyId) {
        if !self.missing_reported {
            warn!(
                "Door {}: body {:?} is gone from the world, skipping",
                self.params.door_ref, body
            );
            self.missing_reported = true;
        }
    }
}
