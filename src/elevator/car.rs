/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, error, info, warn};
use nalgebra::{UnitQuaternion, Vector3};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{ElevatorConfig, SharedConfig};
use crate::door::params::parse_elevator_id;
use crate::error::SetupError;
use crate::physics::{BodyId, PhysicsWorld, RigidBody};
use crate::shared::{Direction, ElevatorId, UNKNOWN_FLOOR};
use crate::transport::InboundEvent;

pub const DEFAULT_LIFT_SPEED: f64 = 1.5;
pub const LIFT_LEVEL_TOLERANCE: f64 = 0.01;

/**
 * Simulated elevator car.
 *
 * Moves its body vertically towards the target floor and reports the floor
 * it is at, so that door controllers see the same messages they would from a
 * real car. Only an active car accepts a new target floor.
 *
 * # Fields
 * - `name`:            Body name, also the estimated floor topic prefix.
 * - `elevator_id`:     Name with the elevator domain space stripped.
 * - `body`:            Handle of the car body.
 * - `floor_heights`:   Height of every floor, lowest first. Index is the floor number.
 * - `speed`:           Maximum vertical speed.
 * - `spawn_x/spawn_y`: Horizontal position the car is pinned to.
 * - `target_floor`:    Floor the car is travelling to.
 * - `direction`:       Current direction of travel.
 * - `is_active`:       Car is in the published active set.
 * - `inbound_rx`:      Queue of events from the topic bus.
 */
pub struct CarDriver {
    name: String,
    elevator_id: ElevatorId,
    body: BodyId,
    floor_heights: Vec<f64>,
    speed: f64,
    spawn_x: f64,
    spawn_y: f64,
    target_floor: i32,
    direction: Direction,
    is_active: bool,
    inbound_rx: cbc::Receiver<InboundEvent>,
}

impl CarDriver {
    pub fn new<W: PhysicsWorld>(
        config: &ElevatorConfig,
        shared: &SharedConfig,
        world: &W,
        inbound_rx: cbc::Receiver<InboundEvent>,
    ) -> Result<CarDriver, SetupError> {
        let elevator_id = parse_elevator_id(&config.name, shared.elevator_domain_space()?)?;

        let body = world
            .find_body(&config.name)
            .ok_or_else(|| SetupError::UnknownBody(config.name.clone()))?;
        let spawn = world
            .body(body)
            .map(|car| car.world_position())
            .ok_or_else(|| SetupError::UnknownBody(config.name.clone()))?;

        if config.floor_heights.is_empty() {
            return Err(SetupError::MissingFloorHeights(config.name.clone()));
        }
        let mut floor_heights = config.floor_heights.clone();
        floor_heights.sort_by(|a, b| a.total_cmp(b));
        for (floor, height) in floor_heights.iter().enumerate() {
            info!("Elevator {}: mapped floor {} to height {:.3}", elevator_id, floor, height);
        }

        let speed = config.speed.unwrap_or_else(|| {
            warn!(
                "{}: elevator speed not specified, defaulting to {} m/s",
                config.name, DEFAULT_LIFT_SPEED
            );
            DEFAULT_LIFT_SPEED
        });
        if !valid_speed(speed) {
            return Err(SetupError::InvalidLiftSpeed {
                elevator: config.name.clone(),
                value: speed,
            });
        }

        Ok(CarDriver {
            name: config.name.clone(),
            elevator_id,
            body,
            floor_heights,
            speed,
            spawn_x: spawn.x,
            spawn_y: spawn.y,
            target_floor: 0,
            direction: Direction::Stop,
            is_active: false,
            inbound_rx,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_floor(&self) -> i32 {
        self.target_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Drains the inbound queue and commands the vertical velocity for a step of `dt`.
    pub fn pre_step<W: PhysicsWorld>(&mut self, world: &mut W, dt: f64) {
        for event in self.inbound_rx.try_iter().collect::<Vec<_>>() {
            self.handle_event(event);
        }

        let target_height = match self.floor_heights.get(self.target_floor as usize) {
            Some(height) => *height,
            None => return,
        };
        let car = match world.body_mut(self.body) {
            Some(car) => car,
            None => return,
        };

        let height_diff = car.world_position().z - target_height;
        self.direction = choose_direction(height_diff);

        // Never overshoot the target within one step
        let vertical_speed = if dt > 0.0 {
            self.speed.min(height_diff.abs() / dt)
        } else {
            self.speed
        };
        let vz = match self.direction {
            Direction::Up => vertical_speed,
            Direction::Down => -vertical_speed,
            Direction::Stop => 0.0,
        };
        car.set_linear_velocity(Vector3::new(0.0, 0.0, vz));
    }

    /// Pins the car horizontally and returns its estimated floor message.
    pub fn post_step<W: PhysicsWorld>(&mut self, world: &mut W) -> Option<InboundEvent> {
        let car = world.body_mut(self.body)?;

        let height = car.world_position().z;
        car.set_world_position(Vector3::new(self.spawn_x, self.spawn_y, height));
        if car.orientation() != UnitQuaternion::identity() {
            car.set_orientation(UnitQuaternion::identity());
        }

        Some(InboundEvent::EstimatedFloor {
            elevator: self.name.clone(),
            floor: self.estimate_floor(height),
        })
    }

    pub fn estimate_floor(&self, height: f64) -> i32 {
        self.floor_heights
            .iter()
            .position(|floor_height| (height - floor_height).abs() < LIFT_LEVEL_TOLERANCE)
            .map(|floor| floor as i32)
            .unwrap_or(UNKNOWN_FLOOR)
    }

    fn handle_event(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::TargetFloor(floor) => {
                if !self.is_active || floor == self.target_floor {
                    return;
                }
                if floor < 0 || floor as usize >= self.floor_heights.len() {
                    error!("Elevator {}: floor {} does not exist", self.elevator_id, floor);
                    return;
                }
                self.target_floor = floor;
                info!("Elevator {}: target floor {}", self.elevator_id, floor);
            }
            InboundEvent::ActiveCars(active) => {
                self.is_active = active.contains(&self.elevator_id);
                debug!("Elevator {}: active = {}", self.elevator_id, self.is_active);
            }
            InboundEvent::CarParams { speed } => {
                if !self.is_active {
                    return;
                }
                if !valid_speed(speed) {
                    warn!("Elevator {}: ignoring lift speed {}", self.elevator_id, speed);
                    return;
                }
                if speed != self.speed {
                    info!("Lift speed of '{}' set to: {} m/s", self.name, speed);
                    self.speed = speed;
                }
            }
            InboundEvent::EstimatedFloor { .. } | InboundEvent::DoorCommand(_) => {}
        }
    }
}

fn valid_speed(speed: f64) -> bool {
    speed.is_finite() && speed >= 0.0
}

fn choose_direction(height_diff: f64) -> Direction {
    if height_diff > LIFT_LEVEL_TOLERANCE {
        Direction::Down
    } else if height_diff < -LIFT_LEVEL_TOLERANCE {
        Direction::Up
    } else {
        Direction::Stop
    }
}
