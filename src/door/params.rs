/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{DoorConfig, SharedConfig};
use crate::door::activation::DoorMotion;
use crate::door::constraint::TravelEnvelope;
use crate::error::SetupError;
use crate::shared::{DoorDirection, ElevatorId, Pose};

/***************************************/
/*             Constants               */
/***************************************/
pub const DEFAULT_MODEL_DOMAIN_SPACE: &str = "auto_door_";
pub const DEFAULT_SLIDE_DISTANCE: f64 = 0.711305;
pub const DEFAULT_SLIDE_SPEED: f64 = 1.0;

/**
 * Everything about a door that is fixed once setup has finished.
 *
 * # Fields
 * - `name`:            Door body name in the world.
 * - `door_ref`:        Door name with the model domain space stripped, used in logs.
 * - `elevator_name`:   Car this door belongs to.
 * - `elevator_id`:     Car name with the elevator domain space stripped.
 * - `direction`:       Side the door slides towards when opening.
 * - `max_trans_dist`:  Length of travel from fully closed to fully open.
 * - `slide_speed`:     Magnitude of the slide velocity.
 * - `open_velocity`:   Signed slide velocity applied while opening.
 * - `close_velocity`:  Signed slide velocity applied while closing.
 * - `envelope`:        Planar bound derived from the spawn position.
 * - `gate_on_active`:  Close whenever the car is outside the active set.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct DoorParams {
    pub name: String,
    pub door_ref: String,
    pub elevator_name: String,
    pub elevator_id: ElevatorId,
    pub direction: DoorDirection,
    pub max_trans_dist: f64,
    pub slide_speed: f64,
    pub open_velocity: f64,
    pub close_velocity: f64,
    pub envelope: TravelEnvelope,
    pub gate_on_active: bool,
}

impl DoorParams {
    /// Applies defaults to the optional fields of `config`, then derives the
    /// velocities and the travel envelope from the door's spawn pose.
    pub fn resolve(
        config: &DoorConfig,
        shared: &SharedConfig,
        spawn: &Pose,
    ) -> Result<DoorParams, SetupError> {
        let elevator_domain_space = shared.elevator_domain_space()?;

        let model_domain_space = match &config.model_domain_space {
            Some(domain_space) => domain_space.clone(),
            None => {
                warn!(
                    "{}: model domain space not specified, defaulting to '{}'",
                    config.name, DEFAULT_MODEL_DOMAIN_SPACE
                );
                DEFAULT_MODEL_DOMAIN_SPACE.to_string()
            }
        };

        let elevator_name = config
            .elevator_name
            .clone()
            .ok_or_else(|| SetupError::MissingElevatorName {
                door: config.name.clone(),
            })?;
        let elevator_id = parse_elevator_id(&elevator_name, elevator_domain_space)?;

        let direction = match config.door_direction.as_deref() {
            None => {
                warn!("{}: door direction not specified, defaulting to 'left'", config.name);
                DoorDirection::Left
            }
            Some(value) => DoorDirection::parse(value).unwrap_or_else(|| {
                warn!(
                    "{}: invalid door direction '{}', only 'left' or 'right' possible, defaulting to 'left'",
                    config.name, value
                );
                DoorDirection::Left
            }),
        };

        let max_trans_dist = config.max_trans_dist.unwrap_or_else(|| {
            warn!(
                "{}: maximum translation distance not specified, defaulting to '{}'",
                config.name, DEFAULT_SLIDE_DISTANCE
            );
            DEFAULT_SLIDE_DISTANCE
        });
        if !max_trans_dist.is_finite() || max_trans_dist < 0.0 {
            return Err(SetupError::InvalidTravelDistance {
                door: config.name.clone(),
                value: max_trans_dist,
            });
        }

        let slide_speed = config.speed.unwrap_or_else(|| {
            warn!(
                "{}: sliding speed not specified, defaulting to '{}'",
                config.name, DEFAULT_SLIDE_SPEED
            );
            DEFAULT_SLIDE_SPEED
        });
        if !slide_speed.is_finite() || slide_speed < 0.0 {
            return Err(SetupError::InvalidSlideSpeed {
                door: config.name.clone(),
                value: slide_speed,
            });
        }

        let (open_velocity, close_velocity) = slide_velocities(direction, slide_speed);
        let spawn_position = spawn.translation.vector;
        let envelope =
            TravelEnvelope::from_spawn(spawn_position.x, spawn_position.y, direction, max_trans_dist);

        let params = DoorParams {
            name: config.name.clone(),
            door_ref: door_ref(&config.name, &model_domain_space).to_string(),
            elevator_name,
            elevator_id,
            direction,
            max_trans_dist,
            slide_speed,
            open_velocity,
            close_velocity,
            envelope,
            gate_on_active: config.gate_on_active,
        };

        info!(
            "Door {}: elevator {} ({}), {:?}, open {:+.3}, close {:+.3}, x [{:.4}, {:.4}], y [{:.4}, {:.4}]",
            params.door_ref,
            params.elevator_id,
            params.elevator_name,
            params.direction,
            params.open_velocity,
            params.close_velocity,
            envelope.min_x,
            envelope.max_x,
            envelope.min_y,
            envelope.max_y
        );

        Ok(params)
    }

    pub fn velocity_for(&self, motion: DoorMotion) -> f64 {
        match motion {
            DoorMotion::Open => self.open_velocity,
            DoorMotion::Close => self.close_velocity,
        }
    }
}

/// Returns `(open_velocity, close_velocity)`. A right door opens towards -X/-Y.
pub fn slide_velocities(direction: DoorDirection, slide_speed: f64) -> (f64, f64) {
    match direction {
        DoorDirection::Right => (-slide_speed, slide_speed),
        DoorDirection::Left => (slide_speed, -slide_speed),
    }
}

/// `elevator_12` with domain space `elevator_` is elevator 12.
pub fn parse_elevator_id(name: &str, domain_space: &str) -> Result<ElevatorId, SetupError> {
    name.strip_prefix(domain_space)
        .and_then(|number| number.parse::<ElevatorId>().ok())
        .ok_or_else(|| SetupError::InvalidElevatorName {
            name: name.to_string(),
            domain_space: domain_space.to_string(),
        })
}

pub fn door_ref<'a>(name: &'a str, model_domain_space: &str) -> &'a str {
    match name.strip_prefix(model_domain_space) {
        Some(reference) if !reference.is_empty() => reference,
        _ => {
            debug!("{} is outside model domain space '{}'", name, model_domain_space);
            name
        }
    }
}
