/*
 * Unit tests for the simulated car
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_car_init
 * - test_car_requires_floor_heights
 * - test_inactive_car_ignores_target
 * - test_car_travels_to_target_floor
 * - test_car_rejects_unknown_floor
 * - test_estimate_floor
 * - test_car_pinned_horizontally
 * - test_car_params_apply_only_while_active
 * - test_car_params_reject_invalid_speed
 * - test_invalid_lift_speed_is_fatal
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod car_tests {
    use crate::config::{ElevatorConfig, SharedConfig};
    use crate::elevator::CarDriver;
    use crate::error::SetupError;
    use crate::physics::{BodyId, KinematicWorld, PhysicsWorld, RigidBody};
    use crate::shared::{Direction, Pose, UNKNOWN_FLOOR};
    use crate::transport::{Bus, InboundEvent};
    use nalgebra::{UnitQuaternion, Vector3};

    const DT: f64 = 0.1;

    fn shared() -> SharedConfig {
        SharedConfig {
            elevator_domain_space: Some("elevator_".to_string()),
        }
    }

    fn car_config() -> ElevatorConfig {
        ElevatorConfig {
            name: "elevator_2".to_string(),
            spawn: [1.0, 2.0, 0.0],
            floor_heights: vec![6.0, 0.0, 3.0],
            speed: Some(1.0),
        }
    }

    fn setup_car() -> (CarDriver, KinematicWorld, Bus, BodyId) {
        let mut world = KinematicWorld::new();
        let body = world.spawn("elevator_2", Pose::translation(1.0, 2.0, 0.0));
        let mut bus = Bus::new();
        let car = CarDriver::new(&car_config(), &shared(), &world, bus.subscribe()).unwrap();
        (car, world, bus, body)
    }

    fn tick(car: &mut CarDriver, world: &mut KinematicWorld) -> Option<InboundEvent> {
        car.pre_step(world, DT);
        world.step(DT);
        car.post_step(world)
    }

    #[test]
    fn test_car_init() {
        let (car, _world, _bus, _body) = setup_car();

        assert_eq!(car.name(), "elevator_2");
        assert_eq!(car.target_floor(), 0);
        assert_eq!(car.direction(), Direction::Stop);
        assert!(!car.is_active());
    }

    #[test]
    fn test_car_requires_floor_heights() {
        let mut world = KinematicWorld::new();
        world.spawn("elevator_2", Pose::identity());
        let config = ElevatorConfig {
            floor_heights: vec![],
            ..car_config()
        };

        let result = CarDriver::new(&config, &shared(), &world, Bus::new().subscribe());

        assert!(matches!(result, Err(SetupError::MissingFloorHeights(_))));
    }

    #[test]
    fn test_inactive_car_ignores_target() {
        // Arrange
        let (mut car, mut world, mut bus, _body) = setup_car();

        // Act
        bus.publish(InboundEvent::TargetFloor(2));
        tick(&mut car, &mut world);

        // Assert
        assert_eq!(car.target_floor(), 0);
        assert_eq!(car.direction(), Direction::Stop);
    }

    #[test]
    fn test_car_travels_to_target_floor() {
        // Arrange
        let (mut car, mut world, mut bus, body) = setup_car();
        bus.publish(InboundEvent::ActiveCars(vec![2]));
        bus.publish(InboundEvent::TargetFloor(1));

        // Act
        let first = tick(&mut car, &mut world);
        let last = (0..40).map(|_| tick(&mut car, &mut world)).last().flatten();

        // Assert
        assert_eq!(
            first,
            Some(InboundEvent::EstimatedFloor {
                elevator: "elevator_2".to_string(),
                floor: UNKNOWN_FLOOR
            })
        );
        assert_eq!(
            last,
            Some(InboundEvent::EstimatedFloor {
                elevator: "elevator_2".to_string(),
                floor: 1
            })
        );
        assert_eq!(car.direction(), Direction::Stop);
        assert!((world.body(body).unwrap().world_position().z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_car_rejects_unknown_floor() {
        let (mut car, mut world, mut bus, _body) = setup_car();
        bus.publish(InboundEvent::ActiveCars(vec![2]));
        bus.publish(InboundEvent::TargetFloor(7));
        bus.publish(InboundEvent::TargetFloor(-1));

        tick(&mut car, &mut world);

        assert_eq!(car.target_floor(), 0);
    }

    #[test]
    fn test_estimate_floor() {
        let (car, _world, _bus, _body) = setup_car();

        assert_eq!(car.estimate_floor(0.0), 0);
        assert_eq!(car.estimate_floor(3.005), 1);
        assert_eq!(car.estimate_floor(6.0), 2);
        assert_eq!(car.estimate_floor(4.5), UNKNOWN_FLOOR);
    }

    #[test]
    fn test_car_pinned_horizontally() {
        // Arrange
        let (mut car, mut world, _bus, body) = setup_car();
        world
            .body_mut(body)
            .unwrap()
            .set_linear_velocity(Vector3::new(5.0, -5.0, 0.0));
        world
            .body_mut(body)
            .unwrap()
            .set_orientation(UnitQuaternion::from_euler_angles(0.0, 0.0, 0.3));
        world.step(DT);

        // Act
        car.post_step(&mut world);

        // Assert
        let position = world.body(body).unwrap().world_position();
        assert_eq!(position.x, 1.0);
        assert_eq!(position.y, 2.0);
        assert_eq!(world.body(body).unwrap().orientation(), UnitQuaternion::identity());
    }

    #[test]
    fn test_car_params_apply_only_while_active() {
        // Arrange
        let (mut car, mut world, mut bus, _body) = setup_car();

        // Act
        bus.publish(InboundEvent::CarParams { speed: 4.0 });
        tick(&mut car, &mut world);
        let inactive_speed = car.speed();

        bus.publish(InboundEvent::ActiveCars(vec![2]));
        bus.publish(InboundEvent::CarParams { speed: 4.0 });
        tick(&mut car, &mut world);

        // Assert
        assert_eq!(inactive_speed, 1.0);
        assert_eq!(car.speed(), 4.0);
    }

    #[test]
    fn test_car_params_reject_invalid_speed() {
        let (mut car, mut world, mut bus, _body) = setup_car();
        bus.publish(InboundEvent::ActiveCars(vec![2]));
        bus.publish(InboundEvent::CarParams { speed: -2.0 });
        bus.publish(InboundEvent::CarParams { speed: f64::NAN });

        tick(&mut car, &mut world);

        assert_eq!(car.speed(), 1.0);
    }

    #[test]
    fn test_invalid_lift_speed_is_fatal() {
        let mut world = KinematicWorld::new();
        world.spawn("elevator_2", Pose::identity());
        let config = ElevatorConfig {
            speed: Some(f64::INFINITY),
            ..car_config()
        };

        let result = CarDriver::new(&config, &shared(), &world, Bus::new().subscribe());

        assert!(matches!(result, Err(SetupError::InvalidLiftSpeed { .. })));
    }
}
