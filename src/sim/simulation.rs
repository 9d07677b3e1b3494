/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info, warn};
use nalgebra::{Translation3, UnitQuaternion};
use std::io::{BufRead, Write};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::Config;
use crate::door::{DoorController, DoorMotion};
use crate::elevator::CarDriver;
use crate::error::SetupError;
use crate::physics::{KinematicWorld, PhysicsWorld};
use crate::shared::Pose;
use crate::sim::scenario::Scenario;
use crate::sim::trace::{TickRecord, TraceWriter};
use crate::transport::Bus;

/**
 * Host loop owning the world, the bus and every controller.
 *
 * One tick:
 * 1. publish the scenario events for this tick
 * 2. door controllers drain their queues and command slide velocities
 * 3. cars command vertical velocities
 * 4. the world integrates
 * 5. door controllers clamp into their envelopes
 * 6. cars pin themselves and publish their estimated floor
 *
 * # Fields
 * - `world`:           Owner of every body.
 * - `bus`:             Topic bus feeding doors and cars.
 * - `doors`:           One controller per configured door.
 * - `cars`:            One driver per configured elevator.
 * - `scenario`:        Scripted events.
 * - `dt`:              Simulated seconds per tick.
 * - `ticks`:           Number of ticks `run` executes.
 * - `tick_period`:     Wall clock time between ticks, zero runs unpaced.
 * - `tick_count`:      Ticks executed so far.
 * - `trace`:           Optional JSON-lines output.
 * - `terminate_rx`:    Stops `run` when a message arrives. A dropped sender is ignored.
 */
pub struct Simulation {
    world: KinematicWorld,
    bus: Bus,
    doors: Vec<DoorController>,
    cars: Vec<CarDriver>,
    scenario: Scenario,
    dt: f64,
    ticks: u64,
    tick_period: Duration,
    tick_count: u64,
    trace: Option<TraceWriter<Box<dyn Write + Send>>>,
    terminate_rx: cbc::Receiver<()>,
}

impl Simulation {
    pub fn new(config: &Config, terminate_rx: cbc::Receiver<()>) -> Result<Simulation, SetupError> {
        // Resolved once here, every controller gets it explicitly
        config.shared.elevator_domain_space()?;

        let mut world = KinematicWorld::new();
        for elevator in config.elevators.iter() {
            let [x, y, z] = elevator.spawn;
            world.spawn(&elevator.name, Pose::translation(x, y, z));
        }
        for door in config.doors.iter() {
            let [x, y, z] = door.spawn;
            world.spawn(
                &door.name,
                Pose::from_parts(
                    Translation3::new(x, y, z),
                    UnitQuaternion::from_euler_angles(0.0, 0.0, door.yaw),
                ),
            );
        }

        let mut bus = Bus::new();

        let mut cars = Vec::with_capacity(config.elevators.len());
        for elevator in config.elevators.iter() {
            cars.push(CarDriver::new(elevator, &config.shared, &world, bus.subscribe())?);
        }

        let mut doors = Vec::with_capacity(config.doors.len());
        for door in config.doors.iter() {
            doors.push(DoorController::new(door, &config.shared, &world, bus.subscribe())?);
        }

        debug!("Bus has {} subscribers", bus.subscriber_count());

        Ok(Simulation {
            world,
            bus,
            doors,
            cars,
            scenario: Scenario::from_steps(&config.scenario),
            dt: config.simulation.dt,
            ticks: config.simulation.ticks,
            tick_period: Duration::from_millis(config.simulation.tick_period_ms),
            tick_count: 0,
            trace: None,
            terminate_rx,
        })
    }

    pub fn with_trace(mut self, trace: TraceWriter<Box<dyn Write + Send>>) -> Simulation {
        self.trace = Some(trace);
        self
    }

    pub fn with_ticks(mut self, ticks: u64) -> Simulation {
        self.ticks = ticks;
        self
    }

    pub fn doors(&self) -> &[DoorController] {
        &self.doors
    }

    pub fn cars(&self) -> &[CarDriver] {
        &self.cars
    }

    pub fn world(&self) -> &KinematicWorld {
        &self.world
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Runs until `ticks` ticks have executed or termination is requested.
    /// Returns the number of ticks executed.
    pub fn run(mut self) -> u64 {
        info!(
            "Simulation starting: {} doors, {} cars, {} ticks of {} s",
            self.doors.len(),
            self.cars.len(),
            self.ticks,
            self.dt
        );
        if let Some(last) = self.scenario.last_tick() {
            if last >= self.ticks {
                warn!("Scenario events after tick {} will never be published", self.ticks);
            }
        }

        let ticker = if self.tick_period.is_zero() {
            cbc::never()
        } else {
            cbc::tick(self.tick_period)
        };
        while self.tick_count < self.ticks {
            let mut terminate_lost = false;
            if self.tick_period.is_zero() {
                cbc::select! {
                    recv(self.terminate_rx) -> msg => match msg {
                        Ok(()) => break,
                        Err(_) => terminate_lost = true,
                    },
                    default => {
                        self.step();
                    }
                }
            } else {
                cbc::select! {
                    recv(ticker) -> _ => {
                        self.step();
                    }
                    recv(self.terminate_rx) -> msg => match msg {
                        Ok(()) => break,
                        Err(_) => terminate_lost = true,
                    },
                }
            }
            if terminate_lost {
                debug!("Terminate sender dropped, running to the tick limit");
                self.terminate_rx = cbc::never();
            }
        }

        if let Some(trace) = self.trace.as_mut() {
            trace.flush();
        }
        self.log_summary();

        self.tick_count()
    }

    fn log_summary(&self) {
        info!(
            "Simulation stopped after {} ticks ({:.2} s simulated)",
            self.tick_count(),
            self.world().elapsed()
        );
        for car in self.cars() {
            info!(
                "Elevator {}: target floor {}, {:?} at {} m/s, {}",
                car.name(),
                car.target_floor(),
                car.direction(),
                car.speed(),
                if car.is_active() { "active" } else { "inactive" }
            );
        }
        for door in self.doors() {
            info!(
                "Door {}: last motion {:?}, command {:?}",
                door.params().door_ref,
                door.last_motion(),
                door.state().door_command
            );
        }
    }

    /// Executes a single tick and returns one record per door.
    pub fn step(&mut self) -> Vec<TickRecord> {
        for event in self.scenario.events_at(self.tick_count) {
            debug!("Tick {}: scenario publishes {:?}", self.tick_count, event);
            self.bus.publish(event.clone());
        }

        let motions: Vec<Option<DoorMotion>> = self
            .doors
            .iter_mut()
            .map(|door| door.pre_step(&mut self.world))
            .collect();
        for car in self.cars.iter_mut() {
            car.pre_step(&mut self.world, self.dt);
        }

        self.world.step(self.dt);

        let mut records = Vec::with_capacity(self.doors.len());
        for (door, motion) in self.doors.iter_mut().zip(motions) {
            if let Some(pose) = door.post_step(&mut self.world) {
                let position = pose.translation.vector;
                records.push(TickRecord {
                    tick: self.tick_count,
                    door: door.params().name.clone(),
                    motion,
                    x: position.x,
                    y: position.y,
                    z: position.z,
                    state: door.state(),
                });
            }
        }
        for car in self.cars.iter_mut() {
            if let Some(estimate) = car.post_step(&mut self.world) {
                self.bus.publish(estimate);
            }
        }

        if let Some(trace) = self.trace.as_mut() {
            for record in records.iter() {
                trace.write(record);
            }
        }

        self.tick_count += 1;
        records
    }
}

/// Sends on `terminate_tx` when a `q` or `quit` line is read from `input`.
/// Returns at end of input without sending.
pub fn forward_quit<R: BufRead>(input: R, terminate_tx: cbc::Sender<()>) {
    for line in input.lines() {
        match line {
            Ok(line) if matches!(line.trim(), "q" | "quit") => {
                info!("Stop requested");
                if terminate_tx.send(()).is_err() {
                    debug!("Simulation already stopped");
                }
                return;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Failed to read stop command: {}", e);
                return;
            }
        }
    }
}
