use std::collections::BTreeMap;

use crate::config::ScenarioStep;
use crate::shared::DoorCommand;
use crate::transport::InboundEvent;

/// Scripted inbound events, grouped by the tick they are published on.
#[derive(Debug, Default)]
pub struct Scenario {
    steps: BTreeMap<u64, Vec<InboundEvent>>,
}

impl Scenario {
    pub fn from_steps(steps: &[ScenarioStep]) -> Scenario {
        let mut scenario = Scenario::default();

        for step in steps {
            let events = scenario.steps.entry(step.tick).or_default();
            if let Some(active) = &step.active {
                events.push(InboundEvent::ActiveCars(active.clone()));
            }
            if let Some(speed) = step.speed {
                events.push(InboundEvent::CarParams { speed });
            }
            if let Some(floor) = step.dispatch {
                events.push(InboundEvent::DoorCommand(DoorCommand::Free.to_u8()));
                events.push(InboundEvent::TargetFloor(floor));
            }
            if let Some(floor) = step.target_floor {
                events.push(InboundEvent::TargetFloor(floor));
            }
            if let Some(door) = step.door {
                events.push(InboundEvent::DoorCommand(door));
            }
        }

        scenario
    }

    pub fn events_at(&self, tick: u64) -> &[InboundEvent] {
        self.steps.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.steps.keys().next_back().copied()
    }
}
