/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::ElevatorId;

/***************************************/
/*               Enums                 */
/***************************************/

/// One message on one of the elevator controller topics.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// `target_floor`
    TargetFloor(i32),
    /// `<elevator>/estimated_current_floor`
    EstimatedFloor { elevator: String, floor: i32 },
    /// `door`, raw wire byte (0 = close, 1 = open, 2 = free)
    DoorCommand(u8),
    /// `active`, the full set of active car ids
    ActiveCars(Vec<ElevatorId>),
    /// `elevator_controller/param`, new lift speed for every active car
    CarParams { speed: f64 },
}

impl InboundEvent {
    pub fn topic(&self) -> String {
        match self {
            InboundEvent::TargetFloor(_) => "target_floor".to_string(),
            InboundEvent::EstimatedFloor { elevator, .. } => {
                format!("{}/estimated_current_floor", elevator)
            }
            InboundEvent::DoorCommand(_) => "door".to_string(),
            InboundEvent::ActiveCars(_) => "active".to_string(),
            InboundEvent::CarParams { .. } => "elevator_controller/param".to_string(),
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Fans every published event out to every subscriber.
 *
 * Each subscriber owns an unbounded queue which it drains without blocking
 * at the start of its tick. Subscribers whose receiver has been dropped are
 * forgotten on the next publish.
 *
 * # Fields
 * - `subscribers`:     Sending half of each subscriber queue.
 */
#[derive(Default)]
pub struct Bus {
    subscribers: Vec<cbc::Sender<InboundEvent>>,
}

impl Bus {
    pub fn new() -> Bus {
        Bus::default()
    }

    pub fn subscribe(&mut self) -> cbc::Receiver<InboundEvent> {
        let (tx, rx) = cbc::unbounded::<InboundEvent>();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, event: InboundEvent) {
        log::trace!("publish on '{}': {:?}", event.topic(), event);
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
