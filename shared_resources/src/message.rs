/// ----- ANIMATION MESSAGES -----
/// The only data crossing the controller/renderer boundary. The controller
/// enqueues one ordered batch per simulation tick; the renderer applies the
/// batch in enqueue order. Messages flagged as deferred are held back by the
/// renderer and replayed one animation cycle later.

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum PassengerState {
    /// Reached the destination floor, walk to the off-screen exit.
    Exiting,
    /// Inside an elevator, position follows the elevator's floor.
    Riding,
    /// Waiting slot to elevator shaft, boarding the elevator with this id.
    Boarding(u8),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum Message {
    InitFloors { count: u8 },
    InitElevator { id: u8, floor: f64 },
    InitPassenger { id: u32, floor: f64 },
    ElevatorUpdate { id: u8, floor: f64, deferred: bool },
    PassengerUpdate { id: u32, floor: f64, state: PassengerState, deferred: bool },
}

impl Message {
    pub fn is_deferred(&self) -> bool {
        match *self {
            Message::ElevatorUpdate { deferred, .. } => deferred,
            Message::PassengerUpdate { deferred, .. } => deferred,
            _ => false,
        }
    }

    /// Same message with the deferred flag lowered, ready for replay.
    pub fn without_deferral(self) -> Message {
        match self {
            Message::ElevatorUpdate { id, floor, .. } => Message::ElevatorUpdate {
                id,
                floor,
                deferred: false,
            },
            Message::PassengerUpdate { id, floor, state, .. } => Message::PassengerUpdate {
                id,
                floor,
                state,
                deferred: false,
            },
            other => other,
        }
    }
}
