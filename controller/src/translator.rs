/// ----- TRANSLATOR MODULE -----
/// Turns one tick's raw engine events and elevator snapshots into the
/// ordered animation message batch for the renderer. The engine reports a
/// passenger's alighting in the same tick the elevator is free to depart,
/// so the exit animation is emitted deferred; the same applies to elevator
/// and occupant sync messages whenever somebody boarded this tick.

use shared_resources::message::{Message, PassengerState};

use crate::engine::{ElevatorSnapshot, SimulationEvent};

/// One-time batch published before the first tick: the floor count first,
/// then one elevator per shaft.
pub fn init_batch(num_floors: u8, elevators: &[ElevatorSnapshot]) -> Vec<Message> {
    let mut batch = vec![Message::InitFloors { count: num_floors }];
    for elevator in elevators {
        batch.push(Message::InitElevator {
            id: elevator.id,
            floor: elevator.current_floor as f64,
        });
    }
    batch
}

pub fn translate(events: &[SimulationEvent], elevators: &[ElevatorSnapshot]) -> Vec<Message> {
    let mut batch = Vec::new();
    let mut boarded = false;

    for event in events {
        match *event {
            SimulationEvent::UpButtonPressed { passenger, floor }
            | SimulationEvent::DownButtonPressed { passenger, floor } => {
                batch.push(Message::InitPassenger {
                    id: passenger,
                    floor: floor as f64,
                });
            }
            SimulationEvent::PassengerBoard {
                passenger,
                elevator,
                floor,
            } => {
                batch.push(Message::PassengerUpdate {
                    id: passenger,
                    floor: floor as f64,
                    state: PassengerState::Boarding(elevator),
                    deferred: false,
                });
                boarded = true;
            }
            SimulationEvent::PassengerAlight {
                passenger, floor, ..
            } => {
                // snap to "still riding at this floor" first, or the exit
                // animation would start from a stale position
                batch.push(Message::PassengerUpdate {
                    id: passenger,
                    floor: floor as f64,
                    state: PassengerState::Riding,
                    deferred: false,
                });
                batch.push(Message::PassengerUpdate {
                    id: passenger,
                    floor: floor as f64,
                    state: PassengerState::Exiting,
                    deferred: true,
                });
            }
            _ => (),
        }
    }

    // elevator and occupant positions are synced every tick, moved or not
    for elevator in elevators {
        batch.push(Message::ElevatorUpdate {
            id: elevator.id,
            floor: elevator.current_floor_float,
            deferred: boarded,
        });
        for &passenger in &elevator.passengers {
            batch.push(Message::PassengerUpdate {
                id: passenger,
                floor: elevator.current_floor_float,
                state: PassengerState::Riding,
                deferred: boarded,
            });
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use shared_resources::direction::Direction;
    use shared_resources::message::{Message, PassengerState};

    use crate::engine::{ElevatorSnapshot, SimulationEvent};

    use super::{init_batch, translate};

    fn snapshot(id: u8, floor: f64, passengers: Vec<u32>) -> ElevatorSnapshot {
        ElevatorSnapshot {
            id,
            current_floor: floor as u8,
            current_floor_float: floor,
            target_floor: None,
            last_tick_direction: Direction::Stop,
            passengers,
        }
    }

    #[test]
    fn init_batch_sends_floor_count_before_elevators() {
        let elevators = vec![snapshot(0, 3.0, Vec::new()), snapshot(1, 0.0, Vec::new())];
        let batch = init_batch(6, &elevators);
        assert_eq!(batch[0], Message::InitFloors { count: 6 });
        assert_eq!(batch[1], Message::InitElevator { id: 0, floor: 3.0 });
        assert_eq!(batch[2], Message::InitElevator { id: 1, floor: 0.0 });
    }

    #[test]
    fn button_press_creates_the_passenger() {
        let events = vec![SimulationEvent::DownButtonPressed {
            passenger: 4,
            floor: 5,
        }];
        let batch = translate(&events, &[]);
        assert_eq!(
            batch,
            vec![Message::InitPassenger { id: 4, floor: 5.0 }]
        );
    }

    #[test]
    fn alight_emits_snap_then_deferred_exit() {
        let events = vec![SimulationEvent::PassengerAlight {
            passenger: 7,
            elevator: 2,
            floor: 9,
        }];
        let batch = translate(&events, &[snapshot(2, 9.0, Vec::new())]);
        assert_eq!(
            batch[0],
            Message::PassengerUpdate {
                id: 7,
                floor: 9.0,
                state: PassengerState::Riding,
                deferred: false,
            }
        );
        assert_eq!(
            batch[1],
            Message::PassengerUpdate {
                id: 7,
                floor: 9.0,
                state: PassengerState::Exiting,
                deferred: true,
            }
        );
        // no boarding happened, so the elevator sync is not deferred
        assert_eq!(
            batch[2],
            Message::ElevatorUpdate {
                id: 2,
                floor: 9.0,
                deferred: false,
            }
        );
    }

    #[test]
    fn boarding_defers_every_sync_message() {
        let events = vec![SimulationEvent::PassengerBoard {
            passenger: 7,
            elevator: 0,
            floor: 4,
        }];
        let elevators = vec![snapshot(0, 4.0, vec![7]), snapshot(1, 2.5, vec![3])];
        let batch = translate(&events, &elevators);

        assert_eq!(
            batch[0],
            Message::PassengerUpdate {
                id: 7,
                floor: 4.0,
                state: PassengerState::Boarding(0),
                deferred: false,
            }
        );
        // elevator + occupant syncs, all deferred behind the boarding walk
        assert_eq!(batch.len(), 5);
        assert!(batch[1..].iter().all(Message::is_deferred));
    }

    #[test]
    fn deferred_count_matches_alights_plus_syncs_when_boarding() {
        let events = vec![
            SimulationEvent::PassengerBoard {
                passenger: 1,
                elevator: 0,
                floor: 0,
            },
            SimulationEvent::PassengerAlight {
                passenger: 2,
                elevator: 1,
                floor: 3,
            },
        ];
        let elevators = vec![snapshot(0, 0.0, vec![1]), snapshot(1, 3.0, Vec::new())];
        let batch = translate(&events, &elevators);

        let deferred = batch.iter().filter(|m| m.is_deferred()).count();
        let syncs = 2 + 1; // two elevators, one occupant
        assert_eq!(deferred, 1 + syncs);
    }

    #[test]
    fn sync_messages_follow_engine_events() {
        let events = vec![SimulationEvent::UpButtonPressed {
            passenger: 1,
            floor: 0,
        }];
        let elevators = vec![snapshot(0, 2.5, vec![9])];
        let batch = translate(&events, &elevators);
        assert_eq!(
            batch,
            vec![
                Message::InitPassenger { id: 1, floor: 0.0 },
                Message::ElevatorUpdate {
                    id: 0,
                    floor: 2.5,
                    deferred: false,
                },
                Message::PassengerUpdate {
                    id: 9,
                    floor: 2.5,
                    state: PassengerState::Riding,
                    deferred: false,
                },
            ]
        );
    }
}
