/// ----- SCENE MODULE -----
/// Owns every on-screen entity and applies animation messages to them.
/// Layout lives in a fixed 800x800 logical pixel space; the vertical scale
/// shrinks with the floor count so the whole building stays on screen.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use shared_resources::message::{Message, PassengerState};

use crate::entity::{Entity, Position};

pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 800.0;
pub const FLOOR_HEIGHT: f64 = 96.0;
const DEFAULT_FLOORS: f64 = 6.0;

/// Where waiting passengers line up, with a per-passenger jitter so they
/// don't stack on one spot.
pub const WAITING_X: f64 = 100.0;
const WAITING_JITTER: f64 = 50.0;

/// Shaft x positions by elevator id.
pub const ELEVATOR_X: [f64; 5] = [250.0, 350.0, 450.0, 550.0, 650.0];
const BOARDING_JITTER: f64 = 24.0;

/// Passengers spawn off screen on the left and walk in.
pub const SPAWN_X: f64 = -100.0;

/// A person whose anchor reaches this x coordinate has left the building
/// and is never updated again.
pub const DESTROY_X: f64 = 750.0;

pub struct Scene {
    elevators: HashMap<u8, Entity>,
    passengers: HashMap<u32, Entity>,
    num_floors: u8,
    scale: f64,
    rng: SmallRng,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Scene {
            elevators: HashMap::new(),
            passengers: HashMap::new(),
            num_floors: 0,
            scale: 1.0,
            rng,
        }
    }

    pub fn elevators(&self) -> &HashMap<u8, Entity> {
        &self.elevators
    }

    pub fn passengers(&self) -> &HashMap<u32, Entity> {
        &self.passengers
    }

    pub fn num_floors(&self) -> u8 {
        self.num_floors
    }

    pub fn floor_to_y(&self, floor: f64) -> f64 {
        SCREEN_HEIGHT - 100.0 - floor * FLOOR_HEIGHT * self.scale
    }

    pub fn shaft_x(elevator: u8) -> f64 {
        ELEVATOR_X[elevator as usize % ELEVATOR_X.len()]
    }

    pub fn apply(&mut self, message: &Message) {
        match *message {
            Message::InitFloors { count } => {
                self.num_floors = count;
                self.scale = DEFAULT_FLOORS / count as f64;
            }
            Message::InitElevator { id, floor } => {
                let position = Position {
                    x: Self::shaft_x(id),
                    y: self.floor_to_y(floor),
                };
                self.elevators.insert(id, Entity::at(position));
            }
            Message::InitPassenger { id, floor } => {
                let y = self.floor_to_y(floor);
                let mut person = Entity::at(Position { x: SPAWN_X, y });
                person.retarget(Position {
                    x: WAITING_X + self.rng.gen_range(-WAITING_JITTER..=WAITING_JITTER),
                    y,
                });
                self.passengers.insert(id, person);
            }
            Message::ElevatorUpdate { id, floor, .. } => {
                let y = self.floor_to_y(floor);
                match self.elevators.get_mut(&id) {
                    Some(elevator) => elevator.retarget(Position {
                        x: Self::shaft_x(id),
                        y,
                    }),
                    None => log::warn!("update for unknown elevator {}", id),
                }
            }
            Message::PassengerUpdate {
                id, floor, state, ..
            } => {
                let y = self.floor_to_y(floor);
                let jitter = self.rng.gen_range(-BOARDING_JITTER..=BOARDING_JITTER) * self.scale;
                match self.passengers.get_mut(&id) {
                    Some(person) => {
                        let anchor = person.anchor();
                        let target = match state {
                            PassengerState::Exiting => Position {
                                x: DESTROY_X,
                                y: anchor.y,
                            },
                            PassengerState::Riding => Position { x: anchor.x, y },
                            PassengerState::Boarding(elevator) => Position {
                                x: Self::shaft_x(elevator) + jitter,
                                y: anchor.y,
                            },
                        };
                        person.retarget(target);
                    }
                    None => log::warn!("update for unknown passenger {}", id),
                }
            }
        }
    }

    /// Advance every live entity to `frame` of the current window. Persons
    /// that reached the destroy sentinel stay where they are.
    pub fn advance(&mut self, frame: u32, max_frame: u32) {
        for elevator in self.elevators.values_mut() {
            elevator.advance(frame, max_frame);
        }
        for person in self.passengers.values_mut() {
            if person.anchor().x >= DESTROY_X {
                continue;
            }
            person.advance(frame, max_frame);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}
