/// ----- DISPATCH MODULE -----
/// Movement decisions for every elevator lifecycle callback. The policy is
/// a loop-and-serve heuristic: keep the last direction while there is
/// demand ahead, otherwise turn around, one floor of travel at a time.
/// In-car destinations take priority over waiting hall calls.

use std::collections::{BTreeMap, HashMap};

use shared_resources::direction::Direction;

use crate::engine::ElevatorSnapshot;

/// Floor commanded when an elevator reports idle with no known demand.
const FALLBACK_FLOOR: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Command {
    pub elevator: u8,
    pub floor: u8,
    pub immediate: bool,
}

pub struct DispatchPolicy {
    max_floor: u8,
    /// Per elevator, a multiset of the floors its occupants want.
    destinations: HashMap<u8, BTreeMap<u8, u32>>,
    /// Passengers who called but have not boarded: id -> (floor, direction).
    waiting: HashMap<u32, (u8, Direction)>,
}

impl DispatchPolicy {
    pub fn new() -> Self {
        DispatchPolicy {
            max_floor: 0,
            destinations: HashMap::new(),
            waiting: HashMap::new(),
        }
    }

    /// Distribute the elevators evenly over the floor range. The commands
    /// carry the immediate flag: initial placement teleports.
    pub fn on_init(&mut self, elevators: &[ElevatorSnapshot], num_floors: u8) -> Vec<Command> {
        self.max_floor = num_floors.saturating_sub(1);
        let count = elevators.len().max(1);
        elevators
            .iter()
            .enumerate()
            .map(|(i, elevator)| {
                self.destinations.insert(elevator.id, BTreeMap::new());
                Command {
                    elevator: elevator.id,
                    floor: (i * self.max_floor as usize / count) as u8,
                    immediate: true,
                }
            })
            .collect()
    }

    pub fn on_passenger_call(&mut self, passenger: u32, floor: u8, direction: Direction) {
        self.waiting.insert(passenger, (floor, direction));
    }

    pub fn on_elevator_idle(&self, elevator: u8) -> Command {
        Command {
            elevator,
            floor: FALLBACK_FLOOR.min(self.max_floor),
            immediate: false,
        }
    }

    /// The core decision: pick the next direction for a stopped elevator
    /// and command exactly one floor of travel.
    pub fn on_elevator_stopped(&self, elevator: &ElevatorSnapshot) -> Command {
        let curr = elevator.current_floor;
        let dir_last = elevator.last_tick_direction;

        let in_car = self
            .destinations
            .get(&elevator.id)
            .filter(|floors| !floors.is_empty());
        let direction = match in_car.and_then(|floors| self.towards_destinations(floors, curr, dir_last)) {
            Some(direction) => direction,
            None => self.from_waiting_calls(curr, dir_last),
        };

        // boundary clamp before the one-floor step
        let direction = if direction == Direction::Up && curr >= self.max_floor {
            Direction::Down
        } else if direction == Direction::Down && curr == 0 {
            Direction::Up
        } else {
            direction
        };

        let floor = match direction {
            Direction::Up => curr + 1,
            _ => curr - 1,
        };
        Command {
            elevator: elevator.id,
            floor,
            immediate: false,
        }
    }

    /// In-car destinations take priority: keep direction while a destination
    /// lies that way, otherwise head for the nearer destination set, ties
    /// and an empty set below both resolving up. The comparison uses the
    /// minimum floor of each set.
    fn towards_destinations(
        &self,
        floors: &BTreeMap<u8, u32>,
        curr: u8,
        dir_last: Direction,
    ) -> Option<Direction> {
        let min_above = floors.range(curr + 1..).next().map(|(&floor, _)| floor);
        let min_below = floors.range(..curr).next().map(|(&floor, _)| floor);

        if dir_last == Direction::Up && min_above.is_some() {
            return Some(Direction::Up);
        }
        if dir_last == Direction::Down && min_below.is_some() {
            return Some(Direction::Down);
        }
        match (min_above, min_below) {
            (Some(above), Some(below)) => {
                if above - curr <= curr - below {
                    Some(Direction::Up)
                } else {
                    Some(Direction::Down)
                }
            }
            (Some(_), None) => Some(Direction::Up),
            (None, Some(_)) => Some(Direction::Down),
            // every held destination is the current floor: no in-car target
            (None, None) => None,
        }
    }

    /// No in-car destinations: keep direction while a waiting call sits at
    /// the current floor in the same sense, or anywhere ahead of it in that
    /// sense (the call's own direction does not matter for "ahead" demand);
    /// otherwise turn around.
    fn from_waiting_calls(&self, curr: u8, dir_last: Direction) -> Direction {
        match dir_last {
            Direction::Up | Direction::Down => {
                if self.calls_sustain(curr, dir_last) {
                    dir_last
                } else {
                    dir_last.opposite()
                }
            }
            Direction::Stop => Direction::Up,
        }
    }

    fn calls_sustain(&self, curr: u8, direction: Direction) -> bool {
        self.waiting.values().any(|&(floor, call_direction)| {
            if floor == curr {
                return call_direction == direction;
            }
            match direction {
                Direction::Up => floor > curr,
                Direction::Down => floor < curr,
                Direction::Stop => false,
            }
        })
    }

    /// A boarding passenger stops waiting; their destination joins the
    /// elevator's in-car multiset unless it is the boarding floor itself.
    /// An unknown destination counts as no in-car target.
    pub fn on_passenger_board(
        &mut self,
        elevator: u8,
        passenger: u32,
        floor: u8,
        destination: Option<u8>,
    ) {
        self.waiting.remove(&passenger);
        if let Some(destination) = destination {
            if destination != floor {
                *self
                    .destinations
                    .entry(elevator)
                    .or_default()
                    .entry(destination)
                    .or_insert(0) += 1;
            }
        }
    }

    pub fn on_passenger_alight(&mut self, elevator: u8, floor: u8) {
        if let Some(floors) = self.destinations.get_mut(&elevator) {
            if let Some(count) = floors.get_mut(&floor) {
                *count -= 1;
                if *count == 0 {
                    floors.remove(&floor);
                }
            }
        }
    }

    pub fn is_waiting(&self, passenger: u32) -> bool {
        self.waiting.contains_key(&passenger)
    }

    pub fn destination_count(&self, elevator: u8, floor: u8) -> u32 {
        self.destinations
            .get(&elevator)
            .and_then(|floors| floors.get(&floor))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        DispatchPolicy::new()
    }
}
