/// ----- ENGINE SESSION MODULE -----
/// Blocking HTTP session to the remote discrete-tick simulation engine.
/// Provides the typed event and snapshot models for one tick, plus the
/// go_to_floor movement command.

use shared_resources::direction::Direction;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("engine request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("engine returned a malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimulationEvent {
    UpButtonPressed { passenger: u32, floor: u8 },
    DownButtonPressed { passenger: u32, floor: u8 },
    PassengerBoard { passenger: u32, elevator: u8, floor: u8 },
    PassengerAlight { passenger: u32, elevator: u8, floor: u8 },
    ElevatorStopped { elevator: u8, floor: u8 },
    ElevatorIdle { elevator: u8 },
    #[serde(other)]
    Unknown,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct ElevatorSnapshot {
    pub id: u8,
    pub current_floor: u8,
    pub current_floor_float: f64,
    pub target_floor: Option<u8>,
    pub last_tick_direction: Direction,
    pub passengers: Vec<u32>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct PassengerSnapshot {
    pub id: u32,
    pub destination: Option<u8>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct InitPayload {
    pub num_floors: u8,
    pub elevators: Vec<ElevatorSnapshot>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct TickPayload {
    pub tick: u64,
    #[serde(default)]
    pub finished: bool,
    pub events: Vec<SimulationEvent>,
    pub elevators: Vec<ElevatorSnapshot>,
    #[serde(default)]
    pub passengers: Vec<PassengerSnapshot>,
}

#[derive(serde::Serialize, Debug, Clone)]
struct GoToFloorBody {
    floor: u8,
    immediate: bool,
}

pub struct EngineClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl EngineClient {
    /// Open a session and receive the initial elevator/floor configuration.
    pub fn connect(base_url: &str) -> Result<(Self, InitPayload), EngineError> {
        let client = EngineClient {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        };
        let body = client
            .http
            .post(format!("{}/api/session", client.base_url))
            .send()?
            .error_for_status()?
            .text()?;
        let init = serde_json::from_str(&body)?;
        Ok((client, init))
    }

    /// Advance the engine one tick and receive the events and elevator
    /// snapshots for it.
    pub fn step(&self) -> Result<TickPayload, EngineError> {
        let body = self
            .http
            .post(format!("{}/api/step", self.base_url))
            .send()?
            .error_for_status()?
            .text()?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn go_to_floor(
        &self,
        elevator: u8,
        floor: u8,
        immediate: bool,
    ) -> Result<(), EngineError> {
        self.http
            .post(format!(
                "{}/api/elevators/{}/go_to_floor",
                self.base_url, elevator
            ))
            .json(&GoToFloorBody { floor, immediate })
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SimulationEvent;

    #[test]
    fn events_deserialize_from_tagged_payloads() {
        let event: SimulationEvent =
            serde_json::from_str(r#"{"type":"up_button_pressed","passenger":3,"floor":2}"#)
                .unwrap();
        assert_eq!(
            event,
            SimulationEvent::UpButtonPressed {
                passenger: 3,
                floor: 2
            }
        );

        let event: SimulationEvent =
            serde_json::from_str(r#"{"type":"passenger_board","passenger":7,"elevator":1,"floor":4}"#)
                .unwrap();
        assert_eq!(
            event,
            SimulationEvent::PassengerBoard {
                passenger: 7,
                elevator: 1,
                floor: 4
            }
        );
    }

    #[test]
    fn unknown_event_kinds_fall_back_to_unknown() {
        let event: SimulationEvent =
            serde_json::from_str(r#"{"type":"fire_alarm","floor":1}"#).unwrap();
        assert_eq!(event, SimulationEvent::Unknown);
    }
}
