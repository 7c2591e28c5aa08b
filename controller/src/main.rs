use std::collections::HashMap;
use std::process;
use std::sync::Arc;
use std::thread;

use shared_resources::barrier::TickBarrier;
use shared_resources::config::{ControllerConfig, RendererConfig};
use shared_resources::direction::Direction;

use crate::engine::{EngineClient, EngineError, SimulationEvent};

pub mod dispatch;
pub mod engine;
pub mod translator;

fn main() -> Result<(), EngineError> {
    env_logger::init();

    // READ CONFIGURATION
    let config = ControllerConfig::get();

    // INITIALIZE BARRIER AND MESSAGE QUEUE
    let barrier = Arc::new(TickBarrier::new());

    // INITIALIZE THREAD FOR RENDERER
    {
        let barrier = barrier.clone();
        let renderer_config = RendererConfig::get();
        thread::spawn(move || {
            if renderer::main(barrier, renderer_config).is_err() {
                process::exit(1);
            }
        });
    }

    // ESTABLISH ENGINE SESSION
    let (client, init) = EngineClient::connect(&config.engine_url)?;
    log::info!(
        "connected to {}: {} floors, {} elevators",
        config.engine_url,
        init.num_floors,
        init.elevators.len()
    );

    let mut policy = dispatch::DispatchPolicy::new();
    for command in policy.on_init(&init.elevators, init.num_floors) {
        client.go_to_floor(command.elevator, command.floor, command.immediate)?;
    }
    barrier.publish(translator::init_batch(init.num_floors, &init.elevators));

    // TICK LOOP
    loop {
        let update = client.step()?;
        log::debug!("tick {}: {} events", update.tick, update.events.len());
        for elevator in &update.elevators {
            log::debug!(
                "  elevator {} at {:.2}/{:?}, {} aboard",
                elevator.id,
                elevator.current_floor_float,
                elevator.target_floor,
                elevator.passengers.len()
            );
        }

        let elevators: HashMap<u8, &engine::ElevatorSnapshot> =
            update.elevators.iter().map(|e| (e.id, e)).collect();
        let destinations: HashMap<u32, Option<u8>> = update
            .passengers
            .iter()
            .map(|p| (p.id, p.destination))
            .collect();

        // DISPATCH EVENTS TO THE POLICY
        for event in &update.events {
            match *event {
                SimulationEvent::UpButtonPressed { passenger, floor } => {
                    policy.on_passenger_call(passenger, floor, Direction::Up);
                }
                SimulationEvent::DownButtonPressed { passenger, floor } => {
                    policy.on_passenger_call(passenger, floor, Direction::Down);
                }
                SimulationEvent::PassengerBoard {
                    passenger,
                    elevator,
                    floor,
                } => {
                    let destination = destinations.get(&passenger).copied().flatten();
                    policy.on_passenger_board(elevator, passenger, floor, destination);
                }
                SimulationEvent::PassengerAlight {
                    elevator, floor, ..
                } => {
                    policy.on_passenger_alight(elevator, floor);
                }
                SimulationEvent::ElevatorStopped { elevator, .. } => {
                    match elevators.get(&elevator) {
                        Some(snapshot) => {
                            let command = policy.on_elevator_stopped(snapshot);
                            client.go_to_floor(command.elevator, command.floor, command.immediate)?;
                        }
                        None => log::warn!("stop event for unreported elevator {}", elevator),
                    }
                }
                SimulationEvent::ElevatorIdle { elevator } => {
                    let command = policy.on_elevator_idle(elevator);
                    client.go_to_floor(command.elevator, command.floor, command.immediate)?;
                }
                SimulationEvent::Unknown => {
                    log::warn!("ignoring unknown engine event");
                }
            }
        }

        // HAND THE TICK'S BATCH TO THE RENDERER AND WAIT
        barrier.handoff(translator::translate(&update.events, &update.elevators));

        if update.finished {
            log::info!("simulation finished after tick {}", update.tick);
            return Ok(());
        }
    }
}
