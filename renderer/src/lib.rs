/// ----- RENDERER -----
/// The renderer worker: polls the tick barrier from its redraw loop, drains
/// each handed-over message batch, and animates it over a fixed frame
/// window. Deferred messages are held back and replayed for one extra
/// internal cycle before the controller is released.

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use shared_resources::barrier::TickBarrier;
use shared_resources::config::RendererConfig;
use shared_resources::message::Message;

pub mod entity;
pub mod scene;
pub mod view;

pub fn main(barrier: Arc<TickBarrier>, config: RendererConfig) -> crossterm::Result<()> {
    let mut stdout = stdout();
    view::enter(&mut stdout)?;

    let frame_budget = Duration::from_millis(1000 / config.frame_rate.max(1));
    let mut scene = scene::Scene::new();
    let mut deferred: Vec<Message> = Vec::new();
    let mut animating = false;
    let mut frame: u32 = 0;

    loop {
        // input poll doubles as the frame clock; quit abandons a blocked
        // controller, which is the documented shutdown path
        if view::quit_requested(frame_budget)? {
            break;
        }

        if barrier.poll_start() && !animating {
            for message in barrier.drain() {
                if message.is_deferred() {
                    deferred.push(message);
                } else {
                    scene.apply(&message);
                }
            }
            animating = true;
            frame = 0;
        }

        if animating {
            frame += 1;
            scene.advance(frame, config.max_frame);
            if frame >= config.max_frame {
                animating = false;
                if deferred.is_empty() {
                    barrier.complete();
                } else {
                    // one extra cycle for the held-back messages; the
                    // controller stays blocked until it runs out
                    barrier.replay(deferred.drain(..).collect());
                }
            }
        }

        view::draw(&mut stdout, &scene)?;
    }

    view::leave(&mut stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use shared_resources::barrier::TickBarrier;
    use shared_resources::message::{Message, PassengerState};

    use crate::scene::{Scene, DESTROY_X};

    const MAX_FRAME: u32 = 60;

    /// One drain-and-animate cycle of the render loop, without the
    /// terminal: returns the messages held back for replay.
    fn drain_cycle(barrier: &TickBarrier, scene: &mut Scene) -> Vec<Message> {
        let mut deferred = Vec::new();
        for message in barrier.drain() {
            if message.is_deferred() {
                deferred.push(message);
            } else {
                scene.apply(&message);
            }
        }
        for frame in 1..=MAX_FRAME {
            scene.advance(frame, MAX_FRAME);
        }
        deferred
    }

    #[test]
    fn deferred_exit_applies_one_cycle_late() {
        let barrier = TickBarrier::new();
        let mut scene = Scene::seeded(7);
        scene.apply(&Message::InitFloors { count: 6 });
        scene.apply(&Message::InitPassenger { id: 7, floor: 0.0 });
        for frame in 1..=MAX_FRAME {
            scene.advance(frame, MAX_FRAME);
        }

        barrier.publish(vec![
            Message::PassengerUpdate {
                id: 7,
                floor: 3.0,
                state: PassengerState::Riding,
                deferred: false,
            },
            Message::PassengerUpdate {
                id: 7,
                floor: 3.0,
                state: PassengerState::Exiting,
                deferred: true,
            },
        ]);

        // first cycle: the snap applies, the exit is held back
        let deferred = drain_cycle(&barrier, &mut scene);
        assert_eq!(deferred.len(), 1);
        assert!(scene.passengers()[&7].anchor().x < DESTROY_X);
        assert_eq!(scene.passengers()[&7].anchor().y, scene.floor_to_y(3.0));

        // replay cycle: the exit animation runs to the sentinel
        barrier.replay(deferred);
        let deferred = drain_cycle(&barrier, &mut scene);
        assert!(deferred.is_empty());
        assert_eq!(scene.passengers()[&7].anchor().x, DESTROY_X);
    }
}
