/// ----- TICK BARRIER -----
/// Rendezvous between the controller and the renderer. The controller hands
/// over one message batch per simulation tick and blocks until the renderer
/// has finished animating it; the renderer never blocks, it polls for a
/// pending handoff from its own redraw loop. The message queue inside the
/// barrier is the only channel between the two workers.

use std::sync::{Condvar, Mutex};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::message::Message;

struct Phase {
    start: bool,
    finish: bool,
}

pub struct TickBarrier {
    queue_tx: Sender<Message>,
    queue_rx: Receiver<Message>,
    phase: Mutex<Phase>,
    handover: Condvar,
}

impl TickBarrier {
    pub fn new() -> Self {
        let (queue_tx, queue_rx) = unbounded();
        TickBarrier {
            queue_tx,
            queue_rx,
            phase: Mutex::new(Phase {
                start: false,
                finish: false,
            }),
            handover: Condvar::new(),
        }
    }

    /// Enqueue messages without starting a handoff. Used for the init batch,
    /// which is released to the renderer by the first tick's handoff.
    pub fn publish(&self, batch: Vec<Message>) {
        for message in batch {
            self.queue_tx.send(message).unwrap();
        }
    }

    /// Controller side: enqueue the tick's batch, raise start and block
    /// until the renderer completes. The finish flag is cleared before
    /// returning so the next handoff cannot wake spuriously.
    pub fn handoff(&self, batch: Vec<Message>) {
        self.publish(batch);
        let mut phase = self.phase.lock().unwrap();
        phase.start = true;
        self.handover.notify_all();
        while !phase.finish {
            phase = self.handover.wait(phase).unwrap();
        }
        phase.finish = false;
    }

    /// Renderer side: is a handoff pending? Never blocks.
    pub fn poll_start(&self) -> bool {
        self.phase.lock().unwrap().start
    }

    /// Renderer side: take the entire current queue contents, in enqueue
    /// order.
    pub fn drain(&self) -> Vec<Message> {
        self.queue_rx.try_iter().collect()
    }

    /// Renderer side: requeue deferred messages, flags lowered, for one
    /// extra drain-and-animate cycle. The controller stays blocked.
    pub fn replay(&self, batch: Vec<Message>) {
        for message in batch {
            self.queue_tx.send(message.without_deferral()).unwrap();
        }
    }

    /// Renderer side: end the handoff and release the controller.
    pub fn complete(&self) {
        let mut phase = self.phase.lock().unwrap();
        phase.start = false;
        phase.finish = true;
        self.handover.notify_all();
    }
}

impl Default for TickBarrier {
    fn default() -> Self {
        TickBarrier::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use crate::message::{Message, PassengerState};

    use super::TickBarrier;

    fn elevator_update(id: u8, floor: f64, deferred: bool) -> Message {
        Message::ElevatorUpdate {
            id,
            floor,
            deferred,
        }
    }

    #[test]
    fn publish_does_not_start_a_handoff() {
        let barrier = TickBarrier::new();
        barrier.publish(vec![elevator_update(0, 1.0, false)]);
        assert!(!barrier.poll_start());
        assert_eq!(barrier.drain().len(), 1);
    }

    #[test]
    fn drain_preserves_enqueue_order() {
        let barrier = TickBarrier::new();
        barrier.publish(vec![
            Message::InitFloors { count: 6 },
            Message::InitElevator { id: 0, floor: 0.0 },
            elevator_update(0, 2.5, false),
        ]);
        let drained = barrier.drain();
        assert_eq!(drained[0], Message::InitFloors { count: 6 });
        assert_eq!(drained[1], Message::InitElevator { id: 0, floor: 0.0 });
        assert_eq!(drained[2], elevator_update(0, 2.5, false));
    }

    #[test]
    fn replay_lowers_the_deferred_flag() {
        let barrier = TickBarrier::new();
        barrier.replay(vec![Message::PassengerUpdate {
            id: 7,
            floor: 9.0,
            state: PassengerState::Exiting,
            deferred: true,
        }]);
        let drained = barrier.drain();
        assert_eq!(drained.len(), 1);
        assert!(!drained[0].is_deferred());
    }

    #[test]
    fn handoff_blocks_until_complete_and_repeats() {
        let barrier = Arc::new(TickBarrier::new());
        let renderer = {
            let barrier = barrier.clone();
            thread::spawn(move || {
                let mut batches = Vec::new();
                while batches.len() < 2 {
                    if barrier.poll_start() {
                        batches.push(barrier.drain());
                        barrier.complete();
                    } else {
                        thread::sleep(Duration::from_millis(1));
                    }
                }
                batches
            })
        };

        barrier.handoff(vec![elevator_update(0, 1.0, false)]);
        assert!(!barrier.poll_start());
        barrier.handoff(vec![elevator_update(0, 2.0, false)]);

        let batches = renderer.join().unwrap();
        assert_eq!(batches[0], vec![elevator_update(0, 1.0, false)]);
        assert_eq!(batches[1], vec![elevator_update(0, 2.0, false)]);
    }
}
