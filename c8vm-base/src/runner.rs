//! Runs a [`Processor`] in real time on its own thread.
//!
//! The runner thread is the only owner of the processor,
//! so instruction execution, timer ticks, key state changes and resets
//! are serialized without any locking.

use std::{
    io,
    thread::{self, JoinHandle},
};

use flume::{Receiver, Sender, TryRecvError};
use spin_sleep::LoopHelper;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::{
    processor::{ControlEvent, Processor, ProcessorError, ProcessorEvent},
    scheduler::{EventSink, Scheduler, SchedulerConfig},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunnerConfig {
    /// Timer frequency and instructions per timer tick.
    /// The runner sleeps between ticks to match the timer frequency.
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("the timer frequency must be at least 1 Hz")]
    ZeroTimerFrequency,
    #[error("the processor thread could not be spawned")]
    Spawn(#[from] io::Error),
}

/// Handles to a running processor.
pub type RunnerHandles = (
    Sender<ControlEvent>,
    Receiver<ProcessorEvent>,
    JoinHandle<Result<(), ProcessorError>>,
);

impl Processor {
    /// Move the processor onto a new thread and run it in real time.
    ///
    /// Dropping the returned [`Sender`] stops the processor,
    /// the thread then returns `Ok(())`.
    /// On a fatal error [`ProcessorEvent::ErrorEncountered`] is sent
    /// and the thread returns the error.
    ///
    /// A timer frequency of zero is rejected before any thread is spawned.
    pub fn start(self, config: RunnerConfig) -> Result<RunnerHandles, RunnerError> {
        if config.scheduler.timer_frequency_hz == 0 {
            return Err(RunnerError::ZeroTimerFrequency);
        }

        let (control_event_sender, control_event_receiver) = flume::unbounded();
        let (processor_event_sender, processor_event_receiver) = flume::unbounded();

        let join_handle = thread::Builder::new()
            .name("processor".to_owned())
            .spawn(move || {
                run(
                    Scheduler::new(self, config.scheduler),
                    control_event_receiver,
                    processor_event_sender,
                )
            })?;

        Ok((control_event_sender, processor_event_receiver, join_handle))
    }
}

#[instrument(skip_all, fields(config = ?scheduler.config()))]
fn run(
    mut scheduler: Scheduler,
    control_event_receiver: Receiver<ControlEvent>,
    mut processor_event_sender: Sender<ProcessorEvent>,
) -> Result<(), ProcessorError> {
    let mut loop_helper =
        LoopHelper::builder().build_with_target_rate(scheduler.config().timer_frequency_hz);

    loop {
        loop_helper.loop_start();

        loop {
            match control_event_receiver.try_recv() {
                Ok(ControlEvent::KeyStateChange { key, new_state }) => {
                    scheduler.set_key_state(key, new_state)
                }
                Ok(ControlEvent::Reset { program }) => {
                    if let Err(error) = scheduler.reset(&program, &mut processor_event_sender) {
                        warn!(%error, "ignoring reset request");
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("control event sender dropped, stopping");
                    return Ok(());
                }
            }
        }

        if let Err(error) = scheduler.run_tick(&mut processor_event_sender) {
            error!(%error, "stopping on fatal error");
            processor_event_sender.emit(ProcessorEvent::ErrorEncountered {
                error: error.clone(),
            });
            return Err(error);
        }

        loop_helper.loop_sleep();
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;
    use crate::processor::{Key, KeyState};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn start(program: &[u8]) -> RunnerHandles {
        Processor::builder()
            .program(program)
            .unwrap()
            .build()
            .start(RunnerConfig {
                scheduler: SchedulerConfig {
                    timer_frequency_hz: 1000,
                    instructions_per_tick: 4,
                },
            })
            .unwrap()
    }

    #[test]
    fn rejects_zero_timer_frequency() {
        let result = Processor::builder()
            .program(&[0x12, 0x00])
            .unwrap()
            .build()
            .start(RunnerConfig {
                scheduler: SchedulerConfig {
                    timer_frequency_hz: 0,
                    instructions_per_tick: 4,
                },
            });

        assert!(matches!(result, Err(RunnerError::ZeroTimerFrequency)));
    }

    #[test]
    fn stops_when_control_sender_dropped() {
        // JP 0x200
        let (control, _events, join_handle) = start(&[0x12, 0x00]);

        drop(control);

        assert_eq!(join_handle.join().unwrap(), Ok(()));
    }

    #[test]
    fn reports_fatal_error() {
        // RET with an empty call stack
        let (_control, events, join_handle) = start(&[0x00, 0xEE]);

        let expected = ProcessorError::StackUnderflow {
            program_counter: 0x200,
        };
        assert_eq!(
            events.recv_timeout(TIMEOUT),
            Ok(ProcessorEvent::ErrorEncountered {
                error: expected.clone()
            })
        );
        assert_eq!(join_handle.join().unwrap(), Err(expected));
    }

    #[test]
    fn key_press_resolves_wait() {
        // LD V0, K; CLS; JP 0x204
        let (control, events, join_handle) = start(&[0xF0, 0x0A, 0x00, 0xE0, 0x12, 0x04]);

        assert_eq!(
            events.recv_timeout(TIMEOUT),
            Ok(ProcessorEvent::WaitForKeyPress)
        );

        control
            .send(ControlEvent::KeyStateChange {
                key: Key::K7,
                new_state: KeyState::Pressed,
            })
            .unwrap();

        assert_eq!(
            events.recv_timeout(TIMEOUT),
            Ok(ProcessorEvent::ScreenCleared)
        );

        drop(control);
        assert_eq!(join_handle.join().unwrap(), Ok(()));
    }

    #[test]
    fn reset_restarts_program() {
        // LD V0, K
        let (control, events, join_handle) = start(&[0xF0, 0x0A]);
        assert_eq!(
            events.recv_timeout(TIMEOUT),
            Ok(ProcessorEvent::WaitForKeyPress)
        );

        // RET with an empty call stack
        control
            .send(ControlEvent::Reset {
                program: vec![0x00, 0xEE],
            })
            .unwrap();

        assert_eq!(
            events.recv_timeout(TIMEOUT),
            Ok(ProcessorEvent::ScreenCleared)
        );
        assert!(matches!(
            events.recv_timeout(TIMEOUT),
            Ok(ProcessorEvent::ErrorEncountered { .. })
        ));
        assert!(join_handle.join().unwrap().is_err());
    }
}
