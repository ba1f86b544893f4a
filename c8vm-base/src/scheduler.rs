//! Decouples instruction execution from the fixed frequency timer countdown.
//!
//! A [`Scheduler`] has two independent entry points,
//! [`Scheduler::run_cycles`] and [`Scheduler::tick_timers`],
//! so callers can drive them at whatever ratio they like.

use flume::Sender;
use tracing::{debug, trace};

use crate::{
    instruction::Instruction,
    processor::{
        Key, KeyState, Processor, ProcessorBuilderError, ProcessorError, ProcessorEvent,
        StepOutcome,
    },
};

/// Receiver of [`ProcessorEvent`]s.
pub trait EventSink {
    fn emit(&mut self, event: ProcessorEvent);
}

impl EventSink for Vec<ProcessorEvent> {
    fn emit(&mut self, event: ProcessorEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<ProcessorEvent> {
    fn emit(&mut self, event: ProcessorEvent) {
        if self.send(event).is_err() {
            trace!("event receiver closed, dropping event");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// How often per second the timers count down.
    pub timer_frequency_hz: u32,
    /// How many instructions are run per timer tick by [`Scheduler::run_tick`].
    pub instructions_per_tick: u32,
}

impl SchedulerConfig {
    pub const DEFAULT_TIMER_FREQUENCY_HZ: u32 = 60;
    pub const DEFAULT_INSTRUCTIONS_PER_TICK: u32 = 12;

    /// Saturates at `u32::MAX`.
    pub fn instructions_per_second(&self) -> u32 {
        self.timer_frequency_hz.saturating_mul(self.instructions_per_tick)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timer_frequency_hz: Self::DEFAULT_TIMER_FREQUENCY_HZ,
            instructions_per_tick: Self::DEFAULT_INSTRUCTIONS_PER_TICK,
        }
    }
}

#[derive(Debug)]
pub struct Scheduler {
    processor: Processor,
    config: SchedulerConfig,
    /// Whether the audio collaborator was last told to play.
    sound_playing: bool,
}

impl Scheduler {
    pub fn new(processor: Processor, config: SchedulerConfig) -> Self {
        Self {
            processor,
            config,
            sound_playing: false,
        }
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    pub fn config(&self) -> SchedulerConfig {
        self.config
    }

    /// Run up to `cycles` instructions.
    ///
    /// Stops early while a key press is pending.
    /// If the screen changed, a single [`ProcessorEvent::ScreenUpdate`] is emitted at the end,
    /// also when stopping because of an error.
    pub fn run_cycles(
        &mut self,
        cycles: u32,
        sink: &mut impl EventSink,
    ) -> Result<(), ProcessorError> {
        let mut screen_changed = false;
        let mut result = Ok(());

        for _ in 0..cycles {
            match self.processor.step() {
                Ok(StepOutcome::Executed(instruction)) => {
                    match instruction {
                        Instruction::ClearDisplay => {
                            sink.emit(ProcessorEvent::ScreenCleared);
                            screen_changed = true;
                        }
                        Instruction::DrawSprite { .. } => screen_changed = true,
                        Instruction::WaitForKeyPress { target_register } => {
                            debug!(%target_register, "waiting for key press");
                            sink.emit(ProcessorEvent::WaitForKeyPress);
                        }
                        _ => (),
                    }
                    self.sync_sound(sink);
                }
                Ok(StepOutcome::WaitingForKey) => break,
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }

        if screen_changed {
            sink.emit(ProcessorEvent::ScreenUpdate {
                new_screen: *self.processor.screen(),
            });
        }

        result
    }

    /// Count the timers down once.
    pub fn tick_timers(&mut self, sink: &mut impl EventSink) {
        self.processor.tick_timers();
        self.sync_sound(sink);
    }

    /// One timer period: [`SchedulerConfig::instructions_per_tick`] cycles, then a timer tick.
    pub fn run_tick(&mut self, sink: &mut impl EventSink) -> Result<(), ProcessorError> {
        self.run_cycles(self.config.instructions_per_tick, sink)?;
        self.tick_timers(sink);
        Ok(())
    }

    pub fn set_key_state(&mut self, key: Key, state: KeyState) {
        debug!(?key, ?state, "key state changed");
        self.processor.set_key_state(key, state);
    }

    /// Reset the processor with `program`.
    /// The screen is reported cleared and a playing tone is stopped.
    pub fn reset(
        &mut self,
        program: &[u8],
        sink: &mut impl EventSink,
    ) -> Result<(), ProcessorBuilderError> {
        self.processor.reset(program)?;
        sink.emit(ProcessorEvent::ScreenCleared);
        self.sync_sound(sink);
        Ok(())
    }

    /// Tell the audio collaborator whether to play, if that changed.
    fn sync_sound(&mut self, sink: &mut impl EventSink) {
        let should_play = self.processor.state().sound_timer() > 0;
        if should_play == self.sound_playing {
            return;
        }

        self.sound_playing = should_play;
        if should_play {
            debug!("tone on");
            sink.emit(ProcessorEvent::StartPlayingSound);
        } else {
            debug!("tone off");
            sink.emit(ProcessorEvent::StopPlayingSound);
        }
    }
}
