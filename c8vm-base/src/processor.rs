use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::instruction::{Instruction, UnknownOpcodeError};

mod call_stack;
mod data_register;
mod event;
mod key;
mod operations;
mod state;

pub use call_stack::{CallStack, CallStackCapacityExceededError};
pub use data_register::DataRegister;
pub use event::{ControlEvent, ProcessorEvent};
pub use key::{Key, KeyState};
pub use operations::ProgramCounterUpdate;
pub use state::MachineState;

/// A fatal condition, execution cannot continue after any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessorError {
    #[error("unknown opcode {opcode:04X} at {program_counter:X}")]
    UnknownOpcode { opcode: u16, program_counter: u16 },
    #[error("the call request at {program_counter:X} exceeds the maximum call stack size")]
    StackOverflow { program_counter: u16 },
    #[error("return was requested at {program_counter:X} with an empty call stack")]
    StackUnderflow { program_counter: u16 },
    #[error("an out of bounds memory access to {address:X} was requested at {program_counter:X}")]
    OutOfBoundsMemoryAccess { program_counter: u16, address: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessorBuilderError {
    #[error(
        "a program with a length ({program_len:X}) greater than the usable length of memory ({:X}) was supplied",
        MachineState::MAX_PROGRAM_LEN
    )]
    ProgramExceedsUsableMemoryLen { program_len: usize },
}

/// What a single [`Processor::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The instruction was fetched, decoded and executed.
    Executed(Instruction),
    /// Nothing was fetched, a key press is pending.
    WaitingForKey,
}

/// The execution engine.
///
/// Owns the [`MachineState`] and runs one instruction per [`Processor::step`].
/// Timers are only ever counted down by [`Processor::tick_timers`],
/// never by executing instructions.
#[derive(Debug)]
pub struct Processor {
    state: MachineState,
    rng: StdRng,
    halted: Option<ProcessorError>,
}

impl Default for Processor {
    fn default() -> Self {
        ProcessorBuilder::new().build()
    }
}

impl Processor {
    /// Screen width in pixels.
    pub const SCREEN_WIDTH: u8 = crate::screen::Screen::WIDTH;
    /// Screen height in pixels.
    pub const SCREEN_HEIGHT: u8 = crate::screen::Screen::HEIGHT;

    pub fn builder() -> ProcessorBuilder {
        ProcessorBuilder::new()
    }

    /// Wrap an already prepared state, mostly useful for testing.
    pub fn with_state(state: MachineState) -> Self {
        Self {
            state,
            rng: StdRng::from_entropy(),
            halted: None,
        }
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn screen(&self) -> &crate::screen::Screen {
        self.state.screen()
    }

    /// The error execution was halted with, if any.
    pub fn halted(&self) -> Option<&ProcessorError> {
        self.halted.as_ref()
    }

    pub fn is_waiting_for_key(&self) -> bool {
        self.state.pending_key_register.is_some()
    }

    /// Discard all state and start over with `program`.
    #[instrument(skip(self, program), fields(program_len = program.len()))]
    pub fn reset(&mut self, program: &[u8]) -> Result<(), ProcessorBuilderError> {
        self.state = MachineState::with_program(program)?;
        self.halted = None;
        debug!("processor reset");
        Ok(())
    }

    /// Set the state of a key.
    ///
    /// A press resolves a pending [`Instruction::WaitForKeyPress`].
    /// Returns `true` if it did.
    pub fn set_key_state(&mut self, key: Key, state: KeyState) -> bool {
        self.state.key_states[key as u8 as usize] = state;

        match self.state.pending_key_register {
            Some(target_register) if state == KeyState::Pressed => {
                self.state.pending_key_register = None;
                self.state.set_register(target_register, key as u8);
                debug!(?key, %target_register, "key press resolved wait");
                true
            }
            _ => false,
        }
    }

    /// Count the delay and sound timers down by one.
    /// Meant to be called at a fixed frequency, independent of [`Processor::step`].
    pub fn tick_timers(&mut self) {
        self.state.tick_timers();
    }

    /// Fetch, decode and execute one instruction, then advance the program counter.
    ///
    /// Does nothing while waiting for a key press.
    /// Once an error was returned every further call returns the same error.
    pub fn step(&mut self) -> Result<StepOutcome, ProcessorError> {
        if let Some(error) = &self.halted {
            return Err(error.clone());
        }
        if self.is_waiting_for_key() {
            return Ok(StepOutcome::WaitingForKey);
        }

        match self.execute_next() {
            Ok(instruction) => Ok(StepOutcome::Executed(instruction)),
            Err(error) => {
                self.halted = Some(error.clone());
                Err(error)
            }
        }
    }

    fn execute_next(&mut self) -> Result<Instruction, ProcessorError> {
        let program_counter = self.state.program_counter;
        let opcode = self.state.fetch()?;
        let instruction = Instruction::decode(opcode).map_err(|UnknownOpcodeError { opcode }| {
            ProcessorError::UnknownOpcode {
                opcode,
                program_counter,
            }
        })?;

        trace!(program_counter, %instruction, "executing");

        let update = operations::execute(instruction, &mut self.state, &mut self.rng)?;
        debug_assert_eq!(
            update == ProgramCounterUpdate::Jumped,
            instruction.transfers_control()
        );
        self.state.advance_program_counter(update);

        Ok(instruction)
    }
}

pub struct ProcessorBuilder {
    /// The partially initialized state
    state: MachineState,
    rng_seed: Option<u64>,
}

impl ProcessorBuilder {
    pub fn new() -> Self {
        Self {
            state: MachineState::default(),
            rng_seed: None,
        }
    }

    /// Copies the program into memory starting at [`MachineState::PROGRAM_START`].
    pub fn program(mut self, program: &[u8]) -> Result<Self, ProcessorBuilderError> {
        self.state = MachineState::with_program(program)?;
        Ok(self)
    }

    /// Seed the random number generator used by [`Instruction::AssignRandomMasked`],
    /// making it deterministic.
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn build(self) -> Processor {
        let rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Processor {
            state: self.state,
            rng,
            halted: None,
        }
    }
}

impl Default for ProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
