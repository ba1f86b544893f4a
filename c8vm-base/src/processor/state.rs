use std::ops::Range;

use super::{
    CallStack, DataRegister, Key, KeyState, ProcessorBuilderError, ProcessorError,
    ProgramCounterUpdate,
};
use crate::{
    font::{FONT, FONT_LEN},
    screen::Screen,
};

/// Everything an instruction can read or write.
///
/// Owned by a [`Processor`](super::Processor) and only ever mutated through it,
/// by the operation table and the timer tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    pub(crate) program_counter: u16,
    pub(crate) memory: [u8; Self::MEMORY_LEN],
    pub(crate) data_registers: [u8; DataRegister::COUNT],
    pub(crate) address_register: u16,
    pub(crate) call_stack: CallStack,
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) screen: Screen,
    pub(crate) pending_key_register: Option<DataRegister>,
    pub(crate) key_states: [KeyState; Key::COUNT],
}

impl Default for MachineState {
    /// The state right after a reset with an empty program.
    fn default() -> Self {
        let mut memory = [0; Self::MEMORY_LEN];
        memory[..FONT_LEN].copy_from_slice(&FONT);

        Self {
            program_counter: Self::PROGRAM_START,
            memory,
            data_registers: [0; DataRegister::COUNT],
            address_register: 0,
            call_stack: CallStack::default(),
            delay_timer: 0,
            sound_timer: 0,
            screen: Screen::default(),
            pending_key_register: None,
            key_states: [KeyState::default(); Key::COUNT],
        }
    }
}

impl MachineState {
    /// Size of the addressable memory in bytes.
    pub const MEMORY_LEN: usize = 4096;
    /// Address the program image is loaded to and execution starts at.
    pub const PROGRAM_START: u16 = 0x200;
    /// The maximum length of a program image.
    pub const MAX_PROGRAM_LEN: usize = Self::MEMORY_LEN - Self::PROGRAM_START as usize;
    /// Width of an opcode in bytes.
    pub const INSTRUCTION_LEN: u16 = std::mem::size_of::<u16>() as u16;

    /// Fresh state with the font installed and `program` loaded at [`Self::PROGRAM_START`].
    pub fn with_program(program: &[u8]) -> Result<Self, ProcessorBuilderError> {
        if program.len() > Self::MAX_PROGRAM_LEN {
            return Err(ProcessorBuilderError::ProgramExceedsUsableMemoryLen {
                program_len: program.len(),
            });
        }

        let mut state = Self::default();
        let start = Self::PROGRAM_START as usize;
        state.memory[start..start + program.len()].copy_from_slice(program);

        Ok(state)
    }

    pub const fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    /// Get the value of a data register.
    pub const fn register(&self, register: DataRegister) -> u8 {
        self.data_registers[register.index()]
    }

    /// Set the value of a data register.
    pub(crate) fn set_register(&mut self, register: DataRegister, val: u8) {
        self.data_registers[register.index()] = val;
    }

    pub const fn address_register(&self) -> u16 {
        self.address_register
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    /// The number of used call stack entries.
    pub fn stack_pointer(&self) -> usize {
        self.call_stack.len()
    }

    pub const fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub const fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The register waiting to receive the next pressed key, if any.
    pub const fn pending_key_register(&self) -> Option<DataRegister> {
        self.pending_key_register
    }

    /// Get the state of a key.
    pub const fn key_state(&self, key: Key) -> KeyState {
        self.key_states[key as u8 as usize]
    }

    /// Whether the key with the id `key_id` is pressed.
    /// Ids outside of the keypad are never pressed.
    pub(crate) fn is_key_id_pressed(&self, key_id: u8) -> bool {
        self.key_states
            .get(key_id as usize)
            .map_or(false, |&state| state == KeyState::Pressed)
    }

    /// Fetch the opcode at the program counter, most significant byte first.
    pub(crate) fn fetch(&self) -> Result<u16, ProcessorError> {
        let range = self.memory_range(self.program_counter, Self::INSTRUCTION_LEN as usize)?;
        let bytes = &self.memory[range];
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Bounds check an access of `len` bytes starting at `start`.
    pub(crate) fn memory_range(
        &self,
        start: u16,
        len: usize,
    ) -> Result<Range<usize>, ProcessorError> {
        let start = start as usize;
        let end = start + len;
        if end > Self::MEMORY_LEN {
            return Err(ProcessorError::OutOfBoundsMemoryAccess {
                program_counter: self.program_counter,
                address: end - 1,
            });
        }
        Ok(start..end)
    }

    /// Apply the engine's program counter policy after an operation ran.
    pub(crate) fn advance_program_counter(&mut self, update: ProgramCounterUpdate) {
        match update {
            ProgramCounterUpdate::Jumped => (),
            ProgramCounterUpdate::Next => {
                self.program_counter = self.program_counter.wrapping_add(Self::INSTRUCTION_LEN)
            }
            ProgramCounterUpdate::Skip => {
                self.program_counter = self
                    .program_counter
                    .wrapping_add(2 * Self::INSTRUCTION_LEN)
            }
        }
    }

    /// Count both timers down by one, stopping at zero.
    pub(crate) fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}
