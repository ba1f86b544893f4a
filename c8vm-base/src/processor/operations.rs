//! The operation table: one state transition per [`Instruction`] variant.

use rand::Rng;

use super::{DataRegister, MachineState, ProcessorError};
use crate::{font, instruction::Instruction, nibble_ints::U4};

/// How the engine moves the program counter after an operation ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramCounterUpdate {
    /// Advance to the next instruction.
    Next,
    /// Advance past the next instruction.
    Skip,
    /// The operation set the program counter itself, don't advance.
    Jumped,
}

impl ProgramCounterUpdate {
    fn skip_if(condition: bool) -> Self {
        if condition {
            Self::Skip
        } else {
            Self::Next
        }
    }
}

/// Return decimal digits of a u8 value.
/// The hundreds digit is the first element in the array,
/// followed by the tens and single digits.
///
/// 3 digits are always enough, since the maximum value of a u8 is 255.
fn decimal_digits_of_u8(num: u8) -> [u8; 3] {
    [num / 100, num / 10 % 10, num % 10]
}

/// Apply `instruction` to `state`.
///
/// `state.program_counter` still holds the address of `instruction` when this is called.
pub(crate) fn execute<R: Rng>(
    instruction: Instruction,
    state: &mut MachineState,
    rng: &mut R,
) -> Result<ProgramCounterUpdate, ProcessorError> {
    use ProgramCounterUpdate::*;

    let update = match instruction {
        Instruction::SysJump { target_address } | Instruction::Jump { target_address } => {
            state.program_counter = target_address.into();
            Jumped
        }
        Instruction::ClearDisplay => {
            state.screen.clear();
            Next
        }
        Instruction::Return => {
            state.program_counter =
                state
                    .call_stack
                    .pop()
                    .ok_or(ProcessorError::StackUnderflow {
                        program_counter: state.program_counter,
                    })?;
            Jumped
        }
        Instruction::CallSubroutine { target_address } => {
            let program_counter = state.program_counter;
            state
                .call_stack
                .push(program_counter.wrapping_add(MachineState::INSTRUCTION_LEN))
                .map_err(|_| ProcessorError::StackOverflow { program_counter })?;
            state.program_counter = target_address.into();
            Jumped
        }
        Instruction::SkipIfEqConst { register, constant } => {
            ProgramCounterUpdate::skip_if(state.register(register) == constant)
        }
        Instruction::SkipIfNeqConst { register, constant } => {
            ProgramCounterUpdate::skip_if(state.register(register) != constant)
        }
        Instruction::SkipIfEq {
            register1,
            register2,
        } => ProgramCounterUpdate::skip_if(state.register(register1) == state.register(register2)),
        Instruction::AssignConst {
            target_register,
            constant,
        } => {
            state.set_register(target_register, constant);
            Next
        }
        Instruction::AddAssignConst {
            target_register,
            constant,
        } => {
            state.set_register(
                target_register,
                state.register(target_register).wrapping_add(constant),
            );
            Next
        }
        Instruction::Assign {
            target_register,
            source_register,
        } => {
            state.set_register(target_register, state.register(source_register));
            Next
        }
        Instruction::OrAssign {
            target_register,
            source_register,
        } => {
            state.set_register(
                target_register,
                state.register(target_register) | state.register(source_register),
            );
            Next
        }
        Instruction::AndAssign {
            target_register,
            source_register,
        } => {
            state.set_register(
                target_register,
                state.register(target_register) & state.register(source_register),
            );
            Next
        }
        Instruction::XorAssign {
            target_register,
            source_register,
        } => {
            state.set_register(
                target_register,
                state.register(target_register) ^ state.register(source_register),
            );
            Next
        }
        Instruction::AddAssign {
            target_register,
            source_register,
        } => {
            let (res, carry) = state
                .register(target_register)
                .overflowing_add(state.register(source_register));
            // Flag first, so with VF as the target the sum wins.
            state.set_register(DataRegister::VF, carry as u8);
            state.set_register(target_register, res);
            Next
        }
        Instruction::SubAssign {
            target_register,
            source_register,
        } => {
            let (res, borrow) = state
                .register(target_register)
                .overflowing_sub(state.register(source_register));
            state.set_register(DataRegister::VF, !borrow as u8);
            state.set_register(target_register, res);
            Next
        }
        Instruction::ShrAssign { register } => {
            let val = state.register(register);
            state.set_register(DataRegister::VF, val & 0b1);
            state.set_register(register, val >> 1);
            Next
        }
        Instruction::RevSubAssign {
            target_register,
            source_register,
        } => {
            let (res, borrow) = state
                .register(source_register)
                .overflowing_sub(state.register(target_register));
            state.set_register(DataRegister::VF, !borrow as u8);
            state.set_register(target_register, res);
            Next
        }
        Instruction::ShlAssign { register } => {
            let val = state.register(register);
            state.set_register(DataRegister::VF, (val >> 7) & 0b1);
            state.set_register(register, val << 1);
            Next
        }
        Instruction::SkipIfNeq {
            register1,
            register2,
        } => ProgramCounterUpdate::skip_if(state.register(register1) != state.register(register2)),
        Instruction::AssignAddrToI { address } => {
            state.address_register = address.into();
            Next
        }
        Instruction::JumpOffset { address } => {
            state.program_counter =
                u16::from(address).wrapping_add(state.register(DataRegister::V0) as u16);
            Jumped
        }
        Instruction::AssignRandomMasked {
            target_register,
            mask,
        } => {
            state.set_register(target_register, rng.gen::<u8>() & mask);
            Next
        }
        Instruction::DrawSprite {
            position_x_register,
            position_y_register,
            sprite_len,
        } => {
            let range = state.memory_range(state.address_register, u8::from(sprite_len) as usize)?;
            let x = state.register(position_x_register);
            let y = state.register(position_y_register);

            let collision = state.screen.draw_sprite(x, y, &state.memory[range]);

            state.set_register(DataRegister::VF, collision as u8);
            Next
        }
        Instruction::SkipIfKeyPressed { key_register } => {
            ProgramCounterUpdate::skip_if(state.is_key_id_pressed(state.register(key_register)))
        }
        Instruction::SkipIfKeyNotPressed { key_register } => {
            ProgramCounterUpdate::skip_if(!state.is_key_id_pressed(state.register(key_register)))
        }
        Instruction::AssignDelayTimerVal { target_register } => {
            state.set_register(target_register, state.delay_timer);
            Next
        }
        Instruction::WaitForKeyPress { target_register } => {
            state.pending_key_register = Some(target_register);
            Next
        }
        Instruction::SetDelayTimer { source_register } => {
            state.delay_timer = state.register(source_register);
            Next
        }
        Instruction::SetSoundTimer { source_register } => {
            state.sound_timer = state.register(source_register);
            Next
        }
        Instruction::AddAssignI { source_register } => {
            state.address_register = state
                .address_register
                .wrapping_add(state.register(source_register) as u16);
            Next
        }
        Instruction::AssignHexCharSpriteAddrToI { hex_char_register } => {
            let digit = U4::from_u8_masked(state.register(hex_char_register));
            state.address_register = font::glyph_address(digit);
            Next
        }
        Instruction::StoreBCD { source_register } => {
            let range = state.memory_range(state.address_register, 3)?;
            let digits = decimal_digits_of_u8(state.register(source_register));
            state.memory[range].copy_from_slice(&digits);
            Next
        }
        Instruction::StoreRegisterValues { last_register } => {
            let range = state.memory_range(state.address_register, last_register.index() + 1)?;
            state.memory[range].copy_from_slice(&state.data_registers[..=last_register.index()]);
            Next
        }
        Instruction::LoadRegisterValues { last_register } => {
            let range = state.memory_range(state.address_register, last_register.index() + 1)?;
            for (register, &byte) in DataRegister::up_to(last_register).zip(&state.memory[range]) {
                state.data_registers[register.index()] = byte;
            }
            Next
        }
    };

    Ok(update)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decimal_digits() {
        assert_eq!(decimal_digits_of_u8(0), [0, 0, 0]);
        assert_eq!(decimal_digits_of_u8(7), [0, 0, 7]);
        assert_eq!(decimal_digits_of_u8(42), [0, 4, 2]);
        assert_eq!(decimal_digits_of_u8(255), [2, 5, 5]);
    }

    #[test]
    fn skip_if() {
        assert_eq!(ProgramCounterUpdate::skip_if(true), ProgramCounterUpdate::Skip);
        assert_eq!(ProgramCounterUpdate::skip_if(false), ProgramCounterUpdate::Next);
    }
}
