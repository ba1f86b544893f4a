use std::{convert::TryFrom, fmt};

use thiserror::Error;

use crate::{
    nibble_ints::{OpcodeNibble, U12, U4},
    processor::DataRegister,
};

/// Mask keeping the family nibble and the low nibble,
/// used where the middle two nibbles are register operands.
const LOW_NIBBLE_SELECTOR_MASK: u16 = 0xF00F;
/// Mask keeping the family nibble and the low byte,
/// used for the `Fx_5` group where the selector spans the whole low byte.
const LOW_BYTE_SELECTOR_MASK: u16 = 0xF0FF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown opcode `{opcode:04X}`")]
pub struct UnknownOpcodeError {
    pub opcode: u16,
}

/// A CHIP-8 instruction
///
/// References used are
/// <https://github.com/mattmikolay/chip-8/wiki/CHIP%E2%80%908-Instruction-Set> (CC-BY-SA 4.0, Matthew Mikolay)
/// and <https://en.wikipedia.org/wiki/CHIP-8#Opcode_table> (CC-BY-SA 3.0, Wikipedia Authors).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Instruction {
    /// Legacy machine subroutine call, `0nnn`.
    /// Executed as an unconditional jump to `target_address`.
    SysJump { target_address: U12 },
    /// Clear the display, `00E0`.
    ClearDisplay,
    /// Return from a subroutine, `00EE`.
    Return,
    /// Jump to the `target_address`, `1nnn`.
    Jump { target_address: U12 },
    /// Call the subroutine at the `target_address`, `2nnn`.
    CallSubroutine { target_address: U12 },
    /// Skip the next instruction if the value in `register`
    /// is equal to `constant`, `3xkk`.
    SkipIfEqConst { register: DataRegister, constant: u8 },
    /// Skip the next instruction if the value in `register`
    /// is not equal to `constant`, `4xkk`.
    SkipIfNeqConst { register: DataRegister, constant: u8 },
    /// Skip the next instruction if the value in `register1`
    /// is equal to the value in `register2`, `5xy0`.
    SkipIfEq {
        register1: DataRegister,
        register2: DataRegister,
    },
    /// Assign `constant` to `target_register`, `6xkk`.
    AssignConst {
        target_register: DataRegister,
        constant: u8,
    },
    /// Add `constant` to the value in `target_register`, `7xkk`.
    ///
    /// [`DataRegister::VF`] is not altered.
    AddAssignConst {
        target_register: DataRegister,
        constant: u8,
    },
    /// Assign the value in `source_register` to `target_register`, `8xy0`.
    Assign {
        target_register: DataRegister,
        source_register: DataRegister,
    },
    /// `8xy1`
    OrAssign {
        target_register: DataRegister,
        source_register: DataRegister,
    },
    /// `8xy2`
    AndAssign {
        target_register: DataRegister,
        source_register: DataRegister,
    },
    /// `8xy3`
    XorAssign {
        target_register: DataRegister,
        source_register: DataRegister,
    },
    /// Add the value in `source_register` to the value in `target_register`, `8xy4`.
    ///
    /// If a carry occurs [`DataRegister::VF`] is set to `1`,
    /// if not it is set to `0`.
    AddAssign {
        target_register: DataRegister,
        source_register: DataRegister,
    },
    /// Subtract the value in `source_register`
    /// from the value in `target_register`, `8xy5`.
    ///
    /// If a borrow occurs [`DataRegister::VF`] is set to `0`,
    /// if not it is set to `1`.
    SubAssign {
        target_register: DataRegister,
        source_register: DataRegister,
    },
    /// Shift the value in `register` one bit to the right, `8xy6`.
    /// The `y` operand is ignored.
    ///
    /// [`DataRegister::VF`] is set to the bit that is shifted out.
    ShrAssign { register: DataRegister },
    /// Subtract the value in `target_register`
    /// from the value in `source_register`
    /// and assign the result to `target_register`, `8xy7`.
    ///
    /// If a borrow occurs [`DataRegister::VF`] is set to `0`,
    /// if not it is set to `1`.
    RevSubAssign {
        target_register: DataRegister,
        source_register: DataRegister,
    },
    /// Shift the value in `register` one bit to the left, `8xyE`.
    /// The `y` operand is ignored.
    ///
    /// [`DataRegister::VF`] is set to the bit that is shifted out.
    ShlAssign { register: DataRegister },
    /// Skip the next instruction if the value in `register1`
    /// is not equal to the value in `register2`, `9xy0`.
    SkipIfNeq {
        register1: DataRegister,
        register2: DataRegister,
    },
    /// Assign `address` to the address register `I`, `Annn`.
    AssignAddrToI { address: U12 },
    /// Jump to the sum of `address` and the value in [`DataRegister::V0`], `Bnnn`.
    JumpOffset { address: U12 },
    /// Assign a random byte ANDed with `mask` to `target_register`, `Cxkk`.
    AssignRandomMasked {
        target_register: DataRegister,
        mask: u8,
    },
    /// Draw a `sprite_len` bytes high sprite read from the address in `I`
    /// at the position given by the values in
    /// `position_x_register` and `position_y_register`, `Dxyn`.
    ///
    /// [`DataRegister::VF`] is set to `1` if any set pixel was unset, `0` otherwise.
    DrawSprite {
        position_x_register: DataRegister,
        position_y_register: DataRegister,
        sprite_len: U4,
    },
    /// Skip the next instruction if the key corresponding
    /// to the value in `key_register` is pressed, `Ex9E`.
    SkipIfKeyPressed { key_register: DataRegister },
    /// Skip the next instruction if the key corresponding
    /// to the value in `key_register` is not pressed, `ExA1`.
    SkipIfKeyNotPressed { key_register: DataRegister },
    /// Assign the current value of the delay timer to `target_register`, `Fx07`.
    AssignDelayTimerVal { target_register: DataRegister },
    /// Halt until a key is pressed and store the value
    /// corresponding to the key in `target_register`, `Fx0A`.
    WaitForKeyPress { target_register: DataRegister },
    /// `Fx15`
    SetDelayTimer { source_register: DataRegister },
    /// `Fx18`
    SetSoundTimer { source_register: DataRegister },
    /// Add the value in `source_register` to the address register `I`, `Fx1E`.
    ///
    /// [`DataRegister::VF`] is not altered.
    AddAssignI { source_register: DataRegister },
    /// Assign the address of the built-in glyph for the low nibble
    /// of the value in `hex_char_register` to `I`, `Fx29`.
    AssignHexCharSpriteAddrToI { hex_char_register: DataRegister },
    /// Store the three decimal digits of the value in `source_register`
    /// at `I`, `I+1` and `I+2`, hundreds first, `Fx33`.
    StoreBCD { source_register: DataRegister },
    /// Store the values of [`DataRegister::V0`] to `last_register`
    /// in consecutive bytes of memory starting at the address in `I`, `Fx55`.
    ///
    /// `I` is not altered.
    StoreRegisterValues { last_register: DataRegister },
    /// Load consecutive bytes of memory starting at the address in `I`
    /// into [`DataRegister::V0`] to `last_register`, `Fx65`.
    ///
    /// `I` is not altered.
    LoadRegisterValues { last_register: DataRegister },
}

impl Instruction {
    /// Decode an opcode.
    ///
    /// The family (most significant nibble) is inspected first.
    /// Families `0`, `8`, `E` and `F` share their family nibble between several instructions
    /// and are told apart by masking out their operand nibbles.
    pub fn decode(opcode: u16) -> Result<Self, UnknownOpcodeError> {
        let x = DataRegister::from(U4::from_opcode(opcode, OpcodeNibble::N1));
        let y = DataRegister::from(U4::from_opcode(opcode, OpcodeNibble::N2));
        let n = U4::from_opcode(opcode, OpcodeNibble::N3);
        let kk = opcode as u8;
        let nnn = U12::from_opcode(opcode);

        let unknown = UnknownOpcodeError { opcode };

        let instruction = match U4::from_opcode(opcode, OpcodeNibble::N0).into_u8() {
            0x0 => match opcode {
                0x00E0 => Self::ClearDisplay,
                0x00EE => Self::Return,
                _ => Self::SysJump {
                    target_address: nnn,
                },
            },
            0x1 => Self::Jump {
                target_address: nnn,
            },
            0x2 => Self::CallSubroutine {
                target_address: nnn,
            },
            0x3 => Self::SkipIfEqConst {
                register: x,
                constant: kk,
            },
            0x4 => Self::SkipIfNeqConst {
                register: x,
                constant: kk,
            },
            0x5 => Self::SkipIfEq {
                register1: x,
                register2: y,
            },
            0x6 => Self::AssignConst {
                target_register: x,
                constant: kk,
            },
            0x7 => Self::AddAssignConst {
                target_register: x,
                constant: kk,
            },
            0x8 => match opcode & LOW_NIBBLE_SELECTOR_MASK {
                0x8000 => Self::Assign {
                    target_register: x,
                    source_register: y,
                },
                0x8001 => Self::OrAssign {
                    target_register: x,
                    source_register: y,
                },
                0x8002 => Self::AndAssign {
                    target_register: x,
                    source_register: y,
                },
                0x8003 => Self::XorAssign {
                    target_register: x,
                    source_register: y,
                },
                0x8004 => Self::AddAssign {
                    target_register: x,
                    source_register: y,
                },
                0x8005 => Self::SubAssign {
                    target_register: x,
                    source_register: y,
                },
                0x8006 => Self::ShrAssign { register: x },
                0x8007 => Self::RevSubAssign {
                    target_register: x,
                    source_register: y,
                },
                0x800E => Self::ShlAssign { register: x },
                _ => return Err(unknown),
            },
            0x9 => Self::SkipIfNeq {
                register1: x,
                register2: y,
            },
            0xA => Self::AssignAddrToI { address: nnn },
            0xB => Self::JumpOffset { address: nnn },
            0xC => Self::AssignRandomMasked {
                target_register: x,
                mask: kk,
            },
            0xD => Self::DrawSprite {
                position_x_register: x,
                position_y_register: y,
                sprite_len: n,
            },
            0xE => match opcode & LOW_NIBBLE_SELECTOR_MASK {
                0xE00E => Self::SkipIfKeyPressed { key_register: x },
                0xE001 => Self::SkipIfKeyNotPressed { key_register: x },
                _ => return Err(unknown),
            },
            0xF if u8::from(n) == 0x5 => match opcode & LOW_BYTE_SELECTOR_MASK {
                0xF015 => Self::SetDelayTimer { source_register: x },
                0xF055 => Self::StoreRegisterValues { last_register: x },
                0xF065 => Self::LoadRegisterValues { last_register: x },
                _ => return Err(unknown),
            },
            0xF => match opcode & LOW_NIBBLE_SELECTOR_MASK {
                0xF007 => Self::AssignDelayTimerVal { target_register: x },
                0xF00A => Self::WaitForKeyPress { target_register: x },
                0xF008 => Self::SetSoundTimer { source_register: x },
                0xF00E => Self::AddAssignI { source_register: x },
                0xF009 => Self::AssignHexCharSpriteAddrToI {
                    hex_char_register: x,
                },
                0xF003 => Self::StoreBCD { source_register: x },
                _ => return Err(unknown),
            },
            _ => return Err(unknown),
        };

        Ok(instruction)
    }

    /// Whether the instruction sets the program counter itself,
    /// suppressing the regular advance to the next instruction.
    pub fn transfers_control(self) -> bool {
        matches!(
            self,
            Self::SysJump { .. }
                | Self::Return
                | Self::Jump { .. }
                | Self::CallSubroutine { .. }
                | Self::JumpOffset { .. }
        )
    }
}

impl TryFrom<u16> for Instruction {
    type Error = UnknownOpcodeError;

    fn try_from(opcode: u16) -> Result<Self, Self::Error> {
        Self::decode(opcode)
    }
}

impl TryFrom<[u8; 2]> for Instruction {
    type Error = UnknownOpcodeError;

    fn try_from(bytes: [u8; 2]) -> Result<Self, Self::Error> {
        Self::decode(u16::from_be_bytes(bytes))
    }
}

/// Assemble an opcode from its four nibbles, most significant first.
fn nibbles(n0: u8, n1: impl Into<U4>, n2: impl Into<U4>, n3: u8) -> u16 {
    (n0 as u16) << 12
        | (u8::from(n1.into()) as u16) << 8
        | (u8::from(n2.into()) as u16) << 4
        | n3 as u16
}

/// Assemble an opcode from its family nibble, a register operand and a byte constant.
fn nibble_register_byte(n0: u8, register: DataRegister, byte: u8) -> u16 {
    (n0 as u16) << 12 | (register as u16) << 8 | byte as u16
}

/// Assemble an opcode from its family nibble and an address.
fn nibble_address(n0: u8, address: U12) -> u16 {
    (n0 as u16) << 12 | u16::from(address)
}

impl From<Instruction> for u16 {
    fn from(instruction: Instruction) -> Self {
        use Instruction::*;

        match instruction {
            SysJump { target_address } => nibble_address(0x0, target_address),
            ClearDisplay => 0x00E0,
            Return => 0x00EE,
            Jump { target_address } => nibble_address(0x1, target_address),
            CallSubroutine { target_address } => nibble_address(0x2, target_address),
            SkipIfEqConst { register, constant } => nibble_register_byte(0x3, register, constant),
            SkipIfNeqConst { register, constant } => {
                nibble_register_byte(0x4, register, constant)
            }
            SkipIfEq {
                register1,
                register2,
            } => nibbles(0x5, register1, register2, 0x0),
            AssignConst {
                target_register,
                constant,
            } => nibble_register_byte(0x6, target_register, constant),
            AddAssignConst {
                target_register,
                constant,
            } => nibble_register_byte(0x7, target_register, constant),
            Assign {
                target_register,
                source_register,
            } => nibbles(0x8, target_register, source_register, 0x0),
            OrAssign {
                target_register,
                source_register,
            } => nibbles(0x8, target_register, source_register, 0x1),
            AndAssign {
                target_register,
                source_register,
            } => nibbles(0x8, target_register, source_register, 0x2),
            XorAssign {
                target_register,
                source_register,
            } => nibbles(0x8, target_register, source_register, 0x3),
            AddAssign {
                target_register,
                source_register,
            } => nibbles(0x8, target_register, source_register, 0x4),
            SubAssign {
                target_register,
                source_register,
            } => nibbles(0x8, target_register, source_register, 0x5),
            ShrAssign { register } => nibbles(0x8, register, DataRegister::V0, 0x6),
            RevSubAssign {
                target_register,
                source_register,
            } => nibbles(0x8, target_register, source_register, 0x7),
            ShlAssign { register } => nibbles(0x8, register, DataRegister::V0, 0xE),
            SkipIfNeq {
                register1,
                register2,
            } => nibbles(0x9, register1, register2, 0x0),
            AssignAddrToI { address } => nibble_address(0xA, address),
            JumpOffset { address } => nibble_address(0xB, address),
            AssignRandomMasked {
                target_register,
                mask,
            } => nibble_register_byte(0xC, target_register, mask),
            DrawSprite {
                position_x_register,
                position_y_register,
                sprite_len,
            } => nibbles(
                0xD,
                position_x_register,
                position_y_register,
                sprite_len.into(),
            ),
            SkipIfKeyPressed { key_register } => nibble_register_byte(0xE, key_register, 0x9E),
            SkipIfKeyNotPressed { key_register } => {
                nibble_register_byte(0xE, key_register, 0xA1)
            }
            AssignDelayTimerVal { target_register } => {
                nibble_register_byte(0xF, target_register, 0x07)
            }
            WaitForKeyPress { target_register } => {
                nibble_register_byte(0xF, target_register, 0x0A)
            }
            SetDelayTimer { source_register } => nibble_register_byte(0xF, source_register, 0x15),
            SetSoundTimer { source_register } => nibble_register_byte(0xF, source_register, 0x18),
            AddAssignI { source_register } => nibble_register_byte(0xF, source_register, 0x1E),
            AssignHexCharSpriteAddrToI { hex_char_register } => {
                nibble_register_byte(0xF, hex_char_register, 0x29)
            }
            StoreBCD { source_register } => nibble_register_byte(0xF, source_register, 0x33),
            StoreRegisterValues { last_register } => {
                nibble_register_byte(0xF, last_register, 0x55)
            }
            LoadRegisterValues { last_register } => {
                nibble_register_byte(0xF, last_register, 0x65)
            }
        }
    }
}

impl From<Instruction> for [u8; 2] {
    fn from(instruction: Instruction) -> Self {
        u16::from(instruction).to_be_bytes()
    }
}

impl fmt::Display for Instruction {
    /// Formats the instruction with its conventional assembler mnemonic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            SysJump { target_address } => write!(f, "SYS {:#05X}", target_address),
            ClearDisplay => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump { target_address } => write!(f, "JP {:#05X}", target_address),
            CallSubroutine { target_address } => write!(f, "CALL {:#05X}", target_address),
            SkipIfEqConst { register, constant } => write!(f, "SE {}, {:#04X}", register, constant),
            SkipIfNeqConst { register, constant } => {
                write!(f, "SNE {}, {:#04X}", register, constant)
            }
            SkipIfEq {
                register1,
                register2,
            } => write!(f, "SE {}, {}", register1, register2),
            AssignConst {
                target_register,
                constant,
            } => write!(f, "LD {}, {:#04X}", target_register, constant),
            AddAssignConst {
                target_register,
                constant,
            } => write!(f, "ADD {}, {:#04X}", target_register, constant),
            Assign {
                target_register,
                source_register,
            } => write!(f, "LD {}, {}", target_register, source_register),
            OrAssign {
                target_register,
                source_register,
            } => write!(f, "OR {}, {}", target_register, source_register),
            AndAssign {
                target_register,
                source_register,
            } => write!(f, "AND {}, {}", target_register, source_register),
            XorAssign {
                target_register,
                source_register,
            } => write!(f, "XOR {}, {}", target_register, source_register),
            AddAssign {
                target_register,
                source_register,
            } => write!(f, "ADD {}, {}", target_register, source_register),
            SubAssign {
                target_register,
                source_register,
            } => write!(f, "SUB {}, {}", target_register, source_register),
            ShrAssign { register } => write!(f, "SHR {}", register),
            RevSubAssign {
                target_register,
                source_register,
            } => write!(f, "SUBN {}, {}", target_register, source_register),
            ShlAssign { register } => write!(f, "SHL {}", register),
            SkipIfNeq {
                register1,
                register2,
            } => write!(f, "SNE {}, {}", register1, register2),
            AssignAddrToI { address } => write!(f, "LD I, {:#05X}", address),
            JumpOffset { address } => write!(f, "JP V0, {:#05X}", address),
            AssignRandomMasked {
                target_register,
                mask,
            } => write!(f, "RND {}, {:#04X}", target_register, mask),
            DrawSprite {
                position_x_register,
                position_y_register,
                sprite_len,
            } => write!(
                f,
                "DRW {}, {}, {}",
                position_x_register, position_y_register, sprite_len
            ),
            SkipIfKeyPressed { key_register } => write!(f, "SKP {}", key_register),
            SkipIfKeyNotPressed { key_register } => write!(f, "SKNP {}", key_register),
            AssignDelayTimerVal { target_register } => write!(f, "LD {}, DT", target_register),
            WaitForKeyPress { target_register } => write!(f, "LD {}, K", target_register),
            SetDelayTimer { source_register } => write!(f, "LD DT, {}", source_register),
            SetSoundTimer { source_register } => write!(f, "LD ST, {}", source_register),
            AddAssignI { source_register } => write!(f, "ADD I, {}", source_register),
            AssignHexCharSpriteAddrToI { hex_char_register } => {
                write!(f, "LD F, {}", hex_char_register)
            }
            StoreBCD { source_register } => write!(f, "LD B, {}", source_register),
            StoreRegisterValues { last_register } => write!(f, "LD [I], {}", last_register),
            LoadRegisterValues { last_register } => write!(f, "LD {}, [I]", last_register),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn addr(address: u16) -> U12 {
        U12::try_from(address).unwrap()
    }

    mod decode {
        use super::*;

        #[test]
        fn family_0() {
            assert_eq!(Instruction::decode(0x00E0), Ok(Instruction::ClearDisplay));
            assert_eq!(Instruction::decode(0x00EE), Ok(Instruction::Return));
            assert_eq!(
                Instruction::decode(0x0123),
                Ok(Instruction::SysJump {
                    target_address: addr(0x123)
                })
            );
            // Only the exact values select CLS/RET.
            assert_eq!(
                Instruction::decode(0x01E0),
                Ok(Instruction::SysJump {
                    target_address: addr(0x1E0)
                })
            );
        }

        #[test]
        fn family_only() {
            assert_eq!(
                Instruction::decode(0x1420),
                Ok(Instruction::Jump {
                    target_address: addr(0x420)
                })
            );
            assert_eq!(
                Instruction::decode(0x6407),
                Ok(Instruction::AssignConst {
                    target_register: DataRegister::V4,
                    constant: 7,
                })
            );
            assert_eq!(
                Instruction::decode(0xD935),
                Ok(Instruction::DrawSprite {
                    position_x_register: DataRegister::V9,
                    position_y_register: DataRegister::V3,
                    sprite_len: U4::from_u8_masked(5),
                })
            );
            // The low nibble is not part of the selector for these families.
            assert_eq!(
                Instruction::decode(0x5AB3),
                Ok(Instruction::SkipIfEq {
                    register1: DataRegister::VA,
                    register2: DataRegister::VB,
                })
            );
        }

        #[test]
        fn family_8() {
            assert_eq!(
                Instruction::decode(0x8124),
                Ok(Instruction::AddAssign {
                    target_register: DataRegister::V1,
                    source_register: DataRegister::V2,
                })
            );
            assert_eq!(
                Instruction::decode(0x8CDE),
                Ok(Instruction::ShlAssign {
                    register: DataRegister::VC
                })
            );
            assert_eq!(
                Instruction::decode(0x8128),
                Err(UnknownOpcodeError { opcode: 0x8128 })
            );
        }

        #[test]
        fn family_e() {
            assert_eq!(
                Instruction::decode(0xE59E),
                Ok(Instruction::SkipIfKeyPressed {
                    key_register: DataRegister::V5
                })
            );
            assert_eq!(
                Instruction::decode(0xE5A1),
                Ok(Instruction::SkipIfKeyNotPressed {
                    key_register: DataRegister::V5
                })
            );
            assert_eq!(
                Instruction::decode(0xE5A2),
                Err(UnknownOpcodeError { opcode: 0xE5A2 })
            );
        }

        #[test]
        fn family_f_low_nibble_5() {
            assert_eq!(
                Instruction::decode(0xF315),
                Ok(Instruction::SetDelayTimer {
                    source_register: DataRegister::V3
                })
            );
            assert_eq!(
                Instruction::decode(0xF855),
                Ok(Instruction::StoreRegisterValues {
                    last_register: DataRegister::V8
                })
            );
            assert_eq!(
                Instruction::decode(0xF865),
                Ok(Instruction::LoadRegisterValues {
                    last_register: DataRegister::V8
                })
            );
            assert_eq!(
                Instruction::decode(0xF825),
                Err(UnknownOpcodeError { opcode: 0xF825 })
            );
        }

        #[test]
        fn family_f_other() {
            assert_eq!(
                Instruction::decode(0xF318),
                Ok(Instruction::SetSoundTimer {
                    source_register: DataRegister::V3
                })
            );
            assert_eq!(
                Instruction::decode(0xF70A),
                Ok(Instruction::WaitForKeyPress {
                    target_register: DataRegister::V7
                })
            );
            assert_eq!(
                Instruction::decode(0xF233),
                Ok(Instruction::StoreBCD {
                    source_register: DataRegister::V2
                })
            );
            assert_eq!(
                Instruction::decode(0xF101),
                Err(UnknownOpcodeError { opcode: 0xF101 })
            );
        }

        #[test]
        fn from_bytes() {
            assert_eq!(
                Instruction::try_from([0x64_u8, 0x07]),
                Ok(Instruction::AssignConst {
                    target_register: DataRegister::V4,
                    constant: 7,
                })
            );
        }
    }

    #[test]
    fn u8x2_from_instruction() {
        let instr = Instruction::DrawSprite {
            position_x_register: DataRegister::V9,
            position_y_register: DataRegister::V3,
            sprite_len: U4::try_from(5).unwrap(),
        };

        assert_eq!(<[u8; 2]>::from(instr), [0xD9_u8, 0x35]);
    }

    #[test]
    fn encoding_decodes_to_same_instruction() {
        let instructions = [
            Instruction::CallSubroutine {
                target_address: addr(0x2F0),
            },
            Instruction::SkipIfKeyNotPressed {
                key_register: DataRegister::VE,
            },
            Instruction::AssignHexCharSpriteAddrToI {
                hex_char_register: DataRegister::V1,
            },
            Instruction::LoadRegisterValues {
                last_register: DataRegister::VF,
            },
        ];

        for instruction in instructions.iter().copied() {
            assert_eq!(Instruction::decode(instruction.into()), Ok(instruction));
        }
    }

    #[test]
    fn transfers_control() {
        assert!(Instruction::Return.transfers_control());
        assert!(Instruction::JumpOffset { address: addr(0) }.transfers_control());
        assert!(!Instruction::SkipIfEqConst {
            register: DataRegister::V0,
            constant: 0
        }
        .transfers_control());
    }

    #[test]
    fn display() {
        assert_eq!(
            Instruction::AssignConst {
                target_register: DataRegister::VA,
                constant: 0x2A,
            }
            .to_string(),
            "LD VA, 0x2A"
        );
        assert_eq!(
            Instruction::Jump {
                target_address: addr(0x208)
            }
            .to_string(),
            "JP 0x208"
        );
        assert_eq!(
            Instruction::StoreRegisterValues {
                last_register: DataRegister::V3
            }
            .to_string(),
            "LD [I], V3"
        );
    }
}
