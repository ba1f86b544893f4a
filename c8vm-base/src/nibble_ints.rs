use std::convert::TryFrom;

use derive_more::*;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Error)]
#[error("value {value} exceeds the maximum value {max_value}")]
pub struct UpperBoundExceededError {
    value: usize,
    max_value: usize,
}

/// Position of a nibble within a 16-bit opcode, most significant first.
///
/// The discriminant is the nibble's distance (in nibbles) from the least significant end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpcodeNibble {
    /// The instruction family.
    N0 = 3,
    /// Usually the `x` register operand.
    N1 = 2,
    /// Usually the `y` register operand.
    N2 = 1,
    /// Usually the selector of an `8xy_`/`Ex__`/`Fx__` instruction or a sprite height.
    N3 = 0,
}

/// A minimal implementation of a 4-bit integer.
/// Supports only the operations needed in this crate.
/// Need not actually use only 4-bits in memory.
#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Into, Display, UpperHex, LowerHex,
)]
#[repr(transparent)]
pub struct U4(u8);

impl U4 {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(0b1111);

    pub const fn into_u8(self) -> u8 {
        self.0
    }

    /// Extract a nibble from an opcode.
    pub const fn from_opcode(opcode: u16, nibble: OpcodeNibble) -> Self {
        U4(((opcode >> (4 * nibble as u16)) & 0b1111) as u8)
    }

    /// Keep only the low nibble of `val`.
    pub const fn from_u8_masked(val: u8) -> Self {
        U4(val & 0b1111)
    }
}

impl TryFrom<u8> for U4 {
    type Error = UpperBoundExceededError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= U4::MAX.into() {
            Ok(U4(value))
        } else {
            Err(UpperBoundExceededError {
                value: value as usize,
                max_value: u8::from(U4::MAX) as usize,
            })
        }
    }
}

/// A minimal implementation of a 12-bit integer, used for addresses embedded in opcodes.
/// Need not actually use only 12-bits in memory.
#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Into, Display, UpperHex, LowerHex,
)]
#[repr(transparent)]
pub struct U12(u16);

impl U12 {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(0b1111_1111_1111);

    pub const fn into_u16(self) -> u16 {
        self.0
    }

    /// Extract the `nnn` address from the low 12 bits of an opcode.
    pub const fn from_opcode(opcode: u16) -> Self {
        U12(opcode & Self::MAX.0)
    }
}

impl TryFrom<u16> for U12 {
    type Error = UpperBoundExceededError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value <= U12::MAX.into() {
            Ok(U12(value))
        } else {
            Err(UpperBoundExceededError {
                value: value as usize,
                max_value: u16::from(U12::MAX) as usize,
            })
        }
    }
}
