use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive, UnsafeFromPrimitive};
use static_assertions::const_assert_eq;

use crate::nibble_ints::U4;

/// Data register of the CHIP-8 processor.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    UnsafeFromPrimitive,
)]
#[repr(u8)]
pub enum DataRegister {
    /// Used as the offset in [`Instruction::JumpOffset`](crate::instruction::Instruction::JumpOffset).
    V0,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    V7,
    V8,
    V9,
    VA,
    VB,
    VC,
    VD,
    VE,
    /// Flags register.
    /// Overwritten with the carry/borrow, the shifted-out bit or the draw collision
    /// by the instructions that produce one.
    VF,
}

// Discriminants are sequential, so this pins the variant count to 16.
const_assert_eq!(DataRegister::VF as u8, U4::MAX.into_u8());

impl DataRegister {
    pub const COUNT: usize = U4::MAX.into_u8() as usize + 1;

    /// All data registers, in order.
    pub const ALL: [DataRegister; Self::COUNT] = [
        Self::V0,
        Self::V1,
        Self::V2,
        Self::V3,
        Self::V4,
        Self::V5,
        Self::V6,
        Self::V7,
        Self::V8,
        Self::V9,
        Self::VA,
        Self::VB,
        Self::VC,
        Self::VD,
        Self::VE,
        Self::VF,
    ];

    /// Iterate over [`DataRegister::V0`] up to and including `last`.
    pub fn up_to(last: DataRegister) -> impl Iterator<Item = DataRegister> {
        Self::ALL[..=last as usize].iter().copied()
    }

    pub const fn index(self) -> usize {
        self as u8 as usize
    }
}

impl From<DataRegister> for U4 {
    fn from(reg: DataRegister) -> Self {
        U4::from_u8_masked(reg as u8)
    }
}

impl From<U4> for DataRegister {
    fn from(val: U4) -> Self {
        // SAFETY: DataRegister has exactly U4::MAX + 1 variants.
        unsafe { DataRegister::from_unchecked(u8::from(val)) }
    }
}

impl fmt::Display for DataRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{:X}", *self as u8)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn up_to() {
        assert_eq!(
            DataRegister::up_to(DataRegister::V2).collect::<Vec<_>>(),
            vec![DataRegister::V0, DataRegister::V1, DataRegister::V2]
        );
        assert_eq!(DataRegister::up_to(DataRegister::VF).count(), 16);
    }

    #[test]
    fn from_u4() {
        assert_eq!(
            DataRegister::from(U4::from_u8_masked(0xA)),
            DataRegister::VA
        );
    }

    #[test]
    fn display() {
        assert_eq!(DataRegister::VC.to_string(), "VC");
    }
}
