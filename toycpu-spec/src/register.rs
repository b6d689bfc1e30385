//! Register and status flag identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of general-purpose registers
pub const NUM_REGISTERS: usize = 4;

/// Number of status flags
pub const NUM_FLAGS: usize = 4;

/// General-purpose register (R0-R3), selected by a 2-bit field
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
}

impl Register {
    pub const ALL: [Register; NUM_REGISTERS] =
        [Register::R0, Register::R1, Register::R2, Register::R3];

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Decode a 2-bit register field. Higher bits are ignored.
    #[inline]
    pub const fn from_field(bits: u32) -> Self {
        match bits & 0b11 {
            0 => Register::R0,
            1 => Register::R1,
            2 => Register::R2,
            _ => Register::R3,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::R0 => "R0",
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Status flag
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Flag {
    Carry = 0,
    Zero = 1,
    Negative = 2,
    Overflow = 3,
}

impl Flag {
    pub const ALL: [Flag; NUM_FLAGS] = [Flag::Carry, Flag::Zero, Flag::Negative, Flag::Overflow];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter name used in state dumps
    pub const fn short_name(self) -> char {
        match self {
            Flag::Carry => 'C',
            Flag::Zero => 'Z',
            Flag::Negative => 'N',
            Flag::Overflow => 'V',
        }
    }

    /// Parse a flag by name (case-insensitive, long or single-letter form)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "carry" | "c" => Some(Flag::Carry),
            "zero" | "z" => Some(Flag::Zero),
            "negative" | "n" => Some(Flag::Negative),
            "overflow" | "v" => Some(Flag::Overflow),
            _ => None,
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Flag::Carry => "carry",
            Flag::Zero => "zero",
            Flag::Negative => "negative",
            Flag::Overflow => "overflow",
        };
        write!(f, "{}", name)
    }
}
