//! Register and flag bank
//!
//! Four 16-bit registers and four status flags. Nothing here recomputes
//! flags; each instruction handler assigns the flags it owns.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};
use toycpu_spec::{Flag, Register, RegisterWord, NUM_FLAGS, NUM_REGISTERS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterBank {
    registers: [RegisterWord; NUM_REGISTERS],
    flags: [bool; NUM_FLAGS],
}

impl RegisterBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read register by index
    pub fn get(&self, index: usize) -> Result<RegisterWord> {
        self.registers
            .get(index)
            .copied()
            .ok_or(RuntimeError::InvalidRegisterIndex(index))
    }

    /// Write register by index
    pub fn set(&mut self, index: usize, value: RegisterWord) -> Result<()> {
        let slot = self
            .registers
            .get_mut(index)
            .ok_or(RuntimeError::InvalidRegisterIndex(index))?;
        *slot = value;
        Ok(())
    }

    #[inline]
    pub fn read(&self, reg: Register) -> RegisterWord {
        self.registers[reg.index()]
    }

    #[inline]
    pub fn write(&mut self, reg: Register, value: RegisterWord) {
        self.registers[reg.index()] = value;
    }

    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.flags[flag.index()]
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.flags[flag.index()] = value;
    }

    pub fn registers(&self) -> [RegisterWord; NUM_REGISTERS] {
        self.registers
    }

    pub fn flags(&self) -> [bool; NUM_FLAGS] {
        self.flags
    }

    /// Flags as `CZNV` letters, `-` for clear
    pub fn flag_string(&self) -> String {
        Flag::ALL
            .iter()
            .map(|&flag| if self.get_flag(flag) { flag.short_name() } else { '-' })
            .collect()
    }

    pub(crate) fn from_parts(
        registers: [RegisterWord; NUM_REGISTERS],
        flags: [bool; NUM_FLAGS],
    ) -> Self {
        Self { registers, flags }
    }
}
