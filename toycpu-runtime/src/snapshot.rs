//! Machine snapshots
//!
//! A [`MachineSnapshot`] is a plain copy of everything a front end may want
//! to inspect after a run or an error. It serializes with serde and is
//! stored as bincode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;
use crate::register_state::RegisterBank;
use crate::state::{MachineState, RunState};
use toycpu_spec::{Flag, MachineConfig, Register, RegisterWord, NUM_FLAGS, NUM_REGISTERS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub config: MachineConfig,
    pub cp: u32,
    pub run_state: RunState,
    pub registers: [RegisterWord; NUM_REGISTERS],
    /// Indexed by [`Flag::index`]
    pub flags: [bool; NUM_FLAGS],
    /// Stored slots only; stack slots holding zero are included
    pub memory: BTreeMap<u32, u32>,
    pub outputs: Vec<RegisterWord>,
    pub steps: u64,
}

impl MachineSnapshot {
    pub(crate) fn capture(
        state: &MachineState,
        config: &MachineConfig,
        outputs: &[RegisterWord],
    ) -> Self {
        MachineSnapshot {
            config: *config,
            cp: state.cp,
            run_state: state.run_state,
            registers: state.bank.registers(),
            flags: state.bank.flags(),
            memory: state.memory.entries(),
            outputs: outputs.to_vec(),
            steps: state.steps,
        }
    }

    pub(crate) fn bank(&self) -> RegisterBank {
        RegisterBank::from_parts(self.registers, self.flags)
    }

    pub fn register(&self, reg: Register) -> RegisterWord {
        self.registers[reg.index()]
    }

    pub fn flag(&self, flag: Flag) -> bool {
        self.flags[flag.index()]
    }

    /// Word at `addr` (zero when nothing is stored)
    pub fn word(&self, addr: u32) -> u32 {
        self.memory.get(&addr).copied().unwrap_or(0)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl fmt::Display for MachineSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cp: {}  state: {}  steps: {}", self.cp, self.run_state, self.steps)?;
        for reg in Register::ALL {
            writeln!(f, "{}: {}", reg, self.register(reg))?;
        }
        write!(f, "flags:")?;
        for flag in Flag::ALL {
            write!(f, " {}={}", flag.short_name(), self.flag(flag) as u8)?;
        }
        Ok(())
    }
}
