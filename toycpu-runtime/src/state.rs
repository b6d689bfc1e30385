//! Machine state for the toy CPU

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::memory::Memory;
use crate::register_state::RegisterBank;
use toycpu_spec::{MachineConfig, Register, RegisterWord, TypedValue};

/// How the caller is driving the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunMode {
    /// One instruction per call
    Step,
    /// Run until halt, input or sentinel
    RunAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    Running,
    /// Parked on an IN; `mode` is how execution resumes once input arrives
    AwaitingInput { register: Register, mode: RunMode },
    Halted,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Running => write!(f, "running"),
            RunState::AwaitingInput { register, .. } => write!(f, "awaiting input for {}", register),
            RunState::Halted => write!(f, "halted"),
        }
    }
}

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Instruction completed with nothing to report
    Executed,
    /// OUT produced a value
    Output(RegisterWord),
    /// NOP carried a typed literal
    Literal(TypedValue),
    /// Parked on an IN (or already parked)
    AwaitingInput(Register),
    /// HALT executed (or the machine was already halted)
    Halted,
}

/// Why a run-to-halt call returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Halted,
    AwaitingInput(Register),
    /// Reached a raw zero word at this address
    Sentinel(u32),
    /// Step guard reached
    StepLimit(u64),
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Halted => write!(f, "halted"),
            RunOutcome::AwaitingInput(reg) => write!(f, "awaiting input for {}", reg),
            RunOutcome::Sentinel(addr) => write!(f, "stopped at empty word {}", addr),
            RunOutcome::StepLimit(steps) => write!(f, "step limit of {} reached", steps),
        }
    }
}

/// Everything one engine owns
#[derive(Debug, Clone)]
pub struct MachineState {
    pub bank: RegisterBank,
    pub memory: Memory,
    /// Program counter
    pub cp: u32,
    pub run_state: RunState,
    /// Instructions completed since creation
    pub steps: u64,
}

impl MachineState {
    pub fn new(config: &MachineConfig) -> Self {
        MachineState {
            bank: RegisterBank::new(),
            memory: Memory::new(config),
            cp: 0,
            run_state: RunState::Running,
            steps: 0,
        }
    }

    /// `cp + 1`, checked against memory size
    pub fn next_cp(&self) -> Result<u32> {
        let next = self.cp.saturating_add(1);
        self.memory.check_address(next)?;
        Ok(next)
    }

    /// Validate a control-flow target
    pub fn check_target(&self, target: u32) -> Result<u32> {
        self.memory.check_address(target)?;
        Ok(target)
    }

    /// Move `cp`, keeping the memory's current-address marker in step
    pub fn set_cp(&mut self, cp: u32) -> Result<()> {
        self.memory.move_program_counter(cp)?;
        self.cp = cp;
        Ok(())
    }

    pub fn is_halted(&self) -> bool {
        self.run_state == RunState::Halted
    }

    pub fn pending_input(&self) -> Option<(Register, RunMode)> {
        match self.run_state {
            RunState::AwaitingInput { register, mode } => Some((register, mode)),
            _ => None,
        }
    }

    pub fn halt(&mut self) {
        self.run_state = RunState::Halted;
    }
}
