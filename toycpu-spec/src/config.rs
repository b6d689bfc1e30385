//! Machine configuration
//!
//! The machine is parameterized by its memory size (in words), the number of
//! words reserved for the stack at the top of memory, and a step guard for
//! run-to-halt mode.
//!
//! | Parameter     | Default   | Constraint                         |
//! |---------------|-----------|------------------------------------|
//! | `memory_size` | 1000      | `1..=2^25` (fits the address field)|
//! | `stack_size`  | 100       | `1..memory_size`                   |
//! | `max_steps`   | 1_000_000 | `> 0`                              |

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::encoding::ADDR25_MASK;
use crate::{DEFAULT_MEMORY_SIZE, DEFAULT_STACK_SIZE};

/// Machine configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Total number of addressable words
    pub memory_size: u32,

    /// Words reserved for the stack at `[memory_size - stack_size, memory_size)`
    pub stack_size: u32,

    /// Upper bound on steps taken by a single run-to-halt call
    pub max_steps: u64,

    /// Log every executed instruction at debug level instead of trace
    pub trace: bool,
}

impl MachineConfig {
    /// Default configuration (1000 words, 100-word stack)
    pub const DEFAULT: Self = Self {
        memory_size: DEFAULT_MEMORY_SIZE,
        stack_size: DEFAULT_STACK_SIZE,
        max_steps: 1_000_000,
        trace: false,
    };

    /// Largest memory the 25-bit LOAD/STORE address field can reach
    pub const MAX_MEMORY_SIZE: u32 = ADDR25_MASK + 1;

    /// Create a validated configuration with default step limit and tracing off
    pub fn new(memory_size: u32, stack_size: u32) -> Result<Self, ConfigError> {
        let config = Self {
            memory_size,
            stack_size,
            ..Self::DEFAULT
        };
        config.validate()?;
        Ok(config)
    }

    /// Builder-style step limit
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Builder-style trace toggle
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// First address of the stack region
    #[inline]
    pub const fn stack_base(&self) -> u32 {
        self.memory_size - self.stack_size
    }

    /// Whether `addr` lies in the reserved stack region
    #[inline]
    pub const fn is_stack_address(&self, addr: u32) -> bool {
        addr >= self.stack_base() && addr < self.memory_size
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_size == 0 || self.memory_size > Self::MAX_MEMORY_SIZE {
            return Err(ConfigError::InvalidMemorySize(self.memory_size));
        }
        if self.stack_size == 0 {
            return Err(ConfigError::EmptyStack);
        }
        if self.stack_size >= self.memory_size {
            return Err(ConfigError::StackTooLarge {
                stack_size: self.stack_size,
                memory_size: self.memory_size,
            });
        }
        if self.max_steps == 0 {
            return Err(ConfigError::ZeroStepLimit);
        }
        Ok(())
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for MachineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MachineConfig {{ memory: {} words, stack: [{}, {}), max_steps: {} }}",
            self.memory_size,
            self.stack_base(),
            self.memory_size,
            self.max_steps,
        )
    }
}

/// Configuration error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("memory_size must be in range [1, {max}], got {0}", max = MachineConfig::MAX_MEMORY_SIZE)]
    InvalidMemorySize(u32),

    #[error("stack_size must be at least 1")]
    EmptyStack,

    #[error("stack_size ({stack_size}) must be smaller than memory_size ({memory_size})")]
    StackTooLarge { stack_size: u32, memory_size: u32 },

    #[error("max_steps must be at least 1")]
    ZeroStepLimit,
}
