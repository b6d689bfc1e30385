//! # Error Types for the Toy CPU ISA

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsaError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    // Instruction errors
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(u8),

    #[error("Invalid register index: {0} (valid range: 0-3)")]
    InvalidRegister(usize),

    // Typed literal errors
    #[error("Invalid type tag: {0} (valid range: 1-5)")]
    InvalidTypeTag(u8),

    #[error("Invalid {kind} payload: {payload:#x}")]
    InvalidPayload { kind: &'static str, payload: u32 },

    #[error("Value out of range for {kind} literal: {value}")]
    ValueOutOfRange { kind: &'static str, value: String },
}

impl IsaError {
    /// Typed-literal decode/encode failures
    pub fn is_encoding_error(&self) -> bool {
        matches!(
            self,
            IsaError::InvalidTypeTag(_)
                | IsaError::InvalidPayload { .. }
                | IsaError::ValueOutOfRange { .. }
        )
    }
}
