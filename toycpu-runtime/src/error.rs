//! Runtime error types for the toy CPU

use thiserror::Error;
use toycpu_disassembler::DisassemblerError;
use toycpu_spec::IsaError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(u8),

    #[error("Invalid register index: {0} (valid range: 0-3)")]
    InvalidRegisterIndex(usize),

    #[error("Address out of range: {address} (memory size {size})")]
    AddressOutOfRange { address: u32, size: u32 },

    #[error("Stack full: all {capacity} slots in use")]
    StackFull { capacity: u32 },

    #[error("Stack empty")]
    StackEmpty,

    #[error("Division by zero at cp {cp}")]
    DivisionByZero { cp: u32 },

    #[error("Invalid encoding in word 0x{word:08X}: {source}")]
    InvalidEncoding { word: u32, source: IsaError },

    #[error("Write to stack region at address {address}")]
    StackRegionViolation { address: u32 },

    #[error("No input is pending")]
    NoPendingInput,

    #[error("Memory image line {line}: {message}")]
    Image { line: usize, message: String },

    #[error("Spec error: {0}")]
    Spec(#[from] IsaError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Error discriminant for front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownOpcode,
    InvalidRegisterIndex,
    AddressOutOfRange,
    StackFull,
    StackEmpty,
    DivisionByZero,
    InvalidEncoding,
    StackRegionViolation,
    NoPendingInput,
    Image,
    Config,
    Snapshot,
    Io,
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::UnknownOpcode(_) => ErrorKind::UnknownOpcode,
            RuntimeError::InvalidRegisterIndex(_) => ErrorKind::InvalidRegisterIndex,
            RuntimeError::AddressOutOfRange { .. } => ErrorKind::AddressOutOfRange,
            RuntimeError::StackFull { .. } => ErrorKind::StackFull,
            RuntimeError::StackEmpty => ErrorKind::StackEmpty,
            RuntimeError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            RuntimeError::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
            RuntimeError::StackRegionViolation { .. } => ErrorKind::StackRegionViolation,
            RuntimeError::NoPendingInput => ErrorKind::NoPendingInput,
            RuntimeError::Image { .. } => ErrorKind::Image,
            RuntimeError::Spec(err) => match err {
                IsaError::InvalidConfig(_) => ErrorKind::Config,
                IsaError::UnknownOpcode(_) => ErrorKind::UnknownOpcode,
                IsaError::InvalidRegister(_) => ErrorKind::InvalidRegisterIndex,
                IsaError::InvalidTypeTag(_)
                | IsaError::InvalidPayload { .. }
                | IsaError::ValueOutOfRange { .. } => ErrorKind::InvalidEncoding,
            },
            RuntimeError::Snapshot(_) => ErrorKind::Snapshot,
            RuntimeError::IoError(_) => ErrorKind::Io,
        }
    }
}

impl From<DisassemblerError> for RuntimeError {
    fn from(err: DisassemblerError) -> Self {
        match err {
            DisassemblerError::UnknownOpcode(op) => RuntimeError::UnknownOpcode(op),
            DisassemblerError::InvalidLiteral { word, source } => {
                RuntimeError::InvalidEncoding { word, source }
            }
            DisassemblerError::IoError(err) => RuntimeError::IoError(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
