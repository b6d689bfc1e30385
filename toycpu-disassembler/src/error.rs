//! Disassembler errors

use thiserror::Error;
use toycpu_spec::IsaError;

#[derive(Debug, Error)]
pub enum DisassemblerError {
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(u8),

    #[error("Invalid literal 0x{word:08X}: {source}")]
    InvalidLiteral { word: u32, source: IsaError },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
