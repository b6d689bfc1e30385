//! Assembler errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("Syntax error at line {line}, column {column}: {message}")]
    SyntaxError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unknown instruction: {0}")]
    UnknownInstruction(String),

    #[error("Invalid register: {0} (expected R0-R3)")]
    InvalidRegister(String),

    #[error("Invalid literal value: {0}")]
    InvalidImmediate(String),

    #[error("Undefined label '{label}' at line {line}")]
    UndefinedLabel { label: String, line: usize },

    #[error("Duplicate label '{label}' at line {line}")]
    DuplicateLabel { label: String, line: usize },

    #[error("Label '{label}' resolves to {address}, which does not fit the {bits}-bit address field")]
    LabelOutOfRange {
        label: String,
        address: u32,
        bits: u32,
    },

    #[error("Invalid directive: .{0}")]
    InvalidDirective(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
