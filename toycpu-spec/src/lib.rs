//! # Toy CPU Instruction Set
//!
//! 32-bit word instruction set with a 5-bit opcode and four 16-bit registers.
//!
//! ## Key Features
//! - 32-bit words for both code and data
//! - 5-bit opcode in the most-significant bits, 27-bit operand area
//! - 4 general-purpose registers (R0-R3), 16-bit two's complement
//! - Carry, Zero, Negative and Overflow status flags
//! - Typed literals (boolean, natural, integer, float, Unicode char) carried by `NOP`
//! - Flat memory with a push/pop-only stack region at the high end

pub mod config;
pub mod encoding;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod register;
pub mod value;

pub use config::{ConfigError, MachineConfig};
pub use error::IsaError;
pub use instruction::Instruction;
pub use opcode::{Opcode, OperandLayout};
pub use register::{Flag, Register, NUM_FLAGS, NUM_REGISTERS};
pub use value::{decode as decode_value, TypeTag, TypedValue};

/// Memory word (instructions and data)
pub type Word = u32;

/// Memory address
pub type Address = u32;

/// Register contents (16-bit two's complement)
pub type RegisterWord = i16;

/// Width of a register in bits
pub const REGISTER_BITS: u32 = 16;

/// Default memory size in words
pub const DEFAULT_MEMORY_SIZE: u32 = 1000;

/// Default number of words reserved for the stack at the top of memory
pub const DEFAULT_STACK_SIZE: u32 = 100;
