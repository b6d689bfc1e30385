//! Toy CPU Assembler
//!
//! Assemble toy CPU assembly language into 32-bit memory words.
//!
//! ## Example
//!
//! ```rust
//! use toycpu_assembler::assemble;
//!
//! let source = r#"
//!     LOAD R0, [5]
//!     LOAD R1, [6]
//!     ADD R0, R1, R2
//!     STORE R2, [7]
//!     HALT
//!     .word 3
//!     .word 4
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program.words.len(), 7);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod encoder;
pub mod assembler;

pub use error::{AssemblerError, Result};
pub use assembler::{assemble, assemble_at, Assembly};
pub use parser::{parse_instruction, parse_register};
pub use encoder::encode;
