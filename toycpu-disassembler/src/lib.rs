//! # Toy CPU Disassembler
//!
//! Decode 32-bit words into [`Instruction`](toycpu_spec::Instruction)s and
//! render them as assembly text.
//!
//! ## Example
//!
//! ```rust
//! use toycpu_disassembler::{decode, disassemble, format};
//!
//! let halt = decode(0xF800_0000).unwrap();
//! assert_eq!(format(&halt), "HALT");
//!
//! let text = disassemble(&[0x0800_0005, 0xF800_0000], 0);
//! assert!(text.contains("LOAD R0, [5]"));
//! ```

pub mod error;
pub mod decoder;
pub mod formatter;
pub mod disassembler;

pub use error::{DisassemblerError, Result};
pub use disassembler::{disassemble, listing, ListingLine};
pub use decoder::{decode, decode_literal, decode_opcode, split};
pub use formatter::{format, format_literal};

#[cfg(test)]
mod tests {
    use super::*;
    use toycpu_spec::{Instruction, Opcode, Register};

    #[test]
    fn test_public_exports() {
        let _ = DisassemblerError::UnknownOpcode(32);
    }

    #[test]
    fn test_decode_function() {
        let word = (Opcode::Ret.to_u8() as u32) << 27;
        assert_eq!(decode(word).unwrap(), Instruction::Ret);
    }

    #[test]
    fn test_format_function() {
        let instr = Instruction::Rol {
            reg: Register::R1,
            amount: Register::R2,
        };
        assert_eq!(format(&instr), "ROL R1, R2");
    }

    #[test]
    fn test_disassembler_error_variants() {
        let errors: Vec<DisassemblerError> = vec![
            DisassemblerError::UnknownOpcode(40),
            DisassemblerError::InvalidLiteral {
                word: 0x00C0_0000,
                source: toycpu_spec::IsaError::InvalidTypeTag(6),
            },
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_result_type() {
        let ok: Result<i32> = Ok(42);
        assert!(ok.is_ok());

        let err: Result<i32> = Err(DisassemblerError::UnknownOpcode(0xFF));
        assert!(err.is_err());
    }

    // Cross-crate roundtrip tests are in the workspace-level tests/cross_module.rs
}
