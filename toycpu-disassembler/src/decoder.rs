//! Instruction decoder
//!
//! Decoding is a pure function of the word. Every 5-bit opcode is defined,
//! so `decode` succeeds for all 32-bit inputs; typed-literal payloads are
//! carried through undecoded and checked by [`decode_literal`].

use crate::error::{DisassemblerError, Result};
use toycpu_spec::encoding::*;
use toycpu_spec::{Instruction, Opcode, Register, TypedValue};

/// Look up the opcode in the top 5 bits
pub fn decode_opcode(word: u32) -> Result<Opcode> {
    let raw = extract_opcode(word) as u8;
    Opcode::from_u8(raw).ok_or(DisassemblerError::UnknownOpcode(raw))
}

/// Split a word into its opcode and the raw 27-bit operand area
pub fn split(word: u32) -> Result<(Opcode, u32)> {
    Ok((decode_opcode(word)?, extract_operands(word)))
}

/// Decode 32-bit instruction word
pub fn decode(word: u32) -> Result<Instruction> {
    let opcode = decode_opcode(word)?;

    let f0 = Register::from_field(extract_r0(word));
    let f1 = Register::from_field(extract_r1(word));
    let f2 = Register::from_field(extract_r2(word));

    let inst = match opcode {
        Opcode::Nop => Instruction::Nop {
            tag: extract_type_tag(word) as u8,
            payload: extract_payload(word),
        },

        Opcode::Load => Instruction::Load { reg: f0, addr: extract_addr25(word) },
        Opcode::Store => Instruction::Store { reg: f0, addr: extract_addr25(word) },
        Opcode::Storer => Instruction::Storer { src: f0, addr: extract_addr25(word) },
        Opcode::Move => Instruction::Move { dst: f0, src: f1 },
        Opcode::Loadr => Instruction::Loadr { dst: f0, src: f1 },

        Opcode::Add => Instruction::Add { r1: f0, r2: f1, dst: f2 },
        Opcode::Sub => Instruction::Sub { r1: f0, r2: f1, dst: f2 },
        Opcode::Mul => Instruction::Mul { r1: f0, r2: f1, dst: f2 },
        Opcode::Div => Instruction::Div { r1: f0, r2: f1, dst: f2 },
        Opcode::And => Instruction::And { r1: f0, r2: f1, dst: f2 },
        Opcode::Or => Instruction::Or { r1: f0, r2: f1, dst: f2 },
        Opcode::Nor => Instruction::Nor { r1: f0, r2: f1, dst: f2 },
        Opcode::Not => Instruction::Not { reg: f0 },

        Opcode::Shl => Instruction::Shl { reg: f0, amount: f1 },
        Opcode::Shr => Instruction::Shr { reg: f0, amount: f1 },
        Opcode::Rol => Instruction::Rol { reg: f0, amount: f1 },
        Opcode::Ror => Instruction::Ror { reg: f0, amount: f1 },

        Opcode::Cmp => Instruction::Cmp { r1: f0, r2: f1 },

        Opcode::Jump => Instruction::Jump { addr: extract_addr27(word) },
        Opcode::Beq => Instruction::Beq { addr: extract_addr27(word) },
        Opcode::Call => Instruction::Call { addr: extract_addr27(word) },
        Opcode::Bne => Instruction::Bne { r1: f0, r2: f1, addr: extract_addr23(word) },
        Opcode::Blt => Instruction::Blt { r1: f0, r2: f1, addr: extract_addr23(word) },
        Opcode::Jle => Instruction::Jle { r1: f0, r2: f1, addr: extract_addr23(word) },
        Opcode::Ret => Instruction::Ret,

        Opcode::Push => Instruction::Push { reg: f0 },
        Opcode::Pop => Instruction::Pop { reg: f0 },
        Opcode::In => Instruction::In { reg: f0 },
        Opcode::Out => Instruction::Out { reg: f0 },
        Opcode::Clr => Instruction::Clr { reg: f0 },
        Opcode::Halt => Instruction::Halt,
    };

    Ok(inst)
}

/// Interpret the typed literal carried by a `NOP`.
///
/// Returns `Ok(None)` for a plain NOP (tag 0) or any other instruction.
pub fn decode_literal(inst: &Instruction) -> Result<Option<TypedValue>> {
    match *inst {
        Instruction::Nop { tag: 0, .. } => Ok(None),
        Instruction::Nop { tag, payload } => toycpu_spec::decode_value(payload, tag)
            .map(Some)
            .map_err(|source| DisassemblerError::InvalidLiteral {
                word: encode_literal(tag as u32, payload),
                source,
            }),
        _ => Ok(None),
    }
}
