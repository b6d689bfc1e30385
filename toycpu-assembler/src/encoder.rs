//! Instruction encoding to 32-bit words

use toycpu_spec::encoding::*;
use toycpu_spec::{Instruction, Opcode, Register};

#[inline]
fn r(reg: Register) -> u32 {
    reg.index() as u32
}

/// Encode instruction to 32-bit word
pub fn encode(instr: &Instruction) -> u32 {
    let op = instr.opcode();
    match *instr {
        // ========== Literal ==========
        Instruction::Nop { tag, payload } => encode_literal(tag as u32, payload),

        // ========== [reg][25-bit addr] ==========
        Instruction::Load { reg, addr }
        | Instruction::Store { reg, addr }
        | Instruction::Storer { src: reg, addr } => encode_reg_addr(op, r(reg), addr),

        // ========== Register forms ==========
        Instruction::Move { dst, src } | Instruction::Loadr { dst, src } => {
            encode_regs(op, r(dst), r(src), 0)
        }

        Instruction::Add { r1, r2, dst }
        | Instruction::Sub { r1, r2, dst }
        | Instruction::Mul { r1, r2, dst }
        | Instruction::Div { r1, r2, dst }
        | Instruction::And { r1, r2, dst }
        | Instruction::Or { r1, r2, dst }
        | Instruction::Nor { r1, r2, dst } => encode_regs(op, r(r1), r(r2), r(dst)),

        Instruction::Not { reg }
        | Instruction::Push { reg }
        | Instruction::Pop { reg }
        | Instruction::In { reg }
        | Instruction::Out { reg }
        | Instruction::Clr { reg } => encode_regs(op, r(reg), 0, 0),

        Instruction::Shl { reg, amount }
        | Instruction::Shr { reg, amount }
        | Instruction::Rol { reg, amount }
        | Instruction::Ror { reg, amount } => encode_regs(op, r(reg), r(amount), 0),

        Instruction::Cmp { r1, r2 } => encode_regs(op, r(r1), r(r2), 0),

        // ========== Control Flow ==========
        Instruction::Jump { addr } | Instruction::Beq { addr } | Instruction::Call { addr } => {
            encode_jump(op, addr)
        }

        Instruction::Bne { r1, r2, addr }
        | Instruction::Blt { r1, r2, addr }
        | Instruction::Jle { r1, r2, addr } => encode_branch(op, r(r1), r(r2), addr),

        Instruction::Ret | Instruction::Halt => encode_regs(op, 0, 0, 0),
    }
}

/// Encode a bare opcode with all operand bits clear
pub fn encode_opcode(op: Opcode) -> u32 {
    encode_regs(op, 0, 0, 0)
}
