//! Decoded instruction
//!
//! One variant per opcode, carrying the operand fields its layout defines.
//! Addresses are stored already masked to their field width.

use crate::opcode::Opcode;
use crate::register::Register;
use serde::{Deserialize, Serialize};

/// Toy CPU instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    // ========== Literal ==========
    /// NOP: carries a typed literal (tag 0 is a plain no-op)
    Nop { tag: u8, payload: u32 },

    // ========== Data Movement ==========
    /// LOAD: reg = mem[addr]
    Load { reg: Register, addr: u32 },

    /// STORE: mem[addr] = reg
    Store { reg: Register, addr: u32 },

    /// MOVE: dst = src
    Move { dst: Register, src: Register },

    /// LOADR: dst = src
    Loadr { dst: Register, src: Register },

    /// STORER: mem[addr] = raw 16-bit pattern of src
    Storer { src: Register, addr: u32 },

    // ========== Arithmetic ==========
    /// ADD: dst = r1 + r2
    Add { r1: Register, r2: Register, dst: Register },

    /// SUB: dst = r1 - r2
    Sub { r1: Register, r2: Register, dst: Register },

    /// MUL: dst = r1 * r2
    Mul { r1: Register, r2: Register, dst: Register },

    /// DIV: dst = r1 / r2
    Div { r1: Register, r2: Register, dst: Register },

    // ========== Logical ==========
    /// AND: dst = r1 & r2
    And { r1: Register, r2: Register, dst: Register },

    /// OR: dst = r1 | r2
    Or { r1: Register, r2: Register, dst: Register },

    /// NOR: dst = !(r1 | r2)
    Nor { r1: Register, r2: Register, dst: Register },

    /// NOT: reg = !reg
    Not { reg: Register },

    // ========== Shift ==========
    /// SHL: reg <<= amount
    Shl { reg: Register, amount: Register },

    /// SHR: reg >>= amount (arithmetic)
    Shr { reg: Register, amount: Register },

    /// ROL: reg = rotate_left(reg, amount)
    Rol { reg: Register, amount: Register },

    /// ROR: reg = rotate_right(reg, amount)
    Ror { reg: Register, amount: Register },

    // ========== Compare ==========
    /// CMP: set flags from r1 - r2
    Cmp { r1: Register, r2: Register },

    // ========== Control Flow ==========
    /// JUMP: cp = addr
    Jump { addr: u32 },

    /// BEQ: cp = addr if the Zero flag is set
    Beq { addr: u32 },

    /// BNE: cp = addr if r1 != r2
    Bne { r1: Register, r2: Register, addr: u32 },

    /// BLT: cp = addr if r1 < r2
    Blt { r1: Register, r2: Register, addr: u32 },

    /// JLE: cp = addr if r1 <= r2
    Jle { r1: Register, r2: Register, addr: u32 },

    /// CALL: push cp + 1, cp = addr
    Call { addr: u32 },

    /// RET: cp = pop()
    Ret,

    // ========== Stack ==========
    /// PUSH: push reg
    Push { reg: Register },

    /// POP: reg = pop()
    Pop { reg: Register },

    // ========== I/O ==========
    /// IN: suspend until a value for reg is supplied
    In { reg: Register },

    /// OUT: emit reg
    Out { reg: Register },

    // ========== System ==========
    /// CLR: no-op
    Clr { reg: Register },

    /// HALT: stop
    Halt,
}

impl Instruction {
    /// Plain no-op (all-zero word)
    pub const NOP: Self = Instruction::Nop { tag: 0, payload: 0 };

    /// Get the opcode for this instruction
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Nop { .. } => Opcode::Nop,
            Instruction::Load { .. } => Opcode::Load,
            Instruction::Store { .. } => Opcode::Store,
            Instruction::Move { .. } => Opcode::Move,
            Instruction::Loadr { .. } => Opcode::Loadr,
            Instruction::Storer { .. } => Opcode::Storer,
            Instruction::Add { .. } => Opcode::Add,
            Instruction::Sub { .. } => Opcode::Sub,
            Instruction::Mul { .. } => Opcode::Mul,
            Instruction::Div { .. } => Opcode::Div,
            Instruction::And { .. } => Opcode::And,
            Instruction::Or { .. } => Opcode::Or,
            Instruction::Nor { .. } => Opcode::Nor,
            Instruction::Not { .. } => Opcode::Not,
            Instruction::Shl { .. } => Opcode::Shl,
            Instruction::Shr { .. } => Opcode::Shr,
            Instruction::Rol { .. } => Opcode::Rol,
            Instruction::Ror { .. } => Opcode::Ror,
            Instruction::Cmp { .. } => Opcode::Cmp,
            Instruction::Jump { .. } => Opcode::Jump,
            Instruction::Beq { .. } => Opcode::Beq,
            Instruction::Bne { .. } => Opcode::Bne,
            Instruction::Blt { .. } => Opcode::Blt,
            Instruction::Jle { .. } => Opcode::Jle,
            Instruction::Call { .. } => Opcode::Call,
            Instruction::Ret => Opcode::Ret,
            Instruction::Push { .. } => Opcode::Push,
            Instruction::Pop { .. } => Opcode::Pop,
            Instruction::In { .. } => Opcode::In,
            Instruction::Out { .. } => Opcode::Out,
            Instruction::Clr { .. } => Opcode::Clr,
            Instruction::Halt => Opcode::Halt,
        }
    }

    /// Get the mnemonic for this instruction
    pub fn mnemonic(&self) -> &'static str {
        self.opcode().mnemonic()
    }

    /// Whether a completed execution may continue at `cp + 1`.
    ///
    /// False for instructions that always redirect or stop (JUMP, CALL, RET,
    /// HALT) and for IN, which parks `cp` until input arrives.
    pub fn falls_through(&self) -> bool {
        !matches!(
            self,
            Instruction::Jump { .. }
                | Instruction::Call { .. }
                | Instruction::Ret
                | Instruction::Halt
                | Instruction::In { .. }
        )
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = self.mnemonic();
        match self {
            Instruction::Nop { tag: 0, payload: 0 } => write!(f, "{}", m),
            Instruction::Nop { tag, payload } => write!(f, "{} #{}:{:#x}", m, tag, payload),

            Instruction::Load { reg, addr }
            | Instruction::Store { reg, addr }
            | Instruction::Storer { src: reg, addr } => write!(f, "{} {}, [{}]", m, reg, addr),

            Instruction::Move { dst, src } | Instruction::Loadr { dst, src } => {
                write!(f, "{} {}, {}", m, dst, src)
            }

            Instruction::Add { r1, r2, dst }
            | Instruction::Sub { r1, r2, dst }
            | Instruction::Mul { r1, r2, dst }
            | Instruction::Div { r1, r2, dst }
            | Instruction::And { r1, r2, dst }
            | Instruction::Or { r1, r2, dst }
            | Instruction::Nor { r1, r2, dst } => write!(f, "{} {}, {}, {}", m, r1, r2, dst),

            Instruction::Not { reg }
            | Instruction::Push { reg }
            | Instruction::Pop { reg }
            | Instruction::In { reg }
            | Instruction::Out { reg }
            | Instruction::Clr { reg } => write!(f, "{} {}", m, reg),

            Instruction::Shl { reg, amount }
            | Instruction::Shr { reg, amount }
            | Instruction::Rol { reg, amount }
            | Instruction::Ror { reg, amount } => write!(f, "{} {}, {}", m, reg, amount),

            Instruction::Cmp { r1, r2 } => write!(f, "{} {}, {}", m, r1, r2),

            Instruction::Jump { addr } | Instruction::Beq { addr } | Instruction::Call { addr } => {
                write!(f, "{} [{}]", m, addr)
            }

            Instruction::Bne { r1, r2, addr }
            | Instruction::Blt { r1, r2, addr }
            | Instruction::Jle { r1, r2, addr } => write!(f, "{} {}, {}, [{}]", m, r1, r2, addr),

            Instruction::Ret | Instruction::Halt => write!(f, "{}", m),
        }
    }
}
