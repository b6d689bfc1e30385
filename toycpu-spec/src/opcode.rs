//! # Opcode Definitions
//!
//! Opcodes occupy the 5 most-significant bits of a word, so there are
//! exactly 32 of them and every 5-bit value names one.
//!
//! ## Opcode Table
//!
//! ```text
//!  0 NOP     [6 type][21 payload]        16 JUMP    [27 addr]
//!  1 LOAD    [2 reg][25 addr]            17 BEQ     [27 addr]
//!  2 STORE   [2 reg][25 addr]            18 BNE     [2 r1][2 r2][23 addr]
//!  3 MOVE    [2 dst][2 src]              19 BLT     [2 r1][2 r2][23 addr]
//!  4 ADD     [2 r1][2 r2][2 dst]         20 JLE     [2 r1][2 r2][23 addr]
//!  5 SUB     [2 r1][2 r2][2 dst]         21 PUSH    [2 reg]
//!  6 MUL     [2 r1][2 r2][2 dst]         22 POP     [2 reg]
//!  7 DIV     [2 r1][2 r2][2 dst]         23 CALL    [27 addr]
//!  8 AND     [2 r1][2 r2][2 dst]         24 RET     -
//!  9 OR      [2 r1][2 r2][2 dst]         25 IN      [2 reg]
//! 10 NOR     [2 r1][2 r2][2 dst]         26 OUT     [2 reg]
//! 11 NOT     [2 reg]                     27 CMP     [2 r1][2 r2]
//! 12 SHL     [2 reg][2 amount]           28 CLR     [2 reg]
//! 13 SHR     [2 reg][2 amount]           29 LOADR   [2 dst][2 src]
//! 14 ROL     [2 reg][2 amount]           30 STORER  [2 src][25 addr]
//! 15 ROR     [2 reg][2 amount]           31 HALT    -
//! ```

use serde::{Deserialize, Serialize};

/// Instruction opcode (5 bits, values 0-31)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// NOP: typed literal carrier
    Nop = 0,
    /// LOAD: reg = mem[addr]
    Load = 1,
    /// STORE: mem[addr] = reg
    Store = 2,
    /// MOVE: dst = src
    Move = 3,
    /// ADD: dst = r1 + r2
    Add = 4,
    /// SUB: dst = r1 - r2
    Sub = 5,
    /// MUL: dst = r1 * r2
    Mul = 6,
    /// DIV: dst = r1 / r2
    Div = 7,
    /// AND: dst = r1 & r2
    And = 8,
    /// OR: dst = r1 | r2
    Or = 9,
    /// NOR: dst = !(r1 | r2)
    Nor = 10,
    /// NOT: reg = !reg
    Not = 11,
    /// SHL: reg = reg << amount
    Shl = 12,
    /// SHR: reg = reg >> amount (arithmetic)
    Shr = 13,
    /// ROL: reg = rotate_left(reg, amount)
    Rol = 14,
    /// ROR: reg = rotate_right(reg, amount)
    Ror = 15,
    /// JUMP: cp = addr
    Jump = 16,
    /// BEQ: if Zero then cp = addr
    Beq = 17,
    /// BNE: if r1 != r2 then cp = addr
    Bne = 18,
    /// BLT: if r1 < r2 then cp = addr
    Blt = 19,
    /// JLE: if r1 <= r2 then cp = addr
    Jle = 20,
    /// PUSH: stack <- reg
    Push = 21,
    /// POP: reg <- stack
    Pop = 22,
    /// CALL: push cp + 1; cp = addr
    Call = 23,
    /// RET: cp = pop
    Ret = 24,
    /// IN: reg = external input
    In = 25,
    /// OUT: external output <- reg
    Out = 26,
    /// CMP: flags from r1 - r2
    Cmp = 27,
    /// CLR: no-op
    Clr = 28,
    /// LOADR: dst = src
    Loadr = 29,
    /// STORER: mem[addr] = raw bits of src
    Storer = 30,
    /// HALT: stop the machine
    Halt = 31,
}

impl Opcode {
    /// Opcode width in bits
    pub const BITS: u32 = 5;

    /// Opcode mask (0x1F for 5 bits)
    pub const MASK: u32 = 0x1F;

    /// Number of defined opcodes
    pub const COUNT: usize = 32;

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        let op = match value {
            0 => Opcode::Nop,
            1 => Opcode::Load,
            2 => Opcode::Store,
            3 => Opcode::Move,
            4 => Opcode::Add,
            5 => Opcode::Sub,
            6 => Opcode::Mul,
            7 => Opcode::Div,
            8 => Opcode::And,
            9 => Opcode::Or,
            10 => Opcode::Nor,
            11 => Opcode::Not,
            12 => Opcode::Shl,
            13 => Opcode::Shr,
            14 => Opcode::Rol,
            15 => Opcode::Ror,
            16 => Opcode::Jump,
            17 => Opcode::Beq,
            18 => Opcode::Bne,
            19 => Opcode::Blt,
            20 => Opcode::Jle,
            21 => Opcode::Push,
            22 => Opcode::Pop,
            23 => Opcode::Call,
            24 => Opcode::Ret,
            25 => Opcode::In,
            26 => Opcode::Out,
            27 => Opcode::Cmp,
            28 => Opcode::Clr,
            29 => Opcode::Loadr,
            30 => Opcode::Storer,
            31 => Opcode::Halt,
            _ => return None,
        };
        Some(op)
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Extract opcode from the top 5 bits of a 32-bit word
    #[inline]
    pub fn from_word(word: u32) -> Option<Self> {
        Self::from_u8((word >> (32 - Self::BITS)) as u8)
    }

    /// Parse an upper- or lower-case mnemonic
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        (0..Self::COUNT as u8)
            .filter_map(Self::from_u8)
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name))
    }

    /// Upper-case assembler mnemonic
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Move => "MOVE",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Nor => "NOR",
            Opcode::Not => "NOT",
            Opcode::Shl => "SHL",
            Opcode::Shr => "SHR",
            Opcode::Rol => "ROL",
            Opcode::Ror => "ROR",
            Opcode::Jump => "JUMP",
            Opcode::Beq => "BEQ",
            Opcode::Bne => "BNE",
            Opcode::Blt => "BLT",
            Opcode::Jle => "JLE",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::In => "IN",
            Opcode::Out => "OUT",
            Opcode::Cmp => "CMP",
            Opcode::Clr => "CLR",
            Opcode::Loadr => "LOADR",
            Opcode::Storer => "STORER",
            Opcode::Halt => "HALT",
        }
    }

    /// Operand layout of the low 27 bits
    pub const fn layout(self) -> OperandLayout {
        match self {
            Opcode::Nop => OperandLayout::TypedLiteral,
            Opcode::Load | Opcode::Store | Opcode::Storer => OperandLayout::RegAddr,
            Opcode::Move | Opcode::Loadr => OperandLayout::DstSrc,
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::And
            | Opcode::Or
            | Opcode::Nor => OperandLayout::ThreeReg,
            Opcode::Not
            | Opcode::Push
            | Opcode::Pop
            | Opcode::In
            | Opcode::Out
            | Opcode::Clr => OperandLayout::OneReg,
            Opcode::Shl | Opcode::Shr | Opcode::Rol | Opcode::Ror => OperandLayout::RegAmount,
            Opcode::Cmp => OperandLayout::TwoReg,
            Opcode::Bne | Opcode::Blt | Opcode::Jle => OperandLayout::RegRegAddr,
            Opcode::Jump | Opcode::Beq | Opcode::Call => OperandLayout::Addr,
            Opcode::Ret | Opcode::Halt => OperandLayout::Empty,
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Sub-layout of the 27-bit operand area
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperandLayout {
    /// `[6 type][21 payload]`
    TypedLiteral,
    /// `[2 reg][25 addr]`
    RegAddr,
    /// `[2 dst][2 src]`
    DstSrc,
    /// `[2 r1][2 r2][2 dst]`
    ThreeReg,
    /// `[2 reg]`
    OneReg,
    /// `[2 reg][2 amount]`
    RegAmount,
    /// `[2 r1][2 r2]`
    TwoReg,
    /// `[2 r1][2 r2][23 addr]`
    RegRegAddr,
    /// `[27 addr]`
    Addr,
    /// no operands
    Empty,
}
