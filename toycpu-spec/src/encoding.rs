//! # Instruction Encoding Constants and Helpers
//!
//! Fields are packed from the most-significant end of the word.
//!
//! ## Instruction Format (32-bit)
//!
//! ```text
//! literal:   [opcode:5][type:6][payload:21]
//! reg-addr:  [opcode:5][reg:2][addr:25]
//! regs:      [opcode:5][f0:2][f1:2][f2:2][unused:21]
//! branch:    [opcode:5][r1:2][r2:2][addr:23]
//! jump:      [opcode:5][addr:27]
//! ```

use crate::Opcode;

// ============================================================================
// Bit Position Constants
// ============================================================================

/// Opcode field: bits 27-31 (5 bits)
pub const OPCODE_SHIFT: u32 = 27;

/// First register field: bits 25-26
pub const FIELD0_SHIFT: u32 = 25;

/// Second register field: bits 23-24
pub const FIELD1_SHIFT: u32 = 23;

/// Third register field: bits 21-22
pub const FIELD2_SHIFT: u32 = 21;

/// NOP type tag: bits 21-26 (6 bits)
pub const TYPE_TAG_SHIFT: u32 = 21;

// ============================================================================
// Field Masks
// ============================================================================

/// Opcode mask (5 bits)
pub const OPCODE_MASK: u32 = 0x1F;

/// Operand area (27 bits)
pub const OPERAND_MASK: u32 = 0x7FF_FFFF;

/// Register field mask (2 bits)
pub const REGISTER_MASK: u32 = 0x3;

/// Type tag mask (6 bits)
pub const TYPE_TAG_MASK: u32 = 0x3F;

/// Typed literal payload mask (21 bits)
pub const PAYLOAD_MASK: u32 = 0x1F_FFFF;

/// Address for LOAD/STORE/STORER (25 bits)
pub const ADDR25_MASK: u32 = 0x1FF_FFFF;

/// Address for BNE/BLT/JLE (23 bits)
pub const ADDR23_MASK: u32 = 0x7F_FFFF;

/// Address for JUMP/BEQ/CALL (27 bits)
pub const ADDR27_MASK: u32 = OPERAND_MASK;

/// Payload width of typed literals
pub const PAYLOAD_BITS: u32 = 21;

// ============================================================================
// Field Extraction Functions
// ============================================================================

/// Extract opcode from instruction (bits 27-31)
#[inline]
pub const fn extract_opcode(inst: u32) -> u32 {
    (inst >> OPCODE_SHIFT) & OPCODE_MASK
}

/// Extract the 27-bit operand area
#[inline]
pub const fn extract_operands(inst: u32) -> u32 {
    inst & OPERAND_MASK
}

/// Extract register field `k` (0, 1 or 2) counted from the top of the operand area
#[inline]
pub const fn extract_field(inst: u32, k: u32) -> u32 {
    (inst >> (FIELD0_SHIFT - 2 * k)) & REGISTER_MASK
}

/// Extract the first register field (bits 25-26)
#[inline]
pub const fn extract_r0(inst: u32) -> u32 {
    extract_field(inst, 0)
}

/// Extract the second register field (bits 23-24)
#[inline]
pub const fn extract_r1(inst: u32) -> u32 {
    extract_field(inst, 1)
}

/// Extract the third register field (bits 21-22)
#[inline]
pub const fn extract_r2(inst: u32) -> u32 {
    extract_field(inst, 2)
}

/// Extract NOP type tag (bits 21-26)
#[inline]
pub const fn extract_type_tag(inst: u32) -> u32 {
    (inst >> TYPE_TAG_SHIFT) & TYPE_TAG_MASK
}

/// Extract NOP payload (bits 0-20)
#[inline]
pub const fn extract_payload(inst: u32) -> u32 {
    inst & PAYLOAD_MASK
}

/// Extract 25-bit address (LOAD/STORE/STORER)
#[inline]
pub const fn extract_addr25(inst: u32) -> u32 {
    inst & ADDR25_MASK
}

/// Extract 23-bit address (BNE/BLT/JLE)
#[inline]
pub const fn extract_addr23(inst: u32) -> u32 {
    inst & ADDR23_MASK
}

/// Extract 27-bit address (JUMP/BEQ/CALL)
#[inline]
pub const fn extract_addr27(inst: u32) -> u32 {
    inst & ADDR27_MASK
}

/// Sign-extend the low `bits` bits of `value`
#[inline]
pub const fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

// ============================================================================
// Instruction Encoding Functions
// ============================================================================

#[inline]
const fn opcode_bits(opcode: Opcode) -> u32 {
    (opcode.to_u8() as u32) << OPCODE_SHIFT
}

/// Encode an instruction with up to three register fields
#[inline]
pub const fn encode_regs(opcode: Opcode, f0: u32, f1: u32, f2: u32) -> u32 {
    opcode_bits(opcode)
        | ((f0 & REGISTER_MASK) << FIELD0_SHIFT)
        | ((f1 & REGISTER_MASK) << FIELD1_SHIFT)
        | ((f2 & REGISTER_MASK) << FIELD2_SHIFT)
}

/// Encode `[reg][25-bit addr]`
#[inline]
pub const fn encode_reg_addr(opcode: Opcode, reg: u32, addr: u32) -> u32 {
    opcode_bits(opcode) | ((reg & REGISTER_MASK) << FIELD0_SHIFT) | (addr & ADDR25_MASK)
}

/// Encode `[r1][r2][23-bit addr]`
#[inline]
pub const fn encode_branch(opcode: Opcode, r1: u32, r2: u32, addr: u32) -> u32 {
    opcode_bits(opcode)
        | ((r1 & REGISTER_MASK) << FIELD0_SHIFT)
        | ((r2 & REGISTER_MASK) << FIELD1_SHIFT)
        | (addr & ADDR23_MASK)
}

/// Encode `[27-bit addr]`
#[inline]
pub const fn encode_jump(opcode: Opcode, addr: u32) -> u32 {
    opcode_bits(opcode) | (addr & ADDR27_MASK)
}

/// Encode a NOP-carried typed literal
#[inline]
pub const fn encode_literal(tag: u32, payload: u32) -> u32 {
    ((tag & TYPE_TAG_MASK) << TYPE_TAG_SHIFT) | (payload & PAYLOAD_MASK)
}

// ============================================================================
// Text Form
// ============================================================================

/// Render a word as the 32-character bit string used by memory images
pub fn to_bit_string(word: u32) -> String {
    format!("{:032b}", word)
}

/// Parse a 32-character `0`/`1` string
pub fn parse_bit_string(text: &str) -> Option<u32> {
    if text.len() != 32 || !text.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    u32::from_str_radix(text, 2).ok()
}
