//! Instruction formatting to assembly text
//!
//! Output is accepted back by the assembler. `NOP` words carrying a literal
//! are rendered as `.word` directives.

use toycpu_spec::encoding::encode_literal;
use toycpu_spec::{Instruction, TypeTag, TypedValue};

/// Format instruction as assembly text
pub fn format(instr: &Instruction) -> String {
    match *instr {
        Instruction::Nop { tag: 0, payload: 0 } => "NOP".to_string(),
        Instruction::Nop { tag: 0, payload } => format!(".word {}", payload),
        // Non-canonical payloads (a boolean of 2) keep their exact bits
        Instruction::Nop { tag, payload } => match toycpu_spec::decode_value(payload, tag) {
            Ok(value) if value.encode() == Ok(payload) => format!(".word {}", format_literal(&value)),
            _ => format!(".word 0x{:08X}", encode_literal(tag as u32, payload)),
        },
        _ => instr.to_string(),
    }
}

/// Render a typed value in `.word` operand syntax
pub fn format_literal(value: &TypedValue) -> String {
    match *value {
        TypedValue::Boolean(b) => b.to_string(),
        TypedValue::Natural(n) => format!("nat {}", n),
        TypedValue::Integer(i) if i < 0 => i.to_string(),
        TypedValue::Integer(i) => format!("int {}", i),
        TypedValue::Float(x) if x.is_finite() => format!("{:?}", x),
        // inf and NaN have no literal syntax
        TypedValue::Float(_) => format!(
            "0x{:08X}",
            encode_literal(TypeTag::Float.to_u8() as u32, value.encode().unwrap_or_default())
        ),
        TypedValue::Char(code) => match value.as_char().filter(|&c| is_plain_char(c)) {
            Some(c) => format!("'{}'", c),
            None => format!("char {}", code),
        },
        TypedValue::RegisterWord(v) => (v as u16).to_string(),
    }
}

fn is_plain_char(c: char) -> bool {
    !c.is_control() && !c.is_whitespace() && c != '\'' && c != '\\'
}
