//! Integration tests for the toy CPU assembler
//!
//! Covers every mnemonic, label resolution, `.word` literals and the
//! image text output.

use toycpu_assembler::{assemble, assemble_at, encode, parse_instruction};
use toycpu_disassembler::{decode, format};
use toycpu_spec::{Instruction, Opcode, Register, TypedValue};

// ============================================================================
// One Line per Mnemonic
// ============================================================================

const ALL_FORMS: &[&str] = &[
    "NOP",
    "LOAD R1, [63]",
    "STORE R2, [7]",
    "MOVE R3, R0",
    "ADD R0, R1, R2",
    "SUB R1, R2, R3",
    "MUL R2, R3, R0",
    "DIV R3, R0, R1",
    "AND R0, R0, R1",
    "OR R1, R1, R2",
    "NOR R2, R2, R3",
    "NOT R3",
    "SHL R0, R1",
    "SHR R1, R2",
    "ROL R2, R3",
    "ROR R3, R0",
    "JUMP [26]",
    "BEQ [9]",
    "BNE R0, R1, [12]",
    "BLT R1, R2, [13]",
    "JLE R2, R3, [14]",
    "PUSH R0",
    "POP R1",
    "CALL [10]",
    "RET",
    "IN R2",
    "OUT R3",
    "CMP R0, R1",
    "CLR R2",
    "LOADR R3, R2",
    "STORER R1, [900]",
    "HALT",
];

#[test]
fn test_every_opcode_assembles() {
    let source = ALL_FORMS.join("\n");
    let program = assemble(&source).unwrap();
    assert_eq!(program.words.len(), 32);

    // Listed in opcode order
    for (i, &word) in program.words.iter().enumerate() {
        assert_eq!(word >> 27, i as u32, "line {}: {}", i + 1, ALL_FORMS[i]);
    }
}

#[test]
fn test_disassembly_matches_source() {
    for line in ALL_FORMS {
        let inst = parse_instruction(line).unwrap();
        let word = encode(&inst);
        assert_eq!(format(&decode(word).unwrap()), *line);
    }
}

#[test]
fn test_case_insensitive_mnemonics_and_registers() {
    assert_eq!(
        parse_instruction("add r0, R1, r2").unwrap(),
        parse_instruction("ADD R0, R1, R2").unwrap()
    );
}

#[test]
fn test_hex_and_decimal_addresses() {
    assert_eq!(
        parse_instruction("LOAD R1, [0x3F]").unwrap(),
        parse_instruction("LOAD R1, [63]").unwrap()
    );
    assert_eq!(
        parse_instruction("JUMP [0x1A]").unwrap(),
        Instruction::Jump { addr: 26 }
    );
}

// ============================================================================
// Bit Layout
// ============================================================================

#[test]
fn test_move_puts_destination_first() {
    let word = encode(&parse_instruction("MOVE R2, R1").unwrap());
    assert_eq!((word >> 25) & 3, 2);
    assert_eq!((word >> 23) & 3, 1);
}

#[test]
fn test_branch_layout() {
    let word = encode(&parse_instruction("JLE R3, R1, [0x7FFFFF]").unwrap());
    assert_eq!(word >> 27, Opcode::Jle.to_u8() as u32);
    assert_eq!((word >> 25) & 3, 3);
    assert_eq!((word >> 23) & 3, 1);
    assert_eq!(word & 0x7F_FFFF, 0x7F_FFFF);
}

#[test]
fn test_storer_uses_25_bit_address() {
    let word = encode(&parse_instruction("STORER R1, [0x1FFFFFF]").unwrap());
    assert_eq!(
        decode(word).unwrap(),
        Instruction::Storer {
            src: Register::R1,
            addr: 0x1FF_FFFF
        }
    );
}

// ============================================================================
// Programs
// ============================================================================

#[test]
fn test_sum_program() {
    let source = r#"
        LOAD R0, [data]
        LOAD R1, [data2]
        ADD R0, R1, R2
        STORE R2, [result]
        HALT
    data:   .word 3
    data2:  .word 4
    result: .word 0
    "#;
    let program = assemble(source).unwrap();
    assert_eq!(program.words.len(), 8);
    assert_eq!(program.labels["data"], 5);
    assert_eq!(program.labels["result"], 7);
    assert_eq!(
        decode(program.words[3]).unwrap(),
        Instruction::Store {
            reg: Register::R2,
            addr: 7
        }
    );
    assert_eq!(&program.words[5..], &[3, 4, 0]);
}

#[test]
fn test_typed_words() {
    let source = r#"
        .word true
        .word nat 7
        .word -3
        .word 1.5
        .word 'A'
    "#;
    let program = assemble(source).unwrap();
    let values: Vec<TypedValue> = program
        .words
        .iter()
        .map(|&w| TypedValue::from_word(w).unwrap())
        .collect();
    assert_eq!(
        values,
        vec![
            TypedValue::Boolean(true),
            TypedValue::Natural(7),
            TypedValue::Integer(-3),
            TypedValue::Float(1.5),
            TypedValue::from_char('A'),
        ]
    );
}

#[test]
fn test_surrogate_char_literal() {
    let program = assemble(".word char 55296").unwrap();
    assert_eq!(
        TypedValue::from_word(program.words[0]).unwrap(),
        TypedValue::Char(0xD800)
    );
}

#[test]
fn test_literal_words_disassemble_back() {
    let source = ".word true\n.word nat 7\n.word -3\n.word int 4\n.word 1.5\n.word 'A'\n.word 12";
    let program = assemble(source).unwrap();
    let text: Vec<String> = program
        .words
        .iter()
        .map(|&w| format(&decode(w).unwrap()))
        .collect();
    let expected: Vec<String> = source.lines().map(str::to_string).collect();
    assert_eq!(text, expected);
}

#[test]
fn test_image_text_round_trip() {
    let program = assemble_at("loop: BEQ [loop]\nHALT", 40).unwrap();
    let text = program.to_image_text();
    let parsed: Vec<u32> = text
        .lines()
        .map(|l| u32::from_str_radix(l, 2).unwrap())
        .collect();
    assert_eq!(parsed, program.words);
    assert_eq!(decode(parsed[0]).unwrap(), Instruction::Beq { addr: 40 });
}
