//! Additional encoding tests for field boundaries not covered in unit tests

use proptest::prelude::*;
use toycpu_spec::encoding::*;
use toycpu_spec::{Opcode, OperandLayout};

// ============================================================================
// Field Boundaries
// ============================================================================

#[test]
fn test_register_fields_do_not_overlap_addresses() {
    let inst = encode_reg_addr(Opcode::Load, 3, ADDR25_MASK);
    assert_eq!(extract_opcode(inst), Opcode::Load.to_u8() as u32);
    assert_eq!(extract_r0(inst), 3);
    assert_eq!(extract_addr25(inst), ADDR25_MASK);

    let inst = encode_branch(Opcode::Jle, 3, 3, ADDR23_MASK);
    assert_eq!(extract_r0(inst), 3);
    assert_eq!(extract_r1(inst), 3);
    assert_eq!(extract_addr23(inst), ADDR23_MASK);
    assert_eq!(extract_opcode(inst), Opcode::Jle.to_u8() as u32);
}

#[test]
fn test_jump_uses_whole_operand_area() {
    let inst = encode_jump(Opcode::Jump, OPERAND_MASK);
    assert_eq!(extract_opcode(inst), Opcode::Jump.to_u8() as u32);
    assert_eq!(extract_addr27(inst), OPERAND_MASK);
}

#[test]
fn test_literal_tag_overlaps_register_fields() {
    // Tag 0b110101 occupies the same bits as register fields 0, 1, 2
    let inst = encode_literal(0b11_01_01, 0);
    assert_eq!(extract_type_tag(inst), 0b110101);
    assert_eq!(extract_r0(inst), 0b11);
    assert_eq!(extract_r1(inst), 0b01);
    assert_eq!(extract_r2(inst), 0b01);
}

// ============================================================================
// Roundtrip Encoding Tests (exhaustive register coverage)
// ============================================================================

#[test]
fn test_three_register_roundtrip_all_registers() {
    for r1 in 0..4 {
        for r2 in 0..4 {
            for dst in 0..4 {
                let inst = encode_regs(Opcode::Nor, r1, r2, dst);
                assert_eq!(extract_r0(inst), r1);
                assert_eq!(extract_r1(inst), r2);
                assert_eq!(extract_r2(inst), dst);
                assert_eq!(extract_opcode(inst), Opcode::Nor.to_u8() as u32);
            }
        }
    }
}

#[test]
fn test_every_opcode_has_a_layout() {
    for v in 0..32u8 {
        let op = Opcode::from_u8(v).unwrap();
        let word = encode_regs(op, 0, 0, 0);
        assert_eq!(Opcode::from_word(word), Some(op));
        let _ = op.layout();
    }
    assert_eq!(Opcode::Storer.layout(), OperandLayout::RegAddr);
}

proptest! {
    #[test]
    fn test_opcode_field_is_total(word in any::<u32>()) {
        prop_assert!(Opcode::from_word(word).is_some());
        prop_assert!(extract_opcode(word) < 32);
    }

    #[test]
    fn test_operands_and_opcode_partition_word(word in any::<u32>()) {
        prop_assert_eq!((extract_opcode(word) << OPCODE_SHIFT) | extract_operands(word), word);
    }

    #[test]
    fn test_bit_string_roundtrip(word in any::<u32>()) {
        let text = to_bit_string(word);
        prop_assert_eq!(text.len(), 32);
        prop_assert_eq!(parse_bit_string(&text), Some(word));
    }
}
