//! Tests for malformed input handling in the assembler

use toycpu_assembler::{assemble, AssemblerError};

// ============================================================================
// Invalid Instruction Tests
// ============================================================================

#[test]
fn test_unknown_instruction() {
    let result = assemble("FOOBAR R1, R2, R3");

    if let Err(AssemblerError::UnknownInstruction(name)) = result {
        assert_eq!(name, "FOOBAR");
    } else {
        panic!("Expected UnknownInstruction error");
    }
}

#[test]
fn test_instruction_typo() {
    assert!(assemble("ADDD R1, R2, R3").is_err());
}

#[test]
fn test_blank_and_comment_lines() {
    let source = r#"

        ; leading comment
        # hash comment
        HALT   ; trailing comment

    "#;
    let program = assemble(source).unwrap();
    assert_eq!(program.words.len(), 1);
}

// ============================================================================
// Operand Errors
// ============================================================================

#[test]
fn test_register_out_of_range() {
    assert!(matches!(
        assemble("PUSH R4"),
        Err(AssemblerError::InvalidRegister(_))
    ));
    assert!(matches!(
        assemble("ADD R0, R1, R9"),
        Err(AssemblerError::InvalidRegister(_))
    ));
}

#[test]
fn test_missing_operands() {
    for source in ["ADD R0, R1", "LOAD R0", "LOAD R0,", "BNE R0, R1", "JUMP", "NOT", "CMP R0"] {
        assert!(
            matches!(assemble(source), Err(AssemblerError::SyntaxError { .. })),
            "{} should fail",
            source
        );
    }
}

#[test]
fn test_extra_operands() {
    assert!(assemble("RET R0").is_err());
    assert!(assemble("CMP R0, R1, R2").is_err());
    assert!(assemble("JUMP [1] [2]").is_err());
}

#[test]
fn test_unclosed_bracket() {
    assert!(matches!(
        assemble("LOAD R0, [5"),
        Err(AssemblerError::SyntaxError { .. })
    ));
}

#[test]
fn test_register_indirect_forms_are_rejected() {
    assert!(assemble("LOAD R1, [R2]").is_err());
    assert!(assemble("STORE R1, [R2]").is_err());
    assert!(assemble("STORER R1, [R2]").is_err());
}

#[test]
fn test_invalid_characters() {
    match assemble("HALT\nADD R0, R1, @R2") {
        Err(AssemblerError::SyntaxError { line, column, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(column, 13);
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}

// ============================================================================
// Directive and Literal Errors
// ============================================================================

#[test]
fn test_unknown_directive() {
    assert!(matches!(
        assemble(".data 5"),
        Err(AssemblerError::InvalidDirective(_))
    ));
}

#[test]
fn test_word_out_of_range() {
    assert!(assemble(".word 4294967296").is_err());
    assert!(assemble(".word nat 2097152").is_err());
    assert!(assemble(".word int 1048576").is_err());
    assert!(assemble(".word -1048577").is_err());
    assert!(assemble(".word char 1114112").is_err());
}

#[test]
fn test_word_without_value() {
    assert!(assemble(".word").is_err());
    assert!(assemble(".word nat").is_err());
}

#[test]
fn test_bad_char_literal() {
    assert!(assemble(".word 'AB'").is_err());
    assert!(assemble(r".word '\q'").is_err());
}

// ============================================================================
// Label Errors
// ============================================================================

#[test]
fn test_reserved_label_names() {
    assert!(assemble("ADD: HALT").is_err());
    assert!(assemble("r2: HALT").is_err());
}

#[test]
fn test_label_without_colon_is_unknown_instruction() {
    assert!(matches!(
        assemble("loop HALT"),
        Err(AssemblerError::UnknownInstruction(_))
    ));
}
