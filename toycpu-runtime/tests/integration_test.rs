//! Integration tests for the toy CPU runtime

use toycpu_assembler::{assemble, encode};
use toycpu_runtime::{
    ErrorKind, Machine, MachineSnapshot, RunOutcome, RunState, RuntimeError, StepOutcome,
};
use toycpu_spec::{Flag, Instruction, MachineConfig, Register, TypedValue};

fn load(source: &str) -> Machine {
    let assembly = assemble(source).unwrap();
    let mut machine = Machine::new(MachineConfig::default()).unwrap();
    machine.load_image(assembly.base, &assembly.words).unwrap();
    machine
}

#[test]
fn test_simple_halt() {
    let code = vec![encode(&Instruction::Halt)];
    let mut machine = Machine::new(MachineConfig::default()).unwrap();
    machine.load_image(0, &code).unwrap();

    let result = machine.run().unwrap();
    assert_eq!(result.outcome, RunOutcome::Halted);
    assert_eq!(result.steps, 1);
}

#[test]
fn test_sum_of_two_cells() {
    // LOAD R0,[5]; LOAD R1,[6]; ADD R0,R1,R2; STORE R2,[7]; HALT
    let code = vec![
        encode(&Instruction::Load { reg: Register::R0, addr: 5 }),
        encode(&Instruction::Load { reg: Register::R1, addr: 6 }),
        encode(&Instruction::Add { r1: Register::R0, r2: Register::R1, dst: Register::R2 }),
        encode(&Instruction::Store { reg: Register::R2, addr: 7 }),
        encode(&Instruction::Halt),
        3,
        4,
    ];
    let mut machine = Machine::new(MachineConfig::default()).unwrap();
    machine.load_image(0, &code).unwrap();

    assert_eq!(machine.run_to_halt_or_input().unwrap(), RunOutcome::Halted);
    assert_eq!(machine.read_memory(7).unwrap(), 7);
    assert_eq!(machine.run_state(), RunState::Halted);
}

#[test]
fn test_add_sets_zero() {
    let mut machine = load(
        "LOAD R0, [a]\n\
         LOAD R1, [b]\n\
         ADD R0, R1, R2\n\
         HALT\n\
         a: .word 5\n\
         b: .word -5",
    );
    machine.run_to_halt_or_input().unwrap();
    assert_eq!(machine.read_register(2).unwrap(), 0);
    assert!(machine.read_flag(Flag::Zero));
}

#[test]
fn test_cmp_less_than() {
    let mut machine = load(
        "LOAD R0, [a]\n\
         LOAD R1, [b]\n\
         CMP R0, R1\n\
         HALT\n\
         a: .word 3\n\
         b: .word 7",
    );
    machine.run_to_halt_or_input().unwrap();
    assert!(machine.read_flag(Flag::Negative));
    assert!(!machine.read_flag(Flag::Zero));
}

#[test]
fn test_call_returns_past_call() {
    let mut code = vec![0u32; 11];
    code[0] = encode(&Instruction::Call { addr: 10 });
    code[10] = encode(&Instruction::Ret);
    let mut machine = Machine::new(MachineConfig::default()).unwrap();
    machine.load_image(0, &code).unwrap();

    machine.step().unwrap();
    assert_eq!(machine.get_cp(), 10);
    machine.step().unwrap();
    assert_eq!(machine.get_cp(), 1);
}

#[test]
fn test_countdown_loop() {
    // Print 3, 2, 1
    let mut machine = load(
        "      LOAD R0, [n]\n\
               LOAD R1, [one]\n\
               LOAD R3, [zero]\n\
         loop: OUT R0\n\
               SUB R0, R1, R0\n\
               BNE R0, R3, [loop]\n\
               HALT\n\
         n:    .word 3\n\
         one:  .word 1\n\
         zero: .word int 0",
    );
    assert_eq!(machine.run_to_halt_or_input().unwrap(), RunOutcome::Halted);
    assert_eq!(machine.outputs(), &[3, 2, 1]);
}

#[test]
fn test_subroutine_with_stack() {
    let mut machine = load(
        "      LOAD R0, [x]\n\
               PUSH R0\n\
               CALL [double]\n\
               POP R1\n\
               OUT R0\n\
               OUT R1\n\
               HALT\n\
         double: ADD R0, R0, R0\n\
               RET\n\
         x:    .word 21",
    );
    assert_eq!(machine.run_to_halt_or_input().unwrap(), RunOutcome::Halted);
    assert_eq!(machine.outputs(), &[42, 21]);
}

#[test]
fn test_beq_after_cmp() {
    let mut machine = load(
        "      CMP R0, R1\n\
               BEQ [same]\n\
               HALT\n\
         same: OUT R0\n\
               HALT",
    );
    machine.run_to_halt_or_input().unwrap();
    assert_eq!(machine.outputs(), &[0]);
}

#[test]
fn test_typed_literal_load() {
    let mut machine = load(
        "LOAD R0, [t]\n\
         LOAD R1, [c]\n\
         LOAD R2, [f]\n\
         LOAD R3, [n]\n\
         HALT\n\
         t: .word true\n\
         c: .word 'z'\n\
         f: .word -7.9\n\
         n: .word nat 70000",
    );
    machine.run_to_halt_or_input().unwrap();
    assert_eq!(machine.read_register(0).unwrap(), 1);
    assert_eq!(machine.read_register(1).unwrap(), 'z' as i16);
    assert_eq!(machine.read_register(2).unwrap(), -7);
    assert_eq!(machine.read_register(3).unwrap(), 70000u32 as u16 as i16);
}

#[test]
fn test_store_negative_round_trips() {
    let mut machine = load(
        "LOAD R0, [v]\n\
         STORE R0, [dst]\n\
         LOAD R1, [dst]\n\
         HALT\n\
         v: .word -300\n\
         dst: .word 0",
    );
    machine.run_to_halt_or_input().unwrap();
    assert_eq!(machine.read_register(1).unwrap(), -300);
    assert_eq!(
        TypedValue::from_word(machine.read_memory(5).unwrap()).unwrap(),
        TypedValue::Integer(-300)
    );
}

#[test]
fn test_literal_step_outcome() {
    let mut machine = load(".word 2.5\nHALT");
    assert_eq!(
        machine.step().unwrap(),
        StepOutcome::Literal(TypedValue::Float(2.5))
    );
    assert_eq!(machine.step().unwrap(), StepOutcome::Halted);
}

#[test]
fn test_interactive_input() {
    let mut machine = load(
        "IN R0\n\
         IN R1\n\
         ADD R0, R1, R2\n\
         OUT R2\n\
         HALT",
    );
    assert_eq!(
        machine.run_to_halt_or_input().unwrap(),
        RunOutcome::AwaitingInput(Register::R0)
    );
    assert_eq!(
        machine.provide_input(0, 40).unwrap(),
        Some(RunOutcome::AwaitingInput(Register::R1))
    );
    assert_eq!(machine.provide_input(1, 2).unwrap(), Some(RunOutcome::Halted));
    assert_eq!(machine.outputs(), &[42]);
}

#[test]
fn test_reserved_tag_reported_on_step() {
    let mut machine = Machine::new(MachineConfig::default()).unwrap();
    machine.load_image(0, &[7 << 21]).unwrap();
    let err = machine.step().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
    assert_eq!(machine.get_cp(), 0);
    assert_eq!(machine.run_state(), RunState::Running);
}

#[test]
fn test_stack_overflow_through_calls() {
    let config = MachineConfig::new(20, 4).unwrap();
    let mut machine = Machine::new(config).unwrap();
    let code = vec![encode(&Instruction::Call { addr: 0 })];
    machine.load_image(0, &code).unwrap();

    let err = machine.run_to_halt_or_input().unwrap_err();
    assert!(matches!(err, RuntimeError::StackFull { capacity: 4 }));
    assert_eq!(machine.snapshot().memory.len(), 5);
}

#[test]
fn test_snapshot_restore_resumes() {
    let mut machine = load(
        "IN R0\n\
         OUT R0\n\
         HALT",
    );
    machine.run_to_halt_or_input().unwrap();

    let bytes = machine.snapshot().to_bytes().unwrap();
    let snapshot = MachineSnapshot::from_bytes(&bytes).unwrap();
    let mut restored = Machine::restore(&snapshot).unwrap();
    assert_eq!(restored.run_state(), machine.run_state());

    assert_eq!(restored.provide_input(0, 9).unwrap(), Some(RunOutcome::Halted));
    assert_eq!(restored.outputs(), &[9]);
}

#[test]
fn test_nonzero_base() {
    let assembly = toycpu_assembler::assemble_at("start: JUMP [end]\nHALT\nend: HALT", 100).unwrap();
    let mut machine = Machine::new(MachineConfig::default()).unwrap();
    machine.load_image(100, &assembly.words).unwrap();
    assert_eq!(machine.get_cp(), 100);
    machine.run_to_halt_or_input().unwrap();
    assert_eq!(machine.get_cp(), 102);
}
