//! Integration tests for memory, stack and register bank
//!
//! Property tests cover stack ordering and exhaustion, register bounds and
//! the rotate instructions.

use proptest::prelude::*;
use toycpu_assembler::encode;
use toycpu_runtime::{ErrorKind, Machine, Memory, RegisterBank, RuntimeError};
use toycpu_spec::{Flag, Instruction, MachineConfig, Register};

fn small_config() -> MachineConfig {
    MachineConfig::new(64, 16).unwrap()
}

#[test]
fn test_stack_bounds() {
    let mem = Memory::new(&MachineConfig::default());
    assert_eq!(mem.stack_base(), 900);
    assert_eq!(mem.stack_capacity(), 100);
    assert!(!mem.is_stack_address(899));
    assert!(mem.is_stack_address(900));
    assert!(mem.is_stack_address(999));
    assert!(!mem.is_stack_address(1000));
}

#[test]
fn test_stack_reads_allowed() {
    let mut mem = Memory::new(&MachineConfig::default());
    mem.push(77).unwrap();
    assert_eq!(mem.read(900).unwrap(), 77);
}

#[test]
fn test_pop_empty() {
    let mut mem = Memory::new(&small_config());
    let err = mem.pop().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StackEmpty);
}

#[test]
fn test_rotate_through_machine() {
    let code = vec![
        encode(&Instruction::Rol { reg: Register::R0, amount: Register::R1 }),
        encode(&Instruction::Ror { reg: Register::R0, amount: Register::R1 }),
        encode(&Instruction::Halt),
    ];
    let mut machine = Machine::new(MachineConfig::default()).unwrap();
    machine.load_image(0, &code).unwrap();
    machine.write_register(0, 0x1234).unwrap();
    machine.write_register(1, 4).unwrap();

    machine.step().unwrap();
    assert_eq!(machine.read_register(0).unwrap(), 0x2341);
    machine.step().unwrap();
    assert_eq!(machine.read_register(0).unwrap(), 0x1234);
}

#[test]
fn test_div_by_zero_leaves_state() {
    let code = vec![encode(&Instruction::Div {
        r1: Register::R0,
        r2: Register::R1,
        dst: Register::R2,
    })];
    let mut machine = Machine::new(MachineConfig::default()).unwrap();
    machine.load_image(0, &code).unwrap();
    machine.write_register(0, 50).unwrap();
    machine.write_register(2, 11).unwrap();
    let before = machine.snapshot();

    let err = machine.step().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    assert_eq!(machine.snapshot(), before);
}

proptest! {
    #[test]
    fn prop_stack_is_lifo(values in prop::collection::vec(any::<u32>(), 0..=16)) {
        let mut mem = Memory::new(&small_config());
        for &v in &values {
            mem.push(v).unwrap();
        }
        for &v in values.iter().rev() {
            prop_assert_eq!(mem.pop().unwrap(), v);
        }
        prop_assert!(matches!(mem.pop(), Err(RuntimeError::StackEmpty)));
    }

    #[test]
    fn prop_full_stack_is_preserved(values in prop::collection::vec(any::<u32>(), 16), extra in any::<u32>()) {
        let mut mem = Memory::new(&small_config());
        for &v in &values {
            mem.push(v).unwrap();
        }
        let before = mem.entries();
        let err = mem.push(extra).unwrap_err();
        prop_assert!(matches!(err, RuntimeError::StackFull { capacity: 16 }), "unexpected error: {}", err);
        prop_assert_eq!(mem.entries(), before);
    }

    #[test]
    fn prop_register_index_bound(index in 4usize.., value in any::<i16>()) {
        let mut bank = RegisterBank::new();
        prop_assert_eq!(bank.get(index).unwrap_err().kind(), ErrorKind::InvalidRegisterIndex);
        prop_assert_eq!(bank.set(index, value).unwrap_err().kind(), ErrorKind::InvalidRegisterIndex);
        prop_assert_eq!(bank, RegisterBank::new());
    }

    #[test]
    fn prop_ror_inverts_rol(value in any::<i16>(), amount in 0i16..16) {
        let code = vec![
            encode(&Instruction::Rol { reg: Register::R2, amount: Register::R3 }),
            encode(&Instruction::Ror { reg: Register::R2, amount: Register::R3 }),
        ];
        let mut machine = Machine::new(MachineConfig::default()).unwrap();
        machine.load_image(0, &code).unwrap();
        machine.write_register(2, value).unwrap();
        machine.write_register(3, amount).unwrap();
        machine.step().unwrap();
        machine.step().unwrap();
        prop_assert_eq!(machine.read_register(2).unwrap(), value);
    }

    #[test]
    fn prop_out_of_range_reads_fail(addr in 1000u32..) {
        let mem = Memory::new(&MachineConfig::default());
        prop_assert_eq!(mem.read(addr).unwrap_err().kind(), ErrorKind::AddressOutOfRange);
    }

    #[test]
    fn prop_writes_outside_stack_read_back(addr in 0u32..900, value in any::<u32>()) {
        let mut mem = Memory::new(&MachineConfig::default());
        mem.write(addr, value).unwrap();
        prop_assert_eq!(mem.read(addr).unwrap(), value);
    }

    #[test]
    fn prop_add_matches_wrapping(a in any::<i16>(), b in any::<i16>()) {
        let code = vec![encode(&Instruction::Add { r1: Register::R0, r2: Register::R1, dst: Register::R2 })];
        let mut machine = Machine::new(MachineConfig::default()).unwrap();
        machine.load_image(0, &code).unwrap();
        machine.write_register(0, a).unwrap();
        machine.write_register(1, b).unwrap();
        machine.step().unwrap();

        let sum = a.wrapping_add(b);
        prop_assert_eq!(machine.read_register(2).unwrap(), sum);
        prop_assert_eq!(machine.read_flag(Flag::Zero), sum == 0);
        prop_assert_eq!(machine.read_flag(Flag::Overflow), a.checked_add(b).is_none());
        prop_assert_eq!(machine.read_flag(Flag::Carry), (a as u16).checked_add(b as u16).is_none());
    }
}
