//! Instruction execution for the toy CPU
//!
//! Every handler does its fallible work (bounds, stack, codec) before it
//! touches registers, flags, memory or `cp`, so a failed instruction leaves
//! the machine exactly as it was.
//!
//! | Instruction    | Flags assigned                         |
//! |----------------|----------------------------------------|
//! | ADD            | Zero, Carry, Overflow                  |
//! | SUB            | Zero, Negative                         |
//! | MUL            | Zero, Carry, Overflow (21-bit bound)   |
//! | DIV            | Zero                                   |
//! | CMP            | Zero, Negative, Carry, Overflow        |
//! | BNE, BLT, JLE  | Zero, Negative                         |

use crate::error::{Result, RuntimeError};
use crate::io::IoHandler;
use crate::state::{MachineState, RunMode, RunState, StepOutcome};
use toycpu_disassembler::decode_literal;
use toycpu_spec::encoding::PAYLOAD_MASK;
use toycpu_spec::{Flag, Instruction, Register, RegisterWord, TypedValue, REGISTER_BITS};

/// Wrap an `i32` result to register width
#[inline]
fn wrap(value: i32) -> RegisterWord {
    value as RegisterWord
}

/// Shift/rotate amount from a register, reduced mod 16
#[inline]
fn shift_amount(state: &MachineState, reg: Register) -> u32 {
    (state.bank.read(reg) as i32).rem_euclid(REGISTER_BITS as i32) as u32
}

#[inline]
fn operands(state: &MachineState, r1: Register, r2: Register) -> (i32, i32) {
    (state.bank.read(r1) as i32, state.bank.read(r2) as i32)
}

/// Register value as it is written to memory by STORE
fn store_word(value: RegisterWord) -> Result<u32> {
    if value >= 0 {
        Ok(value as u32)
    } else {
        Ok(TypedValue::Integer(value as i32).to_word()?)
    }
}

/// Execute single instruction
pub fn execute(
    instr: &Instruction,
    state: &mut MachineState,
    io: &mut IoHandler,
    mode: RunMode,
) -> Result<StepOutcome> {
    let next = if instr.falls_through() {
        state.next_cp()?
    } else {
        state.cp
    };

    let outcome = match *instr {
        // ========== Literals / no-ops ==========
        Instruction::Nop { .. } => {
            let literal = decode_literal(instr)?;
            state.set_cp(next)?;
            match literal {
                Some(value) => StepOutcome::Literal(value),
                None => StepOutcome::Executed,
            }
        }

        Instruction::Clr { .. } => {
            state.set_cp(next)?;
            StepOutcome::Executed
        }

        // ========== Data movement ==========
        Instruction::Load { reg, addr } => {
            let word = state.memory.read(addr)?;
            let value = TypedValue::from_word(word)
                .map_err(|source| RuntimeError::InvalidEncoding { word, source })?;
            state.set_cp(next)?;
            state.bank.write(reg, value.to_register_word());
            StepOutcome::Executed
        }

        Instruction::Store { reg, addr } => {
            let word = store_word(state.bank.read(reg))?;
            state.memory.write(addr, word)?;
            state.set_cp(next)?;
            StepOutcome::Executed
        }

        Instruction::Storer { src, addr } => {
            let word = state.bank.read(src) as u16 as u32;
            state.memory.write(addr, word)?;
            state.set_cp(next)?;
            StepOutcome::Executed
        }

        Instruction::Move { dst, src } | Instruction::Loadr { dst, src } => {
            state.set_cp(next)?;
            let value = state.bank.read(src);
            state.bank.write(dst, value);
            StepOutcome::Executed
        }

        // ========== Arithmetic ==========
        Instruction::Add { r1, r2, dst } => {
            let (a, b) = operands(state, r1, r2);
            let sum = a + b;
            let result = wrap(sum);
            let carry = (a as u16 as u32) + (b as u16 as u32) > u16::MAX as u32;
            state.set_cp(next)?;
            state.bank.write(dst, result);
            state.bank.set_flag(Flag::Zero, result == 0);
            state.bank.set_flag(Flag::Carry, carry);
            state.bank.set_flag(Flag::Overflow, sum != result as i32);
            StepOutcome::Executed
        }

        Instruction::Sub { r1, r2, dst } => {
            let (a, b) = operands(state, r1, r2);
            let result = wrap(a - b);
            state.set_cp(next)?;
            state.bank.write(dst, result);
            state.bank.set_flag(Flag::Zero, result == 0);
            state.bank.set_flag(Flag::Negative, result < 0);
            StepOutcome::Executed
        }

        Instruction::Mul { r1, r2, dst } => {
            let (a, b) = operands(state, r1, r2);
            let product = a * b;
            let result = wrap(product);
            let wide = product.unsigned_abs() > PAYLOAD_MASK;
            state.set_cp(next)?;
            state.bank.write(dst, result);
            state.bank.set_flag(Flag::Zero, result == 0);
            state.bank.set_flag(Flag::Overflow, wide);
            state.bank.set_flag(Flag::Carry, wide);
            StepOutcome::Executed
        }

        Instruction::Div { r1, r2, dst } => {
            let (a, b) = operands(state, r1, r2);
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { cp: state.cp });
            }
            let result = wrap(a.wrapping_div(b));
            state.set_cp(next)?;
            state.bank.write(dst, result);
            state.bank.set_flag(Flag::Zero, result == 0);
            StepOutcome::Executed
        }

        // ========== Logic (no flags) ==========
        Instruction::And { r1, r2, dst } => {
            state.set_cp(next)?;
            let result = state.bank.read(r1) & state.bank.read(r2);
            state.bank.write(dst, result);
            StepOutcome::Executed
        }

        Instruction::Or { r1, r2, dst } => {
            state.set_cp(next)?;
            let result = state.bank.read(r1) | state.bank.read(r2);
            state.bank.write(dst, result);
            StepOutcome::Executed
        }

        Instruction::Nor { r1, r2, dst } => {
            state.set_cp(next)?;
            let result = !(state.bank.read(r1) | state.bank.read(r2));
            state.bank.write(dst, result);
            StepOutcome::Executed
        }

        Instruction::Not { reg } => {
            state.set_cp(next)?;
            let result = !state.bank.read(reg);
            state.bank.write(reg, result);
            StepOutcome::Executed
        }

        // ========== Shifts ==========
        Instruction::Shl { reg, amount } => {
            let n = shift_amount(state, amount);
            state.set_cp(next)?;
            let result = ((state.bank.read(reg) as u16) << n) as RegisterWord;
            state.bank.write(reg, result);
            StepOutcome::Executed
        }

        Instruction::Shr { reg, amount } => {
            let n = shift_amount(state, amount);
            state.set_cp(next)?;
            let result = state.bank.read(reg) >> n;
            state.bank.write(reg, result);
            StepOutcome::Executed
        }

        Instruction::Rol { reg, amount } => {
            let n = shift_amount(state, amount);
            state.set_cp(next)?;
            let result = (state.bank.read(reg) as u16).rotate_left(n) as RegisterWord;
            state.bank.write(reg, result);
            StepOutcome::Executed
        }

        Instruction::Ror { reg, amount } => {
            let n = shift_amount(state, amount);
            state.set_cp(next)?;
            let result = (state.bank.read(reg) as u16).rotate_right(n) as RegisterWord;
            state.bank.write(reg, result);
            StepOutcome::Executed
        }

        // ========== Compare ==========
        Instruction::Cmp { r1, r2 } => {
            let (a, b) = operands(state, r1, r2);
            let diff = a - b;
            state.set_cp(next)?;
            state.bank.set_flag(Flag::Zero, diff == 0);
            state.bank.set_flag(Flag::Negative, diff < 0);
            state.bank.set_flag(Flag::Carry, (a as u16) < (b as u16));
            state.bank.set_flag(Flag::Overflow, diff != wrap(diff) as i32);
            StepOutcome::Executed
        }

        // ========== Control flow ==========
        Instruction::Jump { addr } => {
            let target = state.check_target(addr)?;
            state.set_cp(target)?;
            StepOutcome::Executed
        }

        Instruction::Beq { addr } => {
            let dest = if state.bank.get_flag(Flag::Zero) {
                state.check_target(addr)?
            } else {
                next
            };
            state.set_cp(dest)?;
            StepOutcome::Executed
        }

        Instruction::Bne { r1, r2, addr }
        | Instruction::Blt { r1, r2, addr }
        | Instruction::Jle { r1, r2, addr } => {
            let (a, b) = operands(state, r1, r2);
            let taken = match *instr {
                Instruction::Bne { .. } => a != b,
                Instruction::Blt { .. } => a < b,
                _ => a <= b,
            };
            let dest = if taken { state.check_target(addr)? } else { next };
            state.set_cp(dest)?;
            state.bank.set_flag(Flag::Zero, a == b);
            state.bank.set_flag(Flag::Negative, a < b);
            StepOutcome::Executed
        }

        Instruction::Call { addr } => {
            let target = state.check_target(addr)?;
            let ret = state.cp + 1;
            state.memory.push(ret)?;
            state.set_cp(target)?;
            StepOutcome::Executed
        }

        Instruction::Ret => {
            let (_, ret) = state.memory.peek()?;
            let target = state.check_target(ret)?;
            state.memory.pop()?;
            state.set_cp(target)?;
            StepOutcome::Executed
        }

        // ========== Stack ==========
        Instruction::Push { reg } => {
            let value = state.bank.read(reg) as u16 as u32;
            state.memory.push(value)?;
            state.set_cp(next)?;
            StepOutcome::Executed
        }

        Instruction::Pop { reg } => {
            let value = state.memory.pop()?;
            state.set_cp(next)?;
            state.bank.write(reg, value as u16 as RegisterWord);
            StepOutcome::Executed
        }

        // ========== I/O ==========
        Instruction::In { reg } => {
            // The answer moves cp past the IN, so that slot must exist now
            state.next_cp()?;
            state.run_state = RunState::AwaitingInput { register: reg, mode };
            StepOutcome::AwaitingInput(reg)
        }

        Instruction::Out { reg } => {
            let value = state.bank.read(reg);
            state.set_cp(next)?;
            io.write(value);
            StepOutcome::Output(value)
        }

        // ========== System ==========
        Instruction::Halt => {
            state.halt();
            StepOutcome::Halted
        }
    };

    Ok(outcome)
}
