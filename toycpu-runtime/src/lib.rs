//! # Toy CPU Runtime
//!
//! Memory, register/flag bank and execution engine for the toy CPU.
//!
//! ## Features
//!
//! - **Sparse memory**: `memory_size` words, the top `stack_size` of them
//!   reserved for PUSH/POP/CALL/RET
//! - **4 registers**: R0-R3, 16-bit two's complement, plus C/Z/N/V flags
//! - **Atomic steps**: a failing instruction changes nothing
//! - **Suspendable I/O**: IN parks the machine until input is provided
//! - **Snapshots**: serde + bincode copies of the whole machine
//!
//! ## Example
//!
//! ```rust
//! use toycpu_runtime::{Machine, RunOutcome};
//! use toycpu_spec::MachineConfig;
//!
//! // LOAD R0, [3]; OUT R0; HALT; .word 7
//! let image = [0x0800_0003, 0xD000_0000, 0xF800_0000, 7];
//! let mut machine = Machine::new(MachineConfig::default()).unwrap();
//! machine.load_image(0, &image).unwrap();
//! assert_eq!(machine.run_to_halt_or_input().unwrap(), RunOutcome::Halted);
//! assert_eq!(machine.outputs(), &[7]);
//! ```

pub mod error;
pub mod state;
pub mod memory;
pub mod register_state;
pub mod execute;
pub mod io;
pub mod vm;
pub mod loader;
pub mod snapshot;

pub use error::{ErrorKind, Result, RuntimeError};
pub use io::IoHandler;
pub use loader::{load_file, parse_image};
pub use memory::Memory;
pub use register_state::RegisterBank;
pub use snapshot::MachineSnapshot;
pub use state::{MachineState, RunMode, RunOutcome, RunState, StepOutcome};
pub use vm::{ExecutionResult, Machine};

/// Simple execution helper
///
/// Loads `image` at address 0 with the default configuration, feeds
/// `inputs` to IN in order and runs until the machine stops.
pub fn run(image: &[u32], inputs: Vec<toycpu_spec::RegisterWord>) -> Result<ExecutionResult> {
    let mut machine = Machine::new(toycpu_spec::MachineConfig::default())?;
    machine.load_image(0, image)?;
    for value in inputs {
        machine.push_input(value);
    }
    machine.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use toycpu_spec::MachineConfig;

    #[test]
    fn test_public_exports() {
        let _ = RunMode::Step;
        let _ = RunState::Running;
        let _ = ErrorKind::StackFull;
        let _ = IoHandler::default();
        let _ = RegisterBank::new();
        let _ = Memory::new(&MachineConfig::default());
    }

    #[test]
    fn test_run_helper() {
        let image = toycpu_assembler::assemble(
            "IN R0\n\
             IN R1\n\
             MUL R0, R1, R2\n\
             OUT R2\n\
             HALT",
        )
        .unwrap()
        .words;
        let result = run(&image, vec![6, 7]).unwrap();
        assert_eq!(result.outcome, RunOutcome::Halted);
        assert_eq!(result.outputs, vec![42]);
    }

    #[test]
    fn test_run_helper_empty_image() {
        let result = run(&[], vec![]).unwrap();
        assert_eq!(result.outcome, RunOutcome::Sentinel(0));
        assert_eq!(result.steps, 0);
    }

    #[test]
    fn test_runtime_error_reexport() {
        let err = RuntimeError::NoPendingInput;
        assert_eq!(err.kind(), ErrorKind::NoPendingInput);
        assert_eq!(err.to_string(), "No input is pending");
    }
}
