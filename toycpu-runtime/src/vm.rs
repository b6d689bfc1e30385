//! Toy CPU virtual machine
//!
//! [`Machine`] owns memory, the register bank, `cp` and the I/O buffers.
//! It is driven one instruction at a time with [`Machine::step`] or in
//! bulk with [`Machine::run_to_halt_or_input`]; an IN parks it until
//! [`Machine::provide_input`] is called.

use tracing::{debug, trace, warn};

use crate::error::{Result, RuntimeError};
use crate::execute::execute;
use crate::io::IoHandler;
use crate::snapshot::MachineSnapshot;
use crate::state::{MachineState, RunMode, RunOutcome, RunState, StepOutcome};
use toycpu_spec::{Flag, Instruction, IsaError, MachineConfig, RegisterWord};

/// Result of [`Machine::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Instructions executed by this call
    pub steps: u64,

    /// Everything OUT has produced so far
    pub outputs: Vec<RegisterWord>,

    /// Why execution stopped
    pub outcome: RunOutcome,
}

pub struct Machine {
    state: MachineState,
    io: IoHandler,
    config: MachineConfig,
}

impl Machine {
    /// Create a machine with empty memory, `cp = 0`
    pub fn new(config: MachineConfig) -> Result<Self> {
        config.validate().map_err(IsaError::from)?;
        Ok(Self {
            state: MachineState::new(&config),
            io: IoHandler::default(),
            config,
        })
    }

    /// Rebuild a machine from a snapshot
    pub fn restore(snapshot: &MachineSnapshot) -> Result<Self> {
        let mut machine = Self::new(snapshot.config)?;
        machine.state.memory.restore(&snapshot.memory)?;
        machine.state.set_cp(snapshot.cp)?;
        machine.state.bank = snapshot.bank();
        machine.state.run_state = snapshot.run_state;
        if machine.state.pending_input().is_some() {
            machine.state.next_cp()?;
        }
        machine.state.steps = snapshot.steps;
        for &value in &snapshot.outputs {
            machine.io.write(value);
        }
        Ok(machine)
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Place `words` at `base..` and point `cp` at `base`.
    ///
    /// Nothing is written unless every word lands outside the stack region.
    pub fn load_image(&mut self, base: u32, words: &[u32]) -> Result<()> {
        let memory = &self.state.memory;
        memory.check_address(base)?;
        if !words.is_empty() {
            let len = u32::try_from(words.len()).unwrap_or(u32::MAX);
            let last = base.saturating_add(len - 1);
            memory.check_address(last)?;
            if memory.is_stack_address(last) {
                return Err(RuntimeError::StackRegionViolation {
                    address: base.max(memory.stack_base()),
                });
            }
        }

        for (addr, &word) in (base..).zip(words) {
            self.state.memory.write(addr, word)?;
        }
        self.state.set_cp(base)?;
        self.state.run_state = RunState::Running;
        debug!(base, words = words.len(), "image loaded");
        Ok(())
    }

    /// Execute one instruction
    pub fn step(&mut self) -> Result<StepOutcome> {
        self.step_with_mode(RunMode::Step)
    }

    fn step_with_mode(&mut self, mode: RunMode) -> Result<StepOutcome> {
        match self.state.run_state {
            RunState::Halted => return Ok(StepOutcome::Halted),
            RunState::AwaitingInput { register, .. } => {
                return Ok(StepOutcome::AwaitingInput(register))
            }
            RunState::Running => {}
        }

        let cp = self.state.cp;
        let result = match self.fetch_and_decode() {
            Ok((inst, word)) => {
                self.trace_instruction(cp, word, &inst);
                execute(&inst, &mut self.state, &mut self.io, mode)
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(outcome) => {
                match outcome {
                    // IN is counted when provide_input completes it
                    StepOutcome::AwaitingInput(register) => {
                        debug!(cp, %register, ?mode, "awaiting input");
                        return Ok(outcome);
                    }
                    StepOutcome::Halted => debug!(cp, "halted"),
                    _ => {}
                }
                self.state.steps += 1;
                Ok(outcome)
            }
            Err(err) => {
                warn!(cp, error = %err, "instruction failed");
                Err(err)
            }
        }
    }

    /// Run until HALT, IN, a raw zero word, the step limit or an error
    pub fn run_to_halt_or_input(&mut self) -> Result<RunOutcome> {
        let mut steps = 0u64;
        loop {
            match self.state.run_state {
                RunState::Halted => return Ok(RunOutcome::Halted),
                RunState::AwaitingInput { register, .. } => {
                    return Ok(RunOutcome::AwaitingInput(register))
                }
                RunState::Running => {}
            }

            if steps >= self.config.max_steps {
                debug!(steps, "step limit reached");
                return Ok(RunOutcome::StepLimit(steps));
            }

            // Lookahead: a failed read is left for the step to report
            if let Ok(0) = self.state.memory.read(self.state.cp) {
                debug!(cp = self.state.cp, "sentinel word");
                return Ok(RunOutcome::Sentinel(self.state.cp));
            }

            self.step_with_mode(RunMode::RunAll)?;
            steps += 1;
        }
    }

    /// Complete a pending IN.
    ///
    /// Writes `value` to register `register`, moves `cp` past the IN and
    /// resumes. When the IN was reached from a run-to-halt call the run
    /// continues and its outcome is returned; in step mode this returns
    /// `None` and the IN counts as the step.
    pub fn provide_input(&mut self, register: usize, value: RegisterWord) -> Result<Option<RunOutcome>> {
        let (_, mode) = self.state.pending_input().ok_or(RuntimeError::NoPendingInput)?;
        let next = self.state.next_cp()?;
        self.state.bank.set(register, value)?;
        self.state.set_cp(next)?;
        self.state.run_state = RunState::Running;
        self.state.steps += 1;
        debug!(register, value, ?mode, "input provided");

        match mode {
            RunMode::Step => Ok(None),
            RunMode::RunAll => self.run_to_halt_or_input().map(Some),
        }
    }

    /// Run to completion, answering IN from the queued inputs.
    ///
    /// Stops on the first IN with no queued value left.
    pub fn run(&mut self) -> Result<ExecutionResult> {
        let start = self.state.steps;
        let mut outcome = self.run_to_halt_or_input()?;
        while let RunOutcome::AwaitingInput(register) = outcome {
            let Some(value) = self.io.read() else { break };
            outcome = match self.provide_input(register.index(), value)? {
                Some(next) => next,
                None => self.run_to_halt_or_input()?,
            };
        }

        Ok(ExecutionResult {
            steps: self.state.steps - start,
            outputs: self.io.outputs().to_vec(),
            outcome,
        })
    }

    /// Queue a value for [`Machine::run`] to feed into the next IN
    pub fn push_input(&mut self, value: RegisterWord) {
        self.io.push_input(value);
    }

    pub fn read_register(&self, index: usize) -> Result<RegisterWord> {
        self.state.bank.get(index)
    }

    pub fn write_register(&mut self, index: usize, value: RegisterWord) -> Result<()> {
        self.state.bank.set(index, value)
    }

    pub fn read_flag(&self, flag: Flag) -> bool {
        self.state.bank.get_flag(flag)
    }

    /// Read a flag by name (`zero`, `Z`, ...)
    pub fn read_flag_named(&self, name: &str) -> Option<bool> {
        Flag::from_name(name).map(|flag| self.read_flag(flag))
    }

    pub fn read_memory(&self, addr: u32) -> Result<u32> {
        self.state.memory.read(addr)
    }

    pub fn write_memory(&mut self, addr: u32, value: u32) -> Result<()> {
        self.state.memory.write(addr, value)
    }

    pub fn get_cp(&self) -> u32 {
        self.state.cp
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn outputs(&self) -> &[RegisterWord] {
        self.io.outputs()
    }

    pub fn take_outputs(&mut self) -> Vec<RegisterWord> {
        self.io.take_outputs()
    }

    /// Inspectable copy of the whole machine
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot::capture(&self.state, &self.config, self.io.outputs())
    }

    /// Get current state (for debugging)
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Fetch and decode the instruction at `cp`
    fn fetch_and_decode(&mut self) -> Result<(Instruction, u32)> {
        self.state.memory.move_program_counter(self.state.cp)?;
        let word = self.state.memory.read(self.state.cp)?;
        let inst = toycpu_disassembler::decode(word)?;
        Ok((inst, word))
    }

    fn trace_instruction(&self, cp: u32, word: u32, inst: &Instruction) {
        if self.config.trace {
            debug!(cp, word = format_args!("{:08X}", word), "{}", inst);
        } else {
            trace!(cp, word = format_args!("{:08X}", word), "{}", inst);
        }
    }
}
