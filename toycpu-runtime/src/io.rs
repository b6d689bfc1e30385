//! I/O handling
//!
//! OUT values collect in an output buffer. Queued inputs are consumed by
//! [`Machine::run`](crate::Machine::run) when an IN parks the machine.

use std::collections::VecDeque;

use toycpu_spec::RegisterWord;

#[derive(Debug, Clone, Default)]
pub struct IoHandler {
    inputs: VecDeque<RegisterWord>,
    outputs: Vec<RegisterWord>,
}

impl IoHandler {
    pub fn new(inputs: Vec<RegisterWord>) -> Self {
        IoHandler {
            inputs: inputs.into(),
            outputs: Vec::new(),
        }
    }

    pub fn read(&mut self) -> Option<RegisterWord> {
        self.inputs.pop_front()
    }

    pub fn push_input(&mut self, value: RegisterWord) {
        self.inputs.push_back(value);
    }

    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn write(&mut self, value: RegisterWord) {
        self.outputs.push(value);
    }

    pub fn outputs(&self) -> &[RegisterWord] {
        &self.outputs
    }

    pub fn take_outputs(&mut self) -> Vec<RegisterWord> {
        std::mem::take(&mut self.outputs)
    }
}
