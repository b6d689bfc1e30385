//! Memory subsystem
//!
//! Sparse word-addressed memory of `memory_size` words. The top
//! `stack_size` words form the stack region, reachable only through
//! [`Memory::push`] and [`Memory::pop`].
//!
//! Outside the stack a stored zero frees its slot, which `read` cannot
//! tell apart from a slot that was never written. Stack slots are tracked
//! by presence instead, so a pushed zero still occupies its slot.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, RuntimeError};
use toycpu_spec::MachineConfig;

#[derive(Debug, Clone)]
pub struct Memory {
    data: HashMap<u32, u32>,
    size: u32,
    stack_base: u32,
    /// Last address handed to `move_program_counter`
    current: u32,
}

impl Memory {
    /// Create an empty memory. The configuration is assumed valid.
    pub fn new(config: &MachineConfig) -> Self {
        Memory {
            data: HashMap::new(),
            size: config.memory_size,
            stack_base: config.stack_base(),
            current: 0,
        }
    }

    /// Number of addressable words
    pub fn size(&self) -> u32 {
        self.size
    }

    /// First address of the stack region
    pub fn stack_base(&self) -> u32 {
        self.stack_base
    }

    /// Number of stack slots
    pub fn stack_capacity(&self) -> u32 {
        self.size - self.stack_base
    }

    pub fn is_stack_address(&self, addr: u32) -> bool {
        addr >= self.stack_base && addr < self.size
    }

    /// Fail with `AddressOutOfRange` unless `addr < size`
    pub fn check_address(&self, addr: u32) -> Result<()> {
        if addr >= self.size {
            return Err(RuntimeError::AddressOutOfRange {
                address: addr,
                size: self.size,
            });
        }
        Ok(())
    }

    pub fn read(&self, addr: u32) -> Result<u32> {
        self.check_address(addr)?;
        Ok(self.data.get(&addr).copied().unwrap_or(0))
    }

    /// Write outside the stack region
    pub fn write(&mut self, addr: u32, value: u32) -> Result<()> {
        self.check_address(addr)?;
        if self.is_stack_address(addr) {
            return Err(RuntimeError::StackRegionViolation { address: addr });
        }
        if value == 0 {
            self.data.remove(&addr);
        } else {
            self.data.insert(addr, value);
        }
        Ok(())
    }

    /// Store into the lowest free stack slot and return its address
    pub fn push(&mut self, value: u32) -> Result<u32> {
        let slot = (self.stack_base..self.size)
            .find(|addr| !self.data.contains_key(addr))
            .ok_or(RuntimeError::StackFull {
                capacity: self.stack_capacity(),
            })?;
        self.data.insert(slot, value);
        Ok(slot)
    }

    /// Address and value of the highest occupied stack slot
    pub fn peek(&self) -> Result<(u32, u32)> {
        (self.stack_base..self.size)
            .rev()
            .find_map(|addr| self.data.get(&addr).map(|&value| (addr, value)))
            .ok_or(RuntimeError::StackEmpty)
    }

    /// Remove and return the highest occupied stack slot
    pub fn pop(&mut self) -> Result<u32> {
        let (addr, value) = self.peek()?;
        self.data.remove(&addr);
        Ok(value)
    }

    /// Number of occupied stack slots
    pub fn stack_depth(&self) -> usize {
        self.data.keys().filter(|&&addr| self.is_stack_address(addr)).count()
    }

    /// Record the address the engine is about to execute
    pub fn move_program_counter(&mut self, addr: u32) -> Result<()> {
        self.check_address(addr)?;
        self.current = addr;
        Ok(())
    }

    pub fn current_address(&self) -> u32 {
        self.current
    }

    /// Every stored slot in address order
    pub fn entries(&self) -> BTreeMap<u32, u32> {
        self.data.iter().map(|(&addr, &value)| (addr, value)).collect()
    }

    /// Rebuild from stored slots. Stack slots keep their presence.
    pub(crate) fn restore(&mut self, entries: &BTreeMap<u32, u32>) -> Result<()> {
        for &addr in entries.keys() {
            self.check_address(addr)?;
        }
        let data = entries
            .iter()
            .filter(|&(&addr, &value)| value != 0 || self.is_stack_address(addr))
            .map(|(&addr, &value)| (addr, value))
            .collect();
        self.data = data;
        Ok(())
    }
}
