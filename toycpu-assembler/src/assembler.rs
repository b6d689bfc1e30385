//! Main assembler logic
//!
//! Two passes: the first parses every line and assigns addresses to labels,
//! the second patches label operands.

use std::collections::BTreeMap;

use crate::encoder::encode;
use crate::error::{AssemblerError, Result};
use crate::parser::{parse_line, Item};
use toycpu_spec::encoding::{to_bit_string, ADDR23_MASK, ADDR25_MASK, ADDR27_MASK};
use toycpu_spec::Instruction;

/// Assembled program
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assembly {
    /// Address the first word is placed at
    pub base: u32,
    /// Encoded words
    pub words: Vec<u32>,
    /// Label addresses
    pub labels: BTreeMap<String, u32>,
}

impl Assembly {
    /// Memory image text: one 32-character bit string per line
    pub fn to_image_text(&self) -> String {
        let mut out = String::with_capacity(self.words.len() * 33);
        for &word in &self.words {
            out.push_str(&to_bit_string(word));
            out.push('\n');
        }
        out
    }
}

/// Assemble source code placed at address 0
pub fn assemble(source: &str) -> Result<Assembly> {
    assemble_at(source, 0)
}

/// Assemble source code whose first word is placed at `base`
pub fn assemble_at(source: &str, base: u32) -> Result<Assembly> {
    let mut items = Vec::new();
    let mut labels = BTreeMap::new();

    // Pass 1: parse and place
    for (idx, text) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = parse_line(text, line_no)?;

        if let Some(label) = line.label {
            let address = base.saturating_add(items.len() as u32);
            if labels.insert(label.clone(), address).is_some() {
                return Err(AssemblerError::DuplicateLabel {
                    label,
                    line: line_no,
                });
            }
        }

        if let Some(item) = line.item {
            items.push((line_no, item));
        }
    }

    // Pass 2: resolve and encode
    let mut words = Vec::with_capacity(items.len());
    for (line_no, item) in items {
        let word = match item {
            Item::Word(word) => word,
            Item::Instruction { inst, target: None } => encode(&inst),
            Item::Instruction {
                inst,
                target: Some(label),
            } => {
                let address = *labels.get(&label).ok_or_else(|| {
                    AssemblerError::UndefinedLabel {
                        label: label.clone(),
                        line: line_no,
                    }
                })?;
                encode(&with_target(inst, &label, address)?)
            }
        };
        words.push(word);
    }

    Ok(Assembly {
        base,
        words,
        labels,
    })
}

/// Replace the address operand of a control-flow or memory instruction
fn with_target(inst: Instruction, label: &str, address: u32) -> Result<Instruction> {
    let mask = match inst {
        Instruction::Load { .. } | Instruction::Store { .. } | Instruction::Storer { .. } => {
            ADDR25_MASK
        }
        Instruction::Bne { .. } | Instruction::Blt { .. } | Instruction::Jle { .. } => ADDR23_MASK,
        _ => ADDR27_MASK,
    };
    if address > mask {
        return Err(AssemblerError::LabelOutOfRange {
            label: label.to_string(),
            address,
            bits: mask.count_ones(),
        });
    }

    let patched = match inst {
        Instruction::Load { reg, .. } => Instruction::Load { reg, addr: address },
        Instruction::Store { reg, .. } => Instruction::Store { reg, addr: address },
        Instruction::Storer { src, .. } => Instruction::Storer { src, addr: address },
        Instruction::Jump { .. } => Instruction::Jump { addr: address },
        Instruction::Beq { .. } => Instruction::Beq { addr: address },
        Instruction::Call { .. } => Instruction::Call { addr: address },
        Instruction::Bne { r1, r2, .. } => Instruction::Bne { r1, r2, addr: address },
        Instruction::Blt { r1, r2, .. } => Instruction::Blt { r1, r2, addr: address },
        Instruction::Jle { r1, r2, .. } => Instruction::Jle { r1, r2, addr: address },
        other => other,
    };
    Ok(patched)
}
