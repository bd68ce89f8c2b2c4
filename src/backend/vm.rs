use std::collections::HashMap;
use std::io::{self, Stdout, Write};

use super::lowering::Instr;
use super::Executor;
use crate::error::BackendError;

/// In-process stack machine over the lowered instruction list; the
/// fallback executor when native compilation is unavailable.
pub struct Vm<W: Write> {
    stack: Vec<i64>,
    slots: HashMap<u32, i64>,
    out: W,
}

impl Vm<Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Vm<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Vm<W> {
    pub fn with_output(out: W) -> Self {
        Self {
            stack: Vec::new(),
            slots: HashMap::new(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn slot(&self, slot: u32) -> Option<i64> {
        self.slots.get(&slot).copied()
    }

    fn pop(&mut self, index: usize) -> Result<i64, BackendError> {
        self.stack
            .pop()
            .ok_or(BackendError::StackUnderflow { index })
    }
}

impl<W: Write> Executor for Vm<W> {
    fn execute(&mut self, instructions: &[Instr]) -> Result<(), BackendError> {
        for (index, instr) in instructions.iter().enumerate() {
            match instr {
                Instr::LoadConst(value) => self.stack.push(*value),
                Instr::StoreSlot(slot) => {
                    let value = self.pop(index)?;
                    self.slots.insert(*slot, value);
                }
                Instr::CallPrint => {
                    let value = self.pop(index)?;
                    writeln!(self.out, "{}", value)?;
                }
                Instr::Nop(_) => {}
            }
        }
        Ok(())
    }
}
