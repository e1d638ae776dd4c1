//! Compiled instruction sequences and the builder that produces them.

use std::fmt;

use snek_ir::Line;

use crate::{CompileError, Label, OpCode};

/// One instruction tagged with the source line it came from.
#[derive(Clone, Debug)]
pub struct Instr {
    pub line: Line,
    pub op: OpCode,
}

/// A finished unit of bytecode: a module body or one function body.
///
/// Every label created while building is attached to exactly one index.
/// A label may point one past the last instruction, meaning "stop".
#[derive(Clone, Debug, Default)]
pub struct CompiledCode {
    instrs: Vec<Instr>,
    labels: Vec<usize>,
}

impl CompiledCode {
    #[inline]
    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Instr> {
        self.instrs.get(index)
    }

    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    /// Instruction index `label` is attached to.
    #[inline]
    pub fn target(&self, label: Label) -> Option<usize> {
        self.labels.get(label.index()).copied()
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "    ".repeat(depth);
        for (index, instr) in self.instrs.iter().enumerate() {
            for (label, _) in self.labels.iter().enumerate().filter(|(_, t)| **t == index) {
                writeln!(f, "{pad}L{label}:")?;
            }
            writeln!(f, "{pad}{index:>4} {:>4}  {}", instr.line, instr.op)?;
            if let OpCode::LoadFunction { code, .. } = &instr.op {
                code.fmt_indented(f, depth + 1)?;
            }
        }
        for (label, _) in self
            .labels
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == self.instrs.len())
        {
            writeln!(f, "{pad}L{label}:")?;
        }
        Ok(())
    }
}

/// Disassembly listing: index, line, opcode. Function bodies are nested
/// under their `LoadFunction`.
impl fmt::Display for CompiledCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

struct LabelSlot {
    target: Option<usize>,
    line: Line,
}

/// Builder for an in-progress [`CompiledCode`].
///
/// Instructions are appended in order. Labels are created up front and
/// attached later, at which point they point at the next instruction to be
/// emitted.
#[derive(Default)]
pub struct CodeBuilder {
    instrs: Vec<Instr>,
    labels: Vec<LabelSlot>,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // Instruction emission

    pub fn emit(&mut self, line: Line, op: OpCode) {
        self.instrs.push(Instr { line, op });
    }

    // Labels

    /// Create an unattached label.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "label count never exceeds u32"
    )]
    pub fn fresh_label(&mut self, line: Line) -> Label {
        let label = Label::new(self.labels.len() as u32);
        self.labels.push(LabelSlot { target: None, line });
        label
    }

    /// Point `label` at the next instruction.
    pub fn attach(&mut self, label: Label, line: Line) -> Result<(), CompileError> {
        let next = self.instrs.len();
        match self.labels.get_mut(label.index()) {
            Some(slot) if slot.target.is_none() => {
                slot.target = Some(next);
                Ok(())
            }
            _ => Err(CompileError::DuplicateLabel { label, line }),
        }
    }

    // Finalization

    /// Consume the builder. Fails if any label was never attached.
    pub fn finish(self) -> Result<CompiledCode, CompileError> {
        let mut labels = Vec::with_capacity(self.labels.len());
        for (index, slot) in self.labels.into_iter().enumerate() {
            match slot.target {
                Some(target) => labels.push(target),
                None => {
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "label count never exceeds u32"
                    )]
                    let label = Label::new(index as u32);
                    return Err(CompileError::UnattachedLabel {
                        label,
                        line: slot.line,
                    });
                }
            }
        }

        Ok(CompiledCode {
            instrs: self.instrs,
            labels,
        })
    }
}
