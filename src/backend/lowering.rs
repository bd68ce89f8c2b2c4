use std::fmt::{self, Display, Formatter};

/// Reduced statement model consumed by the code-emission backend. It is
/// deliberately narrower than the evaluator's AST: integer constants
/// only, with everything else carried as an annotated no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendStmt {
    Assign { value: i64 },
    Print { value: i64 },
    Unsupported { kind: &'static str },
}

/// One lowered operation. The list is append-only and doubles as the
/// diagnostic trace, independent of which executor runs it.
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    LoadConst(i64),
    StoreSlot(u32),
    CallPrint,
    Nop(&'static str),
}

impl Display for Instr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Instr::LoadConst(value) => write!(f, "load_const {}", value),
            Instr::StoreSlot(slot) => write!(f, "store_slot {}", slot),
            Instr::CallPrint => write!(f, "call print"),
            Instr::Nop(kind) => write!(f, "nop ; unhandled {}", kind),
        }
    }
}

/// Lowers backend statements to a flat instruction list, handing out one
/// storage slot per assignment.
pub struct Lowerer {
    instructions: Vec<Instr>,
    next_slot: u32,
}

impl Lowerer {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
            next_slot: 0,
        }
    }

    pub fn lower(&mut self, statements: &[BackendStmt]) {
        for statement in statements {
            self.lower_statement(statement);
        }
    }

    fn lower_statement(&mut self, statement: &BackendStmt) {
        match statement {
            BackendStmt::Assign { value } => {
                self.instructions.push(Instr::LoadConst(*value));
                self.instructions.push(Instr::StoreSlot(self.next_slot));
                self.next_slot += 1;
            }
            BackendStmt::Print { value } => {
                self.instructions.push(Instr::LoadConst(*value));
                self.instructions.push(Instr::CallPrint);
            }
            BackendStmt::Unsupported { kind } => {
                self.instructions.push(Instr::Nop(kind));
            }
        }
    }

    pub fn instructions(&self) -> &[Instr] {
        &self.instructions
    }

    /// Readable rendering of the instruction list, one per line.
    pub fn render(&self) -> String {
        self.instructions
            .iter()
            .map(|instr| instr.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Lowerer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignments_take_sequential_slots() {
        let mut lowerer = Lowerer::new();
        lowerer.lower(&[
            BackendStmt::Assign { value: 3 },
            BackendStmt::Assign { value: 4 },
        ]);
        assert_eq!(
            lowerer.instructions(),
            &[
                Instr::LoadConst(3),
                Instr::StoreSlot(0),
                Instr::LoadConst(4),
                Instr::StoreSlot(1),
            ]
        );
    }

    #[test]
    fn test_print_lowers_to_load_and_call() {
        let mut lowerer = Lowerer::new();
        lowerer.lower(&[BackendStmt::Print { value: 7 }]);
        assert_eq!(
            lowerer.instructions(),
            &[Instr::LoadConst(7), Instr::CallPrint]
        );
    }

    #[test]
    fn test_unsupported_lowers_to_annotated_nop() {
        let mut lowerer = Lowerer::new();
        lowerer.lower(&[BackendStmt::Unsupported { kind: "call" }]);
        assert_eq!(lowerer.instructions(), &[Instr::Nop("call")]);
    }

    #[test]
    fn test_render_is_one_line_per_instruction() {
        let mut lowerer = Lowerer::new();
        lowerer.lower(&[
            BackendStmt::Assign { value: 3 },
            BackendStmt::Print { value: 7 },
            BackendStmt::Unsupported { kind: "declaration" },
        ]);
        assert_eq!(
            lowerer.render(),
            "load_const 3\nstore_slot 0\nload_const 7\ncall print\nnop ; unhandled declaration"
        );
    }
}
