pub mod jit;
pub mod lowering;
pub mod vm;

use self::lowering::{BackendStmt, Instr};
use crate::ast::{Expression, Program, Statement};
use crate::error::BackendError;

/// Executes a finished instruction list. Lowering stays independent of
/// execution, so the trace can be inspected without running anything.
pub trait Executor {
    fn execute(&mut self, instructions: &[Instr]) -> Result<(), BackendError>;
}

/// Maps full statements into the backend's reduced model. Integral
/// constants survive; every other shape becomes an annotated no-op.
pub fn reduce(program: &Program) -> Vec<BackendStmt> {
    program.statements.iter().map(reduce_statement).collect()
}

fn reduce_statement(statement: &Statement) -> BackendStmt {
    let kind = statement.kind_name();
    match statement {
        Statement::Declaration(decl) => as_int(&decl.value)
            .map(|value| BackendStmt::Assign { value })
            .unwrap_or(BackendStmt::Unsupported { kind }),
        Statement::Assignment(assign) => as_int(&assign.value)
            .map(|value| BackendStmt::Assign { value })
            .unwrap_or(BackendStmt::Unsupported { kind }),
        Statement::Print(print) => as_int(&print.expr)
            .map(|value| BackendStmt::Print { value })
            .unwrap_or(BackendStmt::Unsupported { kind }),
        Statement::Expression(Expression::Call(call))
            if call.name == "print" && call.args.len() == 1 =>
        {
            as_int(&call.args[0])
                .map(|value| BackendStmt::Print { value })
                .unwrap_or(BackendStmt::Unsupported { kind })
        }
        Statement::Expression(_) => BackendStmt::Unsupported { kind },
    }
}

fn as_int(expr: &Expression) -> Option<i64> {
    match expr {
        Expression::Number(n)
            if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 =>
        {
            Some(*n as i64)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::line::LineParser;
    use crate::parser::Parser;

    #[test]
    fn test_reduce_keeps_integral_constants() {
        let tokens = Lexer::new("var x = 3 print(7)").tokenize();
        let program = Parser::new(tokens).parse_program().expect("parse");
        assert_eq!(
            reduce(&program),
            vec![
                BackendStmt::Assign { value: 3 },
                BackendStmt::Print { value: 7 },
            ]
        );
    }

    #[test]
    fn test_reduce_annotates_everything_else() {
        let mut parser = LineParser::new();
        let program = parser.parse("var s = \"hi\"\nprint(s)\nvar f = 1.5");
        assert_eq!(
            reduce(&program),
            vec![
                BackendStmt::Unsupported {
                    kind: "declaration"
                },
                BackendStmt::Unsupported { kind: "print" },
                BackendStmt::Unsupported {
                    kind: "declaration"
                },
            ]
        );
    }

    #[test]
    fn test_reduce_rejects_multi_argument_print_call() {
        let tokens = Lexer::new("print(1, 2)").tokenize();
        let program = Parser::new(tokens).parse_program().expect("parse");
        assert_eq!(reduce(&program), vec![BackendStmt::Unsupported { kind: "call" }]);
    }
}
