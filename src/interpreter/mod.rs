pub mod evaluator;

use std::io::{Stderr, Stdout, Write};

use self::evaluator::{Evaluator, Value};
use crate::error::SlangError;
use crate::lexer::Lexer;
use crate::parser::Parser;

/// One interactive session. The environment lives as long as the session,
/// while every line gets a fresh lexer/parser pair, so a failed parse
/// cannot corrupt later input.
pub struct Session<W: Write, E: Write> {
    evaluator: Evaluator<W, E>,
}

impl Session<Stdout, Stderr> {
    pub fn new() -> Self {
        Self {
            evaluator: Evaluator::new(),
        }
    }
}

impl Default for Session<Stdout, Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write, E: Write> Session<W, E> {
    pub fn with_output(out: W, err: E) -> Self {
        Self {
            evaluator: Evaluator::with_output(out, err),
        }
    }

    /// Lex, parse, and evaluate one line of input against the session
    /// environment.
    pub fn run_line(&mut self, source: &str) -> Result<(), SlangError> {
        let tokens = Lexer::new(source).tokenize();
        let program = Parser::new(tokens).parse_program()?;
        self.evaluator.run(&program)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.evaluator.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_persists_across_lines() {
        let mut session = Session::with_output(Vec::new(), Vec::new());
        session.run_line("var x = 3").expect("declaration");
        session.run_line("x = 4").expect("assignment");
        assert_eq!(session.get("x"), Some(&Value::Number(4.0)));
    }

    #[test]
    fn test_parse_error_is_returned_not_panicked() {
        let mut session = Session::with_output(Vec::new(), Vec::new());
        assert!(matches!(
            session.run_line("var x = 1.2.3"),
            Err(SlangError::Parse(_))
        ));
    }

    #[test]
    fn test_session_survives_a_failed_line() {
        let mut session = Session::with_output(Vec::new(), Vec::new());
        assert!(session.run_line("var n in N = 0.5").is_err());
        session.run_line("var n = 1").expect("session still usable");
        assert_eq!(session.get("n"), Some(&Value::Number(1.0)));
    }
}
