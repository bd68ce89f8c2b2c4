use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Stderr, Stdout, Write};

use crate::ast::{Assignment, Call, Declaration, Expression, Program, Statement};
use crate::error::EvalError;

/// Runtime value stored in the environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Numeric domain tag attached to a declaration. Checked once at
/// declaration time; later assignments are never re-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Natural,
    Integer,
    Rational,
    Real,
    Complex,
}

impl Domain {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "N" => Some(Domain::Natural),
            "Z" => Some(Domain::Integer),
            "Q" => Some(Domain::Rational),
            "R" => Some(Domain::Real),
            "C" => Some(Domain::Complex),
            _ => None,
        }
    }

    pub fn accepts(self, value: &Value) -> bool {
        match value {
            Value::Text(_) => false,
            Value::Number(n) => match self {
                Domain::Natural => *n >= 0.0 && n.fract() == 0.0,
                Domain::Integer => n.fract() == 0.0,
                // Approximate treatment: any numeric value passes. There
                // is no literal syntax for complex numbers, so C behaves
                // like R.
                Domain::Rational | Domain::Real | Domain::Complex => true,
            },
        }
    }
}

/// Walks a program, owning the variable environment and a pair of output
/// sinks: result and trace lines go to `out`, diagnostics to `err`.
///
/// Recoverable conditions (undefined references, assignment to an unknown
/// name) are reported and evaluation continues; a domain violation is
/// fatal and aborts the remaining statements of the compile unit.
pub struct Evaluator<W: Write, E: Write> {
    env: HashMap<String, Value>,
    out: W,
    err: E,
}

impl Evaluator<Stdout, Stderr> {
    pub fn new() -> Self {
        Self::with_output(io::stdout(), io::stderr())
    }
}

impl Default for Evaluator<Stdout, Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write, E: Write> Evaluator<W, E> {
    pub fn with_output(out: W, err: E) -> Self {
        Self {
            env: HashMap::new(),
            out,
            err,
        }
    }

    /// Current value of a variable, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.env.get(name)
    }

    /// Consumes the evaluator, handing back the output sinks.
    pub fn into_output(self) -> (W, E) {
        (self.out, self.err)
    }

    pub fn run(&mut self, program: &Program) -> Result<(), EvalError> {
        for statement in &program.statements {
            self.execute(statement)?;
        }
        Ok(())
    }

    fn execute(&mut self, statement: &Statement) -> Result<(), EvalError> {
        match statement {
            Statement::Declaration(decl) => self.execute_declaration(decl),
            Statement::Assignment(assign) => self.execute_assignment(assign),
            Statement::Print(print) => self.execute_print(&print.expr),
            Statement::Expression(Expression::Call(call)) => self.execute_call(call),
            Statement::Expression(expr) => Err(EvalError::UnsupportedStatement {
                kind: expr.kind_name(),
            }),
        }
    }

    fn execute_declaration(&mut self, decl: &Declaration) -> Result<(), EvalError> {
        let value = match self.eval_value(&decl.value)? {
            Some(value) => value,
            None => return Ok(()),
        };
        if let Some(tag) = &decl.domain {
            let valid = Domain::from_tag(tag).map_or(false, |domain| domain.accepts(&value));
            if !valid {
                return Err(EvalError::DomainViolation {
                    name: decl.name.clone(),
                    value: value.to_string(),
                    domain: tag.clone(),
                });
            }
        }
        writeln!(
            self.out,
            "[DEBUG] declared variable '{}' = {} (domain {})",
            decl.name,
            value,
            decl.domain.as_deref().unwrap_or("any")
        )?;
        self.env.insert(decl.name.clone(), value);
        Ok(())
    }

    fn execute_assignment(&mut self, assign: &Assignment) -> Result<(), EvalError> {
        if !self.env.contains_key(&assign.name) {
            writeln!(self.err, "[ERROR] '{}' is not defined", assign.name)?;
            return Ok(());
        }
        let value = match self.eval_value(&assign.value)? {
            Some(value) => value,
            None => return Ok(()),
        };
        writeln!(
            self.out,
            "[DEBUG] variable '{}' assigned {}",
            assign.name, value
        )?;
        self.env.insert(assign.name.clone(), value);
        Ok(())
    }

    fn execute_print(&mut self, expr: &Expression) -> Result<(), EvalError> {
        if let Some(value) = self.eval_value(expr)? {
            writeln!(self.out, "{}", value)?;
        }
        Ok(())
    }

    /// `print` is the only built-in; any other callee is traced with its
    /// evaluated arguments.
    fn execute_call(&mut self, call: &Call) -> Result<(), EvalError> {
        if call.name == "print" {
            for arg in &call.args {
                self.execute_print(arg)?;
            }
            return Ok(());
        }
        let mut rendered = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            match self.eval_value(arg)? {
                Some(value) => rendered.push(value.to_string()),
                None => return Ok(()),
            }
        }
        writeln!(self.out, "[CALL] {}({})", call.name, rendered.join(", "))?;
        Ok(())
    }

    /// Evaluates an expression in value position. `Ok(None)` means a
    /// diagnostic was already written and the statement should be
    /// skipped; only literals and identifier lookups produce values.
    fn eval_value(&mut self, expr: &Expression) -> Result<Option<Value>, EvalError> {
        match expr {
            Expression::Number(n) => Ok(Some(Value::Number(*n))),
            Expression::Text(s) => Ok(Some(Value::Text(s.clone()))),
            Expression::Identifier(name) => match self.env.get(name) {
                Some(value) => Ok(Some(value.clone())),
                None => {
                    writeln!(self.err, "[ERROR] '{}' is not defined", name)?;
                    Ok(None)
                }
            },
            Expression::Call(_) | Expression::Assign(_) => {
                writeln!(
                    self.err,
                    "[ERROR] unsupported expression in value position: {}",
                    expr
                )?;
                Ok(None)
            }
        }
    }
}
