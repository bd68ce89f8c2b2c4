use crate::ast::{Assignment, Declaration, Expression, Print, Program, Statement};
use crate::error::ParseError;

/// Line-oriented front end for the batch path: one line, one statement,
/// no multi-line expressions.
///
/// Unlike the token parser this front end degrades per line: a malformed
/// line is recorded with its 1-based line number and skipped, and parsing
/// continues with the next one. It produces the same AST as the token
/// parser but accepts only one literal or identifier in value position.
pub struct LineParser {
    errors: Vec<ParseError>,
}

impl LineParser {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn parse(&mut self, source: &str) -> Program {
        let mut statements = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(statement) = self.parse_line(index + 1, line) {
                statements.push(statement);
            }
        }
        Program { statements }
    }

    fn parse_line(&mut self, line_no: usize, line: &str) -> Option<Statement> {
        if let Some(inner) = line
            .strip_prefix("print(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            // Only a quoted literal or a bare reference fits on a print
            // line; the parenthesized content is not tokenized further.
            let expr = match strip_quotes(inner) {
                Some(text) => Expression::Text(text.to_string()),
                None => Expression::Identifier(inner.to_string()),
            };
            return Some(Statement::Print(Print { expr }));
        }

        if let Some(rest) = line.strip_prefix("var ") {
            return self.parse_declaration(line_no, line, rest);
        }

        if line.contains('=') {
            let parts: Vec<&str> = line.split('=').collect();
            if parts.len() == 2 {
                return Some(Statement::Assignment(Assignment {
                    name: parts[0].trim().to_string(),
                    value: classify_value(parts[1].trim()),
                }));
            }
        }

        self.errors.push(ParseError::UnrecognizedStatement {
            line: line_no,
            text: line.to_string(),
        });
        None
    }

    /// `var NAME = VALUE` or `var NAME in DOMAIN = VALUE`.
    fn parse_declaration(&mut self, line_no: usize, line: &str, rest: &str) -> Option<Statement> {
        let parts: Vec<&str> = rest.split('=').collect();
        if parts.len() != 2 {
            self.errors.push(ParseError::MalformedDeclaration {
                line: line_no,
                text: line.to_string(),
            });
            return None;
        }
        let head = parts[0].trim();
        let value = classify_value(parts[1].trim());

        let (name, domain) = match head.split_once(" in ") {
            Some((name, domain)) => (name.trim(), Some(domain.trim().to_string())),
            None => (head, None),
        };
        if name.is_empty() || name.contains(char::is_whitespace) {
            self.errors.push(ParseError::MalformedDeclaration {
                line: line_no,
                text: line.to_string(),
            });
            return None;
        }
        Some(Statement::Declaration(Declaration {
            name: name.to_string(),
            domain,
            value,
        }))
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_quotes(text: &str) -> Option<&str> {
    text.strip_prefix('"')?.strip_suffix('"')
}

/// Numeric parse first, then quoted text, else a bare reference.
fn classify_value(value: &str) -> Expression {
    if let Ok(number) = value.parse::<f64>() {
        return Expression::Number(number);
    }
    match strip_quotes(value) {
        Some(text) => Expression::Text(text.to_string()),
        None => Expression::Identifier(value.to_string()),
    }
}
