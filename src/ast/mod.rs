use std::fmt::{self, Display, Formatter};

/// Root of one parsed compile unit. Statements are owned exclusively by
/// the program and are not mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declaration(Declaration),
    Assignment(Assignment),
    Print(Print),
    /// A bare expression at statement position, as produced by the token
    /// front end for input like `foo(1)` or a lone identifier.
    Expression(Expression),
}

/// `var NAME = value` or `var NAME in DOMAIN = value`. The domain tag is
/// kept as the text the parser saw; it is interpreted at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub domain: Option<String>,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub expr: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    Text(String),
    Identifier(String),
    Call(Call),
    /// Assignment in expression position, e.g. the right-hand side of
    /// `x = y = 5`.
    Assign(Box<Assignment>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expression>,
}

impl Statement {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Declaration(_) => "declaration",
            Statement::Assignment(_) => "assignment",
            Statement::Print(_) => "print",
            Statement::Expression(expr) => expr.kind_name(),
        }
    }
}

impl Expression {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Number(_) => "number literal",
            Expression::Text(_) => "string literal",
            Expression::Identifier(_) => "identifier",
            Expression::Call(_) => "call",
            Expression::Assign(_) => "assignment expression",
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Declaration(s) => write!(f, "{}", s),
            Statement::Assignment(s) => write!(f, "{}", s),
            Statement::Print(s) => write!(f, "{}", s),
            Statement::Expression(e) => write!(f, "{}", e),
        }
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.domain {
            Some(domain) => write!(f, "var {} in {} = {}", self.name, domain, self.value),
            None => write!(f, "var {} = {}", self.name, self.value),
        }
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

impl Display for Print {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "print({})", self.expr)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Text(s) => write!(f, "\"{}\"", s),
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::Call(call) => write!(f, "{}", call),
            Expression::Assign(assign) => write!(f, "{}", assign),
        }
    }
}

impl Display for Call {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.args.iter().map(|a| a.to_string()).collect();
        write!(f, "{}({})", self.name, args.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_source_shapes() {
        let program = Program {
            statements: vec![
                Statement::Declaration(Declaration {
                    name: "n".to_string(),
                    domain: Some("N".to_string()),
                    value: Expression::Number(5.0),
                }),
                Statement::Assignment(Assignment {
                    name: "n".to_string(),
                    value: Expression::Number(6.0),
                }),
                Statement::Print(Print {
                    expr: Expression::Identifier("n".to_string()),
                }),
            ],
        };
        assert_eq!(program.to_string(), "var n in N = 5\nn = 6\nprint(n)");
    }

    #[test]
    fn test_call_display_joins_arguments() {
        let call = Call {
            name: "foo".to_string(),
            args: vec![
                Expression::Number(1.0),
                Expression::Text("two".to_string()),
            ],
        };
        assert_eq!(call.to_string(), "foo(1, \"two\")");
    }

    #[test]
    fn test_kind_names() {
        let stmt = Statement::Expression(Expression::Identifier("x".to_string()));
        assert_eq!(stmt.kind_name(), "identifier");
        assert_eq!(
            Statement::Print(Print {
                expr: Expression::Number(1.0)
            })
            .kind_name(),
            "print"
        );
    }
}
