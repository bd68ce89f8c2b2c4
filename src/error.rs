use crate::lexer::token::TokenKind;

/// Top-level error type covering every stage of the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum SlangError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Syntax errors from either front end. Token-parser variants carry the
/// offending token text, line-parser variants the 1-based line number.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unexpected instruction at '{found}'")]
    UnexpectedInstruction { found: String },
    #[error("invalid expression at '{found}'")]
    InvalidExpression { found: String },
    #[error("expected token '{expected}', found '{found}'")]
    ExpectedSymbol { expected: char, found: String },
    #[error("expected {expected:?}, found {found:?}")]
    ExpectedToken { expected: TokenKind, found: TokenKind },
    #[error("could not parse '{literal}' as a number")]
    InvalidNumber { literal: String },
    #[error("unexpected end of file in call arguments")]
    UnterminatedCall,
    #[error("line {line}: malformed declaration '{text}'")]
    MalformedDeclaration { line: usize, text: String },
    #[error("line {line}: unrecognized statement '{text}'")]
    UnrecognizedStatement { line: usize, text: String },
}

/// Fatal evaluation errors. Recoverable conditions (undefined references,
/// assignment to an unknown name) never reach this type; they go to the
/// evaluator's error channel and evaluation continues.
#[derive(thiserror::Error, Debug)]
pub enum EvalError {
    #[error("value '{value}' is not valid for domain {domain}")]
    DomainViolation {
        name: String,
        value: String,
        domain: String,
    },
    #[error("unknown statement kind: {kind}")]
    UnsupportedStatement { kind: &'static str },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("native compilation failed: {0}")]
    Compile(String),
    #[error("value stack underflow at instruction {index}")]
    StackUnderflow { index: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
