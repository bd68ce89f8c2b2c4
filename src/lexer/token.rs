use std::collections::HashSet;

use lazy_static::lazy_static;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Keyword,
    Ident,
    Number,
    Str,
    Symbol,
    Eof,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

lazy_static! {
    /// Reserved words. `if`/`else`/`while`/`do` are recognized here but no
    /// grammar rule consumes them yet; `print` is an ordinary identifier,
    /// so calls to it parse like any other call.
    static ref KEYWORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("var");
        set.insert("if");
        set.insert("else");
        set.insert("while");
        set.insert("do");
        set
    };
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "")
    }

    pub fn lookup_ident(ident: &str) -> TokenKind {
        if KEYWORDS.contains(ident) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.literal == word
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        self.kind == TokenKind::Symbol && self.literal.chars().eq(Some(symbol))
    }
}
