pub mod token;

use self::token::{Token, TokenKind};

/// Turns raw source text into a terminated token sequence.
///
/// Scanning is a single left-to-right pass with no backtracking and never
/// fails: malformed numeric text like `1.2.3` is passed through for the
/// parser to reject, and an unterminated string is closed by end of input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    ch: Option<char>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            chars: input.chars().peekable(),
            ch: None,
        };
        lexer.read_char();
        lexer
    }

    /// Consumes the whole input; the last token is always `Eof`.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    fn read_char(&mut self) {
        self.ch = self.chars.next();
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.ch {
            None => Token::eof(),
            Some('"') => Token::new(TokenKind::Str, self.read_string()),
            Some(ch) if ch.is_alphabetic() => {
                let literal = self.read_identifier();
                Token::new(Token::lookup_ident(&literal), literal)
            }
            Some(ch) if ch.is_ascii_digit() => Token::new(TokenKind::Number, self.read_number()),
            Some(ch) => {
                self.read_char();
                Token::new(TokenKind::Symbol, ch.to_string())
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut identifier = String::new();
        while let Some(ch) = self.ch {
            if ch.is_alphanumeric() {
                identifier.push(ch);
                self.read_char();
            } else {
                break;
            }
        }
        identifier
    }

    /// Digits and any `.` characters, verbatim. Numeric conversion is
    /// deferred to the parser.
    fn read_number(&mut self) -> String {
        let mut number = String::new();
        while let Some(ch) = self.ch {
            if ch.is_ascii_digit() || ch == '.' {
                number.push(ch);
                self.read_char();
            } else {
                break;
            }
        }
        number
    }

    /// Everything up to the next `"`, with no escape processing.
    fn read_string(&mut self) -> String {
        let mut s = String::new();
        self.read_char(); // opening quote
        while let Some(ch) = self.ch {
            if ch == '"' {
                break;
            }
            s.push(ch);
            self.read_char();
        }
        self.read_char(); // closing quote, if any
        s
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.ch {
            if ch.is_whitespace() {
                self.read_char();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_tokens(input: &str, expected: Vec<Token>) {
        let tokens = Lexer::new(input).tokenize();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_print_call_tokens() {
        // `print` is not reserved, so it scans as a plain identifier.
        assert_tokens(
            "print(\"hi\")",
            vec![
                Token::new(TokenKind::Ident, "print"),
                Token::new(TokenKind::Symbol, "("),
                Token::new(TokenKind::Str, "hi"),
                Token::new(TokenKind::Symbol, ")"),
                Token::eof(),
            ],
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = Lexer::new("var if else while do foo").tokenize();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword,
                TokenKind::Keyword,
                TokenKind::Keyword,
                TokenKind::Keyword,
                TokenKind::Keyword,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_declaration_tokens() {
        assert_tokens(
            "var x = 3.5",
            vec![
                Token::new(TokenKind::Keyword, "var"),
                Token::new(TokenKind::Ident, "x"),
                Token::new(TokenKind::Symbol, "="),
                Token::new(TokenKind::Number, "3.5"),
                Token::eof(),
            ],
        );
    }

    #[test]
    fn test_malformed_number_passes_through() {
        assert_tokens(
            "1.2.3",
            vec![Token::new(TokenKind::Number, "1.2.3"), Token::eof()],
        );
    }

    #[test]
    fn test_unterminated_string_closes_at_eof() {
        assert_tokens("\"abc", vec![Token::new(TokenKind::Str, "abc"), Token::eof()]);
    }

    #[test]
    fn test_empty_input_is_just_eof() {
        assert_tokens("   \t\n", vec![Token::eof()]);
    }
}
