//! Hand-written lexical scanner.
//!
//! A single forward pass over the source characters. `start` marks the
//! beginning of the lexeme under construction, `current` the next unread
//! character; lookahead never exceeds two characters (`peek`, `peek_next`).
//! Malformed input produces a [`ScanError`] and scanning continues — the
//! scanner never aborts.

use tracing::instrument;

use crate::error::ScanError;
use crate::token::{keyword, Literal, Token, TokenType};

pub struct Scanner {
    source: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scans the whole source, returning the token stream (always EOF-terminated)
    /// and any lexical errors encountered along the way.
    #[instrument(level = "trace", skip(source), fields(len = source.len()))]
    pub fn scan(source: &str) -> (Vec<Token>, Vec<ScanError>) {
        let mut scanner = Scanner::new(source);
        while !scanner.is_at_end() {
            scanner.start = scanner.current;
            scanner.scan_token();
        }
        scanner.tokens.push(Token::eof(scanner.line));
        (scanner.tokens, scanner.errors)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    /// Consumes the next character only if it equals `expected`.
    fn matches(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn lexeme_text(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn add_token(&mut self, kind: TokenType) {
        self.add_token_literal(kind, Literal::None);
    }

    fn add_token_literal(&mut self, kind: TokenType, literal: Literal) {
        let lexeme = self.lexeme_text();
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(ScanError {
            line: self.line,
            message: message.into(),
        });
    }

    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),
            '!' => {
                let kind = if self.matches('=') { TokenType::BangEqual } else { TokenType::Bang };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.matches('=') { TokenType::EqualEqual } else { TokenType::Equal };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.matches('=') { TokenType::LessEqual } else { TokenType::Less };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.matches('=') { TokenType::GreaterEqual } else { TokenType::Greater };
                self.add_token(kind);
            }
            '/' => {
                if self.matches('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if is_id_start(c) => self.identifier(),
            _ => self.error("Unexpected character."),
        }
    }

    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.error("Unterminated string.");
            return;
        }

        // Consume the closing quote.
        self.advance();

        let value: String = self.source[self.start + 1..self.current - 1].iter().collect();
        self.add_token_literal(TokenType::String, Literal::Str(value));
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = self.lexeme_text();
        let value: f64 = text.parse().expect("scanner only admits valid digit runs");
        self.add_token_literal(TokenType::Number, Literal::Number(value));
    }

    fn identifier(&mut self) {
        while is_id_continue(self.peek()) {
            self.advance();
        }

        let text = self.lexeme_text();
        let kind = keyword(&text).unwrap_or(TokenType::Identifier);
        self.add_token(kind);
    }
}

fn is_id_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_id_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenType> {
        let (tokens, errors) = Scanner::scan(src);
        assert!(errors.is_empty(), "unexpected scan errors: {:?}", errors);
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn single_and_double_char_tokens() {
        assert_eq!(
            kinds("!=<=>===!"),
            vec![
                TokenType::BangEqual,
                TokenType::LessEqual,
                TokenType::GreaterEqual,
                TokenType::EqualEqual,
                TokenType::Bang,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn line_comments_are_skipped() {
        let (tokens, _) = Scanner::scan("var x = 1; // trailing comment\nprint x;");
        assert_eq!(tokens.last().unwrap().kind, TokenType::Eof);
        assert_eq!(tokens.last().unwrap().line, 2);
    }

    #[test]
    fn string_literal_tracks_embedded_newlines() {
        let (tokens, errors) = Scanner::scan("\"a\nb\" 1;");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenType::String);
        assert_eq!(tokens[0].literal, Literal::Str("a\nb".to_string()));
        // the NUMBER token after the string should be on line 2
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn unterminated_string_reports_error() {
        let (_, errors) = Scanner::scan("\"abc");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Unterminated string.");
    }

    #[test]
    fn number_literal_with_fraction() {
        let (tokens, _) = Scanner::scan("3.14");
        assert_eq!(tokens[0].literal, Literal::Number(3.14));
    }

    #[test]
    fn trailing_dot_is_not_part_of_number() {
        let (tokens, _) = Scanner::scan("123.");
        assert_eq!(tokens[0].kind, TokenType::Number);
        assert_eq!(tokens[0].literal, Literal::Number(123.0));
        assert_eq!(tokens[1].kind, TokenType::Dot);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("and class fancyName"),
            vec![
                TokenType::And,
                TokenType::Class,
                TokenType::Identifier,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn every_token_ends_with_single_eof() {
        let (tokens, _) = Scanner::scan("1 + 2;\nprint 3;\n");
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenType::Eof).count(), 1);
        assert_eq!(tokens.last().unwrap().kind, TokenType::Eof);
    }

    #[test]
    fn unexpected_character_reports_and_continues() {
        let (tokens, errors) = Scanner::scan("1 @ 2;");
        assert_eq!(errors.len(), 1);
        // scanning continues past the bad character
        assert_eq!(tokens[0].kind, TokenType::Number);
        assert_eq!(tokens[1].kind, TokenType::Number);
    }
}
