//! Tokenizer for the intent DSL.
//!
//! [`tokenize`] converts raw source text into a finite token sequence ending
//! in [`TokenKind::Eof`].  Whitespace, `//` line comments, and `/* ... */`
//! block comments are skipped and never emitted.  The lexer holds no state
//! across calls; it is a pure function of the source text.
//!
//! A leading `/` is disambiguated by its successor: `//` starts a line
//! comment, `/*` a block comment, anything else a regex literal.

use crate::error::LexError;
use crate::token::{Position, Token, TokenKind};

/// Tokenize DSL source text.
///
/// Returns the full token stream (terminated by [`TokenKind::Eof`]) or the
/// first [`LexError`] encountered.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia()?;

            let position = self.position();
            let Some(ch) = self.peek() else {
                tokens.push(Token::new(TokenKind::Eof, position));
                return Ok(tokens);
            };

            let kind = match ch {
                '{' => self.punct(TokenKind::LBrace),
                '}' => self.punct(TokenKind::RBrace),
                '[' => self.punct(TokenKind::LBracket),
                ']' => self.punct(TokenKind::RBracket),
                ':' => self.punct(TokenKind::Colon),
                ',' => self.punct(TokenKind::Comma),
                ';' => self.punct(TokenKind::Semicolon),
                '"' => self.string(position)?,
                '/' => self.regex(position)?,
                '`' => self.code_block(position)?,
                c if c.is_ascii_digit() => self.number(position)?,
                c if c.is_ascii_alphabetic() || c == '_' => self.word(),
                c => {
                    return Err(LexError::UnexpectedChar { ch: c, position });
                }
            };

            tokens.push(Token::new(kind, position));
        }
    }

    /// Skip whitespace and comments.  Only block comments can fail here
    /// (unterminated); the error carries the opening `/*` position.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_at(1) == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    let start = self.position();
                    self.advance();
                    self.advance();
                    loop {
                        match self.peek() {
                            Some('*') if self.peek_at(1) == Some('/') => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            Some(_) => {
                                self.advance();
                            }
                            None => {
                                return Err(LexError::UnterminatedComment { position: start });
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn punct(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// A double-quoted string with the escape set `\"`, `\\`, `\n`, `\t`.
    fn string(&mut self, start: Position) -> Result<TokenKind, LexError> {
        self.advance(); // opening quote

        let mut text = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    return Ok(TokenKind::Str(text));
                }
                Some('\\') => {
                    let escape_pos = self.position();
                    self.advance();
                    match self.peek() {
                        Some('"') => text.push('"'),
                        Some('\\') => text.push('\\'),
                        Some('n') => text.push('\n'),
                        Some('t') => text.push('\t'),
                        Some(c) => {
                            return Err(LexError::InvalidEscape {
                                ch: c,
                                position: escape_pos,
                            });
                        }
                        None => return Err(LexError::UnterminatedString { position: start }),
                    }
                    self.advance();
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
                None => return Err(LexError::UnterminatedString { position: start }),
            }
        }
    }

    /// A `/.../` regex literal with optional trailing flags.  `\/` escapes a
    /// slash inside the body; every other backslash sequence is carried
    /// through verbatim for the regex engine to interpret.
    fn regex(&mut self, start: Position) -> Result<TokenKind, LexError> {
        self.advance(); // opening slash

        let mut source = String::new();
        loop {
            match self.peek() {
                Some('/') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('/') => source.push('/'),
                        Some(c) => {
                            source.push('\\');
                            source.push(c);
                        }
                        None => return Err(LexError::UnterminatedRegex { position: start }),
                    }
                    self.advance();
                }
                Some('\n') | None => {
                    return Err(LexError::UnterminatedRegex { position: start });
                }
                Some(c) => {
                    source.push(c);
                    self.advance();
                }
            }
        }

        let mut flags = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            if c != 'i' {
                return Err(LexError::UnknownRegexFlag {
                    flag: c,
                    position: self.position(),
                });
            }
            flags.push(c);
            self.advance();
        }

        Ok(TokenKind::Regex { source, flags })
    }

    /// A backtick-fenced raw block.  The content is carried verbatim; no
    /// escapes are interpreted.
    fn code_block(&mut self, start: Position) -> Result<TokenKind, LexError> {
        self.advance(); // opening backtick

        let mut raw = String::new();
        loop {
            match self.peek() {
                Some('`') => {
                    self.advance();
                    return Ok(TokenKind::CodeBlock(raw));
                }
                Some(c) => {
                    raw.push(c);
                    self.advance();
                }
                None => return Err(LexError::UnterminatedCodeBlock { position: start }),
            }
        }
    }

    fn number(&mut self, start: Position) -> Result<TokenKind, LexError> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.advance();
        }

        let value = text
            .parse::<u32>()
            .map_err(|_| LexError::NumberOutOfRange {
                text: text.clone(),
                position: start,
            })?;

        Ok(TokenKind::Number(value))
    }

    fn word(&mut self) -> TokenKind {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            text.push(c);
            self.advance();
        }

        match text.as_str() {
            "intent" => TokenKind::Intent,
            "priority" => TokenKind::Priority,
            "patterns" => TokenKind::Patterns,
            "response" => TokenKind::Response,
            "next_state" => TokenKind::NextState,
            _ => TokenKind::Identifier(text),
        }
    }

    // -- Cursor primitives ----------------------------------------------------

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(&c) = self.chars.get(self.pos) {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("lex failure")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn tokenizes_intent_block() {
        let kinds = kinds(r#"intent GREETING priority 10 { patterns: ["你好"]; }"#);
        assert_eq!(
            kinds,
            vec![
                TokenKind::Intent,
                TokenKind::Identifier("GREETING".into()),
                TokenKind::Priority,
                TokenKind::Number(10),
                TokenKind::LBrace,
                TokenKind::Patterns,
                TokenKind::Colon,
                TokenKind::LBracket,
                TokenKind::Str("你好".into()),
                TokenKind::RBracket,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn skips_line_and_block_comments() {
        let kinds = kinds("// header\nintent /* inline */ X { }");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Intent,
                TokenKind::Identifier("X".into()),
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn resolves_string_escapes() {
        let kinds = kinds(r#""a\"b\\c\nd\te""#);
        assert_eq!(kinds[0], TokenKind::Str("a\"b\\c\nd\te".into()));
    }

    #[test]
    fn regex_with_flag_and_escaped_slash() {
        let kinds = kinds(r"/hello\/world\d+/i");
        assert_eq!(
            kinds[0],
            TokenKind::Regex {
                source: r"hello/world\d+".into(),
                flags: "i".into(),
            }
        );
    }

    #[test]
    fn code_block_is_verbatim() {
        let kinds = kinds("`call lookup(\"x\");`");
        assert_eq!(kinds[0], TokenKind::CodeBlock("call lookup(\"x\");".into()));
    }

    #[test]
    fn positions_are_line_column() {
        let tokens = tokenize("intent\n  X").unwrap();
        assert_eq!(tokens[0].position, Position::new(1, 1));
        assert_eq!(tokens[1].position, Position::new(2, 3));
    }

    #[test]
    fn unterminated_string_is_error() {
        let err = tokenize("\"open").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }

    #[test]
    fn unknown_regex_flag_is_error() {
        let err = tokenize("/abc/x").unwrap_err();
        assert!(matches!(err, LexError::UnknownRegexFlag { flag: 'x', .. }));
    }

    #[test]
    fn unexpected_character_reports_position() {
        let err = tokenize("intent @").unwrap_err();
        match err {
            LexError::UnexpectedChar { ch, position } => {
                assert_eq!(ch, '@');
                assert_eq!(position, Position::new(1, 8));
            }
            other => panic!("expected UnexpectedChar, got {other:?}"),
        }
    }
}
