//! Token types produced by the lexer.

use std::fmt;

/// A line/column location in the DSL source text (both 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The kind of a token, with the literal payload where one exists.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    Intent,
    Priority,
    Patterns,
    Response,
    NextState,

    // Literals
    /// A bare word that is not a keyword.
    Identifier(String),
    /// A double-quoted string with escapes already resolved.
    Str(String),
    /// A `/.../` regex literal plus its trailing flag characters.
    Regex { source: String, flags: String },
    /// A decimal integer (only used for `priority`).
    Number(u32),
    /// A backtick-fenced raw block, carried verbatim and never interpreted.
    CodeBlock(String),

    // Punctuation
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Semicolon,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intent => write!(f, "`intent`"),
            Self::Priority => write!(f, "`priority`"),
            Self::Patterns => write!(f, "`patterns`"),
            Self::Response => write!(f, "`response`"),
            Self::NextState => write!(f, "`next_state`"),
            Self::Identifier(name) => write!(f, "identifier `{name}`"),
            Self::Str(s) => write!(f, "string \"{s}\""),
            Self::Regex { source, flags } => write!(f, "regex /{source}/{flags}"),
            Self::Number(n) => write!(f, "number {n}"),
            Self::CodeBlock(_) => write!(f, "code block"),
            Self::LBrace => write!(f, "`{{`"),
            Self::RBrace => write!(f, "`}}`"),
            Self::LBracket => write!(f, "`[`"),
            Self::RBracket => write!(f, "`]`"),
            Self::Colon => write!(f, "`:`"),
            Self::Comma => write!(f, "`,`"),
            Self::Semicolon => write!(f, "`;`"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }
}
