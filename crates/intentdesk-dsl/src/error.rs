//! DSL error types.
//!
//! Lexing and parsing surface errors through [`LexError`] and [`ParseError`]
//! respectively.  Every variant carries the source position at which the
//! problem was detected; duplicate-name errors carry both the original and
//! the conflicting declaration sites.
//!
//! All errors are fatal to the build of the registry that requested the
//! parse: no partial result is ever returned, since silently dropping a
//! malformed intent could hide a service-quality regression.

use crate::token::Position;

/// Errors produced while tokenizing DSL source text.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexError {
    /// A character outside of any literal that the lexer does not recognize.
    #[error("unexpected character `{ch}` at {position}")]
    UnexpectedChar { ch: char, position: Position },

    /// A backslash escape inside a string literal that is not one of
    /// `\"`, `\\`, `\n`, `\t`.
    #[error("invalid escape `\\{ch}` in string literal at {position}")]
    InvalidEscape { ch: char, position: Position },

    /// A string literal that reaches end of input before its closing quote.
    #[error("unterminated string literal starting at {position}")]
    UnterminatedString { position: Position },

    /// A regex literal that reaches end of input before its closing slash.
    #[error("unterminated regex literal starting at {position}")]
    UnterminatedRegex { position: Position },

    /// A `/* ... */` comment that reaches end of input before `*/`.
    #[error("unterminated block comment starting at {position}")]
    UnterminatedComment { position: Position },

    /// A flag character after a regex literal that is not supported.
    #[error("unknown regex flag `{flag}` at {position}")]
    UnknownRegexFlag { flag: char, position: Position },

    /// A code block that reaches end of input before its closing backtick.
    #[error("unterminated code block starting at {position}")]
    UnterminatedCodeBlock { position: Position },

    /// A numeric literal that does not fit the priority range.
    #[error("numeric literal `{text}` out of range at {position}")]
    NumberOutOfRange { text: String, position: Position },
}

/// Errors produced while parsing a token stream into intent definitions.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A token that does not fit the grammar at this point.
    #[error("unexpected {found} at {position}: expected {expected}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: Position,
    },

    /// A mandatory field (`patterns` or `response`) is absent from a block.
    #[error("intent `{intent}` declared at {position} is missing mandatory field `{field}`")]
    MissingField {
        intent: String,
        field: &'static str,
        position: Position,
    },

    /// The same field appears more than once within one intent block.
    #[error("duplicate field `{field}` in intent `{intent}` at {position}")]
    DuplicateField {
        intent: String,
        field: &'static str,
        position: Position,
    },

    /// A `patterns:` field with zero pattern items.
    #[error("intent `{intent}` declares an empty pattern list at {position}")]
    EmptyPatternList { intent: String, position: Position },

    /// A regex pattern literal that failed to compile.
    #[error("invalid regex `/{pattern}/` at {position}: {reason}")]
    BadRegex {
        pattern: String,
        position: Position,
        reason: String,
    },

    /// Two intents with the same name in one program.
    #[error(
        "duplicate intent name `{name}`: first declared at {first}, declared again at {second}"
    )]
    DuplicateIntentName {
        name: String,
        first: Position,
        second: Position,
    },

    /// An error propagated from the lexer.
    #[error(transparent)]
    Lex(#[from] LexError),
}

/// Convenience alias used throughout the DSL crate.
pub type Result<T> = std::result::Result<T, ParseError>;
