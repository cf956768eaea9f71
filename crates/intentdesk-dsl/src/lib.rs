//! Intent DSL frontend for IntentDesk.
//!
//! This crate provides:
//!
//! - **[`lexer`]** -- Tokenizer for the intent DSL: keywords, identifiers,
//!   string/regex/number literals, code blocks, and punctuation, with
//!   line/column tracking and comment skipping.
//! - **[`parser`]** -- Single-pass recursive-descent parser (one token of
//!   lookahead) that turns a token stream into intent definitions.
//! - **[`ast`]** -- The parsed representation: [`ast::IntentDefinition`],
//!   [`ast::Pattern`], and [`ast::ResponseBody`].
//! - **[`error`]** -- Lex and parse error types via [`thiserror`].
//!
//! Regex patterns are compiled eagerly at parse time so that a malformed
//! expression fails the build of the whole script instead of surfacing
//! during matching.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{IntentDefinition, Pattern, ResponseBody};
pub use error::{LexError, ParseError, Result};
pub use lexer::tokenize;
pub use parser::parse;
pub use token::{Position, Token, TokenKind};
