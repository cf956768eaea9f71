//! Parsed representation of an intent script.
//!
//! Every type here is created once by the parser and immutable afterwards.
//! The raw "string or regex" pattern slot of the DSL becomes an explicit
//! two-case [`Pattern`] resolved at parse time, so the matcher never has to
//! re-inspect raw text shape per user turn.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::Position;

/// A single match pattern owned by one intent definition.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// A literal matched by case-insensitive substring containment.
    Literal {
        /// The text as written in the script.
        text: String,
        /// Lowercase-folded form, precomputed for matching.
        folded: String,
    },
    /// A regular expression, compiled when the script was parsed.
    Regex {
        /// The source between the slashes, as written.
        source: String,
        /// Flag characters (`i` enables case-insensitive matching).
        flags: String,
        /// The compiled expression.
        compiled: regex::Regex,
    },
}

impl Pattern {
    /// Build a literal pattern, folding its text once.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        let folded = text.to_lowercase();
        Self::Literal { text, folded }
    }

    /// Test this pattern against one user input.
    ///
    /// `folded_input` must be the lowercase fold of `input`; the caller
    /// computes it once per turn instead of once per pattern.
    pub fn matches(&self, input: &str, folded_input: &str) -> bool {
        match self {
            Self::Literal { folded, .. } => folded_input.contains(folded.as_str()),
            Self::Regex { compiled, .. } => compiled.is_match(input),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { text, .. } => write!(f, "\"{text}\""),
            Self::Regex { source, flags, .. } => write!(f, "/{source}/{flags}"),
        }
    }
}

/// The response an intent produces when it matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseBody {
    /// Plain text returned to the user as-is.
    Text(String),
    /// An opaque code block.  Never executed; carried through verbatim for
    /// an external handler to interpret.
    CodeBlock(String),
}

impl ResponseBody {
    /// The raw text of either variant.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::CodeBlock(s) => s,
        }
    }
}

/// One parsed `intent { ... }` block.
#[derive(Debug, Clone)]
pub struct IntentDefinition {
    /// Unique, non-empty intent name.
    pub name: String,
    /// Matching priority; higher shadows lower.  Defaults to 0 when the
    /// `priority` clause is absent.
    pub priority: u32,
    /// Match patterns in declaration order.  Never empty.
    pub patterns: Vec<Pattern>,
    /// The declared response.
    pub response: ResponseBody,
    /// Optional conversational state to transition to after a match.
    pub next_state: Option<String>,
    /// Where the `intent` keyword of this block appears in the source.
    pub position: Position,
}
