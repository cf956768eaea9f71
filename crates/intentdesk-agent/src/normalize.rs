//! Input text normalization.
//!
//! Casual conversational input arrives with fullwidth punctuation, mixed
//! case, and decorative symbols.  [`TextNormalizer`] folds all of that away
//! so the keyword fallback can compare apples to apples.  The core rule
//! matcher never sees normalized text; it operates on the raw input.

use std::sync::LazyLock;

use regex::Regex;

/// Characters kept after normalization: ASCII alphanumerics, underscore,
/// and Han ideographs.  Everything else collapses to a single space.
static STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9a-z_\p{Han}]+").expect("static regex"));

/// A text pre-cleaning step applied before keyword comparison.
pub trait Normalizer: Send + Sync {
    /// Produce the normalized form of `input`.
    fn normalize(&self, input: &str) -> String;
}

/// The default, offline normalizer.
///
/// Folds fullwidth forms to halfwidth, lowercases, strips punctuation and
/// symbols (keeping CJK ideographs and alphanumerics), and collapses runs of
/// whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl Normalizer for TextNormalizer {
    fn normalize(&self, input: &str) -> String {
        let halfwidth: String = input.chars().map(fold_fullwidth).collect();
        let lowered = halfwidth.to_lowercase();
        let stripped = STRIP.replace_all(&lowered, " ");
        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Map a fullwidth character to its halfwidth counterpart, if it has one.
fn fold_fullwidth(c: char) -> char {
    match c as u32 {
        0x3000 => ' ',
        code @ 0xFF01..=0xFF5E => {
            char::from_u32(code - 0xFEE0).unwrap_or(c)
        }
        _ => c,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
