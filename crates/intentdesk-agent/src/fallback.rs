//! Fallback intent recognition.
//!
//! When the rule matcher reports no match, the agent hands the input to a
//! [`FallbackRecognizer`].  A recognizer returns the *name* of a registry
//! intent (or `None`); the agent then synthesizes the match result from the
//! registry entry so the rest of the pipeline is identical for both paths.
//!
//! Two implementations ship with the crate:
//!
//! - [`KeywordRecognizer`] -- offline heuristic, used when no API key is
//!   configured.
//! - [`crate::llm::LlmRecognizer`] -- LLM classification over an
//!   OpenAI-compatible Chat Completions endpoint.

use async_trait::async_trait;

use intentdesk_dsl::Pattern;
use intentdesk_engine::Registry;

use crate::error::Result;
use crate::normalize::{Normalizer, TextNormalizer};

/// An external recognizer consulted when no pattern matches.
#[async_trait]
pub trait FallbackRecognizer: Send + Sync {
    /// Return the name of the most plausible registry intent, or `None` when
    /// the recognizer cannot place the input either.
    async fn recognize(&self, input: &str, registry: &Registry) -> Result<Option<String>>;
}

/// Offline keyword heuristic over the registry's literal patterns.
///
/// Each literal pattern is broken into normalized tokens; an intent is
/// chosen when every multi-character token of one of its patterns occurs in
/// the normalized input (single-token patterns need just that one hit).
/// Intents are tried in registry probe order, so priority still shadows.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordRecognizer {
    normalizer: TextNormalizer,
}

impl KeywordRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens used for comparison: normalized words longer than one
    /// character, falling back to single characters when nothing longer
    /// exists (short CJK patterns).
    fn tokens(&self, pattern_text: &str) -> Vec<String> {
        let normalized = self.normalizer.normalize(pattern_text);
        let long: Vec<String> = normalized
            .split(' ')
            .filter(|t| t.chars().count() > 1)
            .map(str::to_owned)
            .collect();
        if !long.is_empty() {
            return long;
        }
        normalized
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[async_trait]
impl FallbackRecognizer for KeywordRecognizer {
    async fn recognize(&self, input: &str, registry: &Registry) -> Result<Option<String>> {
        let folded = self.normalizer.normalize(input);
        if folded.is_empty() {
            return Ok(None);
        }

        for def in registry.iter() {
            for pattern in &def.patterns {
                let Pattern::Literal { text, .. } = pattern else {
                    continue;
                };
                let tokens = self.tokens(text);
                if tokens.is_empty() {
                    continue;
                }
                if tokens.iter().all(|t| folded.contains(t.as_str())) {
                    tracing::debug!(intent = %def.name, pattern = %text, "keyword fallback hit");
                    return Ok(Some(def.name.clone()));
                }
            }
        }

        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
