//! The rule matcher.
//!
//! [`match_input`] probes the registry in its fixed sorted order and returns
//! the first intent with any matching pattern, paired with the pattern that
//! matched.  Absence of a match is a normal outcome, not an error: the
//! caller is expected to hand the input to an external fallback recognizer.
//!
//! Matching rules:
//!
//! - **Literal** patterns match by case-insensitive substring containment.
//! - **Regex** patterns match if the compiled expression finds any match in
//!   the raw input; the `i` flag was already folded into the compilation.
//!
//! The matcher is a pure function of `(input, registry)` with no retries and
//! no state between calls, so it can run concurrently against one registry.

use serde::{Deserialize, Serialize};

use crate::registry::Registry;

/// A successful match, produced fresh per call.
///
/// This is also the contract consumed (and possibly rewritten) by external
/// intent handlers, and the shape a fallback recognizer synthesizes when the
/// rules miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Name of the matched intent.
    pub intent_name: String,
    /// The intent's declared response.
    pub response: intentdesk_dsl::ResponseBody,
    /// The intent's declared follow-up state, if any.
    pub next_state: Option<String>,
    /// Display form of the pattern that matched (`"text"` or `/re/flags`).
    /// `None` for results synthesized outside the rule matcher.
    pub matched_pattern: Option<String>,
}

/// The outcome of one matching call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// An intent matched.
    Matched(MatchResult),
    /// No intent's patterns matched; the caller should fall back.
    NoMatch,
}

impl MatchOutcome {
    /// The match result, if any.
    pub fn matched(self) -> Option<MatchResult> {
        match self {
            Self::Matched(result) => Some(result),
            Self::NoMatch => None,
        }
    }
}

/// Match one user input against the registry.
///
/// Intents are probed in registry order (priority descending, declaration
/// order ascending); within an intent, patterns are tried in declaration
/// order and the first hit is reported.
pub fn match_input(input: &str, registry: &Registry) -> MatchOutcome {
    // Fold once per call, not once per pattern.
    let folded = input.to_lowercase();

    for def in registry.iter() {
        for pattern in &def.patterns {
            if pattern.matches(input, &folded) {
                tracing::debug!(
                    intent = %def.name,
                    pattern = %pattern,
                    "rule match"
                );
                return MatchOutcome::Matched(MatchResult {
                    intent_name: def.name.clone(),
                    response: def.response.clone(),
                    next_state: def.next_state.clone(),
                    matched_pattern: Some(pattern.to_string()),
                });
            }
        }
    }

    tracing::debug!(input = %input, "no rule matched");
    MatchOutcome::NoMatch
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use intentdesk_dsl::ResponseBody;

    use super::*;

    fn registry(source: &str) -> Registry {
        Registry::build(source).expect("build failure")
    }

    #[test]
    fn literal_substring_match_is_case_insensitive() {
        let reg = registry(r#"intent G { patterns: ["hello"]; response: "hi"; }"#);

        let result = match_input("well HELLO there", &reg).matched().unwrap();
        assert_eq!(result.intent_name, "G");
        assert_eq!(result.matched_pattern.as_deref(), Some("\"hello\""));
    }

    #[test]
    fn cjk_literal_matches_substring() {
        let reg = registry(r#"intent G { patterns: ["你好"]; response: "您好"; }"#);

        let result = match_input("你好，在吗", &reg).matched().unwrap();
        assert_eq!(result.intent_name, "G");
        assert_eq!(result.response, ResponseBody::Text("您好".into()));
    }

    #[test]
    fn regex_i_flag_matches_and_misses() {
        let reg = registry(r#"intent G { patterns: [/hello/i]; response: "hi"; }"#);

        assert!(match_input("Hello there", &reg).matched().is_some());
        assert_eq!(match_input("goodbye", &reg), MatchOutcome::NoMatch);
    }

    #[test]
    fn higher_priority_shadows_lower_when_both_match() {
        let reg = registry(
            r#"
            intent GENERIC { patterns: ["order"]; response: "generic"; }
            intent URGENT priority 10 { patterns: ["order"]; response: "urgent"; }
            "#,
        );

        let result = match_input("where is my order", &reg).matched().unwrap();
        assert_eq!(result.intent_name, "URGENT");
    }

    #[test]
    fn equal_priority_selects_earlier_declaration() {
        let reg = registry(
            r#"
            intent FIRST priority 2 { patterns: ["hi"]; response: "1"; }
            intent SECOND priority 2 { patterns: ["hi"]; response: "2"; }
            "#,
        );

        let result = match_input("hi", &reg).matched().unwrap();
        assert_eq!(result.intent_name, "FIRST");
    }

    #[test]
    fn first_matching_pattern_within_intent_is_reported() {
        let reg = registry(r#"intent G { patterns: ["alpha", "beta"]; response: "r"; }"#);

        let result = match_input("alpha and beta", &reg).matched().unwrap();
        assert_eq!(result.matched_pattern.as_deref(), Some("\"alpha\""));
    }

    #[test]
    fn no_match_is_a_sentinel_not_an_error() {
        let reg = registry(r#"intent G { patterns: ["hello"]; response: "hi"; }"#);
        assert_eq!(match_input("完全无关的输入", &reg), MatchOutcome::NoMatch);
    }

    #[test]
    fn next_state_is_carried_through() {
        let reg = registry(
            r#"intent Q { patterns: ["balance"]; response: "which account?"; next_state: "AWAIT_ACCOUNT"; }"#,
        );

        let result = match_input("check my balance", &reg).matched().unwrap();
        assert_eq!(result.next_state.as_deref(), Some("AWAIT_ACCOUNT"));
    }

    #[test]
    fn code_block_response_survives_verbatim() {
        let reg = registry(r#"intent Q { patterns: ["a"]; response: `lookup(order_id)`; }"#);

        let result = match_input("a", &reg).matched().unwrap();
        assert_eq!(
            result.response,
            ResponseBody::CodeBlock("lookup(order_id)".into())
        );
    }
}
