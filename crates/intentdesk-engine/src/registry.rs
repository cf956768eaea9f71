//! The intent registry.
//!
//! A [`Registry`] holds every parsed intent definition sorted by the probe
//! order the matcher will use: priority descending, declaration order
//! ascending within equal priorities.  The sort is performed once at build
//! time with a stable sort, so authors can reason about shadowing inside a
//! same-priority group by reading the script top to bottom.
//!
//! # Example
//!
//! ```rust
//! # use intentdesk_engine::Registry;
//! let registry = Registry::build(
//!     r#"intent GREETING priority 10 {
//!         patterns: ["你好", "hi"];
//!         response: "你好，我是客服小助手";
//!     }"#,
//! )
//! .unwrap();
//! assert_eq!(registry.len(), 1);
//! ```

use intentdesk_dsl::{IntentDefinition, ParseError};

/// The immutable, priority-sorted collection of parsed intents.
///
/// Built once from DSL source text and read-only afterwards.  There are no
/// incremental updates: when the script changes, build a new registry and
/// swap the reference visible to matcher callers.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Definitions in probe order (priority desc, declaration order asc).
    intents: Vec<IntentDefinition>,
}

impl Registry {
    /// Build a registry from DSL source text.
    ///
    /// This is the sole build entry point: it lexes, parses, compiles every
    /// regex, validates the program, and fixes the probe order.  Any failure
    /// aborts the whole build; no partial registry is returned.
    pub fn build(source: &str) -> Result<Self, ParseError> {
        let mut intents = intentdesk_dsl::parse(source)?;

        // Stable sort: declaration order survives as the tie-break within
        // each priority group.
        intents.sort_by(|a, b| b.priority.cmp(&a.priority));

        tracing::debug!(intents = intents.len(), "registry built");
        Ok(Self { intents })
    }

    /// Iterate the definitions in probe order.
    pub fn iter(&self) -> impl Iterator<Item = &IntentDefinition> {
        self.intents.iter()
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&IntentDefinition> {
        self.intents.iter().find(|def| def.name == name)
    }

    /// Number of intents in the registry.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Whether the registry holds no intents.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// The intent names in probe order.
    pub fn names(&self) -> Vec<&str> {
        self.intents.iter().map(|def| def.name.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_by_priority_descending() {
        let registry = Registry::build(
            r#"
            intent LOW { patterns: ["a"]; response: "low"; }
            intent HIGH priority 20 { patterns: ["a"]; response: "high"; }
            intent MID priority 5 { patterns: ["a"]; response: "mid"; }
            "#,
        )
        .unwrap();

        assert_eq!(registry.names(), vec!["HIGH", "MID", "LOW"]);
    }

    #[test]
    fn equal_priority_keeps_declaration_order() {
        let registry = Registry::build(
            r#"
            intent FIRST priority 3 { patterns: ["a"]; response: "1"; }
            intent SECOND priority 3 { patterns: ["a"]; response: "2"; }
            intent THIRD priority 3 { patterns: ["a"]; response: "3"; }
            "#,
        )
        .unwrap();

        assert_eq!(registry.names(), vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn build_is_idempotent() {
        let source = r#"
            intent A priority 2 { patterns: ["x", /y/i]; response: "ra"; }
            intent B { patterns: ["z"]; response: "rb"; next_state: "S"; }
        "#;

        let one = Registry::build(source).unwrap();
        let two = Registry::build(source).unwrap();

        assert_eq!(one.names(), two.names());
        for (a, b) in one.iter().zip(two.iter()) {
            assert_eq!(a.priority, b.priority);
            assert_eq!(a.response, b.response);
            assert_eq!(a.next_state, b.next_state);
            assert_eq!(a.patterns.len(), b.patterns.len());
        }
    }

    #[test]
    fn get_finds_by_name() {
        let registry =
            Registry::build(r#"intent A { patterns: ["x"]; response: "r"; }"#).unwrap();
        assert!(registry.get("A").is_some());
        assert!(registry.get("B").is_none());
    }

    #[test]
    fn duplicate_name_fails_the_build() {
        let err = Registry::build(
            r#"
            intent A { patterns: ["x"]; response: "r"; }
            intent A { patterns: ["y"]; response: "r"; }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::DuplicateIntentName { .. }));
    }

    #[test]
    fn empty_source_builds_empty_registry() {
        let registry = Registry::build("").unwrap();
        assert!(registry.is_empty());
    }
}
