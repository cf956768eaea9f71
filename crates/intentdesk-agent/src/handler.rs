//! Intent-keyed post-processing handlers.
//!
//! After a match result is produced — by the rules or by a fallback
//! recognizer — the agent looks up a registered [`IntentHandler`] under the
//! intent's name and lets it rewrite the response text or replace the whole
//! result (e.g. to inject live order data into a templated reply).
//!
//! Handlers consume the [`MatchResult`] contract and never see lexer or
//! parser internals.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use intentdesk_engine::MatchResult;

/// What a handler did with the result.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutcome {
    /// Keep the result but replace the response text shown to the user.
    Rewrite(String),
    /// Replace the whole match result.
    Replace(MatchResult),
}

/// A post-processing callback registered under one intent name.
#[async_trait]
pub trait IntentHandler: Send + Sync {
    /// Inspect the user input and the produced result.  Return `None` to
    /// leave the result untouched.
    async fn handle(&self, input: &str, result: &MatchResult) -> Option<HandlerOutcome>;
}

/// The intent-name-to-handler mapping.
#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: HashMap<String, Arc<dyn IntentHandler>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an intent name, replacing any previous one.
    pub fn register(&mut self, intent_name: impl Into<String>, handler: Arc<dyn IntentHandler>) {
        let intent_name = intent_name.into();
        tracing::debug!(intent = %intent_name, "handler registered");
        self.handlers.insert(intent_name, handler);
    }

    /// Look up the handler for an intent name.
    pub fn get(&self, intent_name: &str) -> Option<&Arc<dyn IntentHandler>> {
        self.handlers.get(intent_name)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerTable")
            .field("intents", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use intentdesk_dsl::ResponseBody;

    use super::*;

    struct EchoHandler;

    #[async_trait]
    impl IntentHandler for EchoHandler {
        async fn handle(&self, input: &str, _result: &MatchResult) -> Option<HandlerOutcome> {
            Some(HandlerOutcome::Rewrite(format!("echo: {input}")))
        }
    }

    fn result() -> MatchResult {
        MatchResult {
            intent_name: "ORDER_STATUS".into(),
            response: ResponseBody::Text("请提供订单号".into()),
            next_state: None,
            matched_pattern: Some("\"订单\"".into()),
        }
    }

    #[tokio::test]
    async fn registered_handler_is_found_and_invoked() {
        let mut table = HandlerTable::new();
        table.register("ORDER_STATUS", Arc::new(EchoHandler));

        let handler = table.get("ORDER_STATUS").expect("handler registered");
        let outcome = handler.handle("查订单 1001", &result()).await;
        assert_eq!(
            outcome,
            Some(HandlerOutcome::Rewrite("echo: 查订单 1001".into()))
        );
    }

    #[test]
    fn unregistered_intent_has_no_handler() {
        let table = HandlerTable::new();
        assert!(table.get("GREETING").is_none());
        assert!(table.is_empty());
    }
}
