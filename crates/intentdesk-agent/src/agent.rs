//! The conversation agent.
//!
//! [`DeskAgent`] wires the pieces of one user turn together:
//!
//! 1. rule matching against the current registry;
//! 2. on a rule miss, classification by the configured
//!    [`FallbackRecognizer`], synthesizing a result from the registry entry;
//! 3. post-processing by a registered [`IntentHandler`];
//! 4. conversation-state bookkeeping from the intent's `next_state`.
//!
//! The registry is replaced wholesale on reload: a new one is built off to
//! the side and the shared `Arc` is swapped under a brief write lock, so a
//! match that is already underway keeps reading the registry it started
//! with.  No lock is held across a match or an await point.

use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

use intentdesk_engine::{MatchOutcome, MatchResult, Registry, match_input};

use crate::error::Result;
use crate::fallback::FallbackRecognizer;
use crate::handler::{HandlerOutcome, HandlerTable, IntentHandler};

/// Reply shown when neither the rules nor the fallback place the input.
const DEFAULT_REPLY: &str = "抱歉，我没能理解您的意图。您可以换一种说法或联系客服。";

/// Which path produced the reply for a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// The pattern rules matched.
    Rules,
    /// The fallback recognizer placed the input.
    Fallback,
    /// Nothing matched; the default apology was returned.
    Default,
}

/// Everything the surrounding loop needs to render one turn.
#[derive(Debug, Clone)]
pub struct TurnReply {
    /// The match result, absent when the default reply was used.
    pub result: Option<MatchResult>,
    /// The response text to show the user.
    pub response: String,
    /// Which path produced this reply.
    pub source: ReplySource,
}

/// A customer-service agent driving one intent script.
pub struct DeskAgent {
    registry: RwLock<Arc<Registry>>,
    fallback: Option<Arc<dyn FallbackRecognizer>>,
    handlers: HandlerTable,
    state: Mutex<Option<String>>,
}

impl DeskAgent {
    /// Build an agent from DSL source text.
    pub fn from_source(source: &str) -> Result<Self> {
        let registry = Registry::build(source)?;
        tracing::info!(intents = registry.len(), "agent loaded");
        Ok(Self {
            registry: RwLock::new(Arc::new(registry)),
            fallback: None,
            handlers: HandlerTable::new(),
            state: Mutex::new(None),
        })
    }

    /// Build an agent from a script file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_source(&source)
    }

    /// Attach a fallback recognizer consulted on rule misses.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackRecognizer>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Register a post-processing handler under an intent name.
    pub fn register_handler(
        &mut self,
        intent_name: impl Into<String>,
        handler: Arc<dyn IntentHandler>,
    ) {
        self.handlers.register(intent_name, handler);
    }

    /// Snapshot of the current registry.
    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry.read().expect("registry lock poisoned"))
    }

    /// Rebuild the registry from new source and swap it in atomically.
    ///
    /// On any build failure the old registry stays in place untouched.
    pub fn reload(&self, source: &str) -> Result<()> {
        let rebuilt = Registry::build(source)?;
        tracing::info!(intents = rebuilt.len(), "registry reloaded");
        *self.registry.write().expect("registry lock poisoned") = Arc::new(rebuilt);
        Ok(())
    }

    /// The conversation state declared by the last matched intent, if any.
    pub fn state(&self) -> Option<String> {
        self.state.lock().expect("state lock poisoned").clone()
    }

    /// Process one user turn.
    pub async fn handle_turn(&self, input: &str) -> Result<TurnReply> {
        let registry = self.registry();

        let (mut result, mut source) = match match_input(input, &registry) {
            MatchOutcome::Matched(result) => (Some(result), ReplySource::Rules),
            MatchOutcome::NoMatch => (self.run_fallback(input, &registry).await, ReplySource::Fallback),
        };

        if result.is_none() {
            source = ReplySource::Default;
        }

        let Some(mut matched) = result.take() else {
            return Ok(TurnReply {
                result: None,
                response: DEFAULT_REPLY.to_owned(),
                source,
            });
        };

        let mut response = render_response(&matched);

        // Handler post-processing, keyed by the final intent name.
        if let Some(handler) = self.handlers.get(&matched.intent_name) {
            match handler.handle(input, &matched).await {
                Some(HandlerOutcome::Rewrite(text)) => response = text,
                Some(HandlerOutcome::Replace(replacement)) => {
                    matched = replacement;
                    response = render_response(&matched);
                }
                None => {}
            }
        }

        if let Some(next) = &matched.next_state {
            tracing::debug!(state = %next, "conversation state updated");
            *self.state.lock().expect("state lock poisoned") = Some(next.clone());
        }

        Ok(TurnReply {
            result: Some(matched),
            response,
            source,
        })
    }

    /// Consult the fallback recognizer and synthesize a result from the
    /// registry entry it names.  Recognizer failures degrade to no-match so
    /// a flaky endpoint cannot take the whole loop down.
    async fn run_fallback(&self, input: &str, registry: &Registry) -> Option<MatchResult> {
        let fallback = self.fallback.as_ref()?;

        let name = match fallback.recognize(input, registry).await {
            Ok(name) => name?,
            Err(e) => {
                tracing::warn!(error = %e, "fallback recognizer failed");
                return None;
            }
        };

        let def = registry.get(&name)?;
        tracing::debug!(intent = %def.name, "fallback recognized intent");
        Some(MatchResult {
            intent_name: def.name.clone(),
            response: def.response.clone(),
            next_state: def.next_state.clone(),
            matched_pattern: None,
        })
    }
}

/// Render the response body of a result for display.  Code blocks are never
/// executed; they are labeled and passed through for a handler or human to
/// interpret.
fn render_response(result: &MatchResult) -> String {
    match &result.response {
        intentdesk_dsl::ResponseBody::Text(text) => text.clone(),
        intentdesk_dsl::ResponseBody::CodeBlock(raw) => format!("[code response]\n{raw}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
