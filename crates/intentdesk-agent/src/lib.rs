//! Conversation agent for IntentDesk.
//!
//! This crate provides the glue around the core engine:
//!
//! - **[`agent`]** -- [`DeskAgent`], which drives one user turn: rule match,
//!   fallback recognition, handler post-processing, and conversation-state
//!   bookkeeping, with build-then-swap registry reload.
//! - **[`fallback`]** -- the [`FallbackRecognizer`] seam plus the offline
//!   [`KeywordRecognizer`].
//! - **[`llm`]** -- [`LlmRecognizer`], intent classification over an
//!   OpenAI-compatible Chat Completions endpoint.
//! - **[`handler`]** -- intent-keyed post-processing callbacks consuming the
//!   [`intentdesk_engine::MatchResult`] contract.
//! - **[`normalize`]** -- input folding used by the keyword heuristic.
//! - **[`error`]** -- unified agent error types via [`thiserror`].

pub mod agent;
pub mod error;
pub mod fallback;
pub mod handler;
pub mod llm;
pub mod normalize;

pub use agent::{DeskAgent, ReplySource, TurnReply};
pub use error::{AgentError, Result};
pub use fallback::{FallbackRecognizer, KeywordRecognizer};
pub use handler::{HandlerOutcome, HandlerTable, IntentHandler};
pub use llm::{LlmConfig, LlmRecognizer};
pub use normalize::{Normalizer, TextNormalizer};
