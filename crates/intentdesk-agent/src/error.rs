//! Agent error types.
//!
//! All agent subsystems surface errors through [`AgentError`].  Each variant
//! carries enough context for callers to decide how to handle the failure.

/// Unified error type for the conversation agent.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    // -- Fallback recognizer errors -------------------------------------------
    /// The API key is missing for a recognizer that requires one.
    #[error("missing api key for fallback recognizer")]
    MissingApiKey,

    /// An HTTP request to the LLM provider failed.
    #[error("llm request failed: {reason}")]
    LlmRequestFailed { reason: String },

    /// The LLM response could not be parsed into the expected format.
    #[error("llm response parse error: {reason}")]
    LlmParseFailed { reason: String },

    // -- Script errors ---------------------------------------------------------
    /// Building the registry from DSL source failed.
    #[error("script error: {0}")]
    Script(#[from] intentdesk_dsl::ParseError),

    /// Reading a script file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // -- Serialization ----------------------------------------------------------
    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the agent crate.
pub type Result<T> = std::result::Result<T, AgentError>;
