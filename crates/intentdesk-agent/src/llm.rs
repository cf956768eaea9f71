//! LLM fallback recognizer.
//!
//! Classifies user input against the registry's intent inventory with one
//! non-streaming call to an OpenAI-compatible Chat Completions endpoint
//! (OpenAI, DeepSeek, Ollama, vLLM, ...).  The model is asked to reply with
//! a single intent name or `FALLBACK`; any reply that names no registry
//! intent is treated as no-match rather than an error.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;

use async_trait::async_trait;
use intentdesk_dsl::Pattern;
use intentdesk_engine::Registry;

use crate::error::{AgentError, Result};
use crate::fallback::FallbackRecognizer;

/// Default OpenAI API base URL.
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model when `INTENTDESK_MODEL` is not set.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You are an intent classification assistant. \
    Reply with the single intent name that best matches the user input, \
    or FALLBACK if none matches.";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the LLM recognizer endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Base URL of the Chat Completions API.
    pub base_url: String,
}

impl LlmConfig {
    /// Resolve configuration from the environment.
    ///
    /// Returns `None` when `INTENTDESK_API_KEY` is absent or empty — the
    /// caller should then fall back to the offline keyword recognizer.
    /// `INTENTDESK_MODEL` and `INTENTDESK_API_BASE_URL` override the
    /// defaults.
    pub fn from_env() -> Option<Self> {
        let api_key = env_non_empty("INTENTDESK_API_KEY")?;
        let model = env_non_empty("INTENTDESK_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned());
        let base_url =
            env_non_empty("INTENTDESK_API_BASE_URL").unwrap_or_else(|| OPENAI_BASE_URL.to_owned());
        Some(Self {
            api_key,
            model,
            base_url,
        })
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Recognizer
// ---------------------------------------------------------------------------

/// Intent classification via an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct LlmRecognizer {
    config: LlmConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl LlmRecognizer {
    /// Create a recognizer from explicit configuration.
    pub fn new(config: LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(AgentError::MissingApiKey);
        }
        Ok(Self {
            config,
            http: reqwest::Client::new(),
        })
    }

    /// Build the classification prompt from the registry's inventory.
    ///
    /// Lists every intent with its patterns so the model can associate
    /// phrasing with names, the same inventory the rules matched against.
    fn build_prompt(input: &str, registry: &Registry) -> String {
        let mut parts = vec![
            format!("User Input: {input}"),
            "Intents (name: example patterns):".to_owned(),
        ];
        for def in registry.iter() {
            let patterns: Vec<String> = def
                .patterns
                .iter()
                .map(|p| match p {
                    Pattern::Literal { text, .. } => text.clone(),
                    Pattern::Regex { source, .. } => format!("/{source}/"),
                })
                .collect();
            parts.push(format!("- {}: {}", def.name, patterns.join(", ")));
        }
        parts.push("Return only the best matching intent name or FALLBACK.".to_owned());
        parts.join("\n")
    }

    /// Pick the first whitespace/comma-separated token of the reply that
    /// names a registry intent.  `FALLBACK` or anything unknown means the
    /// model declined to classify.
    fn parse_reply(reply: &str, registry: &Registry) -> Option<String> {
        reply
            .split([' ', '\t', '\n', ','])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .find(|token| registry.get(token).is_some())
            .map(str::to_owned)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", self.config.api_key);
        let value = HeaderValue::from_str(&bearer).map_err(|e| AgentError::LlmRequestFailed {
            reason: format!("invalid api key header: {e}"),
        })?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

#[async_trait]
impl FallbackRecognizer for LlmRecognizer {
    async fn recognize(&self, input: &str, registry: &Registry) -> Result<Option<String>> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": Self::build_prompt(input, registry) },
            ],
            "max_tokens": 32,
            "temperature": 0,
        });

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::LlmRequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AgentError::LlmRequestFailed {
                reason: format!("http {status}: {detail}"),
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| AgentError::LlmParseFailed {
                    reason: e.to_string(),
                })?;

        let reply = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .unwrap_or_default();

        let intent = Self::parse_reply(reply, registry);
        tracing::debug!(reply = %reply, intent = ?intent, "llm fallback classification");
        Ok(intent)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::build(
            r#"
            intent GREETING { patterns: ["你好", /hello/i]; response: "您好"; }
            intent FAREWELL { patterns: ["bye"]; response: "再见"; }
            "#,
        )
        .unwrap()
    }

    #[test]
    fn prompt_lists_every_intent_and_pattern() {
        let prompt = LlmRecognizer::build_prompt("hi there", &registry());
        assert!(prompt.contains("User Input: hi there"));
        assert!(prompt.contains("- GREETING: 你好, /hello/"));
        assert!(prompt.contains("- FAREWELL: bye"));
        assert!(prompt.contains("FALLBACK"));
    }

    #[test]
    fn reply_parsing_accepts_known_names_only() {
        let reg = registry();
        assert_eq!(
            LlmRecognizer::parse_reply("GREETING", &reg).as_deref(),
            Some("GREETING")
        );
        assert_eq!(
            LlmRecognizer::parse_reply("I think it is FAREWELL.", &reg),
            None,
            "punctuation-glued names are not guessed at"
        );
        assert_eq!(
            LlmRecognizer::parse_reply("best match: FAREWELL", &reg).as_deref(),
            Some("FAREWELL")
        );
        assert_eq!(LlmRecognizer::parse_reply("FALLBACK", &reg), None);
        assert_eq!(LlmRecognizer::parse_reply("", &reg), None);
    }

    #[test]
    fn missing_key_is_rejected_at_construction() {
        let err = LlmRecognizer::new(LlmConfig {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: OPENAI_BASE_URL.to_owned(),
        })
        .unwrap_err();
        assert!(matches!(err, AgentError::MissingApiKey));
    }
}
