//! Subcommand: `intentdesk match` — one-shot classification for scripting.

use std::path::Path;

use anyhow::Context;
use serde_json::json;

use intentdesk_agent::{DeskAgent, ReplySource};

use crate::helpers::resolve_fallback;

/// Match one input against the script and print the outcome as JSON.
pub async fn cmd_match(script: &Path, input: &str) -> anyhow::Result<()> {
    let (fallback, _) = resolve_fallback()?;
    let agent = DeskAgent::from_file(script)
        .with_context(|| format!("failed to load {}", script.display()))?
        .with_fallback(fallback);

    let reply = agent.handle_turn(input).await?;

    let source = match reply.source {
        ReplySource::Rules => "rules",
        ReplySource::Fallback => "fallback",
        ReplySource::Default => "default",
    };

    let out = json!({
        "intent": reply.result.as_ref().map(|r| r.intent_name.clone()),
        "response": reply.response,
        "next_state": reply.result.as_ref().and_then(|r| r.next_state.clone()),
        "matched_pattern": reply.result.as_ref().and_then(|r| r.matched_pattern.clone()),
        "source": source,
    });

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
