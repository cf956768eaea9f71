//! Subcommand: `intentdesk run` — interactive customer-service loop.
//!
//! Reads one line per turn, prints the matched intent, the response, and any
//! state transition.  `:reload` re-reads the script file and swaps the
//! registry in place; `exit` / `quit` leave the loop.

use std::io::{self, Write as _};
use std::path::Path;

use anyhow::Context;
use tracing::info;

use intentdesk_agent::{DeskAgent, ReplySource};

use crate::helpers::resolve_fallback;

/// Run the interactive loop for one script.
pub async fn cmd_run(script: &Path) -> anyhow::Result<()> {
    let (fallback, fallback_label) = resolve_fallback()?;
    let agent = DeskAgent::from_file(script)
        .with_context(|| format!("failed to load {}", script.display()))?
        .with_fallback(fallback);

    println!();
    println!("  IntentDesk v{}", env!("CARGO_PKG_VERSION"));
    println!("  Script: {}", script.display());
    println!("  Intents: {}", agent.registry().len());
    println!("  Fallback: {fallback_label}");
    println!("  Type your message, ':reload' to re-read the script, or 'exit' to leave.");
    println!();

    let stdin = io::stdin();
    let mut line_buf = String::new();

    loop {
        print!("> ");
        io::stdout().flush().ok();

        line_buf.clear();
        match stdin.read_line(&mut line_buf) {
            Ok(0) => {
                println!();
                info!("EOF received, exiting");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("  Error reading input: {e}");
                continue;
            }
        }

        let trimmed = line_buf.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed == "exit" || trimmed == "quit" {
            info!("user requested exit");
            break;
        }

        if trimmed == ":reload" {
            match std::fs::read_to_string(script) {
                Ok(source) => match agent.reload(&source) {
                    Ok(()) => println!("  Reloaded {} intent(s).", agent.registry().len()),
                    Err(e) => eprintln!("  Reload failed, keeping old registry: {e}"),
                },
                Err(e) => eprintln!("  Cannot read {}: {e}", script.display()),
            }
            continue;
        }

        match agent.handle_turn(trimmed).await {
            Ok(reply) => {
                match (&reply.result, reply.source) {
                    (Some(result), ReplySource::Rules) => {
                        println!("  Intent: {}", result.intent_name);
                    }
                    (Some(result), _) => {
                        println!("  Intent: {} (via fallback)", result.intent_name);
                    }
                    (None, _) => {
                        println!("  Intent: (none)");
                    }
                }
                println!("  {}", reply.response);
                if let Some(state) = reply.result.as_ref().and_then(|r| r.next_state.as_deref()) {
                    println!("  (state -> {state})");
                }
                println!();
            }
            Err(e) => {
                eprintln!("  Error: {e}");
                eprintln!();
            }
        }
    }

    info!("shutting down");
    Ok(())
}
