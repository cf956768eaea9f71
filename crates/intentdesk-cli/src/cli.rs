//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// IntentDesk — a pattern-matching customer-service agent driven by an
/// intent DSL script.
#[derive(Debug, Parser)]
#[command(name = "intentdesk", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a script and report its intents without running anything.
    Check {
        /// Path to the `.dsl` script.
        script: PathBuf,
    },

    /// Run the interactive customer-service loop.
    Run {
        /// Path to the `.dsl` script.
        script: PathBuf,
    },

    /// Match a single input against the script and print the result as JSON.
    Match {
        /// Path to the `.dsl` script.
        script: PathBuf,
        /// The user input to classify.
        input: String,
    },
}
