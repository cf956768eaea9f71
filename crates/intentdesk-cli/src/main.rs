//! IntentDesk CLI entry point.

mod check;
mod cli;
mod helpers;
mod oneshot;
mod repl;

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::helpers::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("warn");

    let cli = Cli::parse();
    match cli.command {
        Command::Check { script } => check::cmd_check(&script),
        Command::Run { script } => repl::cmd_run(&script).await,
        Command::Match { script, input } => oneshot::cmd_match(&script, &input).await,
    }
}
