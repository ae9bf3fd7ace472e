//! CLI for the lookup-bot binary. See `main.rs` for dispatch.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lookup-bot")]
#[command(about = "Allow-listed Telegram lookup bot with a health endpoint")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run with long polling (plus the health server).
    Run {
        /// Bot token; overrides BOT_TOKEN.
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Register WEBHOOK_URL/webhook with Telegram and serve updates over HTTP.
    Webhook {
        /// Bot token; overrides BOT_TOKEN.
        #[arg(short, long)]
        token: Option<String>,
    },
}
