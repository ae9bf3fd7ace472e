//! Binary for the lookup bot.

use anyhow::Result;
use clap::Parser;
use lookup_bot::{run_bot, run_webhook, BotConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => run_bot(BotConfig::load(token)?).await,
        Commands::Webhook { token } => run_webhook(BotConfig::load(token)?).await,
    }
}
