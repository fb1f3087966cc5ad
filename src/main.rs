//! QuoteVault CLI - Pocket vault for your quote collection
//!
//! Lưu collection quotes dưới dạng flat JSON array trên disk, filter
//! theo category, import/export file JSON và sync định kỳ với quote
//! server. Nguyên tắc: store là value object thuần, mọi render nằm ở
//! command layer.

mod cli;
mod config;
mod storage;
mod sync;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("quotevault={}", log_level).parse()?),
        )
        .with_target(false)
        .init();

    let config = Config::load_default()?;

    match cli.command {
        Commands::Show { category } => {
            cli::commands::show(&config, category.as_deref())?;
        }
        Commands::Add { text, category } => {
            cli::commands::add(&config, &text, &category)?;
        }
        Commands::Categories => {
            cli::commands::categories(&config)?;
        }
        Commands::Filter { category } => {
            cli::commands::filter(&config, &category)?;
        }
        Commands::Export { output } => {
            cli::commands::export(&config, output)?;
        }
        Commands::Import { file } => {
            cli::commands::import(&config, &file)?;
        }
        Commands::Sync => {
            cli::commands::sync(&config)?;
        }
        Commands::Watch { interval, count } => {
            cli::commands::watch(&config, interval, count)?;
        }
        Commands::Status => {
            cli::commands::status(&config)?;
        }
    }

    Ok(())
}
