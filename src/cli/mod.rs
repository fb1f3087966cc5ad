//! CLI definitions và command implementations cho QuoteVault.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// QuoteVault - Pocket vault for your quote collection
#[derive(Parser)]
#[command(name = "qv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a random quote from the selected category
    Show {
        /// Pick from this category instead of the persisted selection
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Add a new quote to the collection
    Add {
        /// Quote text
        text: String,

        /// Quote category
        category: String,
    },

    /// List all categories in the collection
    Categories,

    /// Select the active category filter ("all" disables filtering)
    Filter {
        /// Category name, or "all"
        category: String,
    },

    /// Export the collection to a JSON file
    Export {
        /// Output path (default: quotes.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import quotes from a JSON file and append them to the collection
    Import {
        /// File containing a JSON array of {text, category} records
        file: PathBuf,
    },

    /// Run one sync cycle against the quote server
    Sync,

    /// Sync with the quote server periodically
    Watch {
        /// Seconds between sync cycles (default: from config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many cycles (default: run until killed)
        #[arg(short, long)]
        count: Option<u64>,
    },

    /// Show store location, collection stats, and last sync time
    Status,
}
