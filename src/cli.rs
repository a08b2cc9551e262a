use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jvdoc-nav")]
#[command(about = "Search and navigate generated JavaScript API docs", long_about = None)]
pub struct Cli {
    /// Widget config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up one exact symbol name and print its document location
    Resolve {
        /// Docs directory, `index.js`, or JSON host data
        docs: PathBuf,
        symbol: String,
        #[arg(short = 'b', long)]
        base_dir: Option<String>,
    },
    /// List suggestions for a partial symbol name
    Suggest {
        docs: PathBuf,
        token: String,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Read symbols from stdin, one per line, confirming each in the search box
    Session {
        docs: PathBuf,
        #[arg(short = 'b', long)]
        base_dir: Option<String>,
    },
}
