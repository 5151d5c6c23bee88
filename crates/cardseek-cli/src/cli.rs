//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Search trading-card JSON files with a compact query language.
///
/// Examples: `set:OP10 name~luffy`, `g:FAB -r:Common`, `(t:Leader OR t:Character) foil:true`
#[derive(Parser, Debug)]
#[command(name = "cardseek", author, version, about)]
pub struct Args {
    /// Query text; empty matches every card
    #[arg(default_value = "")]
    pub query: String,

    /// Card file or directory of card files to load; repeat for more
    #[arg(long = "cards", value_name = "PATH", action = ArgAction::Append)]
    pub cards: Vec<PathBuf>,

    /// YAML store configuration (directory and file prefix)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How to print matching cards
    #[arg(long, value_enum, default_value_t = OutputFormat::Names)]
    pub output: OutputFormat,

    /// Print only the number of matching cards
    #[arg(long)]
    pub count: bool,

    /// List the searchable field aliases and exit
    #[arg(long)]
    pub fields: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Rendering of search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One display name per line
    #[default]
    Names,
    /// Pretty-printed JSON array of cards
    Json,
    /// YAML sequence of cards
    Yaml,
}

impl Args {
    /// Log filter implied by `-v` flags.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
