//! Argument parsing, in the same shape as `legalis::Cli`/`Commands`: a
//! top-level struct carrying global flags plus a subcommand enum.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "kite", version, about = "Kite case-law aggregation core: ops CLI")]
pub struct Cli {
    /// Increase log verbosity; repeatable (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all logging but errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file; defaults to `./kite.toml` if present.
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Runs the full ingest -> validate -> extract -> graph -> search walk
    /// over the bundled sample corpus.
    Demo,

    /// Validates the bundled sample corpus and prints one report per case.
    Validate,

    /// Runs a full-text search against the bundled sample corpus.
    Search {
        text: String,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Returns prefix suggestions against the bundled sample corpus.
    Suggest {
        partial: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Extracts and normalizes citations from arbitrary text.
    Cite {
        text: String,
    },
}
