//! The demonstration/ops binary's library half: argument parsing,
//! configuration, command handlers, and the sample fixture corpus. The
//! binary (`main.rs`) only wires logging and dispatches into this crate,
//! the way `legalis-cli::main` delegates into `legalis::commands`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod fixtures;

pub use cli::{Cli, Commands};
pub use config::Config;
