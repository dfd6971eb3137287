//! Command-line arguments for the store inspector.

use clap::{Parser, Subcommand};

use crate::{
    cmd::{check::CheckCmd, list::ListCmd},
    logging::{LogFormat, LogLevel},
};

#[derive(Parser, Debug)]
#[command(name = "cerulean", about = "Inspect an on-disk blob sidecar store", version)]
pub struct Args {
    /// Minimum severity of emitted logs.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LogLevel,

    /// Log output format.
    #[arg(long, global = true, default_value = "plaintext")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Args {
    /// Parse the process arguments.
    pub fn new() -> Args {
        Args::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the identity of every sidecar in the store.
    List(ListCmd),
    /// Walk the store and report a summary.
    Check(CheckCmd),
}
