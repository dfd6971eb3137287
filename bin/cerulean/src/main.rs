#![allow(missing_docs)]
//! Blob store inspector entry point.

use cerulean_cli::{
    args::{Args, Commands},
    logging,
};
use color_eyre::eyre::Result;
use tracing::trace;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::new();

    // This is a drop guard responsible for flushing any remaining logs when
    // the program terminates. It must stay bound for the lifetime of main.
    let _guard = logging::init(args.log_level, args.log_format);

    trace!("Command-line parameters: {args:?}");

    match &args.command {
        Commands::List(cmd) => cmd.run(),
        Commands::Check(cmd) => cmd.run(),
    }
}
