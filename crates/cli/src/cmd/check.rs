//! `check` command: walk the store and report what was found.

use std::path::PathBuf;

use cerulean_blob_store::FsBlobStore;
use color_eyre::eyre::Result;
use tracing::info;

#[derive(clap::Args, Debug)]
pub struct CheckCmd {
    /// Base directory of the blob store.
    #[arg(long)]
    pub dir: PathBuf,
}

impl CheckCmd {
    /// Walk the whole store and print a summary.
    pub fn run(&self) -> Result<()> {
        let store = FsBlobStore::open(&self.dir);
        let summary = store.summary()?;

        info!(
            sidecars = summary.sidecars,
            unidentified = summary.unidentified,
            "blob store walk complete"
        );

        println!("sidecars:     {}", summary.sidecars);
        println!("unidentified: {}", summary.unidentified);
        if let (Some(min), Some(max)) = (summary.min_epoch, summary.max_epoch) {
            println!("epoch range:  {min}..={max}");
        }
        Ok(())
    }
}
