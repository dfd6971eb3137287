//! `list` command: print the identity of every sidecar in the store.

use std::path::PathBuf;

use cerulean_blob_store::{FsBlobStore, WalkError};
use cerulean_types::Epoch;
use clap::ValueEnum;
use color_eyre::eyre::Result;
use tracing::warn;

#[derive(clap::Args, Debug)]
pub struct ListCmd {
    /// Base directory of the blob store.
    #[arg(long)]
    pub dir: PathBuf,

    /// Directory schema of the store.
    #[arg(long, value_enum, default_value = "epoch")]
    pub layout: LayoutKind,

    /// Only list sidecars from epochs strictly below this bound.
    ///
    /// Ignored by the flat layout, whose paths do not encode epochs.
    #[arg(long)]
    pub before_epoch: Option<u64>,
}

/// On-disk schema variants the inspector understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LayoutKind {
    /// `<epoch>/<root>/<index>.ssz`
    Epoch,
    /// `<period>/<epoch>/<root>/<index>.ssz`
    Period,
    /// `<root>/<index>.ssz`, epoch recovered from sidecar bytes
    Flat,
}

impl ListCmd {
    /// Walk the store and print one line per sidecar.
    pub fn run(&self) -> Result<()> {
        let store = FsBlobStore::open(&self.dir);
        let before = Epoch::new(self.before_epoch.unwrap_or(0));
        let stream = match self.layout {
            LayoutKind::Epoch => store.idents_before_epoch(before)?,
            LayoutKind::Period => store.idents_before_period(before)?,
            LayoutKind::Flat => store.idents_by_root()?,
        };

        for item in stream {
            match item {
                Ok(ident) => println!("{ident}"),
                Err(WalkError::Identification(err)) => {
                    warn!(
                        path = %err.path().display(),
                        error = %err.kind(),
                        "skipping unidentifiable entry"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}
