//! Store facade: the listing and pruning queries operators run.

use std::path::{Path, PathBuf};

use cerulean_types::Epoch;
use tracing::warn;

use crate::{
    error::WalkError,
    fs::{BlobFs, OsFs},
    ident::BlobIdent,
    iterate::{epoch_root_layout, period_epoch_root_layout, root_flat_layout, BlobIdentStream},
};

/// The on-disk blob sidecar store.
///
/// Owns the filesystem capability and the base directory. Every query
/// walks the tree through a fresh stream; nothing is cached between
/// queries.
#[derive(Clone, Debug)]
pub struct FsBlobStore<F: BlobFs = OsFs> {
    fs: F,
    base: PathBuf,
}

impl FsBlobStore<OsFs> {
    /// Store over the operating-system filesystem.
    pub fn open(base: impl Into<PathBuf>) -> Self {
        Self::with_fs(OsFs, base)
    }
}

impl<F: BlobFs> FsBlobStore<F> {
    /// Store over an injected filesystem capability.
    pub fn with_fs(fs: F, base: impl Into<PathBuf>) -> Self {
        Self { fs, base: base.into() }
    }

    /// Base directory of the store.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Walk every sidecar of an epoch/root organised store.
    pub fn idents(&self) -> Result<BlobIdentStream<'_, F>, WalkError> {
        BlobIdentStream::open(&self.fs, &self.base, epoch_root_layout(Epoch::new(0)))
    }

    /// Walk sidecars of epochs strictly below `before`.
    pub fn idents_before_epoch(&self, before: Epoch) -> Result<BlobIdentStream<'_, F>, WalkError> {
        BlobIdentStream::open(&self.fs, &self.base, epoch_root_layout(before))
    }

    /// Walk a period/epoch/root organised store, bounded below `before`.
    pub fn idents_before_period(
        &self,
        before: Epoch,
    ) -> Result<BlobIdentStream<'_, F>, WalkError> {
        BlobIdentStream::open(&self.fs, &self.base, period_epoch_root_layout(before))
    }

    /// Walk a flat root-organised store, recovering epochs from the
    /// sidecar bytes.
    pub fn idents_by_root(&self) -> Result<BlobIdentStream<'_, F>, WalkError> {
        BlobIdentStream::open(&self.fs, &self.base, root_flat_layout())
    }

    /// Collect the idents a pruning pass below `before` would remove.
    ///
    /// Entries that cannot be identified are logged and skipped; they are
    /// left in place for an operator to inspect rather than deleted on a
    /// guess.
    pub fn prunable_before_epoch(&self, before: Epoch) -> Result<Vec<BlobIdent>, WalkError> {
        let mut prunable = Vec::new();
        for item in self.idents_before_epoch(before)? {
            match item {
                Ok(ident) => prunable.push(ident),
                Err(WalkError::Identification(err)) => {
                    warn!(
                        path = %err.path().display(),
                        ident = %err.ident(),
                        error = %err.kind(),
                        "skipping unidentifiable blob store entry"
                    );
                }
                Err(err) => return Err(err),
            }
        }
        Ok(prunable)
    }

    /// Walk the whole store and report what was found.
    pub fn summary(&self) -> Result<StoreSummary, WalkError> {
        let mut summary = StoreSummary::default();
        for item in self.idents()? {
            match item {
                Ok(ident) => summary.record(&ident),
                Err(WalkError::Identification(err)) => {
                    summary.unidentified += 1;
                    warn!(
                        path = %err.path().display(),
                        error = %err.kind(),
                        "unidentifiable blob store entry"
                    );
                }
                Err(err) => return Err(err),
            }
        }
        Ok(summary)
    }
}

/// Counters produced by a [`FsBlobStore::summary`] walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreSummary {
    /// Sidecars whose identity was fully assembled.
    pub sidecars: usize,
    /// Entries skipped because they violate the layout grammar.
    pub unidentified: usize,
    /// Lowest epoch seen, when any sidecar was found.
    pub min_epoch: Option<Epoch>,
    /// Highest epoch seen, when any sidecar was found.
    pub max_epoch: Option<Epoch>,
}

impl StoreSummary {
    fn record(&mut self, ident: &BlobIdent) {
        self.sidecars += 1;
        let epoch = ident.epoch();
        self.min_epoch = Some(self.min_epoch.map_or(epoch, |cur| cur.min(epoch)));
        self.max_epoch = Some(self.max_epoch.map_or(epoch, |cur| cur.max(epoch)));
    }
}
