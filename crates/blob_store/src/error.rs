//! Error channels for store walks.
//!
//! Two kinds of failure are kept deliberately separate. A single directory
//! entry that cannot be interpreted is surfaced as an
//! [`IdentificationError`] and the walk resumes at the next sibling. A
//! store that cannot be read at all (a directory listing or a file read
//! failing) is fatal to the walk. Callers branch on
//! [`WalkError::is_identification`] instead of inspecting causes.

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::ident::BlobIdent;

/// A directory entry that does not conform to the on-disk layout grammar.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IdentError {
    /// Directory name is not a decimal epoch or period.
    #[error("could not decode {dir:?} as an epoch or period directory")]
    InvalidDirectoryLayout {
        /// Offending directory name.
        dir: String,
    },

    /// Directory name is not a canonical 66-character root string.
    #[error("could not parse {input:?} as a block root")]
    InvalidRootString {
        /// Offending directory name.
        input: String,
    },

    /// File name is not `<index>.ssz`.
    #[error("{name:?} is not a blob sidecar file")]
    NotBlobSsz {
        /// Offending file name.
        name: String,
    },

    /// Blob index at or above the per-block maximum.
    #[error("blob index {index} is out of bounds")]
    IndexOutOfBounds {
        /// The rejected index.
        index: u64,
    },
}

/// Failure to determine the identity of one on-disk entry.
///
/// Carries the offending path and the partially assembled ident so callers
/// can log structured context and move on.
#[derive(Debug, Error)]
#[error("failed to identify blob sidecar, ignoring sub-path: path={path:?} {ident} cause={source}")]
pub struct IdentificationError {
    pub(crate) path: PathBuf,
    pub(crate) ident: BlobIdent,
    #[source]
    pub(crate) source: IdentError,
}

impl IdentificationError {
    /// Path of the entry that could not be identified.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ident fields recovered before the failure.
    pub fn ident(&self) -> &BlobIdent {
        &self.ident
    }

    /// The layout violation that caused the failure.
    pub fn kind(&self) -> &IdentError {
        &self.source
    }
}

/// Any failure observed while walking the store.
#[derive(Debug, Error)]
pub enum WalkError {
    /// One entry could not be identified. The walk has already advanced
    /// past it; the next pull resumes at the following sibling.
    #[error(transparent)]
    Identification(#[from] IdentificationError),

    /// A directory listing failed; the store is unreadable and the walk
    /// halts.
    #[error("could not list blob store directory {path:?}")]
    ListDir {
        /// Directory that could not be listed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A sidecar file that passed filtering could not be read; the walk
    /// halts.
    #[error("could not read blob sidecar file {path:?}")]
    ReadBlob {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl WalkError {
    /// `true` for the skip-and-continue channel, `false` for fatal errors.
    pub fn is_identification(&self) -> bool {
        matches!(self, WalkError::Identification(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identification_errors_are_the_resumable_channel() {
        let err = WalkError::from(IdentificationError {
            path: PathBuf::from("store/notanumber"),
            ident: BlobIdent::default(),
            source: IdentError::InvalidDirectoryLayout { dir: "notanumber".into() },
        });
        assert!(err.is_identification());

        let fatal = WalkError::ListDir {
            path: PathBuf::from("store"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(!fatal.is_identification());
    }

    #[test]
    fn identification_display_includes_path_and_partial_ident() {
        let err = IdentificationError {
            path: PathBuf::from("store/5/bogus"),
            ident: BlobIdent::default(),
            source: IdentError::InvalidRootString { input: "bogus".into() },
        };
        let rendered = err.to_string();
        assert!(rendered.contains("store/5/bogus"));
        assert!(rendered.contains("epoch=0"));
    }
}
