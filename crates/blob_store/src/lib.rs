//! On-disk blob sidecar store iteration.
//!
//! Beacon nodes keep blob sidecars as individual files grouped by epoch and
//! block root. This crate walks those trees without loading them whole: a
//! [`Layout`] describes what each directory depth means, a
//! [`BlobIdentStream`] lazily yields one [`BlobIdent`] per sidecar, and
//! [`FsBlobStore`] wraps the walks operators actually run.
//!
//! ```text
//! FsBlobStore ── queries ──> BlobIdentStream
//!                                 │ per level
//!                     Populator ──┴── Filter     (Layout)
//!                                 │
//!                               BlobFs           (injected capability)
//! ```
//!
//! Identity comes from paths wherever possible; only layouts whose paths do
//! not encode the epoch fall back to reading eight bytes out of the sidecar
//! file, amortised to one read per block root.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod filter;
pub mod fs;
pub mod ident;
pub mod iterate;
pub mod paths;
pub mod populate;
pub mod storage;

pub use error::{IdentError, IdentificationError, WalkError};
pub use filter::Filter;
pub use fs::{BlobFs, FileReadAt, OsFs};
pub use ident::BlobIdent;
pub use iterate::{
    epoch_root_layout, period_epoch_root_layout, root_flat_layout, BlobIdentStream, Layout,
    LayoutLevel,
};
pub use populate::{Populator, SIDECAR_SLOT_OFFSET};
pub use storage::{FsBlobStore, StoreSummary};
