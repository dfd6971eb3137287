//! The layered store walker.
//!
//! A walk is described by a [`Layout`]: one [`LayoutLevel`] per directory
//! depth, the last level applying to leaf files. The walker descends the
//! tree depth first, holding one snapshot of entry names per open
//! directory, and yields each leaf as a fully populated [`BlobIdent`].
//!
//! ```text
//! <base>/
//!   4200/                     level 0: epoch populator + prune filter
//!     0x6f...c2/              level 1: root populator + root-dir filter
//!       0.ssz  1.ssz          level 2: index populator + ssz filter
//! ```
//!
//! Entries that violate the layout grammar are yielded as identification
//! failures and the walk resumes at the next sibling; I/O failures halt
//! the walk.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use cerulean_types::Epoch;

use crate::{
    error::{IdentificationError, WalkError},
    filter::Filter,
    fs::BlobFs,
    ident::BlobIdent,
    populate::{PopulateError, Populator, SlotCache},
};

/// One level of an on-disk layout: how to interpret entries at this depth
/// and which of them the walk admits.
#[derive(Clone, Copy, Debug)]
pub struct LayoutLevel {
    /// Ident fields contributed by entries at this depth.
    pub populator: Populator,
    /// Admission predicate for entries at this depth.
    pub filter: Filter,
}

/// An ordered list of levels describing a directory schema.
pub type Layout = Arc<[LayoutLevel]>;

/// Layout for stores organised as `<epoch>/<root>/<index>.ssz`.
///
/// `before` bounds pruning walks; pass `Epoch::new(0)` to admit every
/// epoch.
pub fn epoch_root_layout(before: Epoch) -> Layout {
    Arc::new([
        LayoutLevel { populator: Populator::Epoch, filter: Filter::before_epoch(before) },
        LayoutLevel { populator: Populator::Root, filter: Filter::RootDir },
        LayoutLevel { populator: Populator::Index, filter: Filter::SszFile },
    ])
}

/// Layout for flat stores organised as `<root>/<index>.ssz`.
///
/// The epoch is not present in the path, so the leaf level peeks at the
/// sidecar bytes (once per root) to recover it.
pub fn root_flat_layout() -> Layout {
    Arc::new([
        LayoutLevel { populator: Populator::Root, filter: Filter::RootDir },
        LayoutLevel { populator: Populator::SlotOncePerRoot, filter: Filter::SszFile },
    ])
}

/// Layout for stores organised as `<period>/<epoch>/<root>/<index>.ssz`.
///
/// The period directory exists for retention bookkeeping only and
/// contributes no ident fields.
pub fn period_epoch_root_layout(before: Epoch) -> Layout {
    Arc::new([
        LayoutLevel { populator: Populator::Noop, filter: Filter::before_period(before) },
        LayoutLevel { populator: Populator::Epoch, filter: Filter::before_epoch(before) },
        LayoutLevel { populator: Populator::Root, filter: Filter::RootDir },
        LayoutLevel { populator: Populator::Index, filter: Filter::SszFile },
    ])
}

/// A lazy walk over one store layout.
///
/// Yields `Ok` for every sidecar whose identity could be fully assembled,
/// `Err` for entries that could not be identified (the walk continues) and
/// for I/O failures (the walk halts and the stream is exhausted). A stream
/// is single use; construct a fresh one to re-walk.
pub struct BlobIdentStream<'a, F: BlobFs> {
    fs: &'a F,
    cache: SlotCache,
    root: Node,
    halted: bool,
}

impl<'a, F: BlobFs> BlobIdentStream<'a, F> {
    /// Start a walk at `base` with the given layout.
    ///
    /// The base directory is listed eagerly; everything below it is read
    /// lazily as the stream is pulled.
    pub fn open(fs: &'a F, base: &Path, layout: Layout) -> Result<Self, WalkError> {
        let entries = fs
            .read_dir(base)
            .map_err(|source| WalkError::ListDir { path: base.to_path_buf(), source })?;
        Ok(Self {
            fs,
            cache: SlotCache::default(),
            root: Node::new(base.to_path_buf(), BlobIdent::default(), layout, 0, entries),
            halted: false,
        })
    }
}

impl<F: BlobFs> Iterator for BlobIdentStream<'_, F> {
    type Item = Result<BlobIdent, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        let item = self.root.next(self.fs, &mut self.cache)?;
        if let Err(err) = &item {
            if !err.is_identification() {
                self.halted = true;
            }
        }
        Some(item)
    }
}

/// One open directory in the descent.
///
/// `child` is a strictly downward edge; dropping a node releases its
/// snapshot and the whole subtree below it.
struct Node {
    path: PathBuf,
    ident: BlobIdent,
    layout: Layout,
    depth: usize,
    entries: Vec<String>,
    offset: usize,
    child: Option<Box<Node>>,
}

impl Node {
    fn new(
        path: PathBuf,
        ident: BlobIdent,
        layout: Layout,
        depth: usize,
        entries: Vec<String>,
    ) -> Self {
        Self { path, ident, layout, depth, entries, offset: 0, child: None }
    }

    fn next<F: BlobFs>(
        &mut self,
        fs: &F,
        cache: &mut SlotCache,
    ) -> Option<Result<BlobIdent, WalkError>> {
        if let Some(child) = self.child.as_mut() {
            if let Some(item) = child.next(fs, cache) {
                return Some(item);
            }
            self.child = None;
        }
        self.advance(fs, cache)
    }

    fn advance<F: BlobFs>(
        &mut self,
        fs: &F,
        cache: &mut SlotCache,
    ) -> Option<Result<BlobIdent, WalkError>> {
        let level = *self.layout.get(self.depth)?;
        let leaf = self.depth + 1 == self.layout.len();
        while self.offset < self.entries.len() {
            let next_path = self.path.join(&self.entries[self.offset]);
            // Step past the entry up front so that an identification
            // failure leaves the cursor on the next sibling.
            self.offset += 1;
            if !level.filter.admits(&next_path) {
                continue;
            }
            let ident = match level.populator.populate(fs, cache, self.ident, &next_path) {
                Ok(ident) => ident,
                Err(PopulateError::Ident(source)) => {
                    return Some(Err(IdentificationError {
                        path: next_path,
                        ident: self.ident,
                        source,
                    }
                    .into()));
                }
                Err(PopulateError::Io(source)) => {
                    return Some(Err(WalkError::ReadBlob { path: next_path, source }));
                }
            };
            if leaf {
                return Some(Ok(ident));
            }
            let entries = match fs.read_dir(&next_path) {
                Ok(entries) => entries,
                Err(source) => return Some(Err(WalkError::ListDir { path: next_path, source })),
            };
            if entries.is_empty() {
                continue;
            }
            let mut child = Box::new(Node::new(
                next_path,
                ident,
                Arc::clone(&self.layout),
                self.depth + 1,
                entries,
            ));
            if let Some(item) = child.next(fs, cache) {
                self.child = Some(child);
                return Some(item);
            }
            // The subtree admitted nothing; move on to the next sibling.
        }
        None
    }
}
