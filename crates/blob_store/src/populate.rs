//! Per-level ident populators.

use std::{io, path::Path};

use cerulean_types::{aliases::BlockRoot, Slot};

use crate::{
    error::IdentError,
    fs::{BlobFs, FileReadAt},
    ident::BlobIdent,
    paths::{epoch_from_path, index_from_path, root_from_path},
};

/// Byte offset of the slot inside a serialized sidecar file.
///
/// The slot is the first field of the block header embedded in the sidecar
/// and is preceded by the 8-byte blob index, the 131 072 blob bytes, the
/// 48-byte KZG commitment and the 48-byte KZG proof. The offset is a
/// contract of the wire format; it is never derived from in-memory struct
/// layout.
pub const SIDECAR_SLOT_OFFSET: u64 = 131_176; // 8 + 131_072 + 48 + 48

/// How one layout level turns a path into ident fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Populator {
    /// Leave the ident untouched. Used for directories that carry no ident
    /// fields, like period groupings.
    Noop,
    /// Read the epoch from a decimal directory name.
    Epoch,
    /// Read the block root from a `0x...` directory name.
    Root,
    /// Read the blob index from a `<index>.ssz` file name.
    Index,
    /// Read the blob index from the file name, then recover the slot (and
    /// epoch) by peeking at the sidecar bytes, once per block root.
    SlotOncePerRoot,
}

/// Populator failures, split by their effect on the walk.
#[derive(Debug)]
pub(crate) enum PopulateError {
    /// The entry violates the layout grammar; skip it and continue.
    Ident(IdentError),
    /// The sidecar bytes could not be read; the store is unreadable.
    Io(io::Error),
}

impl From<IdentError> for PopulateError {
    fn from(err: IdentError) -> Self {
        PopulateError::Ident(err)
    }
}

/// Slot recovered for the most recently peeked block root.
///
/// All sidecars under one root share a slot, so one peek serves every file
/// in that directory. The cache belongs to the stream that owns the walk
/// and is threaded down the descent by unique reference.
#[derive(Debug, Default)]
pub(crate) struct SlotCache {
    last: Option<(BlockRoot, Slot)>,
}

impl Populator {
    pub(crate) fn populate<F: BlobFs>(
        &self,
        fs: &F,
        cache: &mut SlotCache,
        mut ident: BlobIdent,
        path: &Path,
    ) -> Result<BlobIdent, PopulateError> {
        match self {
            Populator::Noop => Ok(ident),
            Populator::Epoch => {
                ident.epoch = epoch_from_path(path)?;
                Ok(ident)
            }
            Populator::Root => {
                ident.root = root_from_path(path)?;
                Ok(ident)
            }
            Populator::Index => {
                ident.index = index_from_path(path)?;
                Ok(ident)
            }
            Populator::SlotOncePerRoot => {
                ident.index = index_from_path(path)?;
                let slot = match cache.last {
                    Some((root, slot)) if root == ident.root => slot,
                    _ => {
                        let slot = slot_from_file(fs, path).map_err(PopulateError::Io)?;
                        cache.last = Some((ident.root, slot));
                        slot
                    }
                };
                ident.slot = Some(slot);
                ident.epoch = slot.epoch();
                Ok(ident)
            }
        }
    }
}

/// Read the slot of the sidecar stored at `path`.
///
/// Opens the file through the capability, reads exactly eight little-endian
/// bytes at [`SIDECAR_SLOT_OFFSET`] and releases the handle before
/// returning.
fn slot_from_file<F: BlobFs>(fs: &F, path: &Path) -> io::Result<Slot> {
    let file = fs.open(path)?;
    let mut raw = [0u8; 8];
    file.read_exact_at(&mut raw, SIDECAR_SLOT_OFFSET)?;
    Ok(Slot::new(u64::from_le_bytes(raw)))
}

#[cfg(test)]
mod tests {
    use cerulean_types::Epoch;

    use super::*;
    use crate::fs::mem::MemFs;

    /// A synthetic sidecar file whose slot bytes encode `slot`.
    fn sidecar_bytes(slot: u64) -> Vec<u8> {
        let offset = SIDECAR_SLOT_OFFSET as usize;
        let mut bytes = vec![0u8; offset + 8];
        bytes[offset..].copy_from_slice(&slot.to_le_bytes());
        bytes
    }

    #[test]
    fn slot_peek_reads_the_fixed_offset() {
        let mut fs = MemFs::default();
        fs.add_file("store/2.ssz", sidecar_bytes(197));

        let mut cache = SlotCache::default();
        let ident = Populator::SlotOncePerRoot
            .populate(&fs, &mut cache, BlobIdent::default(), Path::new("store/2.ssz"))
            .unwrap();

        assert_eq!(ident.slot, Some(Slot::new(197)));
        assert_eq!(ident.epoch, Epoch::new(197 / 32));
        assert_eq!(ident.index, 2);
    }

    #[test]
    fn slot_peek_is_cached_per_root() {
        let mut fs = MemFs::default();
        fs.add_file("store/0.ssz", sidecar_bytes(64));
        fs.add_file("store/1.ssz", sidecar_bytes(64));

        let mut cache = SlotCache::default();
        let mut ident = BlobIdent { root: BlockRoot::repeat_byte(0xaa), ..BlobIdent::default() };

        ident = Populator::SlotOncePerRoot
            .populate(&fs, &mut cache, ident, Path::new("store/0.ssz"))
            .unwrap();
        ident = Populator::SlotOncePerRoot
            .populate(&fs, &mut cache, ident, Path::new("store/1.ssz"))
            .unwrap();

        assert_eq!(fs.opens.get(), 1, "second sidecar of the same root must reuse the cache");
        assert_eq!(fs.reads.get(), 1);
        assert_eq!(ident.epoch, Epoch::new(2));

        // A different root invalidates the cache.
        let other = BlobIdent { root: BlockRoot::repeat_byte(0xbb), ..BlobIdent::default() };
        fs.add_file("store/5.ssz", sidecar_bytes(96));
        Populator::SlotOncePerRoot
            .populate(&fs, &mut cache, other, Path::new("store/5.ssz"))
            .unwrap();
        assert_eq!(fs.opens.get(), 2);
    }

    #[test]
    fn truncated_sidecar_fails_the_peek_with_io() {
        let mut fs = MemFs::default();
        fs.add_file("store/0.ssz", vec![0u8; 64]);

        let mut cache = SlotCache::default();
        let result = Populator::SlotOncePerRoot.populate(
            &fs,
            &mut cache,
            BlobIdent::default(),
            Path::new("store/0.ssz"),
        );
        assert!(matches!(result, Err(PopulateError::Io(_))));
    }

    #[test]
    fn directory_populators_fill_their_field() {
        let fs = MemFs::default();
        let mut cache = SlotCache::default();

        let ident = Populator::Epoch
            .populate(&fs, &mut cache, BlobIdent::default(), Path::new("store/41"))
            .unwrap();
        assert_eq!(ident.epoch, Epoch::new(41));

        let root = BlockRoot::repeat_byte(0x17);
        let ident = Populator::Root
            .populate(&fs, &mut cache, ident, Path::new(&format!("store/41/0x{}", "17".repeat(32))))
            .unwrap();
        assert_eq!(ident.root, root);
        // Earlier levels' fields survive later populators.
        assert_eq!(ident.epoch, Epoch::new(41));

        let same = Populator::Noop
            .populate(&fs, &mut cache, ident, Path::new("anything"))
            .unwrap();
        assert_eq!(same, ident);
    }
}
