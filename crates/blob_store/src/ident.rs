//! On-disk identity of a blob sidecar.

use std::fmt;

use cerulean_types::{aliases::BlockRoot, Epoch, Slot};

use crate::paths::root_to_string;

/// Identity of one blob sidecar in the store.
///
/// Idents are assembled level by level as the walker descends: an epoch
/// directory contributes the epoch, a root directory the root, the leaf
/// file the index. Layouts without an epoch directory recover the slot
/// (and from it the epoch) by peeking at the sidecar bytes, in which case
/// `slot` is also populated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlobIdent {
    pub(crate) epoch: Epoch,
    pub(crate) root: BlockRoot,
    pub(crate) index: u64,
    pub(crate) slot: Option<Slot>,
}

impl BlobIdent {
    /// Epoch the sidecar's block belongs to.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Root of the block the sidecar is attached to.
    pub fn root(&self) -> BlockRoot {
        self.root
    }

    /// Index of the sidecar within its block.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Slot recovered from the sidecar bytes, when the walk had to peek.
    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    /// Canonical 66-character `0x`-prefixed root string.
    pub fn root_string(&self) -> String {
        root_to_string(&self.root)
    }
}

impl fmt::Display for BlobIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch={} root={} index={}", self.epoch, self.root_string(), self.index)?;
        if let Some(slot) = self.slot {
            write!(f, " slot={slot}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_structured_fields() {
        let ident = BlobIdent {
            epoch: Epoch::new(7),
            root: BlockRoot::repeat_byte(0xab),
            index: 3,
            slot: None,
        };
        let rendered = ident.to_string();
        assert!(rendered.starts_with("epoch=7 root=0xabab"));
        assert!(rendered.ends_with("index=3"));
    }

    #[test]
    fn display_appends_slot_when_present() {
        let ident = BlobIdent { slot: Some(Slot::new(224)), ..BlobIdent::default() };
        assert!(ident.to_string().ends_with("slot=224"));
    }

    #[test]
    fn root_string_is_canonical_length() {
        assert_eq!(BlobIdent::default().root_string().len(), 66);
    }
}
