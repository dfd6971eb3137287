//! Slot and epoch primitives.
//!
//! Thin `u64` newtypes so slot and epoch arithmetic cannot be mixed up at
//! call sites. Conversions follow the consensus clock: an epoch is
//! `SLOTS_PER_EPOCH` consecutive slots and a period is `EPOCHS_PER_PERIOD`
//! consecutive epochs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{EPOCHS_PER_PERIOD, SLOTS_PER_EPOCH};

/// A consensus time slot.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Slot(u64);

impl Slot {
    /// Create a slot from its raw number.
    pub const fn new(slot: u64) -> Self {
        Self(slot)
    }

    /// Raw slot number.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Epoch this slot belongs to.
    pub const fn epoch(&self) -> Epoch {
        Epoch::new(self.0 / SLOTS_PER_EPOCH)
    }
}

impl From<u64> for Slot {
    fn from(slot: u64) -> Self {
        Self::new(slot)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A consensus epoch.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Epoch(u64);

impl Epoch {
    /// Create an epoch from its raw number.
    pub const fn new(epoch: u64) -> Self {
        Self(epoch)
    }

    /// Raw epoch number.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Period this epoch belongs to.
    pub const fn period(&self) -> u64 {
        self.0 / EPOCHS_PER_PERIOD
    }

    /// `true` when this is the first epoch of its period.
    pub const fn is_period_start(&self) -> bool {
        self.0 % EPOCHS_PER_PERIOD == 0
    }
}

impl From<u64> for Epoch {
    fn from(epoch: u64) -> Self {
        Self::new(epoch)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_to_epoch_follows_the_consensus_clock() {
        assert_eq!(Slot::new(0).epoch(), Epoch::new(0));
        assert_eq!(Slot::new(31).epoch(), Epoch::new(0));
        assert_eq!(Slot::new(32).epoch(), Epoch::new(1));
        assert_eq!(Slot::new(64).epoch(), Epoch::new(2));
    }

    #[test]
    fn epoch_to_period_boundaries() {
        assert_eq!(Epoch::new(0).period(), 0);
        assert_eq!(Epoch::new(4095).period(), 0);
        assert_eq!(Epoch::new(4096).period(), 1);
        assert!(Epoch::new(4096).is_period_start());
        assert!(!Epoch::new(4097).is_period_start());
    }

    #[test]
    fn display_is_the_raw_number() {
        assert_eq!(Slot::new(12).to_string(), "12");
        assert_eq!(Epoch::new(4096).to_string(), "4096");
    }
}
