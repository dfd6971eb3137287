//! Protocol constants shared across Cerulean crates.

/// Number of consecutive slots in one epoch.
pub const SLOTS_PER_EPOCH: u64 = 32;

/// Number of consecutive epochs grouped into one period.
///
/// Periods are the coarse retention granularity: stores that group epoch
/// directories under a period directory can prune a whole period in one
/// subtree removal.
pub const EPOCHS_PER_PERIOD: u64 = 4096;

/// The number of bytes in a single blob.
///
/// Fixed by EIP-4844: 4096 field elements of 32 bytes each.
pub const BYTES_PER_BLOB: usize = 131_072;

/// Size of a KZG commitment in bytes (compressed BLS12-381 G1 point).
pub const BYTES_PER_COMMITMENT: usize = 48;

/// Size of a KZG proof in bytes (compressed BLS12-381 G1 point).
pub const BYTES_PER_PROOF: usize = 48;

/// Maximum number of blob sidecars attached to one beacon block (Deneb).
pub const MAX_BLOBS_PER_BLOCK: u64 = 6;
