pub type B256 = alloy_primitives::B256;

/// 32-byte hash identifying a beacon block.
pub type BlockRoot = B256;
