//! Path-level codec for the on-disk blob store layout.
//!
//! Directory names are decimal epochs or periods, root directories are
//! `0x` + 64 lowercase hex characters, leaf files are `<index>.ssz`. All
//! decoders here are pure; anything that needs file contents lives in
//! [`populate`](crate::populate).

use std::path::Path;

use alloy_primitives::hex;
use cerulean_types::{aliases::BlockRoot, constants::MAX_BLOBS_PER_BLOCK, Epoch};

use crate::error::IdentError;

/// Extension carried by every sidecar file.
pub(crate) const SSZ_EXT: &str = "ssz";

/// Length of the canonical root string: `0x` plus 64 hex characters.
pub const ROOT_STRING_LEN: usize = 66;

fn dir_name(p: &Path) -> Result<&str, IdentError> {
    p.file_name().and_then(|name| name.to_str()).ok_or_else(|| {
        IdentError::InvalidDirectoryLayout { dir: p.display().to_string() }
    })
}

/// Decode the last path component as an epoch directory name.
pub fn epoch_from_path(p: &Path) -> Result<Epoch, IdentError> {
    let dir = dir_name(p)?;
    dir.parse::<u64>()
        .map(Epoch::new)
        .map_err(|_| IdentError::InvalidDirectoryLayout { dir: dir.to_owned() })
}

/// Decode the last path component as a period directory name.
pub fn period_from_path(p: &Path) -> Result<u64, IdentError> {
    let dir = dir_name(p)?;
    dir.parse::<u64>().map_err(|_| IdentError::InvalidDirectoryLayout { dir: dir.to_owned() })
}

/// Decode the last path component as a block-root directory name.
pub fn root_from_path(p: &Path) -> Result<BlockRoot, IdentError> {
    let dir = p.file_name().and_then(|name| name.to_str()).ok_or_else(|| {
        IdentError::InvalidRootString { input: p.display().to_string() }
    })?;
    string_to_root(dir)
}

/// Decode a `<index>.ssz` basename into a blob index.
pub fn index_from_path(p: &Path) -> Result<u64, IdentError> {
    let name = p.file_name().and_then(|name| name.to_str()).ok_or_else(|| {
        IdentError::NotBlobSsz { name: p.display().to_string() }
    })?;
    if !is_ssz_file(name) {
        return Err(IdentError::NotBlobSsz { name: name.to_owned() });
    }
    let mut pieces = name.split('.');
    let index = match (pieces.next(), pieces.next(), pieces.next()) {
        (Some(stem), Some(_), None) => {
            stem.parse::<u64>().map_err(|_| IdentError::NotBlobSsz { name: name.to_owned() })?
        }
        _ => return Err(IdentError::NotBlobSsz { name: name.to_owned() }),
    };
    if index >= MAX_BLOBS_PER_BLOCK {
        return Err(IdentError::IndexOutOfBounds { index });
    }
    Ok(index)
}

/// `true` when the last path component has the shape of a root directory.
pub fn is_root_dir(p: &Path) -> bool {
    p.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|dir| dir.len() == ROOT_STRING_LEN && dir.starts_with("0x"))
}

/// `true` when `name` carries the sidecar file extension.
pub fn is_ssz_file(name: &str) -> bool {
    Path::new(name).extension().is_some_and(|ext| ext == SSZ_EXT)
}

/// Format a root as its canonical lowercase `0x`-prefixed string.
pub fn root_to_string(root: &BlockRoot) -> String {
    format!("0x{}", hex::encode(root))
}

/// Parse a canonical 66-character root string back into a root.
pub fn string_to_root(s: &str) -> Result<BlockRoot, IdentError> {
    if s.len() != ROOT_STRING_LEN || !s.starts_with("0x") {
        return Err(IdentError::InvalidRootString { input: s.to_owned() });
    }
    let bytes = hex::decode(&s[2..])
        .map_err(|_| IdentError::InvalidRootString { input: s.to_owned() })?;
    Ok(BlockRoot::from_slice(&bytes))
}
