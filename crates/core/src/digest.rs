// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Content digests for schema artifacts

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use smol_str::SmolStr;

/// Number of hex characters kept from the full SHA-256 sum.
pub const DIGEST_LEN: usize = 6;

/// Short content hash addressing one version of a keyspace schema.
///
/// Byte-identical schema text always maps to the same digest, so repeated
/// backups of an unchanged keyspace land under the same destination path
/// instead of accumulating copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDigest(SmolStr);

impl SchemaDigest {
    /// Digest of the exact byte sequence produced by the describe command.
    pub fn of(bytes: &[u8]) -> Self {
        let hex = format!("{:x}", Sha256::digest(bytes));
        Self(SmolStr::new(&hex[..DIGEST_LEN]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SchemaDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "digest_tests.rs"]
mod tests;
