// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Keyspace schema capture and content-addressed backup

use crate::cql::{CqlRunner, QueryError};
use cask_adapters::{PodExecutor, UploadError, Uploader};
use cask_core::{ExecTarget, SchemaDigest};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the schema artifact under its digest directory.
pub const SCHEMA_FILE: &str = "schema.cql";

/// Errors from schema backup operations
#[derive(Debug, Error)]
pub enum BackupError {
    #[error(transparent)]
    Query(#[from] QueryError),
    /// The artifact could not be persisted; the backup did not happen.
    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Captures keyspace schemas and persists them under digest-addressed paths.
#[derive(Clone)]
pub struct SchemaBackup<E, U> {
    runner: CqlRunner<E>,
    uploader: U,
}

impl<E: PodExecutor, U: Uploader> SchemaBackup<E, U> {
    pub fn new(runner: CqlRunner<E>, uploader: U) -> Self {
        Self { runner, uploader }
    }

    /// Describe the keyspace schema on one representative pod and return the
    /// exact bytes together with their content digest.
    pub async fn describe(
        &self,
        target: &ExecTarget,
        keyspace: &str,
    ) -> Result<(Vec<u8>, SchemaDigest), BackupError> {
        let statement = format!("DESC {};", keyspace);
        let schema = self.runner.run(target, &statement).await?;
        let digest = SchemaDigest::of(&schema);
        Ok((schema, digest))
    }

    /// Back up the keyspace schema and return the digest-addressed base path.
    ///
    /// Sibling artifacts of the same schema version (data snapshots, etc.)
    /// key off the returned base path. Unchanged schema content maps to the
    /// same path, so re-running a backup re-writes the identical artifact
    /// instead of accumulating copies.
    pub async fn backup(
        &self,
        target: &ExecTarget,
        cluster: &str,
        keyspace: &str,
        dst_root: &Path,
    ) -> Result<PathBuf, BackupError> {
        let (schema, digest) = self.describe(target, keyspace).await?;
        let base = backup_base_path(dst_root, &target.namespace, cluster, keyspace, &digest);
        self.uploader.upload(&base.join(SCHEMA_FILE), &schema).await?;
        tracing::info!(
            pod = %target.pod,
            %keyspace,
            digest = %digest,
            path = %base.display(),
            "schema backed up"
        );
        Ok(base)
    }
}

/// Destination base path for one schema version:
/// `<dst_root>/<namespace>/<cluster>/<keyspace>/<digest>`.
pub fn backup_base_path(
    dst_root: &Path,
    namespace: &str,
    cluster: &str,
    keyspace: &str,
    digest: &SchemaDigest,
) -> PathBuf {
    dst_root.join(namespace).join(cluster).join(keyspace).join(digest.as_str())
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
