// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot CQL execution against a single pod

use crate::scratch;
use cask_adapters::{ExecError, PodExecutor};
use cask_core::ExecTarget;
use thiserror::Error;

/// cqlsh prints this when it cannot persist command history inside the
/// container; it is noise in front of the real output.
const HISTORY_WARNING: &str = "Warning: Cannot create directory at `/home/cassandra/.cassandra`. Command history will not be saved.";

/// Errors from running a statement inside a pod
#[derive(Debug, Error)]
pub enum QueryError {
    /// The remote tool reported output on its error stream; carried verbatim.
    #[error("remote command failed: {0}")]
    Remote(String),
    /// The scratch file holding the statement could not be staged.
    #[error("failed to stage statement file: {0}")]
    Stage(String),
    /// The cluster name could not be resolved from nodetool output.
    #[error("could not resolve cluster name: {0}")]
    ClusterName(String),
    /// The exec transport failed.
    #[error(transparent)]
    Transport(#[from] ExecError),
}

/// Runs single CQL statements inside cluster pods.
///
/// Each run stages the statement as a scratch file, executes
/// `cqlsh -f <file>`, and removes the file again whatever the outcome.
#[derive(Clone)]
pub struct CqlRunner<E> {
    executor: E,
}

impl<E: PodExecutor> CqlRunner<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// The underlying executor, for non-CQL commands against the same pods.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run one statement and return its stdout.
    ///
    /// Any content on stderr fails the run even when the transport reported
    /// no error.
    pub async fn run(&self, target: &ExecTarget, statement: &str) -> Result<Vec<u8>, QueryError> {
        let scratch_path = scratch::stage(&self.executor, target, statement.as_bytes()).await?;

        let command = format!("cqlsh -f {}", scratch_path);
        let result = self.executor.exec(target, &command, None).await;

        // The scratch file goes away no matter how the run went.
        scratch::cleanup(&self.executor, target, &scratch_path).await;

        let output = result?;
        if !output.stderr.is_empty() {
            return Err(QueryError::Remote(String::from_utf8_lossy(&output.stderr).into_owned()));
        }
        Ok(strip_history_warning(output.stdout))
    }
}

/// Remove the first exact occurrence of the history warning, leaving all
/// other content untouched.
fn strip_history_warning(stdout: Vec<u8>) -> Vec<u8> {
    let text = String::from_utf8_lossy(&stdout);
    if text.contains(HISTORY_WARNING) {
        text.replacen(HISTORY_WARNING, "", 1).into_bytes()
    } else {
        stdout
    }
}

#[cfg(test)]
#[path = "cql_tests.rs"]
mod tests;
