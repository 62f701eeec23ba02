// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster-wide table truncation with bounded parallelism

use crate::cql::{CqlRunner, QueryError};
use cask_adapters::PodExecutor;
use cask_core::ExecTarget;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// One failed truncation step, with enough context to locate it.
#[derive(Debug, Error)]
pub enum TruncateError {
    #[error("truncate of {keyspace}.{table} on {pod} failed: {source}")]
    Step {
        pod: String,
        keyspace: String,
        table: String,
        #[source]
        source: QueryError,
    },
    #[error("truncate worker for {pod} aborted: {message}")]
    Worker { pod: String, message: String },
}

/// Aggregate failure of a truncation run.
///
/// Every pod task has finished by the time this is returned.
#[derive(Debug, Error)]
#[error("truncation failed on {} pod(s)", failures.len())]
pub struct TruncateFailed {
    pub failures: Vec<TruncateError>,
}

/// Truncate `tables` in `keyspace` on every target pod.
///
/// One task per pod, at most `limit` (default: all pods) running at once;
/// adding a worker blocks while the cap is reached. Tables are truncated
/// strictly in the given order within a pod. The first failure cancels work
/// that has not started yet — a half-truncated cluster is worse than a
/// stopped run — while statements already in flight finish, and the call
/// returns only once every task has been joined.
pub async fn truncate_tables<E: PodExecutor>(
    runner: &CqlRunner<E>,
    targets: Vec<ExecTarget>,
    keyspace: &str,
    tables: &[String],
    limit: Option<usize>,
) -> Result<(), TruncateFailed> {
    let permits = limit.unwrap_or(targets.len()).max(1);
    let semaphore = Arc::new(Semaphore::new(permits));
    let cancel = CancellationToken::new();

    let mut workers = Vec::with_capacity(targets.len());
    for target in targets {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => break, // the semaphore is never closed
        };
        let runner = runner.clone();
        let cancel = cancel.clone();
        let keyspace = keyspace.to_string();
        let tables = tables.to_vec();
        let pod = target.pod.clone();
        let handle = tokio::spawn(async move {
            let _permit = permit;
            truncate_on_pod(&runner, &target, &keyspace, &tables, &cancel).await
        });
        workers.push((pod, handle));
    }

    let mut failures = Vec::new();
    for (pod, handle) in workers {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(failure)) => failures.push(failure),
            Err(err) => {
                cancel.cancel();
                tracing::error!(%pod, error = %err, "truncate worker aborted");
                failures.push(TruncateError::Worker { pod, message: err.to_string() });
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(TruncateFailed { failures })
    }
}

async fn truncate_on_pod<E: PodExecutor>(
    runner: &CqlRunner<E>,
    target: &ExecTarget,
    keyspace: &str,
    tables: &[String],
    cancel: &CancellationToken,
) -> Result<(), TruncateError> {
    for table in tables {
        if cancel.is_cancelled() {
            tracing::info!(
                pod = %target.pod,
                %keyspace,
                "skipping remaining truncations after failure elsewhere"
            );
            return Ok(());
        }
        tracing::info!(pod = %target.pod, %keyspace, %table, "truncating table");
        let statement = format!("TRUNCATE {}.{};", keyspace, table);
        if let Err(source) = runner.run(target, &statement).await {
            tracing::error!(
                pod = %target.pod,
                %keyspace,
                %table,
                error = %source,
                "truncate failed, cancelling outstanding work"
            );
            cancel.cancel();
            return Err(TruncateError::Step {
                pod: target.pod.clone(),
                keyspace: keyspace.to_string(),
                table: table.clone(),
                source,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "truncate_tests.rs"]
mod tests;
