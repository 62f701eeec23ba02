// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster identity lookup

use crate::cql::QueryError;
use cask_adapters::PodExecutor;
use cask_core::ExecTarget;

/// Resolve the cluster's display name by running `nodetool describecluster`
/// inside the target pod.
///
/// The name feeds backup path construction only; it is not otherwise
/// interpreted.
pub async fn cluster_name<E: PodExecutor>(
    executor: &E,
    target: &ExecTarget,
) -> Result<String, QueryError> {
    let output = executor.exec(target, "nodetool describecluster", None).await?;
    if !output.stderr.is_empty() {
        return Err(QueryError::Remote(String::from_utf8_lossy(&output.stderr).into_owned()));
    }

    let text = String::from_utf8_lossy(&output.stdout);
    let name = text
        .lines()
        .find_map(|line| line.trim().strip_prefix("Name:"))
        .map(str::trim)
        .filter(|name| !name.is_empty());
    match name {
        Some(name) => Ok(name.to_string()),
        None => Err(QueryError::ClusterName(
            "nodetool describecluster did not report a name".to_string(),
        )),
    }
}

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod tests;
