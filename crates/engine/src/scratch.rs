// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scratch file staging inside cluster pods

use crate::cql::QueryError;
use cask_adapters::PodExecutor;
use cask_core::ExecTarget;

/// Directory holding staged statement files inside the container.
const SCRATCH_DIR: &str = "/tmp";

/// Stage `content` as a scratch file inside the target container.
///
/// The name is random per invocation so concurrent runs against the same
/// pod cannot collide.
pub(crate) async fn stage<E: PodExecutor>(
    executor: &E,
    target: &ExecTarget,
    content: &[u8],
) -> Result<String, QueryError> {
    let path = format!("{}/{}.cql", SCRATCH_DIR, nanoid::nanoid!(19));
    let command = format!("cp /dev/stdin {}", path);
    let output = executor
        .exec(target, &command, Some(content))
        .await
        .map_err(|e| QueryError::Stage(e.to_string()))?;
    if !output.stderr.is_empty() {
        return Err(QueryError::Stage(String::from_utf8_lossy(&output.stderr).into_owned()));
    }
    Ok(path)
}

/// Remove a staged scratch file.
///
/// Best-effort: a leftover scratch file must never fail the query run that
/// produced it, so failures are logged and swallowed.
pub(crate) async fn cleanup<E: PodExecutor>(executor: &E, target: &ExecTarget, path: &str) {
    let command = format!("rm {}", path);
    match executor.exec(target, &command, None).await {
        Ok(output) if output.stderr.is_empty() => {}
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(pod = %target.pod, path, stderr = %stderr, "scratch file removal reported errors");
        }
        Err(e) => {
            tracing::warn!(pod = %target.pod, path, error = %e, "scratch file removal failed");
        }
    }
}
