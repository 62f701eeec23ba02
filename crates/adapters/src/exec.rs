// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote command execution inside cluster pods

use async_trait::async_trait;
use cask_core::ExecTarget;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, AttachParams};
use kube::Client;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

/// Errors from remote command execution
#[derive(Debug, Clone, Error)]
pub enum ExecError {
    /// The exec transport itself failed (connection, attach, streaming).
    #[error("transport error: {0}")]
    Transport(String),
}

/// Captured output of one remote command.
///
/// `stderr` is kept separate from the error type: the tools driven here
/// report failure on their error stream while still exiting cleanly, so
/// callers treat any stderr content as a failure signal.
#[derive(Debug, Clone, Default)]
pub struct ExecOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ExecOutput {
    /// Output carrying only stdout content.
    pub fn with_stdout(bytes: impl Into<Vec<u8>>) -> Self {
        Self { stdout: bytes.into(), stderr: Vec::new() }
    }

    /// Output carrying only stderr content.
    pub fn with_stderr(bytes: impl Into<Vec<u8>>) -> Self {
        Self { stdout: Vec::new(), stderr: bytes.into() }
    }
}

/// Adapter for running a command inside a cluster pod.
#[async_trait]
pub trait PodExecutor: Clone + Send + Sync + 'static {
    /// Run `command` through `sh -c` inside the target container, streaming
    /// `stdin` into the process when present.
    async fn exec(
        &self,
        target: &ExecTarget,
        command: &str,
        stdin: Option<&[u8]>,
    ) -> Result<ExecOutput, ExecError>;
}

/// Executor speaking the Kubernetes exec subprotocol.
///
/// Safe for concurrent use: each call attaches its own exec session through
/// a shared [`Client`].
#[derive(Clone)]
pub struct KubeExecutor {
    client: Client,
}

impl KubeExecutor {
    /// Build an executor from the ambient kubeconfig or in-cluster
    /// environment.
    pub async fn connect() -> Result<Self, ExecError> {
        let client = Client::try_default()
            .await
            .map_err(|e| ExecError::Transport(format!("failed to create kube client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PodExecutor for KubeExecutor {
    async fn exec(
        &self,
        target: &ExecTarget,
        command: &str,
        stdin: Option<&[u8]>,
    ) -> Result<ExecOutput, ExecError> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), &target.namespace);
        let params = AttachParams::default()
            .container(&target.container)
            .stdin(stdin.is_some())
            .stdout(true)
            .stderr(true);

        tracing::debug!(pod = %target.pod, %command, "exec");
        let mut attached = pods
            .exec(&target.pod, vec!["sh", "-c", command], &params)
            .await
            .map_err(|e| ExecError::Transport(format!("exec in {} failed: {}", target, e)))?;

        // Stream the input fully, then close the channel so the remote
        // process sees EOF before we start draining its output.
        if let Some(data) = stdin {
            if let Some(mut writer) = attached.stdin() {
                writer.write_all(data).await.map_err(|e| {
                    ExecError::Transport(format!("stdin stream to {} failed: {}", target, e))
                })?;
                writer.shutdown().await.map_err(|e| {
                    ExecError::Transport(format!("stdin close for {} failed: {}", target, e))
                })?;
            }
        }

        let stdout_reader = attached.stdout();
        let stderr_reader = attached.stderr();
        let (stdout, stderr) = tokio::join!(read_stream(stdout_reader), read_stream(stderr_reader));
        let stdout = stdout
            .map_err(|e| ExecError::Transport(format!("stdout read from {} failed: {}", target, e)))?;
        let stderr = stderr
            .map_err(|e| ExecError::Transport(format!("stderr read from {} failed: {}", target, e)))?;

        attached
            .join()
            .await
            .map_err(|e| ExecError::Transport(format!("exec in {} did not complete: {}", target, e)))?;

        Ok(ExecOutput { stdout, stderr })
    }
}

async fn read_stream(reader: Option<impl AsyncRead + Unpin>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut reader) = reader {
        reader.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ExecError, ExecOutput, PodExecutor};
    use async_trait::async_trait;
    use cask_core::ExecTarget;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Recorded exec invocation
    #[derive(Debug, Clone)]
    pub struct ExecCall {
        pub target: ExecTarget,
        pub command: String,
        pub stdin: Option<Vec<u8>>,
    }

    struct Rule {
        pod: Option<String>,
        needle: String,
        result: Result<ExecOutput, ExecError>,
    }

    struct FakeState {
        calls: Vec<ExecCall>,
        files: HashMap<String, Vec<u8>>,
        rules: Vec<Rule>,
    }

    /// Fake pod executor for testing.
    ///
    /// Emulates just enough of the remote side to exercise the query
    /// lifecycle: `cp /dev/stdin <path>` stores stdin under `<path>`,
    /// `rm <path>` removes it, and `cqlsh -f <path>` resolves to the staged
    /// statement so scripted responses can match on statement text rather
    /// than on random scratch names. Unmatched commands succeed with empty
    /// output; the first matching rule wins.
    #[derive(Clone)]
    pub struct FakeExecutor {
        inner: Arc<Mutex<FakeState>>,
    }

    impl Default for FakeExecutor {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeState {
                    calls: Vec::new(),
                    files: HashMap::new(),
                    rules: Vec::new(),
                })),
            }
        }
    }

    impl FakeExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        /// Respond with `output` when the command (or the staged statement
        /// behind a `cqlsh -f` command) contains `needle`.
        pub fn respond(&self, needle: &str, output: ExecOutput) {
            self.push_rule(None, needle, Ok(output));
        }

        /// Same as [`FakeExecutor::respond`], scoped to a single pod.
        pub fn respond_for_pod(&self, pod: &str, needle: &str, output: ExecOutput) {
            self.push_rule(Some(pod.to_string()), needle, Ok(output));
        }

        /// Fail with a transport error when the command or staged statement
        /// contains `needle`.
        pub fn fail(&self, needle: &str, message: &str) {
            self.push_rule(None, needle, Err(ExecError::Transport(message.to_string())));
        }

        /// All recorded calls, in order.
        pub fn calls(&self) -> Vec<ExecCall> {
            self.inner.lock().calls.clone()
        }

        /// Recorded command lines, in order.
        pub fn commands(&self) -> Vec<String> {
            self.inner.lock().calls.iter().map(|call| call.command.clone()).collect()
        }

        /// Paths currently staged on the fake remote.
        pub fn staged_files(&self) -> Vec<String> {
            self.inner.lock().files.keys().cloned().collect()
        }

        fn push_rule(&self, pod: Option<String>, needle: &str, result: Result<ExecOutput, ExecError>) {
            self.inner.lock().rules.push(Rule { pod, needle: needle.to_string(), result });
        }
    }

    #[async_trait]
    impl PodExecutor for FakeExecutor {
        async fn exec(
            &self,
            target: &ExecTarget,
            command: &str,
            stdin: Option<&[u8]>,
        ) -> Result<ExecOutput, ExecError> {
            let mut state = self.inner.lock();
            state.calls.push(ExecCall {
                target: target.clone(),
                command: command.to_string(),
                stdin: stdin.map(<[u8]>::to_vec),
            });

            // Scripted responses match on the statement text when the
            // command reads a staged file.
            let subject = match command.strip_prefix("cqlsh -f ") {
                Some(path) => state
                    .files
                    .get(path)
                    .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                    .unwrap_or_else(|| command.to_string()),
                None => command.to_string(),
            };

            let scripted = state
                .rules
                .iter()
                .find(|rule| {
                    rule.pod.as_deref().map_or(true, |pod| pod == target.pod)
                        && subject.contains(&rule.needle)
                })
                .map(|rule| rule.result.clone());

            if let Some(path) = command.strip_prefix("cp /dev/stdin ") {
                state.files.insert(path.to_string(), stdin.map(<[u8]>::to_vec).unwrap_or_default());
            } else if let Some(path) = command.strip_prefix("rm ") {
                state.files.remove(path);
            }

            scripted.unwrap_or_else(|| Ok(ExecOutput::default()))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{ExecCall, FakeExecutor};

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
