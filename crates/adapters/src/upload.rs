// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Destination storage for backup artifacts

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from artifact uploads
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    #[error("upload of {path} failed: {message}")]
    Failed { path: PathBuf, message: String },
}

/// Adapter for persisting backup artifacts at a destination path.
///
/// The destination client and any bucket/prefix scoping are construction
/// state of the implementing adapter; callers only name a path inside the
/// destination.
#[async_trait]
pub trait Uploader: Clone + Send + Sync + 'static {
    async fn upload(&self, path: &Path, data: &[u8]) -> Result<(), UploadError>;
}

/// Uploader writing artifacts under a local directory root.
///
/// Stands in for remote object storage behind the same trait; the layout
/// under the root matches the destination layout byte for byte.
#[derive(Clone, Debug)]
pub struct FsUploader {
    root: PathBuf,
}

impl FsUploader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl Uploader for FsUploader {
    async fn upload(&self, path: &Path, data: &[u8]) -> Result<(), UploadError> {
        let dest = self.root.join(path);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| UploadError::Failed {
                path: dest.clone(),
                message: format!("failed to create destination dir: {}", e),
            })?;
        }
        tokio::fs::write(&dest, data)
            .await
            .map_err(|e| UploadError::Failed { path: dest.clone(), message: e.to_string() })?;
        tracing::debug!(path = %dest.display(), bytes = data.len(), "artifact written");
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{UploadError, Uploader};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    /// Recorded upload
    #[derive(Debug, Clone)]
    pub struct UploadCall {
        pub path: PathBuf,
        pub data: Vec<u8>,
    }

    struct FakeUploadState {
        calls: Vec<UploadCall>,
        fail_message: Option<String>,
    }

    /// Fake uploader for testing
    #[derive(Clone)]
    pub struct FakeUploader {
        inner: Arc<Mutex<FakeUploadState>>,
    }

    impl Default for FakeUploader {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeUploadState {
                    calls: Vec::new(),
                    fail_message: None,
                })),
            }
        }
    }

    impl FakeUploader {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every subsequent upload fail with `message`.
        pub fn fail_with(&self, message: &str) {
            self.inner.lock().fail_message = Some(message.to_string());
        }

        /// All recorded uploads, in order.
        pub fn calls(&self) -> Vec<UploadCall> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl Uploader for FakeUploader {
        async fn upload(&self, path: &Path, data: &[u8]) -> Result<(), UploadError> {
            let mut state = self.inner.lock();
            if let Some(message) = state.fail_message.clone() {
                return Err(UploadError::Failed { path: path.to_path_buf(), message });
            }
            state.calls.push(UploadCall { path: path.to_path_buf(), data: data.to_vec() });
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeUploader, UploadCall};

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
