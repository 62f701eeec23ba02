// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Boundary adapters for cluster and destination I/O
//!
//! The engine depends only on the capability traits defined here
//! ([`PodExecutor`], [`Uploader`]); the concrete transports are injected at
//! the CLI boundary. Fakes for both traits live behind the `test-support`
//! feature so other crates' tests can script and record adapter traffic.

pub mod exec;
pub mod upload;

pub use exec::{ExecError, ExecOutput, KubeExecutor, PodExecutor};
pub use upload::{FsUploader, UploadError, Uploader};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use exec::{ExecCall, FakeExecutor};
#[cfg(any(test, feature = "test-support"))]
pub use upload::{FakeUploader, UploadCall};
