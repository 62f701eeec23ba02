// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cask-core: domain types for the cask cluster maintenance tool

pub mod digest;
pub mod target;

pub use digest::{SchemaDigest, DIGEST_LEN};
pub use target::ExecTarget;
