// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cask: Cassandra maintenance for Kubernetes clusters

mod commands;

use clap::{Parser, Subcommand};
use commands::{backup, truncate};

#[derive(Parser)]
#[command(
    name = "cask",
    version,
    about = "Schema backup and table maintenance for Cassandra clusters running in Kubernetes"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Back up a keyspace schema to a destination directory
    Backup(backup::BackupArgs),
    /// Truncate tables in a keyspace across every given pod
    Truncate(truncate::TruncateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Backup(args) => backup::backup(args).await,
        Command::Truncate(args) => truncate::truncate(args).await,
    }
}

/// Log filter comes from `CASK_LOG`, defaulting to info.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("CASK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
