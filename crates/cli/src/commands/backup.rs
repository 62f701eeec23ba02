// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cask backup` - keyspace schema backup

use anyhow::{Context, Result};
use cask_adapters::{FsUploader, KubeExecutor};
use cask_core::ExecTarget;
use cask_engine::{cluster_name, CqlRunner, SchemaBackup};
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct BackupArgs {
    /// Kubernetes namespace of the cluster
    #[arg(short = 'n', long)]
    pub namespace: String,

    /// Pod to read the schema from (any live node)
    #[arg(short = 'p', long)]
    pub pod: String,

    /// Container running cassandra inside the pod
    #[arg(short = 'c', long, default_value = "cassandra")]
    pub container: String,

    /// Keyspace whose schema is backed up
    #[arg(short = 'k', long)]
    pub keyspace: String,

    /// Destination directory for backup artifacts
    #[arg(long)]
    pub dst: PathBuf,
}

pub async fn backup(args: BackupArgs) -> Result<()> {
    let executor = KubeExecutor::connect().await.context("connecting to the cluster")?;
    let target = ExecTarget::new(&args.namespace, &args.pod, &args.container);

    let cluster = cluster_name(&executor, &target).await.context("resolving cluster name")?;
    let coordinator = SchemaBackup::new(CqlRunner::new(executor), FsUploader::new(&args.dst));

    let base = coordinator
        .backup(&target, &cluster, &args.keyspace, Path::new(""))
        .await
        .with_context(|| format!("backing up schema of {}", args.keyspace))?;

    println!("{}", args.dst.join(base).display());
    Ok(())
}
