// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cask truncate` - cluster-wide table truncation

use anyhow::{Context, Result};
use cask_adapters::KubeExecutor;
use cask_core::ExecTarget;
use cask_engine::{truncate_tables, CqlRunner};
use clap::Args;

#[derive(Args)]
pub struct TruncateArgs {
    /// Kubernetes namespace of the cluster
    #[arg(short = 'n', long)]
    pub namespace: String,

    /// Pods to run against (repeat for each cluster node)
    #[arg(short = 'p', long = "pod", required = true)]
    pub pods: Vec<String>,

    /// Container running cassandra inside each pod
    #[arg(short = 'c', long, default_value = "cassandra")]
    pub container: String,

    /// Keyspace holding the tables
    #[arg(short = 'k', long)]
    pub keyspace: String,

    /// Tables to truncate, in order (repeat for each table)
    #[arg(short = 't', long = "table", required = true)]
    pub tables: Vec<String>,

    /// Cap on concurrently processed pods (default: all pods at once)
    #[arg(long)]
    pub parallelism: Option<usize>,
}

pub async fn truncate(args: TruncateArgs) -> Result<()> {
    let executor = KubeExecutor::connect().await.context("connecting to the cluster")?;
    let runner = CqlRunner::new(executor);

    let targets: Vec<ExecTarget> = args
        .pods
        .iter()
        .map(|pod| ExecTarget::new(&args.namespace, pod, &args.container))
        .collect();

    if let Err(failed) =
        truncate_tables(&runner, targets, &args.keyspace, &args.tables, args.parallelism).await
    {
        for failure in &failed.failures {
            tracing::error!(error = %failure, "truncation failure");
        }
        return Err(failed.into());
    }
    Ok(())
}
