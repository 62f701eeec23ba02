// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn target(pod: &str) -> ExecTarget {
    ExecTarget::new("db", pod, "cassandra")
}

#[tokio::test]
async fn fake_emulates_the_staged_file_namespace() {
    let executor = FakeExecutor::new();
    executor.respond("SELECT 1;", ExecOutput::with_stdout("one\n"));

    let stage = executor
        .exec(&target("cassandra-0"), "cp /dev/stdin /tmp/q.cql", Some(b"SELECT 1;"))
        .await
        .unwrap();
    assert!(stage.stderr.is_empty());
    assert_eq!(executor.staged_files(), ["/tmp/q.cql"]);

    // The scripted response keys off the staged statement, not the path.
    let run = executor.exec(&target("cassandra-0"), "cqlsh -f /tmp/q.cql", None).await.unwrap();
    assert_eq!(run.stdout, b"one\n");

    executor.exec(&target("cassandra-0"), "rm /tmp/q.cql", None).await.unwrap();
    assert!(executor.staged_files().is_empty());
}

#[tokio::test]
async fn pod_scoped_rules_do_not_leak_to_other_pods() {
    let executor = FakeExecutor::new();
    executor.respond_for_pod("cassandra-1", "nodetool", ExecOutput::with_stderr("down"));

    let healthy = executor.exec(&target("cassandra-0"), "nodetool status", None).await.unwrap();
    assert!(healthy.stderr.is_empty());

    let down = executor.exec(&target("cassandra-1"), "nodetool status", None).await.unwrap();
    assert_eq!(down.stderr, b"down");
}

#[tokio::test]
async fn unmatched_commands_succeed_with_empty_output() {
    let executor = FakeExecutor::new();
    let output = executor.exec(&target("cassandra-0"), "true", None).await.unwrap();
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[tokio::test]
async fn scripted_transport_failures_surface_as_errors() {
    let executor = FakeExecutor::new();
    executor.fail("nodetool", "connection refused");

    let err = executor.exec(&target("cassandra-0"), "nodetool status", None).await.unwrap_err();
    let ExecError::Transport(message) = err;
    assert!(message.contains("connection refused"));
}

#[tokio::test]
async fn every_call_is_recorded_with_its_stdin() {
    let executor = FakeExecutor::new();
    executor.exec(&target("cassandra-0"), "cp /dev/stdin /tmp/a.cql", Some(b"DESC ks1;")).await.unwrap();
    executor.exec(&target("cassandra-1"), "rm /tmp/a.cql", None).await.unwrap();

    let calls = executor.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].target.pod, "cassandra-0");
    assert_eq!(calls[0].stdin.as_deref(), Some(b"DESC ks1;".as_slice()));
    assert_eq!(calls[1].command, "rm /tmp/a.cql");
    assert_eq!(calls[1].stdin, None);
}
