// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fs_uploader_writes_under_its_root() {
    let dir = tempfile::tempdir().unwrap();
    let uploader = FsUploader::new(dir.path());

    uploader.upload(Path::new("db/test/ks1/2d7116/schema.cql"), b"x").await.unwrap();

    let written = std::fs::read(dir.path().join("db/test/ks1/2d7116/schema.cql")).unwrap();
    assert_eq!(written, b"x");
}

#[tokio::test]
async fn fs_uploader_overwrites_an_existing_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let uploader = FsUploader::new(dir.path());

    uploader.upload(Path::new("a/schema.cql"), b"old").await.unwrap();
    uploader.upload(Path::new("a/schema.cql"), b"new").await.unwrap();

    let written = std::fs::read(dir.path().join("a/schema.cql")).unwrap();
    assert_eq!(written, b"new");
}

#[tokio::test]
async fn fake_uploader_records_uploads_in_order() {
    let uploader = FakeUploader::new();
    uploader.upload(Path::new("one"), b"1").await.unwrap();
    uploader.upload(Path::new("two"), b"2").await.unwrap();

    let calls = uploader.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].path, Path::new("one"));
    assert_eq!(calls[1].data, b"2");
}

#[tokio::test]
async fn fake_uploader_can_be_scripted_to_fail() {
    let uploader = FakeUploader::new();
    uploader.fail_with("bucket unavailable");

    let err = uploader.upload(Path::new("one"), b"1").await.unwrap_err();
    let UploadError::Failed { message, .. } = err;
    assert_eq!(message, "bucket unavailable");
    assert!(uploader.calls().is_empty());
}
