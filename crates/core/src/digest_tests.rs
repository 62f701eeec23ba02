// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

/// Fixed pre-images with the expected 6-char SHA-256 hex prefixes.
const KNOWN: &[(&[u8], &str)] = &[
    (b"", "e3b0c4"),
    (b"x", "2d7116"),
    (b"hello", "2cf24d"),
];

#[test]
fn known_preimages_digest_to_expected_prefixes() {
    for (input, expected) in KNOWN {
        assert_eq!(SchemaDigest::of(input).as_str(), *expected);
    }
}

#[test]
fn equal_content_always_yields_the_same_digest() {
    let schema = b"CREATE TABLE ks1.t (id int PRIMARY KEY);";
    assert_eq!(SchemaDigest::of(schema), SchemaDigest::of(schema));
}

#[test]
fn distinct_content_yields_distinct_digests() {
    let digests: Vec<SchemaDigest> =
        KNOWN.iter().map(|(input, _)| SchemaDigest::of(input)).collect();
    for (i, a) in digests.iter().enumerate() {
        for b in &digests[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn digest_is_fixed_length_lowercase_hex() {
    let digest = SchemaDigest::of(b"CREATE KEYSPACE ks1;");
    assert_eq!(digest.as_str().len(), DIGEST_LEN);
    assert!(digest.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn display_matches_as_str() {
    let digest = SchemaDigest::of(b"x");
    assert_eq!(digest.to_string(), digest.as_str());
}
