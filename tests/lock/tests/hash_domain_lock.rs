//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. Canonical domain set has expected count (catches forgotten additions)
//! 2. All domain byte strings are unique and none prefixes another
//! 3. All domains follow the `NEUROSYM::*::V1\0` naming convention
//! 4. No raw `NEUROSYM::` domain literals in production source outside `hash_domain.rs`
//! 5. Fingerprints of search nodes are stable across processes

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use lock_tests::{arith_dsl, int};
use neurosym_kernel::proof::hash::canonical_hash;
use neurosym_kernel::proof::hash_domain::HashDomain;
use neurosym_search::{DslSearchNode, Fingerprint};

#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        3,
        "expected 3 domain variants; if you added a new domain, update this count"
    );
}

#[test]
fn hash_domain_all_unique_bytes() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(
            seen.insert(domain.as_bytes()),
            "duplicate domain bytes: {domain}"
        );
    }
    for a in HashDomain::ALL {
        for b in HashDomain::ALL {
            if a != b {
                assert!(
                    !b.as_bytes().starts_with(a.as_bytes()),
                    "{a} is a prefix of {b}"
                );
            }
        }
    }
}

#[test]
fn hash_domain_all_follow_naming_convention() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(
            bytes.starts_with(b"NEUROSYM::"),
            "{domain} does not start with NEUROSYM::"
        );
        assert!(
            bytes.ends_with(b"::V1\0"),
            "{domain} does not end with ::V1\\0"
        );
    }
}

/// The only file allowed to spell out domain bytes is `hash_domain.rs`.
#[test]
fn no_raw_domain_literals_outside_authority() {
    let production_dirs = [
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../kernel/src"),
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../search/src"),
    ];
    let pattern = "b\"NEUROSYM::";
    let mut violations = Vec::new();
    let mut scanned = 0;
    for dir in production_dirs {
        for path in rust_files(Path::new(dir)) {
            if path.file_name().and_then(|n| n.to_str()) == Some("hash_domain.rs") {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            scanned += 1;
            for (i, line) in content.lines().enumerate() {
                if line.contains(pattern) {
                    violations.push(format!("{}:{}", path.display(), i + 1));
                }
            }
        }
    }
    assert!(scanned > 0, "no source files found; check the scan paths");
    assert!(
        violations.is_empty(),
        "raw NEUROSYM:: domain literals found outside hash_domain.rs:\n{}",
        violations.join("\n")
    );
}

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        return out;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            out.extend(rust_files(&path));
        } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
            out.push(path);
        }
    }
    out.sort();
    out
}

#[test]
fn node_fingerprint_is_domain_separated_program_hash() {
    let dsl = arith_dsl(&["one", "add"]);
    let root = DslSearchNode::root(&dsl, int());
    let bytes = root.program().canonical_bytes().unwrap();
    assert_eq!(
        root.fingerprint(),
        &canonical_hash(HashDomain::SearchNode, &bytes)
    );
    assert_ne!(
        root.fingerprint(),
        &canonical_hash(HashDomain::SExpression, &bytes)
    );
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"children":[],"symbol":"$0"}"#
    );
}
