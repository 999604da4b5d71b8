// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Integration tests for codecbench-core.
//!
//! These exercise graph equality, the data factory and configuration loading
//! through the public API only.

use std::collections::HashSet;

use codecbench_core::graph::{self, CycleSupport};
use codecbench_core::{
    ConfigLoader, ObjectGraph, Payload, PayloadKind, StructSchema, TestDataFactory,
};
use tempfile::TempDir;

/// A self-referential node equals a fresh copy with the same tag, for any tag.
#[test]
fn test_cycle_termination_for_any_tag() {
    for tag in ["", "str", "a much longer tag value", "ünïcödé"] {
        let mut a = ObjectGraph::new(tag);
        let root = a.root();
        a.set_link(root, Some(root));
        let b = a.clone();

        assert!(graph::equals(&a.root_ref(), &b.root_ref()), "tag {tag:?}");
        assert_eq!(graph::hash(&a.root_ref()), graph::hash(&b.root_ref()));
        assert_eq!(a, b);
    }
}

/// Acyclic chains are equal iff every tag along the chain matches.
#[test]
fn test_non_cycle_correctness() {
    const K: usize = 8;
    let base: Vec<String> = (0..K).map(|i| format!("t{i}")).collect();

    for len in 1..=K {
        let tags: Vec<&str> = base[..len].iter().map(String::as_str).collect();
        let a = TestDataFactory::create_chain(&tags, None).unwrap();
        let b = TestDataFactory::create_chain(&tags, None).unwrap();
        assert!(graph::equals(&a.root_ref(), &b.root_ref()));
        assert_eq!(graph::hash(&a.root_ref()), graph::hash(&b.root_ref()));

        for flip in 0..len {
            let mut changed = tags.clone();
            changed[flip] = "other";
            let c = TestDataFactory::create_chain(&changed, None).unwrap();
            assert!(!graph::equals(&a.root_ref(), &c.root_ref()));
        }
    }
}

/// A self-cycle and an unlinked node with the same tag are not equal.
#[test]
fn test_cycle_vs_non_cycle_distinction() {
    let cyclic = TestDataFactory::create_graph(true);
    let plain = TestDataFactory::create_graph(false);
    assert!(!graph::equals(&cyclic.root_ref(), &plain.root_ref()));
    assert!(!graph::equals(&plain.root_ref(), &cyclic.root_ref()));
    assert_ne!(cyclic, plain);
}

/// Two calls yield distinct but equal instances with equal hashes.
#[test]
fn test_create_graph_idempotence() {
    let a = TestDataFactory::create_graph(true);
    let b = TestDataFactory::create_graph(true);
    assert!(!std::ptr::eq(&a, &b));
    assert!(graph::equals(&a.root_ref(), &b.root_ref()));
    assert_eq!(graph::hash(&a.root_ref()), graph::hash(&b.root_ref()));

    let mut set = HashSet::new();
    set.insert(a);
    assert!(set.contains(&b));
}

/// Both cycle modes agree on every shape the self-only rule supports.
#[test]
fn test_cycle_modes_agree_on_supported_shapes() {
    let shapes: Vec<(Vec<&str>, Option<usize>)> = vec![
        (vec!["a"], None),
        (vec!["a"], Some(0)),
        (vec!["a", "b"], None),
        (vec!["a", "b"], Some(1)),
        (vec!["a", "b", "c"], Some(2)),
    ];
    for (tags_a, cycle_a) in &shapes {
        for (tags_b, cycle_b) in &shapes {
            let a = TestDataFactory::create_chain(tags_a, *cycle_a).unwrap();
            let b = TestDataFactory::create_chain(tags_b, *cycle_b).unwrap();
            assert_eq!(
                a.root_ref().equals(&b.root_ref(), CycleSupport::SelfOnly),
                a.root_ref().equals(&b.root_ref(), CycleSupport::Tracked),
                "{tags_a:?}/{cycle_a:?} vs {tags_b:?}/{cycle_b:?}"
            );
        }
    }
}

/// Two-node cycles are only understood by the tracked mode.
#[test]
fn test_two_cycle_support_is_an_extension() {
    let a = TestDataFactory::create_chain(&["a", "b"], Some(0)).unwrap();
    let b = TestDataFactory::create_chain(&["a", "b"], Some(0)).unwrap();
    assert!(!a.root_ref().equals(&b.root_ref(), CycleSupport::SelfOnly));
    assert!(a.root_ref().equals(&b.root_ref(), CycleSupport::Tracked));
    assert_eq!(a, b);
}

/// Two instances built from one generated struct type are equal.
#[test]
fn test_struct_instances_equal() {
    let schema = StructSchema::create("", 1);
    assert_eq!(
        Payload::Struct(schema.create_instance()),
        Payload::Struct(schema.create_instance())
    );
}

/// Every payload kind rebuilds to an equal value.
#[test]
fn test_payload_kinds_are_deterministic() {
    for kind in [
        PayloadKind::Bean,
        PayloadKind::Graph,
        PayloadKind::CyclicGraph,
        PayloadKind::Struct,
    ] {
        assert_eq!(kind.build(), kind.build(), "{kind}");
    }
}

/// Configuration loads from disk and validates.
#[test]
fn test_config_loading_and_validation() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("codecbench.yaml");

    std::fs::write(
        &config_path,
        r#"
iterations: 2500
payload: struct
codecs:
  - name: json
    ref_tracking: false
  - name: bincode
"#,
    )
    .expect("Failed to write config");

    let config = ConfigLoader::load_file(&config_path).expect("Failed to load config");

    assert_eq!(config.iterations.get(), 2500);
    assert_eq!(config.payload, PayloadKind::Struct);
    assert_eq!(config.codecs.len(), 2);
    assert_eq!(config.codecs[0].name.as_str(), "json");
    assert!(!config.codecs[0].ref_tracking);
}

/// Invalid configuration is rejected.
#[test]
fn test_invalid_config_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("bad.yaml");

    std::fs::write(&config_path, "iterations: -5\n").expect("Failed to write config");

    assert!(ConfigLoader::load_file(&config_path).is_err());
}
