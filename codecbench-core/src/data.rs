// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Canonical benchmark payloads.
//!
//! Everything here is deterministic: repeated calls return structurally equal
//! (but distinct) values, so separate runs measure comparable data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::ObjectGraph;
use crate::payload::Payload;

/// Tag carried by the canonical graph node.
pub const GRAPH_TAG: &str = "str";

/// Nested value object inside `SampleBean`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zip: u32,
}

/// Composite bean with mixed primitive, string, nested and collection fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleBean {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub score: f64,
    pub ratio: f32,
    pub level: i16,
    pub flags: u8,
    pub nickname: Option<String>,
    pub address: Address,
    pub tags: Vec<String>,
    pub samples: Vec<i32>,
    pub counters: BTreeMap<String, i32>,
}

impl SampleBean {
    /// Type name used when registering the bean with a codec.
    pub const TYPE_NAME: &'static str = "SampleBean";

    /// Build the canonical bean.
    pub fn create() -> Self {
        let counters = (0..5)
            .map(|i| (format!("counter_{i}"), i * 100))
            .collect::<BTreeMap<_, _>>();

        Self {
            id: 1_234_567_890_123,
            name: "codecbench sample bean".to_string(),
            active: true,
            score: 1234.5,
            ratio: 0.25,
            level: -42,
            flags: 0b1010_0101,
            nickname: Some("bean".to_string()),
            address: Address {
                street: "1 Serialization Way".to_string(),
                city: "Benchville".to_string(),
                zip: 94_105,
            },
            tags: ["alpha", "beta", "gamma", "delta"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            samples: (0..16).map(|i| i * i - 8).collect(),
            counters,
        }
    }
}

/// Factory for benchmark and test payloads.
pub struct TestDataFactory;

impl TestDataFactory {
    /// Single node tagged `"str"`. With `self_referential`, it links to itself.
    pub fn create_graph(self_referential: bool) -> ObjectGraph {
        let mut graph = ObjectGraph::new(GRAPH_TAG);
        if self_referential {
            let root = graph.root();
            graph.set_link(root, Some(root));
        }
        graph
    }

    /// Chain of nodes tagged in order. `cycle_to` links the last node back to
    /// the node at that position (the last node itself gives a self-cycle).
    ///
    /// Returns `None` for an empty tag list or an out-of-range `cycle_to`.
    pub fn create_chain(tags: &[&str], cycle_to: Option<usize>) -> Option<ObjectGraph> {
        let (first, rest) = tags.split_first()?;
        if cycle_to.is_some_and(|target| target >= tags.len()) {
            return None;
        }

        let mut graph = ObjectGraph::new(*first);
        let mut ids = vec![graph.root()];
        let mut last = graph.root();
        for tag in rest {
            let id = graph.push(*tag);
            graph.set_link(last, Some(id));
            ids.push(id);
            last = id;
        }
        if let Some(target) = cycle_to {
            graph.set_link(last, Some(ids[target]));
        }
        Some(graph)
    }

    /// The default payload measured by the benchmark binary.
    pub fn create_benchmark_payload() -> Payload {
        Payload::Bean(SampleBean::create())
    }
}
