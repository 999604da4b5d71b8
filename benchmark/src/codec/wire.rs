// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Serde-level shape of an artifact.
//!
//! Encoding borrows the payload (`Envelope<WireBody>`), decoding produces owned
//! values (`Envelope<OwnedBody>`). Both sides declare the same variants in
//! the same order, so every serde format sees identical structure.
//!
//! Graphs are written one of two ways:
//! - `Graph`: the arena itself; links are indices, so cycles are fine.
//! - `InlineGraph`: each node nests the node it links to. Cheaper to read for
//!   codecs without reference tracking, but cannot represent cycles.

use std::borrow::Cow;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use codecbench_core::{NodeRef, ObjectGraph, Payload, SampleBean, StructValue};

/// Deepest chain written as `InlineGraph`, counted in nodes.
///
/// Each node is one nesting level. serde_json and serde_yaml refuse to read
/// past 128 levels, and the envelope and body take two of those.
pub const MAX_INLINE_DEPTH: usize = 100;

/// Type header written before the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag<'a> {
    /// Registered type id.
    Id(u16),
    /// Unregistered type, identified by name.
    Name(Cow<'a, str>),
}

/// Top-level artifact structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<'a, B> {
    pub type_tag: TypeTag<'a>,
    pub body: B,
}

/// Borrowed body used while encoding.
///
/// Variants stay one level deep: serde_yaml cannot write an enum nested
/// directly inside another enum.
#[derive(Debug, Serialize)]
pub enum WireBody<'a> {
    Graph(&'a ObjectGraph),
    InlineGraph(InlineNode<'a>),
    Bean(&'a SampleBean),
    Struct(&'a StructValue),
}

impl<'a> WireBody<'a> {
    /// View `payload` for encoding, inlining graphs when `ref_tracking` is off.
    pub fn new(payload: &'a Payload, ref_tracking: bool) -> Self {
        match payload {
            Payload::Graph(graph) if ref_tracking => WireBody::Graph(graph),
            Payload::Graph(graph) => WireBody::InlineGraph(InlineNode(graph.root_ref())),
            Payload::Bean(bean) => WireBody::Bean(bean),
            Payload::Struct(value) => WireBody::Struct(value),
        }
    }
}

/// Serializes a node and, nested inside it, everything it links to.
/// Must only be used on acyclic graphs no deeper than [`MAX_INLINE_DEPTH`];
/// serialization recurses once per node.
#[derive(Debug)]
pub struct InlineNode<'a>(NodeRef<'a>);

impl Serialize for InlineNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("InlineNode", 2)?;
        node.serialize_field("tag", self.0.tag())?;
        node.serialize_field("next", &self.0.link().map(InlineNode))?;
        node.end()
    }
}

/// Owned body produced by decoding.
#[derive(Debug, Deserialize)]
pub enum OwnedBody {
    Graph(ObjectGraph),
    InlineGraph(OwnedInlineNode),
    Bean(SampleBean),
    Struct(StructValue),
}

/// Owned nested node.
#[derive(Debug, Deserialize)]
pub struct OwnedInlineNode {
    pub tag: String,
    pub next: Option<Box<OwnedInlineNode>>,
}

impl OwnedInlineNode {
    /// Rebuild the arena form, walking the nesting iteratively.
    fn into_graph(self) -> ObjectGraph {
        let mut graph = ObjectGraph::new(self.tag);
        let mut last = graph.root();
        let mut next = self.next;
        while let Some(node) = next {
            let OwnedInlineNode { tag, next: rest } = *node;
            let id = graph.push(tag);
            graph.set_link(last, Some(id));
            last = id;
            next = rest;
        }
        graph
    }
}

impl OwnedBody {
    pub fn into_payload(self) -> Payload {
        match self {
            OwnedBody::Graph(graph) => Payload::Graph(graph),
            OwnedBody::InlineGraph(node) => Payload::Graph(node.into_graph()),
            OwnedBody::Bean(bean) => Payload::Bean(bean),
            OwnedBody::Struct(value) => Payload::Struct(value),
        }
    }
}
