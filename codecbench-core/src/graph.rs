// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Self-referential object graphs and cycle-safe structural equality.
//!
//! Nodes live in an arena (`ObjectGraph`) and point at each other through
//! `NodeId` index handles. A link is a relation, not ownership, so a node can
//! point at itself without any lifetime trickery.
//!
//! Two comparison modes are provided:
//!
//! - [`CycleSupport::SelfOnly`]: the minimal rule. A link that points back at
//!   its own node is equal iff the other side's link also points back at its
//!   own node; other links are followed. Cycles of depth >= 2 are not
//!   supported and compare as not equal.
//! - [`CycleSupport::Tracked`]: extension. Tracks the position at which each
//!   node was first visited; a revisit is equal iff both sides revisit the same
//!   position. Handles cycles of any depth.
//!
//! Both walks are iterative, so long acyclic chains cannot overflow the stack.
//! The `PartialEq`/`Hash` impls use the tracked mode, which agrees with the
//! minimal mode on every shape the minimal mode supports.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Index handle of a node inside its `ObjectGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A mutable graph node: one scalar field and one self-typed link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub tag: String,
    pub link: Option<NodeId>,
}

/// How comparisons treat cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleSupport {
    /// Only direct self-cycles (`node.link == node`) are understood.
    SelfOnly,
    /// Any cycle depth, via a visited-position map.
    #[default]
    Tracked,
}

/// Arena of graph nodes with a designated root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawObjectGraph")]
pub struct ObjectGraph {
    nodes: Vec<GraphNode>,
    root: NodeId,
}

/// Unvalidated wire shape; links are checked before becoming an `ObjectGraph`.
#[derive(Deserialize)]
struct RawObjectGraph {
    nodes: Vec<GraphNode>,
    root: NodeId,
}

impl TryFrom<RawObjectGraph> for ObjectGraph {
    type Error = String;

    fn try_from(raw: RawObjectGraph) -> Result<Self, Self::Error> {
        let len = raw.nodes.len();
        if raw.root.0 >= len {
            return Err(format!("root {} out of range for {} nodes", raw.root, len));
        }
        if let Some(node) = raw
            .nodes
            .iter()
            .find(|node| node.link.is_some_and(|link| link.0 >= len))
        {
            return Err(format!(
                "link from node tagged '{}' out of range for {} nodes",
                node.tag, len
            ));
        }
        Ok(Self {
            nodes: raw.nodes,
            root: raw.root,
        })
    }
}

impl ObjectGraph {
    /// Create a graph with a single unlinked root node.
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            nodes: vec![GraphNode {
                tag: root_tag.into(),
                link: None,
            }],
            root: NodeId(0),
        }
    }

    /// Append an unlinked node and return its handle.
    pub fn push(&mut self, tag: impl Into<String>) -> NodeId {
        self.nodes.push(GraphNode {
            tag: tag.into(),
            link: None,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Point `from`'s link at `to`. Both handles must belong to this graph.
    pub fn set_link(&mut self, from: NodeId, to: Option<NodeId>) {
        if let Some(target) = to {
            assert!(target.0 < self.nodes.len(), "link target {target} out of range");
        }
        self.nodes[from.0].link = to;
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrowed view of the root node.
    pub fn root_ref(&self) -> NodeRef<'_> {
        self.node_ref(self.root)
    }

    /// Borrowed view of any node.
    pub fn node_ref(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { graph: self, id }
    }

    /// Raw node data.
    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.0]
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a graph has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True if following links from the root ever revisits a node.
    pub fn is_self_referential(&self) -> bool {
        self.walk_from_root().1
    }

    /// Distinct nodes reachable from the root, the root included.
    ///
    /// For an acyclic graph this is the nesting depth of its inline form.
    pub fn reachable_len(&self) -> usize {
        self.walk_from_root().0
    }

    /// Follow links from the root until the chain ends or revisits a node.
    /// Returns the number of distinct nodes seen and whether a revisit happened.
    fn walk_from_root(&self) -> (usize, bool) {
        let mut visited = vec![false; self.nodes.len()];
        let mut count = 0;
        let mut current = Some(self.root);
        while let Some(id) = current {
            if visited[id.0] {
                return (count, true);
            }
            visited[id.0] = true;
            count += 1;
            current = self.nodes[id.0].link;
        }
        (count, false)
    }
}

impl PartialEq for ObjectGraph {
    fn eq(&self, other: &Self) -> bool {
        self.root_ref() == other.root_ref()
    }
}

impl Eq for ObjectGraph {}

impl Hash for ObjectGraph {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.root_ref().hash(state);
    }
}

/// Borrowed handle to one node of one graph.
#[derive(Clone, Copy)]
pub struct NodeRef<'g> {
    graph: &'g ObjectGraph,
    id: NodeId,
}

impl<'g> NodeRef<'g> {
    /// The node's handle.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Scalar field.
    pub fn tag(&self) -> &'g str {
        &self.graph.nodes[self.id.0].tag
    }

    /// Follow the link, if any.
    pub fn link(&self) -> Option<NodeRef<'g>> {
        self.link_id().map(|id| self.graph.node_ref(id))
    }

    /// True when the link points back at this node.
    pub fn is_self_cycle(&self) -> bool {
        self.link_id() == Some(self.id)
    }

    fn link_id(&self) -> Option<NodeId> {
        self.graph.nodes[self.id.0].link
    }

    /// Same graph instance, same node.
    fn is_identical(&self, other: &NodeRef<'_>) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }

    /// Structural equality under the chosen cycle rule.
    pub fn equals(&self, other: &NodeRef<'_>, mode: CycleSupport) -> bool {
        match mode {
            CycleSupport::SelfOnly => equals_self_only(*self, *other),
            CycleSupport::Tracked => equals_tracked(*self, *other),
        }
    }

    /// Feed the structural hash into `state` under the chosen cycle rule.
    pub fn hash_with<H: Hasher>(&self, mode: CycleSupport, state: &mut H) {
        match mode {
            CycleSupport::SelfOnly => hash_self_only(*self, state),
            CycleSupport::Tracked => hash_tracked(*self, state),
        }
    }

    /// Convenience 64-bit hash value.
    pub fn hash_code(&self, mode: CycleSupport) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash_with(mode, &mut hasher);
        hasher.finish()
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .field("link", &self.link_id())
            .finish()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        equals_tracked(*self, *other)
    }
}

impl Eq for NodeRef<'_> {}

impl Hash for NodeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_tracked(*self, state);
    }
}

/// Minimal-rule equality. See [`CycleSupport::SelfOnly`].
pub fn equals(a: &NodeRef<'_>, b: &NodeRef<'_>) -> bool {
    equals_self_only(*a, *b)
}

/// Minimal-rule hash. Consistent with [`equals`].
pub fn hash(node: &NodeRef<'_>) -> u64 {
    node.hash_code(CycleSupport::SelfOnly)
}

// Per-node markers written into the hash stream after the tag.
const LINK_NONE: u8 = 0;
const LINK_SELF: u8 = 1;
const LINK_NEXT: u8 = 2;
const LINK_BACK: u8 = 3;

fn equals_self_only(mut a: NodeRef<'_>, mut b: NodeRef<'_>) -> bool {
    if a.is_identical(&b) {
        return true;
    }
    // Without a deeper cycle, every step visits a fresh node of `a` or ends.
    let limit = a.graph.len().max(b.graph.len());
    for _ in 0..limit {
        if a.tag() != b.tag() {
            return false;
        }
        match (a.link_id(), b.link_id()) {
            (None, None) => return true,
            (Some(next_a), Some(next_b)) => {
                let a_self = next_a == a.id;
                let b_self = next_b == b.id;
                if a_self || b_self {
                    return a_self && b_self;
                }
                a = a.graph.node_ref(next_a);
                b = b.graph.node_ref(next_b);
            }
            _ => return false,
        }
    }
    tracing::debug!(
        a_root = %a.id,
        b_root = %b.id,
        "cycle deeper than a self-reference; not comparable under the self-only rule"
    );
    false
}

fn hash_self_only<H: Hasher>(node: NodeRef<'_>, state: &mut H) {
    let mut current = node;
    for _ in 0..node.graph.len() {
        current.tag().hash(state);
        match current.link_id() {
            None => {
                LINK_NONE.hash(state);
                return;
            }
            Some(next) if next == current.id => {
                LINK_SELF.hash(state);
                return;
            }
            Some(next) => {
                LINK_NEXT.hash(state);
                current = current.graph.node_ref(next);
            }
        }
    }
    LINK_BACK.hash(state);
}

fn equals_tracked(mut a: NodeRef<'_>, mut b: NodeRef<'_>) -> bool {
    if a.is_identical(&b) {
        return true;
    }
    let mut seen_a: Vec<Option<usize>> = vec![None; a.graph.len()];
    let mut seen_b: Vec<Option<usize>> = vec![None; b.graph.len()];
    let mut position = 0usize;
    loop {
        match (seen_a[a.id.0], seen_b[b.id.0]) {
            (Some(pa), Some(pb)) => return pa == pb,
            (None, None) => {}
            _ => return false,
        }
        seen_a[a.id.0] = Some(position);
        seen_b[b.id.0] = Some(position);
        position += 1;

        if a.tag() != b.tag() {
            return false;
        }
        match (a.link_id(), b.link_id()) {
            (None, None) => return true,
            (Some(next_a), Some(next_b)) => {
                a = a.graph.node_ref(next_a);
                b = b.graph.node_ref(next_b);
            }
            _ => return false,
        }
    }
}

fn hash_tracked<H: Hasher>(node: NodeRef<'_>, state: &mut H) {
    let mut seen: Vec<Option<usize>> = vec![None; node.graph.len()];
    let mut current = node;
    let mut position = 0usize;
    loop {
        if let Some(first_seen) = seen[current.id.0] {
            LINK_BACK.hash(state);
            first_seen.hash(state);
            return;
        }
        seen[current.id.0] = Some(position);
        position += 1;

        current.tag().hash(state);
        match current.link_id() {
            None => {
                LINK_NONE.hash(state);
                return;
            }
            Some(next) => {
                LINK_NEXT.hash(state);
                current = current.graph.node_ref(next);
            }
        }
    }
}
