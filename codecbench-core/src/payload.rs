// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The object graph handed to every codec in a run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::{SampleBean, TestDataFactory};
use crate::error::ValidationError;
use crate::graph::ObjectGraph;
use crate::structs::{StructSchema, StructValue};

/// Field count of the struct payload built from configuration.
const DEFAULT_STRUCT_FIELDS: usize = 16;

/// A benchmark payload. Built once per run and only ever borrowed immutably.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Payload {
    Graph(ObjectGraph),
    Bean(SampleBean),
    Struct(StructValue),
}

impl Payload {
    /// Name of the concrete type, used for codec type registration.
    pub fn type_name(&self) -> &str {
        match self {
            Payload::Graph(_) => "ObjectGraph",
            Payload::Bean(_) => SampleBean::TYPE_NAME,
            Payload::Struct(value) => &value.class_name,
        }
    }

    /// True if the payload contains a reachable cycle.
    pub fn is_self_referential(&self) -> bool {
        match self {
            Payload::Graph(graph) => graph.is_self_referential(),
            Payload::Bean(_) | Payload::Struct(_) => false,
        }
    }
}

/// Graphs compare with cycle-safe equality; mismatched variants are simply unequal.
impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::Graph(a), Payload::Graph(b)) => a == b,
            (Payload::Bean(a), Payload::Bean(b)) => a == b,
            (Payload::Struct(a), Payload::Struct(b)) => a == b,
            _ => false,
        }
    }
}

/// Which payload a run measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    #[default]
    Bean,
    Graph,
    CyclicGraph,
    Struct,
}

impl PayloadKind {
    /// Build a fresh payload of this kind.
    pub fn build(&self) -> Payload {
        match self {
            PayloadKind::Bean => TestDataFactory::create_benchmark_payload(),
            PayloadKind::Graph => Payload::Graph(TestDataFactory::create_graph(false)),
            PayloadKind::CyclicGraph => Payload::Graph(TestDataFactory::create_graph(true)),
            PayloadKind::Struct => Payload::Struct(
                StructSchema::create("BenchStruct", DEFAULT_STRUCT_FIELDS).create_instance(),
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Bean => "bean",
            PayloadKind::Graph => "graph",
            PayloadKind::CyclicGraph => "cyclic_graph",
            PayloadKind::Struct => "struct",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PayloadKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "bean" => Ok(PayloadKind::Bean),
            "graph" => Ok(PayloadKind::Graph),
            "cyclic_graph" => Ok(PayloadKind::CyclicGraph),
            "struct" => Ok(PayloadKind::Struct),
            _ => Err(ValidationError::UnknownPayload {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(PayloadKind::Bean.build().type_name(), "SampleBean");
        assert_eq!(PayloadKind::Graph.build().type_name(), "ObjectGraph");
        assert_eq!(PayloadKind::Struct.build().type_name(), "BenchStruct");
    }

    #[test]
    fn test_self_referential_detection() {
        assert!(PayloadKind::CyclicGraph.build().is_self_referential());
        assert!(!PayloadKind::Graph.build().is_self_referential());
        assert!(!PayloadKind::Bean.build().is_self_referential());
    }

    #[test]
    fn test_shape_mismatch_is_not_equal() {
        assert_ne!(PayloadKind::Bean.build(), PayloadKind::Graph.build());
        assert_ne!(PayloadKind::Graph.build(), PayloadKind::CyclicGraph.build());
        assert_eq!(PayloadKind::CyclicGraph.build(), PayloadKind::CyclicGraph.build());
    }

    #[test]
    fn test_payload_kind_parse() {
        assert_eq!("cyclic-graph".parse::<PayloadKind>().unwrap(), PayloadKind::CyclicGraph);
        assert_eq!("STRUCT".parse::<PayloadKind>().unwrap(), PayloadKind::Struct);
        assert!("tree".parse::<PayloadKind>().is_err());
    }
}
