//! codecbench Core Library
//!
//! Payloads, cycle-safe graph equality, configuration and error types shared
//! by the codec benchmark harness. Nothing in here knows about a concrete
//! serialization library.

pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod payload;
pub mod structs;
pub mod types;

// Re-export commonly used types
pub use config::{BenchConfig, CodecConfig, ConfigLoader, ConfigOverrides};
pub use data::{SampleBean, TestDataFactory};
pub use error::{BenchError, BenchResult, ValidationError};
pub use graph::{CycleSupport, GraphNode, NodeId, NodeRef, ObjectGraph};
pub use payload::{Payload, PayloadKind};
pub use structs::{FieldValue, StructSchema, StructValue};
pub use types::{CodecName, IterationCount};
