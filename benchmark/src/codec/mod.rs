// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Uniform adapter interface over heterogeneous serialization codecs.
//!
//! Every library has a different API shape (buffer vs fresh allocation,
//! explicit vs implicit type registration, reference tracking on or off).
//! Adapters normalize that behind [`CodecAdapter`] and advertise what they do
//! through [`Capabilities`], so fairness-relevant differences are visible in
//! the report instead of hidden in defaults.

pub mod formats;
pub mod registry;
pub mod serde_adapter;
pub mod wire;

use serde::{Deserialize, Serialize};

use codecbench_core::{BenchError, BenchResult, CodecConfig, Payload, ValidationError};

pub use formats::{Bincode, Json, MsgPack, Yaml};
pub use registry::TypeRegistry;
pub use serde_adapter::SerdeAdapter;

/// Names accepted by [`build_adapter`].
pub const AVAILABLE_CODECS: &[&str] = &["json", "bincode", "msgpack", "yaml"];

/// What an adapter can do, as configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// Can encode payloads that reference themselves.
    pub self_reference: bool,
    /// Registers payload types up front and writes a numeric type id.
    pub type_registration: bool,
    /// Reuses its output buffer between iterations.
    pub buffer_reuse: bool,
    /// Supports `decode`.
    pub decode: bool,
}

/// Per-adapter switches that change what is being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterOptions {
    /// Write graphs as an index table with back-references. When off, graphs
    /// are written inline as nested nodes and cycles are rejected at setup.
    pub ref_tracking: bool,
    /// Register the payload type during setup. Ignored by codecs without
    /// registration support.
    pub register_types: bool,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            ref_tracking: true,
            register_types: true,
        }
    }
}

impl From<&CodecConfig> for AdapterOptions {
    fn from(config: &CodecConfig) -> Self {
        Self {
            ref_tracking: config.ref_tracking,
            register_types: config.register_types,
        }
    }
}

/// One pluggable codec.
///
/// Lifecycle: `prepare` once, then any number of `reset` + `encode` pairs.
/// The payload is always borrowed immutably; the adapter owns only its buffer.
pub trait CodecAdapter {
    /// Display name used in reports.
    fn name(&self) -> &str;

    /// Capability flags under the current options.
    fn capabilities(&self) -> Capabilities;

    /// One-time setup for `payload`. Fails with `BenchError::Configuration`
    /// if the codec cannot represent it.
    fn prepare(&mut self, payload: &Payload) -> BenchResult<()>;

    /// Encode `payload` into the internal buffer and return the artifact length.
    fn encode(&mut self, payload: &Payload) -> BenchResult<usize>;

    /// Move the write cursor back to zero, keeping capacity where possible.
    fn reset(&mut self);

    /// The bytes written by the last `encode` since the last `reset`.
    fn artifact(&self) -> &[u8];

    /// Rebuild a payload from an artifact.
    fn decode(&self, _artifact: &[u8]) -> BenchResult<Payload> {
        Err(BenchError::Unsupported {
            codec: self.name().to_string(),
            operation: "decode",
        })
    }
}

/// Construct the adapter named in `config`.
pub fn build_adapter(config: &CodecConfig) -> BenchResult<Box<dyn CodecAdapter>> {
    let options = AdapterOptions::from(config);
    let adapter: Box<dyn CodecAdapter> = match config.name.as_str() {
        "json" => Box::new(SerdeAdapter::<Json>::new(options)),
        "bincode" => Box::new(SerdeAdapter::<Bincode>::new(options)),
        "msgpack" => Box::new(SerdeAdapter::<MsgPack>::new(options)),
        "yaml" => Box::new(SerdeAdapter::<Yaml>::new(options)),
        other => {
            return Err(ValidationError::UnknownCodec {
                name: other.to_string(),
                available: AVAILABLE_CODECS.join(", "),
            }
            .into())
        }
    };

    tracing::debug!(
        codec = adapter.name(),
        ref_tracking = options.ref_tracking,
        register_types = options.register_types,
        "Built codec adapter"
    );
    Ok(adapter)
}

/// Construct adapters for every entry, in order.
pub fn build_adapters(configs: &[CodecConfig]) -> BenchResult<Vec<Box<dyn CodecAdapter>>> {
    configs.iter().map(build_adapter).collect()
}
