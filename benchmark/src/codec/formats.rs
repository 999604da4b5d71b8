// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The concrete serde formats plugged into [`SerdeAdapter`](super::SerdeAdapter).

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A serde data format as seen by the benchmark.
///
/// `write` appends to `buffer`; formats that cannot write into an existing
/// buffer replace it and set `BUFFER_REUSE = false`.
pub trait WireFormat {
    const NAME: &'static str;
    const BUFFER_REUSE: bool = true;
    const TYPE_REGISTRATION: bool = true;

    fn write<T: Serialize + ?Sized>(buffer: &mut Vec<u8>, value: &T) -> Result<(), String>;

    fn read<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String>;
}

/// JSON via `serde_json`, streamed into the reused buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl WireFormat for Json {
    const NAME: &'static str = "json";

    fn write<T: Serialize + ?Sized>(buffer: &mut Vec<u8>, value: &T) -> Result<(), String> {
        serde_json::to_writer(buffer, value).map_err(|e| e.to_string())
    }

    fn read<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String> {
        serde_json::from_slice(bytes).map_err(|e| e.to_string())
    }
}

/// bincode 1.x with its default (fixed-int, little-endian) options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bincode;

impl WireFormat for Bincode {
    const NAME: &'static str = "bincode";

    fn write<T: Serialize + ?Sized>(buffer: &mut Vec<u8>, value: &T) -> Result<(), String> {
        bincode::serialize_into(buffer, value).map_err(|e| e.to_string())
    }

    fn read<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String> {
        bincode::deserialize(bytes).map_err(|e| e.to_string())
    }
}

/// MessagePack via `rmp-serde`, structs written as maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPack;

impl WireFormat for MsgPack {
    const NAME: &'static str = "msgpack";

    fn write<T: Serialize + ?Sized>(buffer: &mut Vec<u8>, value: &T) -> Result<(), String> {
        rmp_serde::encode::write_named(buffer, value).map_err(|e| e.to_string())
    }

    fn read<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String> {
        rmp_serde::from_slice(bytes).map_err(|e| e.to_string())
    }
}

/// YAML via `serde_yaml`. Produces a fresh `String` per call, so the buffer
/// is replaced rather than reused, and types are always written by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl WireFormat for Yaml {
    const NAME: &'static str = "yaml";
    const BUFFER_REUSE: bool = false;
    const TYPE_REGISTRATION: bool = false;

    fn write<T: Serialize + ?Sized>(buffer: &mut Vec<u8>, value: &T) -> Result<(), String> {
        let text = serde_yaml::to_string(value).map_err(|e| e.to_string())?;
        *buffer = text.into_bytes();
        Ok(())
    }

    fn read<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String> {
        serde_yaml::from_slice(bytes).map_err(|e| e.to_string())
    }
}
