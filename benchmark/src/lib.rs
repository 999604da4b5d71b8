// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! codecbench: comparative serialization benchmarks
//!
//! Measures steady-state encode throughput of several serialization codecs on
//! one shared payload, one codec at a time on a single thread.
//!
//! # Pieces
//!
//! - **codec**: `CodecAdapter` trait, capability flags and serde-backed adapters
//!   (JSON, bincode, MessagePack, YAML)
//! - **runner**: warm-up then timed measurement, one record per codec
//! - **metrics**: `MeasurementRecord` and the run-level `BenchmarkReport`
//! - **reporter**: `ReportSink` implementations and JSON report files

pub mod codec;
pub mod metrics;
pub mod reporter;
pub mod runner;

pub use codec::{build_adapter, build_adapters, AdapterOptions, Capabilities, CodecAdapter};
pub use metrics::{
    BenchmarkReport, FailureKind, Measurement, MeasurementRecord, Outcome, SystemInfo,
};
pub use reporter::{JsonReporter, LogSink, MemorySink, ReportSink};
pub use runner::{BenchmarkRunner, RunnerConfig};
