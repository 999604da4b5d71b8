// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Standardized metrics types for benchmark results.
//!
//! One `MeasurementRecord` per codec per run. Failed codecs get a record too,
//! so they show up in the report instead of silently disappearing.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::System;
use uuid::Uuid;

use codecbench_core::{BenchError, PayloadKind};

use crate::codec::Capabilities;

const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Why a codec produced no measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The codec could not be set up for the payload; detected before timing.
    Configuration,
    /// The codec failed while encoding (or round-trip verification failed).
    Encode,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Configuration => write!(f, "configuration"),
            FailureKind::Encode => write!(f, "encode"),
        }
    }
}

impl From<&BenchError> for FailureKind {
    fn from(err: &BenchError) -> Self {
        if err.is_setup_failure() {
            FailureKind::Configuration
        } else {
            FailureKind::Encode
        }
    }
}

/// Timing of one codec's measurement phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Byte length of the final timed artifact
    pub artifact_bytes: usize,
    /// CRC32 of the final timed artifact
    pub checksum: u32,
    /// Timed encode calls
    pub iterations: u64,
    /// Wall time of the timed loop in nanoseconds (at least 1)
    pub elapsed_ns: u64,
    /// Iterations per nanosecond
    pub ops_per_ns: f64,
    /// Iterations per millisecond
    pub ops_per_ms: f64,
}

impl Measurement {
    /// Derive throughput from an iteration count and the timed loop's duration.
    pub fn calculate(
        artifact_bytes: usize,
        checksum: u32,
        iterations: u64,
        elapsed: Duration,
    ) -> Self {
        let elapsed_ns = (elapsed.as_nanos() as u64).max(1);
        let ops_per_ns = iterations as f64 / elapsed_ns as f64;
        let ops_per_ms = iterations as f64 / (elapsed_ns as f64 / NANOS_PER_MILLI);
        Self {
            artifact_bytes,
            checksum,
            iterations,
            elapsed_ns,
            ops_per_ns,
            ops_per_ms,
        }
    }

    /// Elapsed time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }

    /// Mean time per encode call in nanoseconds.
    pub fn mean_ns_per_op(&self) -> f64 {
        self.elapsed_ns as f64 / self.iterations.max(1) as f64
    }

    /// Format a nanosecond duration in human-readable form (auto-selects ns/μs/ms).
    pub fn format_duration(ns: u64) -> String {
        if ns < 1_000 {
            format!("{}ns", ns)
        } else if ns < 1_000_000 {
            format!("{:.2}μs", ns as f64 / 1_000.0)
        } else if ns < 1_000_000_000 {
            format!("{:.2}ms", ns as f64 / 1_000_000.0)
        } else {
            format!("{:.2}s", ns as f64 / 1_000_000_000.0)
        }
    }
}

/// Result or failure for one codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Measured(Measurement),
    Failed { kind: FailureKind, message: String },
}

/// One codec's entry in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Codec display name
    pub codec: String,
    /// Capabilities the codec ran with
    pub capabilities: Capabilities,
    /// Measurement or failure
    pub outcome: Outcome,
}

impl MeasurementRecord {
    pub fn measured(
        codec: impl Into<String>,
        capabilities: Capabilities,
        measurement: Measurement,
    ) -> Self {
        Self {
            codec: codec.into(),
            capabilities,
            outcome: Outcome::Measured(measurement),
        }
    }

    pub fn failed(codec: impl Into<String>, capabilities: Capabilities, err: &BenchError) -> Self {
        Self {
            codec: codec.into(),
            capabilities,
            outcome: Outcome::Failed {
                kind: FailureKind::from(err),
                message: err.to_string(),
            },
        }
    }

    pub fn measurement(&self) -> Option<&Measurement> {
        match &self.outcome {
            Outcome::Measured(measurement) => Some(measurement),
            Outcome::Failed { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            Outcome::Measured(_) => None,
            Outcome::Failed { kind, .. } => Some(*kind),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure_kind().is_some()
    }
}

/// System information captured at benchmark time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// OS version
    pub os_version: String,
    /// Kernel version (Linux)
    pub kernel_version: Option<String>,
    /// CPU model name
    pub cpu_model: String,
    /// Number of CPU cores
    pub cpu_cores: usize,
    /// Total system memory in bytes
    pub memory_bytes: u64,
    /// Hostname
    pub hostname: String,
}

impl SystemInfo {
    /// Collect current system information.
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: sys.cpus().len(),
            memory_bytes: sys.total_memory(),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Complete report for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Unique run identifier
    pub run_id: Uuid,
    /// Framework version
    pub version: String,
    /// Timestamp when the run started
    pub timestamp: DateTime<Utc>,
    /// System information
    pub system_info: SystemInfo,
    /// Payload measured in this run
    pub payload: PayloadKind,
    /// Iterations per phase
    pub iterations: u64,
    /// Per-codec records in run order
    pub results: Vec<MeasurementRecord>,
}

impl BenchmarkReport {
    /// Create an empty report for a run.
    pub fn new(payload: PayloadKind, iterations: u64) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            system_info: SystemInfo::collect(),
            payload,
            iterations,
            results: Vec::new(),
        }
    }

    /// Add a record to the report.
    pub fn add_result(&mut self, record: MeasurementRecord) {
        self.results.push(record);
    }

    /// Measured records, fastest first.
    pub fn ranked(&self) -> Vec<(&str, &Measurement)> {
        let mut ranked: Vec<_> = self
            .results
            .iter()
            .filter_map(|r| r.measurement().map(|m| (r.codec.as_str(), m)))
            .collect();
        ranked.sort_by(|a, b| b.1.ops_per_ns.total_cmp(&a.1.ops_per_ns));
        ranked
    }
}
