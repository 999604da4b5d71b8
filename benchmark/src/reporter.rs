// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Report sinks and JSON report files.
//!
//! The runner pushes each record into a [`ReportSink`] as soon as the codec
//! finishes. `LogSink` renders records as structured log lines; `MemorySink`
//! collects them; `JsonReporter` persists a whole `BenchmarkReport`.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::metrics::{BenchmarkReport, MeasurementRecord, Outcome};

/// Receives measurement records as the run progresses.
pub trait ReportSink {
    fn emit(&mut self, record: &MeasurementRecord);
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn emit(&mut self, record: &MeasurementRecord) {
        (**self).emit(record);
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn emit(&mut self, record: &MeasurementRecord) {
        (**self).emit(record);
    }
}

/// Writes one `tracing` event per record.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn emit(&mut self, record: &MeasurementRecord) {
        match &record.outcome {
            Outcome::Measured(m) => tracing::info!(
                codec = %record.codec,
                size = m.artifact_bytes,
                elapsed_ns = m.elapsed_ns,
                elapsed_ms = m.elapsed_ms(),
                ops_per_ns = m.ops_per_ns,
                ops_per_ms = m.ops_per_ms,
                checksum = m.checksum,
                "{}\t size {} take {} ns, {} ms. {:.6}/ns, {:.2}/ms",
                record.codec,
                m.artifact_bytes,
                m.elapsed_ns,
                m.elapsed_ms(),
                m.ops_per_ns,
                m.ops_per_ms
            ),
            Outcome::Failed { kind, message } => tracing::warn!(
                codec = %record.codec,
                kind = %kind,
                "{}\t failed: {}",
                record.codec,
                message
            ),
        }
    }
}

/// Keeps every record in memory, in emit order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<MeasurementRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<MeasurementRecord> {
        self.records
    }
}

impl ReportSink for MemorySink {
    fn emit(&mut self, record: &MeasurementRecord) {
        self.records.push(record.clone());
    }
}

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON reporter for benchmark results.
pub struct JsonReporter {
    /// Output directory for benchmark data
    output_dir: PathBuf,
}

impl JsonReporter {
    /// Create a new JSON reporter with the specified output directory.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ReporterError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Save a report as `<payload>_<timestamp>_<run id prefix>.json`.
    ///
    /// Returns the path to the created file.
    pub fn save(&self, report: &BenchmarkReport) -> Result<PathBuf, ReporterError> {
        let timestamp = report.timestamp.format("%Y-%m-%dT%H-%M-%SZ");
        let run_id = report.run_id.simple().to_string();
        let filename = format!("{}_{}_{}.json", report.payload, timestamp, &run_id[..8]);
        let filepath = self.output_dir.join(&filename);

        let file = File::create(&filepath)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, report)?;

        tracing::info!(path = %filepath.display(), "Saved benchmark report");
        Ok(filepath)
    }

    /// List all existing report files in the output directory.
    pub fn list_reports(&self) -> Result<Vec<PathBuf>, ReporterError> {
        let mut reports = Vec::new();
        for entry in fs::read_dir(&self.output_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                reports.push(path);
            }
        }
        reports.sort();
        Ok(reports)
    }

    /// Load an existing report from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<BenchmarkReport, ReporterError> {
        let file = File::open(path)?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }
}
