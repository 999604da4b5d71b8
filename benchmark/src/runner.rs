// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark runner: warm-up, timed measurement and per-codec isolation.
//!
//! For each codec, in caller order and on the calling thread:
//!
//! 1. `prepare` once (type registration, capability checks).
//! 2. Warm-up: `reset` + `encode` exactly `iterations` times, untimed.
//! 3. `reset`.
//! 4. Measurement: `reset` + `encode` exactly `iterations` times between two
//!    `Instant` readings.
//! 5. Artifact length and checksum come from the final timed encode.
//!
//! Any failure ends that codec's turn with a failed record; later codecs
//! still run.

use std::hint::black_box;
use std::time::{Duration, Instant};

use codecbench_core::{BenchError, BenchResult, IterationCount, Payload};

use crate::codec::CodecAdapter;
use crate::metrics::{Measurement, MeasurementRecord};
use crate::reporter::ReportSink;

/// Explicit run settings, passed in at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Iterations per phase (warm-up and measurement each run this many).
    pub iterations: IterationCount,
    /// Decode the final artifact and compare it to the payload.
    pub verify_round_trip: bool,
}

impl RunnerConfig {
    pub fn new(iterations: IterationCount) -> Self {
        Self {
            iterations,
            verify_round_trip: false,
        }
    }

    pub fn verify_round_trip(mut self, verify: bool) -> Self {
        self.verify_round_trip = verify;
        self
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new(IterationCount::default())
    }
}

/// Runs every codec against one payload and reports each result to a sink.
pub struct BenchmarkRunner<S> {
    config: RunnerConfig,
    sink: S,
}

impl<S: ReportSink> BenchmarkRunner<S> {
    pub fn new(config: RunnerConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Measure every codec with the configured iteration count.
    pub fn run(
        &mut self,
        payload: &Payload,
        codecs: &mut [Box<dyn CodecAdapter>],
    ) -> Vec<MeasurementRecord> {
        let iterations = self.config.iterations;
        self.run_with_iterations(payload, codecs, iterations)
    }

    /// Measure every codec with an explicit iteration count.
    pub fn run_with_iterations(
        &mut self,
        payload: &Payload,
        codecs: &mut [Box<dyn CodecAdapter>],
        iterations: IterationCount,
    ) -> Vec<MeasurementRecord> {
        tracing::info!(
            iterations = iterations.get(),
            codecs = codecs.len(),
            payload = payload.type_name(),
            "Starting benchmark run"
        );

        let mut records = Vec::with_capacity(codecs.len());
        for codec in codecs.iter_mut() {
            let record = self.measure(payload, codec.as_mut(), iterations);
            self.sink.emit(&record);
            records.push(record);
        }
        records
    }

    /// Run the full protocol for one codec. Never panics on codec failure.
    pub fn measure(
        &self,
        payload: &Payload,
        codec: &mut dyn CodecAdapter,
        iterations: IterationCount,
    ) -> MeasurementRecord {
        let name = codec.name().to_string();

        if let Err(err) = codec.prepare(payload) {
            return MeasurementRecord::failed(name, codec.capabilities(), &err);
        }
        let capabilities = codec.capabilities();

        tracing::debug!(codec = %name, iterations = iterations.get(), "Warming up");
        if let Err(err) = warm_up(codec, payload, iterations.get()) {
            return MeasurementRecord::failed(name, capabilities, &err);
        }

        codec.reset();
        let (elapsed, artifact_bytes) = match timed(codec, payload, iterations.get()) {
            Ok(result) => result,
            Err(err) => return MeasurementRecord::failed(name, capabilities, &err),
        };

        if self.config.verify_round_trip && capabilities.decode {
            if let Err(err) = verify_round_trip(codec, payload) {
                return MeasurementRecord::failed(name, capabilities, &err);
            }
        }

        let checksum = crc32fast::hash(codec.artifact());
        MeasurementRecord::measured(
            name,
            capabilities,
            Measurement::calculate(artifact_bytes, checksum, iterations.get(), elapsed),
        )
    }
}

/// Untimed iterations to reach steady state.
fn warm_up(codec: &mut dyn CodecAdapter, payload: &Payload, iterations: u64) -> BenchResult<()> {
    for _ in 0..iterations {
        codec.reset();
        black_box(codec.encode(black_box(payload))?);
    }
    Ok(())
}

/// The timed loop. Returns its wall time and the final artifact length.
fn timed(
    codec: &mut dyn CodecAdapter,
    payload: &Payload,
    iterations: u64,
) -> BenchResult<(Duration, usize)> {
    let mut artifact_bytes = 0;
    let start = Instant::now();
    for _ in 0..iterations {
        codec.reset();
        artifact_bytes = codec.encode(black_box(payload))?;
    }
    let elapsed = start.elapsed();
    Ok((elapsed, black_box(artifact_bytes)))
}

/// Decode the last artifact and require it to equal the source payload.
fn verify_round_trip(codec: &dyn CodecAdapter, payload: &Payload) -> BenchResult<()> {
    let decoded = codec.decode(codec.artifact())?;
    if decoded != *payload {
        return Err(BenchError::Encode {
            codec: codec.name().to_string(),
            message: "decoded artifact is not structurally equal to the payload".to_string(),
        });
    }
    tracing::debug!(codec = codec.name(), "Round trip verified");
    Ok(())
}
