// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! End-to-end runner scenarios.
//!
//! These drive the public API the way the `run_benchmarks` binary does:
//! build adapters, hand them one payload, and inspect what the sink received.

use codecbench::codec::{Bincode, Json, MsgPack, SerdeAdapter, Yaml};
use codecbench::{
    build_adapters, AdapterOptions, BenchmarkRunner, Capabilities, CodecAdapter, FailureKind,
    MemorySink, RunnerConfig,
};
use codecbench_core::{
    BenchError, BenchResult, CodecConfig, CodecName, IterationCount, Payload, PayloadKind,
    TestDataFactory,
};

/// Fails every encode call.
struct ExplodingCodec;

impl CodecAdapter for ExplodingCodec {
    fn name(&self) -> &str {
        "exploding"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    fn prepare(&mut self, _payload: &Payload) -> BenchResult<()> {
        Ok(())
    }

    fn encode(&mut self, _payload: &Payload) -> BenchResult<usize> {
        Err(BenchError::Encode {
            codec: "exploding".to_string(),
            message: "simulated I/O failure".to_string(),
        })
    }

    fn reset(&mut self) {}

    fn artifact(&self) -> &[u8] {
        &[]
    }
}

fn iterations(n: u64) -> IterationCount {
    IterationCount::new(n).expect("non-zero iteration count")
}

/// A: succeeds, B: rejects the self-referential payload, C: succeeds.
#[test]
fn test_three_codecs_with_one_rejecting_cycles() {
    let payload = Payload::Graph(TestDataFactory::create_graph(true));
    let mut codecs: Vec<Box<dyn CodecAdapter>> = vec![
        Box::new(SerdeAdapter::<Json>::new(AdapterOptions::default())),
        Box::new(SerdeAdapter::<MsgPack>::new(AdapterOptions {
            ref_tracking: false,
            register_types: true,
        })),
        Box::new(SerdeAdapter::<Bincode>::new(AdapterOptions::default())),
    ];

    let mut runner = BenchmarkRunner::new(RunnerConfig::new(iterations(1000)), MemorySink::new());
    runner.run(&payload, &mut codecs);
    let records = runner.into_sink().into_records();

    assert_eq!(records.len(), 3);

    assert_eq!(records[1].codec, "msgpack");
    assert_eq!(records[1].failure_kind(), Some(FailureKind::Configuration));

    for index in [0, 2] {
        let m = records[index]
            .measurement()
            .unwrap_or_else(|| panic!("{} should have measured", records[index].codec));
        assert!(m.artifact_bytes > 0);
        assert!(m.ops_per_ns > 0.0);
        assert!(m.ops_per_ms > 0.0);
        assert_eq!(m.iterations, 1000);
    }
}

/// A codec that fails every call only affects its own record.
#[test]
fn test_failing_codec_is_isolated() {
    let payload = TestDataFactory::create_benchmark_payload();
    let mut codecs: Vec<Box<dyn CodecAdapter>> = vec![
        Box::new(SerdeAdapter::<Json>::new(AdapterOptions::default())),
        Box::new(ExplodingCodec),
        Box::new(SerdeAdapter::<Bincode>::new(AdapterOptions::default())),
    ];

    let mut runner = BenchmarkRunner::new(RunnerConfig::new(iterations(100)), MemorySink::new());
    let records = runner.run(&payload, &mut codecs);

    assert_eq!(records.len(), 3);
    assert!(records[0].measurement().is_some());
    assert_eq!(records[1].failure_kind(), Some(FailureKind::Encode));
    assert!(records[2].measurement().is_some());
    assert_eq!(runner.sink().records().len(), 3);
}

/// Every bundled codec measures every payload it can represent, and the
/// decoded artifact matches the source.
#[test]
fn test_all_codecs_all_payloads_with_verification() {
    let configs: Vec<CodecConfig> = ["json", "bincode", "msgpack", "yaml"]
        .iter()
        .map(|name| CodecConfig::new(CodecName::new(*name).unwrap()))
        .collect();

    for kind in [
        PayloadKind::Bean,
        PayloadKind::Graph,
        PayloadKind::CyclicGraph,
        PayloadKind::Struct,
    ] {
        let payload = kind.build();
        let mut codecs = build_adapters(&configs).unwrap();
        let config = RunnerConfig::new(iterations(20)).verify_round_trip(true);
        let mut runner = BenchmarkRunner::new(config, MemorySink::new());

        let records = runner.run(&payload, &mut codecs);
        for record in &records {
            assert!(
                record.measurement().is_some(),
                "{} on {kind}: {:?}",
                record.codec,
                record.outcome
            );
        }
    }
}

/// Different wire formats give different (but positive) sizes for one payload.
#[test]
fn test_artifact_sizes_differ_between_formats() {
    let payload = TestDataFactory::create_benchmark_payload();
    let mut codecs: Vec<Box<dyn CodecAdapter>> = vec![
        Box::new(SerdeAdapter::<Bincode>::new(AdapterOptions::default())),
        Box::new(SerdeAdapter::<Yaml>::new(AdapterOptions::default())),
    ];
    let mut runner = BenchmarkRunner::new(RunnerConfig::new(iterations(10)), MemorySink::new());
    let records = runner.run(&payload, &mut codecs);

    let bincode = records[0].measurement().unwrap().artifact_bytes;
    let yaml = records[1].measurement().unwrap().artifact_bytes;
    assert!(bincode > 0 && yaml > 0);
    assert_ne!(bincode, yaml);
}

/// The same adapter measured twice reports the same artifact.
#[test]
fn test_repeated_runs_are_comparable() {
    let mut first = BenchmarkRunner::new(RunnerConfig::new(iterations(10)), MemorySink::new());
    let mut second = BenchmarkRunner::new(RunnerConfig::new(iterations(10)), MemorySink::new());

    let mut a: Vec<Box<dyn CodecAdapter>> =
        vec![Box::new(SerdeAdapter::<MsgPack>::new(AdapterOptions::default()))];
    let mut b: Vec<Box<dyn CodecAdapter>> =
        vec![Box::new(SerdeAdapter::<MsgPack>::new(AdapterOptions::default()))];

    let ra = first.run(&TestDataFactory::create_benchmark_payload(), &mut a);
    let rb = second.run(&TestDataFactory::create_benchmark_payload(), &mut b);

    let ma = ra[0].measurement().unwrap();
    let mb = rb[0].measurement().unwrap();
    assert_eq!(ma.artifact_bytes, mb.artifact_bytes);
    assert_eq!(ma.checksum, mb.checksum);
}
