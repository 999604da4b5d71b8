// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI tool to run the codec comparison and generate reports.

use std::path::PathBuf;

use clap::Parser;
use codecbench::{
    build_adapters, BenchmarkReport, BenchmarkRunner, JsonReporter, LogSink, Measurement,
    RunnerConfig,
};
use codecbench_core::{
    BenchConfig, CodecName, ConfigLoader, ConfigOverrides, IterationCount, PayloadKind,
};

/// Iterations per phase in quick mode.
const QUICK_ITERATIONS: u64 = 10_000;

#[derive(Parser)]
#[command(name = "run_benchmarks")]
#[command(about = "Compare serialization codecs on one payload and report throughput")]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Iterations per phase (overrides config and ITER_NUMS)
    #[arg(short, long)]
    iterations: Option<u64>,

    /// Payload to measure: bean, graph, cyclic-graph or struct
    #[arg(short, long)]
    payload: Option<String>,

    /// Codecs to run, in order (all configured codecs if not specified)
    #[arg(long = "codec")]
    codecs: Vec<String>,

    /// Write a JSON report into this directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Decode the final artifact of each codec and compare it to the payload
    #[arg(long)]
    verify: bool,

    /// Run in quick mode (fewer iterations)
    #[arg(long)]
    quick: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let config = resolve_config(&args)?;
    let payload = config.payload.build();
    let mut codecs = build_adapters(&config.codecs)?;

    println!("Codec Benchmark Suite");
    println!("=====================");
    println!("Payload: {}", config.payload);
    println!("Iterations: {}", config.iterations);
    println!();

    let runner_config =
        RunnerConfig::new(config.iterations).verify_round_trip(config.verify_round_trip);
    let mut runner = BenchmarkRunner::new(runner_config, LogSink);
    let records = runner.run(&payload, &mut codecs);

    let mut report = BenchmarkReport::new(config.payload, config.iterations.get());
    for record in records {
        report.add_result(record);
    }

    if let Some(dir) = &args.output {
        let reporter = JsonReporter::new(dir)?;
        let path = reporter.save(&report)?;
        println!();
        println!("Benchmark report saved to: {:?}", path);
    }

    println!();
    print_summary(&report);

    Ok(())
}

/// Defaults, then the YAML file, then `ITER_NUMS`, then command-line flags.
fn resolve_config(args: &Args) -> anyhow::Result<BenchConfig> {
    let iterations = match (args.iterations, args.quick) {
        (Some(iterations), _) => Some(IterationCount::new(iterations)?),
        (None, true) => Some(IterationCount::new(QUICK_ITERATIONS)?),
        (None, false) => None,
    };
    let payload = args
        .payload
        .as_deref()
        .map(str::parse::<PayloadKind>)
        .transpose()?;
    let codecs = args
        .codecs
        .iter()
        .map(|name| CodecName::new(name.as_str()))
        .collect::<Result<Vec<_>, _>>()?;

    let overrides = ConfigOverrides {
        iterations,
        payload,
        verify_round_trip: args.verify,
        codecs,
    };
    let config = ConfigLoader::resolve(
        args.config.as_deref(),
        |key| std::env::var(key).ok(),
        &overrides,
    )?;
    Ok(config)
}

fn print_summary(report: &BenchmarkReport) {
    println!("Summary");
    println!("-------");
    println!();

    for (rank, (codec, m)) in report.ranked().iter().enumerate() {
        println!(
            "{}. {}: {} bytes, {:.2} ops/ms, {}/op",
            rank + 1,
            codec,
            m.artifact_bytes,
            m.ops_per_ms,
            Measurement::format_duration(m.mean_ns_per_op() as u64)
        );
    }

    for record in report.results.iter().filter(|r| r.is_failure()) {
        if let Some(kind) = record.failure_kind() {
            println!("-  {}: failed ({})", record.codec, kind);
        }
    }
}
