//! Benchmark command implementation.

use clap::Parser;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    /// Path to the trained .model file
    #[arg(short, long)]
    pub tokenizer: String,

    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: String,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

use anyhow::Result as AnyhowResult;
use bytepair_tokenizer::Tokenizer;
use std::fs;
use std::path::Path;
use std::time::Instant;

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    // Load tokenizer
    let tokenizer = Tokenizer::load(Path::new(&cmd.tokenizer))?;

    // Read input text
    let text = fs::read_to_string(&cmd.input)?;

    println!("Benchmarking encoding...");
    println!("  Text length: {} bytes", text.len());
    println!("  Iterations: {}", cmd.iterations);
    println!();

    // Warmup
    let tokens = tokenizer.encode(&text).len();

    // Benchmark
    let start = Instant::now();
    for _ in 0..cmd.iterations {
        let _ = tokenizer.encode(&text);
    }
    let elapsed = start.elapsed();

    let avg_time_ms = elapsed.as_secs_f64() * 1000.0 / cmd.iterations as f64;
    let tokens_per_sec = tokens as f64 * cmd.iterations as f64 / elapsed.as_secs_f64();

    println!("Results:");
    println!("  Tokens per pass: {}", tokens);
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_time_ms);
    println!("  Throughput: {:.0} tokens/s", tokens_per_sec);

    Ok(())
}
