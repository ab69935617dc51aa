//! Train command implementation.

use clap::Parser;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Training data file(s); each file is one document
    #[arg(short, long, required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Output path stem; writes <stem>.model and <stem>.vocab
    #[arg(short, long)]
    pub output: String,

    /// Target vocabulary size (256 base bytes + merges)
    #[arg(short, long, default_value_t = 30_000)]
    pub vocab_size: usize,

    /// Minimum pair frequency for merges
    #[arg(short, long, default_value_t = 2)]
    pub min_frequency: u64,

    /// Regex pattern to pre-split the corpus with before training
    #[arg(short, long)]
    pub pattern: Option<String>,
}

use anyhow::Result as AnyhowResult;
use bytepair_tokenizer::Tokenizer;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    println!("Training tokenizer...");
    println!("  Input: {}", cmd.input.join(", "));
    println!("  Output: {}", cmd.output);
    println!("  Vocab size: {}", cmd.vocab_size);
    println!("  Min frequency: {}", cmd.min_frequency);
    if let Some(pattern) = &cmd.pattern {
        println!("  Pattern: {}", pattern);
    }
    println!();

    // Read training data, one document per file
    let start = Instant::now();
    let mut documents = Vec::with_capacity(cmd.input.len());
    for path in &cmd.input {
        documents.push(fs::read_to_string(path)?);
    }
    let total_bytes: usize = documents.iter().map(|doc| doc.len()).sum();
    println!(
        "Read {} bytes from {} file(s) in {:.2}s",
        total_bytes,
        documents.len(),
        start.elapsed().as_secs_f64()
    );
    println!();

    // Create tokenizer
    let mut builder = Tokenizer::builder()
        .vocab_size(cmd.vocab_size)
        .min_frequency(cmd.min_frequency);
    if let Some(pattern) = &cmd.pattern {
        builder = builder.pattern(pattern);
    }
    let mut tokenizer = builder.build()?;

    // Train; the loop is not interruptible, so show a spinner while it runs
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")?);
    spinner.set_message("Learning merges");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let start = Instant::now();
    tokenizer.train(&documents)?;
    spinner.finish_and_clear();

    println!(
        "Training completed in {:.2}s",
        start.elapsed().as_secs_f64()
    );
    println!("Final vocab size: {}", tokenizer.vocab_size());
    println!();

    // Save model
    let start = Instant::now();
    let model_path = tokenizer.save(Path::new(&cmd.output))?;
    println!(
        "Model saved to {} in {:.2}s",
        model_path.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
