//! Decode command implementation.

use clap::Parser;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Path to the trained .model file
    #[arg(short, long)]
    pub tokenizer: String,

    /// Token IDs to decode: comma-separated, or a JSON array
    #[arg(short = 'i', long)]
    pub tokens: String,
}

use anyhow::Result as AnyhowResult;
use bytepair_tokenizer::Tokenizer;
use std::path::Path;

pub fn run(cmd: DecodeCommand) -> AnyhowResult<()> {
    // Load tokenizer
    let tokenizer = Tokenizer::load(Path::new(&cmd.tokenizer))?;

    // Parse token IDs
    let trimmed = cmd.tokens.trim();
    let ids: Vec<u32> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)?
    } else {
        trimmed
            .split(',')
            .map(|field| field.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()?
    };

    // Decode
    let text = tokenizer.decode(&ids)?;
    println!("{}", text);

    Ok(())
}
