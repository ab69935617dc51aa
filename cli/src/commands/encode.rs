//! Encode command implementation.

use clap::Parser;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Path to the trained .model file
    #[arg(short, long)]
    pub tokenizer: String,

    /// Text to encode ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Emit the IDs as a JSON array instead of space-separated
    #[arg(short, long, default_value_t = false)]
    pub json: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

use anyhow::Result as AnyhowResult;
use bytepair_tokenizer::Tokenizer;
use std::path::Path;

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    // Load tokenizer
    let tokenizer = Tokenizer::load(Path::new(&cmd.tokenizer))?;

    // Read input text (from stdin if "-")
    let input_text = if cmd.input == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        cmd.input
    };

    // Encode text
    let ids = tokenizer.encode(&input_text);

    // Output
    let output = if cmd.json {
        serde_json::to_string(&ids)?
    } else {
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &output)?;
            println!("Encoded {} tokens to {}", ids.len(), path);
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}
