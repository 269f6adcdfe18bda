//! unitok CLI application
//!
//! Inspect a checkpoint's tokenizer, encode and decode text with it, and
//! repair malformed config JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::error;

mod commands;

use commands::{DecodeCommand, EncodeCommand, InspectCommand, RepairJsonCommand};
use unitok_tokenizers::TokenizerOptions;

/// unitok - one tokenizer front-end for every checkpoint layout
#[derive(Parser)]
#[command(name = "unitok")]
#[command(about = "Checkpoint-aware tokenizer front-end")]
#[command(long_about = r#"
unitok detects whether a checkpoint directory ships a Hugging Face
tokenizer.json or a SentencePiece tokenizer.model, resolves its BOS/EOS
tokens from tokenizer_config.json / generation_config.json and applies the
model family's BOS policy.

Examples:
  # Show what was detected
  unitok inspect models/Llama-3-8B

  # Encode with EOS, at most 128 tokens
  unitok encode models/Llama-3-8B "Hello, world!" --eos --max-length 128

  # Decode ids back to text
  unitok decode models/Llama-3-8B 128000 9906 11 1917 0
"#)]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true, default_value = "warn")]
    log_level: String,

    /// Fail on malformed generation_config.json instead of repairing it
    #[arg(long, global = true)]
    strict_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the detected backend and special tokens
    Inspect(InspectCommand),
    /// Encode text to token IDs
    Encode(EncodeCommand),
    /// Decode token IDs back to text
    Decode(DecodeCommand),
    /// Repair a config JSON file and print it
    RepairJson(RepairJsonCommand),
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    if let Err(e) = run(cli) {
        error!("Command failed: {e}");
        for cause in e.chain().skip(1) {
            error!("  Caused by: {cause}");
        }
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut options = TokenizerOptions::from_env();
    if cli.strict_json {
        options.repair_json = false;
    }

    match cli.command {
        Commands::Inspect(cmd) => commands::inspect::run(cmd, options),
        Commands::Encode(cmd) => commands::encode::run(cmd, options),
        Commands::Decode(cmd) => commands::decode::run(cmd, options),
        Commands::RepairJson(cmd) => commands::repair_json::run(cmd),
    }
}

/// `RUST_LOG` wins over `--log-level`; logs go to stderr so stdout stays
/// machine-readable.
fn setup_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
