//! Huffman archiving utility.
//!
//! ```bash
//! huffarc --compress --input File.txt --output CompressedFile
//! huffarc --decompress --input CompressedFile --output DecompressedFile.txt
//! ```

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use huffarc::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "huffarc")]
#[command(version)]
#[command(about = "Archiving utility based on Huffman codes", long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["compress", "decompress"])))]
struct Args {
    /// Compress the input file
    #[arg(long)]
    compress: bool,

    /// Decompress the input file
    #[arg(long)]
    decompress: bool,

    /// Path to the input file
    #[arg(long)]
    input: PathBuf,

    /// Path to the output file, created or truncated
    #[arg(long)]
    output: PathBuf,

    /// Bits per payload word (8, 16, 32 or 64), must match for compression and decompression
    #[arg(long, default_value = "64")]
    word_bits: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let _ = error.print();
            std::process::exit(if error.use_stderr() { 1 } else { 0 });
        }
    };

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("logging is not available");
    }

    if let Err(error) = run(&args) {
        eprintln!("command has failed. error: {} ({})", error.code(), error);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> UnitResult {
    let options = Options::default().with_payload_word(WordSize::from_bits(args.word_bits)?);

    if args.compress {
        compress_file(&args.input, &args.output, options)?;
        info!(input = %args.input.display(), output = %args.output.display(), "compressed");
    }
    else {
        decompress_file(&args.input, &args.output, options)?;
        info!(input = %args.input.display(), output = %args.output.display(), "decompressed");
    }

    Ok(())
}
