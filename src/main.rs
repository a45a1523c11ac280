use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use alto_tools::{BatchConfig, Operation, OutputSink, discover_inputs, run_batch};
use clap::{ArgGroup, Parser};
use log::{error, info};

/// Simple operations on ALTO XML files
#[derive(Parser, Debug)]
#[command(name = "alto-tools", version)]
#[command(about = "Extract text, word confidence, or metadata from ALTO XML files")]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["text", "confidence", "metadata"])
))]
struct Args {
    /// ALTO file, or directory searched recursively for *.xml and *.alto
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory (one file per input); stdout if not given
    #[arg(short, long, value_name = "DIR", env = "ALTO_TOOLS_OUTPUT")]
    output: Option<PathBuf>,

    /// Extract the text content
    #[arg(short, long)]
    text: bool,

    /// Calculate the mean word confidence
    #[arg(short, long)]
    confidence: bool,

    /// Extract descriptive and processing metadata
    #[arg(short, long)]
    metadata: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn operation(&self) -> Operation {
        if self.text {
            Operation::Text
        } else if self.confidence {
            Operation::Confidence
        } else {
            Operation::Metadata
        }
    }

    fn config(&self) -> BatchConfig {
        BatchConfig {
            operation: self.operation(),
            sink: match &self.output {
                Some(dir) => OutputSink::Directory(dir.clone()),
                None => OutputSink::Stdout,
            },
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.config();

    let inputs = match discover_inputs(&args.input) {
        Ok(inputs) => inputs,
        Err(e) => {
            error!("Invalid input: {}", e);
            eprintln!("Invalid input: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let report = run_batch(&inputs, &config, &mut out);

    if config.sink == OutputSink::Stdout && !report.outcomes.is_empty() {
        if let Err(e) = writeln!(out) {
            error!("Failed to write output: {}", e);
        }
    }
    if let Err(e) = out.flush() {
        error!("Failed to flush output: {}", e);
    }

    info!(
        "Done: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
}
