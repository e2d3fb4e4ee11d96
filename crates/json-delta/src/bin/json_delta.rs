//! `json-delta`: show what a structural delta changes in a document.
//!
//! Usage:
//!   json-delta <BASE> <DELTA> [--unchanged] [--format outline|json|summary]
//!
//! Either path may be `-` to read that input from stdin.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use json_delta::json_cli::{read_inputs, run_merge, OutputFormat};
use json_delta::logging::{self, Profile};
use json_delta::{MergeOptions, DEFAULT_MAX_DEPTH};

#[derive(Debug, Parser)]
#[command(name = "json-delta", version, about = "Annotate a JSON document with the changes recorded in a delta")]
struct Args {
    /// Base document (`-` for stdin).
    base: PathBuf,
    /// Delta computed against the base document (`-` for stdin).
    delta: PathBuf,
    /// Also list keys that did not change.
    #[arg(long)]
    unchanged: bool,
    /// Maximum nesting depth; 0 disables the limit.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    #[arg(long, value_enum, default_value_t = OutputFormat::Outline)]
    format: OutputFormat,
    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(if args.log_json { Profile::Production } else { Profile::Development });

    let options = MergeOptions::new()
        .include_unchanged(args.unchanged)
        .max_depth((args.max_depth > 0).then_some(args.max_depth));

    let result = read_inputs(&args.base, &args.delta)
        .and_then(|(base, delta)| run_merge(&base, &delta, &options, args.format));

    match result {
        Ok(out) => {
            if let Err(e) = io::stdout().write_all(out.as_bytes()) {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
