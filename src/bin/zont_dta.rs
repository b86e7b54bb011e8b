//! Decode delta-time arrays from dumped Zont API responses.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use zont_api::{decode_document, redact, DecodeOptions, RedactionPolicy};

#[derive(Parser)]
#[command(name = "zont-dta")]
#[command(about = "Decode delta-time arrays from dumped Zont API responses")]
#[command(after_help = "INPUT FORMAT:\n  \
    Either a single delta-time array, e.g. [[1000, 21.5], [-60, 21.6]],\n  \
    or a load_data device response mapping data types to sensors:\n  \
    {\"z3k_temperature\": {\"4242\": [[1000, 21.5], [-60, 21.6]]}}\n\n\
OUTPUT:\n  \
    JSON on stdout. A single array decodes to an array of [ts, ...payload];\n  \
    a response decodes to an object keyed by <type>.<sensor>[.<metric>].")]
struct Args {
    /// Input JSON file
    input: PathBuf,

    /// Keep decode order instead of sorting by timestamp
    #[arg(long)]
    no_sort: bool,

    /// Sort newest first
    #[arg(long)]
    reverse: bool,

    /// Drop points that repeat the previous point's timestamp
    #[arg(long)]
    filter_duplicates: bool,

    /// Redact personal data before decoding
    #[arg(long)]
    redact: bool,

    /// Redaction policy file (JSON); implies --redact
    #[arg(long)]
    policy: Option<PathBuf>,
}

fn load_policy(path: Option<&PathBuf>) -> Result<RedactionPolicy, String> {
    let Some(path) = path else {
        return Ok(RedactionPolicy::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read policy {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("Invalid policy {}: {e}", path.display()))
}

fn run(args: &Args) -> Result<(), String> {
    let text = fs::read_to_string(&args.input)
        .map_err(|e| format!("Failed to open {}: {e}", args.input.display()))?;
    let mut input: Value =
        serde_json::from_str(&text).map_err(|e| format!("Invalid JSON: {e}"))?;

    if args.redact || args.policy.is_some() {
        let policy = load_policy(args.policy.as_ref())?;
        redact(&mut input, &policy);
    }

    let opts = DecodeOptions::default()
        .with_sort(!args.no_sort)
        .with_reverse(args.reverse)
        .with_filter_duplicates(args.filter_duplicates);

    let (output, stats) =
        decode_document(&input, opts).map_err(|e| format!("Failed to decode: {e}"))?;

    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|e| format!("Failed to render output: {e}"))?;
    println!("{rendered}");
    tracing::info!(%stats, "decoded {}", args.input.display());
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "zont_api=info,zont_dta=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
