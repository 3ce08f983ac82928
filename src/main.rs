use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

use sltp_verify::config::Config;
use sltp_verify::pipeline;
use sltp_verify::VerifyError;

/// Check that the EA's logged SL/TP multipliers match the configured targets.
#[derive(Parser, Debug)]
#[command(name = "verify-parameters", version)]
struct Args {
    /// parameters_verification CSV; searched for when omitted
    csv_path: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    match run(args, &cfg) {
        Ok(code) => code,
        Err(e) => {
            print_fatal(&e);
            ExitCode::from(1)
        }
    }
}

fn run(args: Args, cfg: &Config) -> Result<ExitCode> {
    println!("{}", "=".repeat(60));
    println!("  GOLD EA - SL/TP PARAMETER VERIFICATION");
    println!("{}", "=".repeat(60));

    let outcome = pipeline::run(args.csv_path, cfg)?;

    println!("Report saved: {}", outcome.report_path.display());
    if outcome.stats.all_ok() {
        println!("✓ Verification completed successfully!");
    } else {
        println!("⚠ Anomalies detected.");
    }
    Ok(ExitCode::from(outcome.exit_code()))
}

fn print_fatal(err: &anyhow::Error) {
    eprintln!("✗ Error: {:#}", err);

    if let Some(VerifyError::DiscoveryFailed { searched }) = err.downcast_ref::<VerifyError>() {
        eprintln!();
        eprintln!("Searched:");
        for dir in searched {
            eprintln!("   {}", dir.display());
        }
        eprintln!();
        eprintln!("Solutions:");
        eprintln!("   1. Pass the path: verify-parameters <path/to/file.csv>");
        eprintln!("   2. Copy the CSV file into the current directory");
        eprintln!("   3. Check that the EA actually produced the file");
    }
}
