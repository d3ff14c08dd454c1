//! # Folio Terminal Host
//!
//! Main entry point for the console host.

use folio_termd::config::{parse_format, parse_mode};
use folio_termd::{CliOverrides, HostRuntime};
use std::env;
use std::process;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("folio_termd");

    let overrides = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    let config = overrides.resolve().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    });

    let mut runtime = HostRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    if let Err(e) = runtime.run() {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }
    runtime.into_writer();
}

/// Logs go to stderr so they never mix with rendered output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_args(args: &[String]) -> Result<CliOverrides, String> {
    let mut overrides = CliOverrides::default();
    let mut i = 1;

    let value = |i: usize, flag: &str| -> Result<String, String> {
        args.get(i)
            .cloned()
            .ok_or_else(|| format!("Missing value for {}", flag))
    };

    while i < args.len() {
        match args[i].as_str() {
            "--mode" | "-m" => {
                i += 1;
                let mode = value(i, "--mode")?;
                overrides.mode = Some(parse_mode(&mode).map_err(|e| e.to_string())?);
            }
            "--script" | "-s" => {
                i += 1;
                overrides.script = Some(value(i, "--script")?);
            }
            "--config" | "-c" => {
                i += 1;
                overrides.config = Some(value(i, "--config")?);
            }
            "--max-steps" => {
                i += 1;
                let steps = value(i, "--max-steps")?;
                overrides.max_steps = Some(
                    steps
                        .parse()
                        .map_err(|_| format!("Invalid max-steps value: {}", steps))?,
                );
            }
            "--format" | "-f" => {
                i += 1;
                let format = value(i, "--format")?;
                overrides.format = Some(parse_format(&format).map_err(|e| e.to_string())?);
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(overrides)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -m, --mode <MODE>        Host mode: sim (default) or interactive");
    eprintln!("  -s, --script <FILE>      Input script file (for sim mode)");
    eprintln!("  -c, --config <FILE>      JSON config file (flags override it)");
    eprintln!("  --max-steps <N>          Maximum steps to run (0 = unlimited)");
    eprintln!("  -f, --format <FORMAT>    Output format: plain (default) or html");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RUST_LOG                 Log filter for stderr (default: warn)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --script demos/tour.fkeys", program);
    eprintln!("  {} --mode interactive --format html", program);
}
