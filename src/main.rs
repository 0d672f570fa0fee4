use std::env;
use std::process::ExitCode;

use anyhow::{bail, Result};
use tracing::{error, info, warn, Level};

use tirun::{is_elevated, launch, validate, DynamicApi, PriorityClass};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    if args.is_empty() {
        print_usage();
        bail!("no executable path supplied");
    }

    let (raw_path, priority) = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(message) => bail!(message),
    };

    if !is_elevated() {
        warn!("not running elevated; privilege acquisition will likely fail");
    }

    let path = validate(&raw_path)?;
    info!("launching: {}", path);
    info!("priority: {} - {}", priority.level(), priority.label());

    let api = DynamicApi::resolve();
    launch(&api, &path, priority)?;

    info!("process started under the TrustedInstaller identity");
    Ok(())
}

/// Parse `<path> [/priority:N | -priority:N]`
fn parse_args(args: &[String]) -> Result<(String, PriorityClass), String> {
    let path = args[0].clone();
    let mut priority = PriorityClass::default();

    for param in &args[1..] {
        let value = param
            .strip_prefix("/priority:")
            .or_else(|| param.strip_prefix("-priority:"));
        match value {
            Some(raw) => priority = parse_priority(raw)?,
            None => {
                return Err(format!(
                    "unknown parameter '{}'; supported: /priority:N or -priority:N",
                    param
                ))
            }
        }
    }

    Ok((path, priority))
}

/// Parse the priority level with strict bounds on the raw string
fn parse_priority(raw: &str) -> Result<PriorityClass, String> {
    if raw.is_empty() || raw.len() > 10 {
        return Err("invalid priority format; use numbers 1-6".to_string());
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err("invalid priority format; use numbers 1-6".to_string());
    }

    let level: u32 = raw
        .parse()
        .map_err(|_| "priority value conversion failed".to_string())?;

    PriorityClass::from_level(level).ok_or_else(|| "priority must be between 1 and 6".to_string())
}

fn print_usage() {
    eprintln!("Usage: tirun <path> [/priority:N | -priority:N]");
    eprintln!("  N: 1=idle 2=below-normal 3=normal 4=above-normal 5=high 6=realtime");
    eprintln!("  Launches <path> under the TrustedInstaller identity (requires elevation)");
}
