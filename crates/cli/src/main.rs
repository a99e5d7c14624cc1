mod cli;
mod config;
mod input;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use praxis_alerts::build_hr_report;
use praxis_compliance::{decode_practice_input, validate_aggregated_input, validate_thresholds};
use praxis_core::config::load_dotenv;
use praxis_core::EngineConfig;
use praxis_staffing::compute_staffing;

use crate::cli::{CliArgs, Command};
use crate::config::CliConfig;
use crate::input::{read_document, staffing_request};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    load_dotenv();
    let mut engine = match args.profile.as_deref() {
        Some(p) => EngineConfig::for_profile(p),
        None => EngineConfig::from_env(),
    };
    CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?
        .apply(&mut engine);
    engine.log_summary();

    match args.command {
        Command::Staffing { file } => {
            let doc = read_document(&file)?;
            let (input, current) = staffing_request(&doc)?;
            let result = compute_staffing(&input, current.as_ref(), &engine.staffing);
            for w in &result.derived.warnings {
                warn!(warning = %w, "Staffing estimate");
            }
            print_json(&result)
        }
        Command::HrReport { file, k_min } => {
            let mut thresholds = engine.thresholds.clone();
            if let Some(k) = k_min {
                thresholds.k_min = k;
            }
            let doc = read_document(&file)?;
            let input = decode_practice_input(&doc)
                .with_context(|| format!("rejected HR input: {}", file.display()))?;
            let report = build_hr_report(&input, &thresholds).context("HR report failed")?;
            info!(
                roles = report.roles.len(),
                alerts = report.alerts.len(),
                warnings = report.warnings.len(),
                "HR report built"
            );
            print_json(&report)
        }
        Command::Validate { file, k_min } => {
            let k = k_min.unwrap_or(engine.thresholds.k_min);
            let doc = read_document(&file)?;
            let input = decode_practice_input(&doc)
                .with_context(|| format!("rejected HR input: {}", file.display()))?;

            let groups = validate_aggregated_input(&input.groups, k);
            let mut thresholds = engine.thresholds.clone();
            thresholds.k_min = k;
            let threshold_check = validate_thresholds(&thresholds);
            let valid = groups.valid && threshold_check.valid;

            print_json(&serde_json::json!({
                "valid": valid,
                "groups": groups,
                "thresholds": threshold_check,
            }))?;
            if !valid {
                bail!("validation failed: {}", file.display());
            }
            Ok(())
        }
        Command::Config => print_json(&engine.redacted_summary()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{out}");
    Ok(())
}
