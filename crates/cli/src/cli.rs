use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Staffing demand and privacy-compliant HR KPIs for dental practices.
///
/// Reads JSON or YAML input files and prints pretty JSON to stdout.
#[derive(Parser, Debug)]
#[command(name = "praxis", about = "Staffing demand and HR KPI engine", version)]
pub struct CliArgs {
    /// Path to config file (default: ~/.config/praxis/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Environment profile; keys are read as {PROFILE}_{KEY} first
    #[arg(long, global = true, env = "PRAXIS_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute role-by-role FTE demand from structural practice figures
    Staffing {
        /// Input file: `{ "input": {...}, "current": {...} }` or a bare input object
        file: PathBuf,
    },

    /// Practice and role KPI snapshots with alerts
    HrReport {
        /// Aggregated HR input file
        file: PathBuf,

        /// Override the k-anonymity floor
        #[arg(long)]
        k_min: Option<u32>,
    },

    /// Run the compliance pre-flight checks without computing KPIs
    Validate {
        /// Aggregated HR input file
        file: PathBuf,

        /// Override the k-anonymity floor
        #[arg(long)]
        k_min: Option<u32>,
    },

    /// Print the effective configuration
    Config,
}
