//! Metal Extraction Cost Predictor CLI
//!
//! A command-line tool for requesting cost estimates from the estimator
//! service, inspecting the loaded model, and browsing reference metal
//! and thermodynamic data offline.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{estimate, metals, model, thermo};

/// Metal Extraction Cost Predictor CLI
#[derive(Parser)]
#[command(name = "mecp")]
#[command(author, version, about = "CLI for Metal Extraction Cost Predictor", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via MECP_API_URL env var)
    #[arg(long, env = "MECP_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate extraction cost for a metal
    Estimate(estimate::EstimateArgs),

    /// Show the model artifact loaded by the service
    Model,

    /// List reference metal properties
    Metals {
        /// Show a single metal (case-insensitive)
        name: Option<String>,
    },

    /// Thermodynamic helpers
    #[command(subcommand)]
    Thermo(ThermoCommands),
}

#[derive(Subcommand)]
pub enum ThermoCommands {
    /// Sample ΔG = ΔH − TΔS over a temperature range
    Curve {
        /// Enthalpy change (kJ/mol)
        #[arg(long, allow_negative_numbers = true)]
        delta_h: f64,

        /// Entropy change (kJ/mol·K)
        #[arg(long, allow_negative_numbers = true)]
        delta_s: f64,

        /// Lowest temperature (K)
        #[arg(long, default_value_t = estimator_lib::thermo::DEFAULT_T_MIN)]
        t_min: f64,

        /// Highest temperature (K)
        #[arg(long, default_value_t = estimator_lib::thermo::DEFAULT_T_MAX)]
        t_max: f64,

        /// Number of samples
        #[arg(long, default_value_t = estimator_lib::thermo::DEFAULT_CURVE_POINTS)]
        points: usize,
    },

    /// Electrode potential from the Nernst equation at 25 °C
    Nernst {
        /// Standard electrode potential E° (V)
        #[arg(long, allow_negative_numbers = true)]
        standard_potential: f64,

        /// Electrons transferred
        #[arg(long, short = 'n')]
        electrons: u32,

        /// Activity of the reduced species
        #[arg(long, default_value_t = 1.0)]
        reduced: f64,

        /// Activity of the oxidized species
        #[arg(long, default_value_t = 1.0)]
        oxidized: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate(args) => {
            let client = client::ApiClient::new(&cli.api_url)?;
            estimate::run_estimate(&client, args, cli.format).await?;
        }
        Commands::Model => {
            let client = client::ApiClient::new(&cli.api_url)?;
            model::show_model(&client, cli.format).await?;
        }
        Commands::Metals { name } => {
            metals::show_metals(name.as_deref(), cli.format)?;
        }
        Commands::Thermo(thermo_cmd) => match thermo_cmd {
            ThermoCommands::Curve {
                delta_h,
                delta_s,
                t_min,
                t_max,
                points,
            } => {
                thermo::show_curve(delta_h, delta_s, t_min, t_max, points, cli.format)?;
            }
            ThermoCommands::Nernst {
                standard_potential,
                electrons,
                reduced,
                oxidized,
            } => {
                thermo::show_nernst(standard_potential, electrons, reduced, oxidized, cli.format)?;
            }
        },
    }

    Ok(())
}
