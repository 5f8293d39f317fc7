//! Cost estimate command

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use estimator_lib::{reference, ExportRecord, Feature, RawRecord, SchemaError};
use serde_json::json;
use std::path::PathBuf;

use crate::client::ApiClient;
use crate::output::{print_error, print_json, print_success, print_warning, OutputFormat};

/// Inputs for a single estimate
#[derive(Args, Debug, Default)]
pub struct EstimateArgs {
    /// Pre-fill fields from the reference table (e.g. Copper)
    #[arg(long, short)]
    pub metal: Option<String>,

    /// Gibbs free energy ΔG (kJ/mol)
    #[arg(long, allow_negative_numbers = true)]
    pub delta_g: Option<f64>,

    /// Standard electrode potential E° (V)
    #[arg(long, allow_negative_numbers = true)]
    pub electrode_potential: Option<f64>,

    /// Enthalpy of formation/reduction (kJ/mol)
    #[arg(long, allow_negative_numbers = true)]
    pub enthalpy: Option<f64>,

    /// Ore grade, percent metal content in (0, 100]
    #[arg(long, allow_negative_numbers = true)]
    pub ore_grade: Option<f64>,

    /// Melting point (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub melting_point: Option<f64>,

    /// Boiling point (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub boiling_point: Option<f64>,

    /// Also write the inputs and estimate as a CSV record
    #[arg(long)]
    pub export: Option<PathBuf>,
}

impl EstimateArgs {
    fn flag_value(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::DeltaG => self.delta_g,
            Feature::ElectrodePotential => self.electrode_potential,
            Feature::Enthalpy => self.enthalpy,
            Feature::OreGrade => self.ore_grade,
            Feature::MeltingPoint => self.melting_point,
            Feature::BoilingPoint => self.boiling_point,
        }
    }
}

/// Merge reference data for `--metal` with explicit field flags.
///
/// Flags win over reference values. Fields neither source provides are
/// left out so the schema reports them.
pub fn build_record(args: &EstimateArgs) -> Result<RawRecord> {
    let mut record = match &args.metal {
        Some(name) => reference::find(name)
            .with_context(|| format!("Unknown metal '{}' (see `mecp metals`)", name))?
            .to_record(),
        None => RawRecord::new(),
    };

    for feature in Feature::ALL {
        if let Some(value) = args.flag_value(feature) {
            record.insert(feature.name().to_string(), json!(value));
        }
    }

    Ok(record)
}

fn flag_name(field: &str) -> String {
    format!("--{}", field.replace('_', "-"))
}

/// Validate locally, request the estimate and optionally export it
pub async fn run_estimate(
    client: &ApiClient,
    args: EstimateArgs,
    format: OutputFormat,
) -> Result<()> {
    let record = build_record(&args)?;

    if let Err(err) = estimator_lib::validate(&record) {
        print_error(&err.to_string());
        if let SchemaError::MissingField(field) = &err {
            match &args.metal {
                Some(metal) => print_warning(&format!(
                    "Reference data for {} has no value for {}; pass {}",
                    metal,
                    field,
                    flag_name(field)
                )),
                None => print_warning(&format!("Pass {} or use --metal", flag_name(field))),
            }
        }
        return Err(err).context("Input rejected by the feature schema");
    }

    let response = client.estimate(&record).await?;

    match format {
        OutputFormat::Json => print_json(&response)?,
        OutputFormat::Table => {
            println!("{}", "Extraction Cost Estimate".bold());
            println!("{}", "=".repeat(50));
            if let Some(metal) = &args.metal {
                println!("Metal:                  {}", metal.cyan());
            }
            for feature in Feature::ALL {
                let label = format!("{} ({}):", feature.label(), feature.unit());
                println!("{:<24}{}", label, response.features.get(feature));
            }
            println!();
            println!("{} {}", "Estimated Cost:".bold(), response.display.green().bold());
            println!("Model Version:          {}", response.model_version);
        }
    }

    if let Some(path) = &args.export {
        let line = ExportRecord::new(response.features, &response.result()).to_delimited();
        std::fs::write(path, line)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;
        print_success(&format!("Exported estimate to {}", path.display()));
    }

    Ok(())
}
