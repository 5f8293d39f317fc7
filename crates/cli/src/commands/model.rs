//! Model artifact command

use anyhow::Result;
use colored::Colorize;
use estimator_lib::predictor::ArtifactInfo;

use crate::client::ApiClient;
use crate::output::{format_timestamp, print_json, OutputFormat};

/// Show the artifact the service is serving
pub async fn show_model(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let info: ArtifactInfo = client.model_info().await?;

    match format {
        OutputFormat::Json => print_json(&info)?,
        OutputFormat::Table => {
            println!("{}", "Model Artifact".bold());
            println!("{}", "=".repeat(50));
            println!("Version:                {}", info.version.cyan());
            if let Some(trained_at) = &info.trained_at {
                println!("Trained At:             {}", trained_at);
            }
            println!("Checksum (SHA-256):     {}", info.checksum);
            println!("Loaded At:              {}", format_timestamp(info.loaded_at));
            println!();

            println!("{}", "Coefficients".bold());
            println!("{}", "-".repeat(50));
            for (feature, weight) in info.features.iter().zip(info.coefficients.iter()) {
                println!("{:<24}{:>12.4}", feature, weight);
            }
            println!("{:<24}{:>12.4}", "intercept", info.intercept);
            println!();
            println!("Uncertainty:            ± {}", info.uncertainty);
        }
    }

    Ok(())
}
