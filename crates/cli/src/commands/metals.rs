//! Reference metal commands (offline)

use anyhow::{Context, Result};
use estimator_lib::reference::{self, ReferenceMetal};
use tabled::Tabled;

use crate::output::{format_optional, print_info, print_json, print_table, OutputFormat};

/// Row for the reference metals table
#[derive(Tabled)]
struct MetalRow {
    #[tabled(rename = "Metal")]
    name: &'static str,
    #[tabled(rename = "Method")]
    method: &'static str,
    #[tabled(rename = "ΔG (kJ/mol)")]
    delta_g: String,
    #[tabled(rename = "E° (V)")]
    electrode_potential: f64,
    #[tabled(rename = "ΔH (kJ/mol)")]
    enthalpy: f64,
    #[tabled(rename = "Ore Grade (%)")]
    ore_grade: f64,
    #[tabled(rename = "MP (°C)")]
    melting_point: f64,
    #[tabled(rename = "BP (°C)")]
    boiling_point: f64,
}

impl From<&ReferenceMetal> for MetalRow {
    fn from(m: &ReferenceMetal) -> Self {
        Self {
            name: m.name,
            method: m.extraction_method,
            delta_g: format_optional(m.delta_g),
            electrode_potential: m.electrode_potential,
            enthalpy: m.enthalpy,
            ore_grade: m.ore_grade,
            melting_point: m.melting_point,
            boiling_point: m.boiling_point,
        }
    }
}

/// Select one metal by name, or the whole table
fn select(name: Option<&str>) -> Result<Vec<&'static ReferenceMetal>> {
    match name {
        Some(name) => {
            let metal = reference::find(name)
                .with_context(|| format!("Unknown metal '{}'", name))?;
            Ok(vec![metal])
        }
        None => Ok(reference::REFERENCE_METALS.iter().collect()),
    }
}

/// Show reference metal properties
pub fn show_metals(name: Option<&str>, format: OutputFormat) -> Result<()> {
    let metals = select(name)?;

    match format {
        OutputFormat::Json => print_json(&metals)?,
        OutputFormat::Table => {
            let rows: Vec<MetalRow> = metals.iter().copied().map(MetalRow::from).collect();
            print_table(&rows);
            if metals.iter().any(|m| m.delta_g.is_none()) {
                print_info("ΔG is not tabulated for some metals; supply --delta-g when estimating them");
            }
        }
    }

    Ok(())
}
