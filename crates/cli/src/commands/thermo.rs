//! Thermodynamics commands (offline)

use anyhow::{Context, Result};
use colored::Colorize;
use estimator_lib::thermo::{self, GibbsCurve, GibbsPoint};
use serde_json::json;
use tabled::Tabled;

use crate::output::{color_delta_g, print_info, print_json, print_table, OutputFormat};

/// Rows shown in table output; JSON output carries every sample
const TABLE_ROWS: usize = 11;

/// Row for the ΔG curve table
#[derive(Tabled)]
struct CurveRow {
    #[tabled(rename = "T (K)")]
    temperature: String,
    #[tabled(rename = "ΔG (kJ/mol)")]
    delta_g: String,
}

/// Evenly thin the curve down to at most `rows` points, keeping both ends
fn thin(points: &[GibbsPoint], rows: usize) -> Vec<GibbsPoint> {
    if points.len() <= rows || rows < 2 {
        return points.to_vec();
    }
    let last = points.len() - 1;
    (0..rows).map(|i| points[i * last / (rows - 1)]).collect()
}

/// Show a ΔG(T) curve summary
pub fn show_curve(
    delta_h: f64,
    delta_s: f64,
    t_min: f64,
    t_max: f64,
    points: usize,
    format: OutputFormat,
) -> Result<()> {
    let curve: GibbsCurve = thermo::gibbs_curve(delta_h, delta_s, t_min, t_max, points)
        .context("Invalid curve parameters")?;

    match format {
        OutputFormat::Json => print_json(&curve)?,
        OutputFormat::Table => {
            println!("{}", "Gibbs Free Energy".bold());
            println!("{}", "=".repeat(50));
            println!("ΔH:                     {} kJ/mol", delta_h);
            println!("ΔS:                     {} kJ/mol·K", delta_s);
            println!();

            let rows: Vec<CurveRow> = thin(&curve.points, TABLE_ROWS)
                .into_iter()
                .map(|p| CurveRow {
                    temperature: format!("{:.1}", p.temperature),
                    delta_g: color_delta_g(p.delta_g),
                })
                .collect();
            print_table(&rows);

            match curve.crossover_temperature {
                Some(t) if t >= t_min && t <= t_max => {
                    println!("{} {:.1} K", "Crossover:".bold(), t);
                }
                Some(t) => print_info(&format!(
                    "Crossover at {:.1} K lies outside the sampled range",
                    t
                )),
                None => print_info("ΔG does not change sign above 0 K"),
            }
        }
    }

    Ok(())
}

/// Show a Nernst electrode potential
pub fn show_nernst(
    standard_potential: f64,
    electrons: u32,
    reduced: f64,
    oxidized: f64,
    format: OutputFormat,
) -> Result<()> {
    let potential = thermo::nernst_potential(standard_potential, electrons, reduced, oxidized)
        .context("Invalid Nernst parameters")?;

    match format {
        OutputFormat::Json => print_json(&json!({
            "standard_potential": standard_potential,
            "electrons": electrons,
            "reduced": reduced,
            "oxidized": oxidized,
            "potential": potential,
        }))?,
        OutputFormat::Table => {
            println!("E°:                     {} V", standard_potential);
            println!("n:                      {}", electrons);
            println!("[Red]/[Ox]:             {}/{}", reduced, oxidized);
            println!("{} {:.4} V", "E:".bold(), potential);
        }
    }

    Ok(())
}
