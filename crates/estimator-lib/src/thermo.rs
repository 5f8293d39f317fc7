//! Thermodynamic helpers behind the model's chemistry inputs
//!
//! ΔG = ΔH − TΔS for extraction reactions, and the Nernst correction for
//! non-standard electrode potentials.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default lower temperature bound (K)
pub const DEFAULT_T_MIN: f64 = 300.0;

/// Default upper temperature bound (K)
pub const DEFAULT_T_MAX: f64 = 2000.0;

pub const DEFAULT_CURVE_POINTS: usize = 500;

/// Nernst slope at 25 °C for log10 (V)
pub const NERNST_SLOPE: f64 = 0.0591;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThermoError {
    #[error("curve needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("temperature range [{t_min}, {t_max}] is empty or not finite")]
    InvalidRange { t_min: f64, t_max: f64 },

    #[error("{0} must be finite")]
    NonFinite(&'static str),

    #[error("electron count must be positive")]
    ZeroElectrons,

    #[error("{0} activity must be positive")]
    NonPositiveActivity(&'static str),
}

/// One sample of ΔG(T)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GibbsPoint {
    /// Temperature (K)
    pub temperature: f64,
    /// ΔG (kJ/mol)
    pub delta_g: f64,
}

/// ΔG(T) sampled over a temperature range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GibbsCurve {
    pub delta_h: f64,
    pub delta_s: f64,
    pub points: Vec<GibbsPoint>,
    /// Temperature where ΔG = 0, if any
    pub crossover_temperature: Option<f64>,
}

/// ΔG = ΔH − T·ΔS (kJ/mol, kJ/mol·K, K)
pub fn gibbs_free_energy(delta_h: f64, delta_s: f64, temperature: f64) -> f64 {
    delta_h - temperature * delta_s
}

/// Temperature at which ΔG changes sign.
///
/// `None` when ΔS is zero or the crossover would not be above absolute zero.
pub fn crossover_temperature(delta_h: f64, delta_s: f64) -> Option<f64> {
    if delta_s == 0.0 {
        return None;
    }
    let t = delta_h / delta_s;
    (t.is_finite() && t > 0.0).then_some(t)
}

/// Sample ΔG(T) at evenly spaced temperatures, both ends included
pub fn gibbs_curve(
    delta_h: f64,
    delta_s: f64,
    t_min: f64,
    t_max: f64,
    points: usize,
) -> Result<GibbsCurve, ThermoError> {
    if !delta_h.is_finite() {
        return Err(ThermoError::NonFinite("delta_h"));
    }
    if !delta_s.is_finite() {
        return Err(ThermoError::NonFinite("delta_s"));
    }
    if points < 2 {
        return Err(ThermoError::TooFewPoints(points));
    }
    if !(t_min.is_finite() && t_max.is_finite()) || t_max <= t_min {
        return Err(ThermoError::InvalidRange { t_min, t_max });
    }

    let step = (t_max - t_min) / (points - 1) as f64;
    let samples = (0..points)
        .map(|i| {
            let temperature = if i == points - 1 {
                t_max
            } else {
                t_min + step * i as f64
            };
            GibbsPoint {
                temperature,
                delta_g: gibbs_free_energy(delta_h, delta_s, temperature),
            }
        })
        .collect();

    Ok(GibbsCurve {
        delta_h,
        delta_s,
        points: samples,
        crossover_temperature: crossover_temperature(delta_h, delta_s),
    })
}

/// E = E° − (0.0591 / n)·log10([Red]/[Ox])
pub fn nernst_potential(
    standard_potential: f64,
    electrons: u32,
    reduced: f64,
    oxidized: f64,
) -> Result<f64, ThermoError> {
    if electrons == 0 {
        return Err(ThermoError::ZeroElectrons);
    }
    if reduced.is_nan() || reduced <= 0.0 {
        return Err(ThermoError::NonPositiveActivity("reduced"));
    }
    if oxidized.is_nan() || oxidized <= 0.0 {
        return Err(ThermoError::NonPositiveActivity("oxidized"));
    }
    Ok(standard_potential - (NERNST_SLOPE / electrons as f64) * (reduced / oxidized).log10())
}
