//! Core data models for the cost estimator

use crate::schema::{self, Feature, SchemaError, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Raw input record as received from a caller: field name to value.
///
/// Values may be JSON numbers or numeric strings. Use
/// [`crate::schema::validate`] to turn a record into a [`FeatureVector`].
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Validated feature vector for model evaluation
///
/// Fields are declared in the canonical model order. Deserialization goes
/// through [`crate::schema::validate`], so a decoded vector always satisfies
/// the field domains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct FeatureVector {
    /// Gibbs free energy of the extraction reaction (kJ/mol)
    pub delta_g: f64,
    /// Standard electrode potential (V)
    pub electrode_potential: f64,
    /// Reaction enthalpy (kJ/mol)
    pub enthalpy: f64,
    /// Metal concentration in raw ore (%), always in (0, 100]
    pub ore_grade: f64,
    /// Melting point (°C)
    pub melting_point: f64,
    /// Boiling point (°C)
    pub boiling_point: f64,
}

impl FeatureVector {
    /// Value of a single feature
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::DeltaG => self.delta_g,
            Feature::ElectrodePotential => self.electrode_potential,
            Feature::Enthalpy => self.enthalpy,
            Feature::OreGrade => self.ore_grade,
            Feature::MeltingPoint => self.melting_point,
            Feature::BoilingPoint => self.boiling_point,
        }
    }

    /// Values in canonical order
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        Feature::ALL.map(|feature| self.get(feature))
    }

    /// Build a vector from values already in canonical order.
    ///
    /// No domain checks are applied; callers outside the schema go through
    /// [`crate::schema::validate`].
    pub(crate) fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            delta_g: values[Feature::DeltaG.index()],
            electrode_potential: values[Feature::ElectrodePotential.index()],
            enthalpy: values[Feature::Enthalpy.index()],
            ore_grade: values[Feature::OreGrade.index()],
            melting_point: values[Feature::MeltingPoint.index()],
            boiling_point: values[Feature::BoilingPoint.index()],
        }
    }

    /// Convert back into a raw record keyed by canonical field names
    pub fn to_record(&self) -> RawRecord {
        Feature::ALL
            .iter()
            .map(|feature| (feature.name().to_string(), serde_json::json!(self.get(*feature))))
            .collect()
    }
}

impl TryFrom<RawRecord> for FeatureVector {
    type Error = SchemaError;

    fn try_from(record: RawRecord) -> Result<Self, Self::Error> {
        schema::validate(&record)
    }
}

/// Cost estimate returned by the prediction service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Estimated extraction cost (currency per ton)
    pub estimate: f64,
    /// Fixed ± band associated with the model artifact
    pub uncertainty: f64,
}
