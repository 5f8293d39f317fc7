//! Feature schema for the extraction cost model
//!
//! The [`Feature`] enum is the single definition of the model's input
//! order. Validation, artifact evaluation, export and the reference table
//! all derive their column order from [`Feature::ALL`]; reordering it
//! silently corrupts predictions from any artifact trained on the old order.

use crate::models::{FeatureVector, RawRecord};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Number of input features expected by the model
pub const FEATURE_COUNT: usize = 6;

/// Smallest ore grade rejected by the schema (exclusive lower bound)
pub const ORE_GRADE_MIN: f64 = 0.0;

/// Largest accepted ore grade (inclusive upper bound)
pub const ORE_GRADE_MAX: f64 = 100.0;

/// Model input features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    DeltaG,
    ElectrodePotential,
    Enthalpy,
    OreGrade,
    MeltingPoint,
    BoilingPoint,
}

impl Feature {
    /// All features in canonical model order
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::DeltaG,
        Feature::ElectrodePotential,
        Feature::Enthalpy,
        Feature::OreGrade,
        Feature::MeltingPoint,
        Feature::BoilingPoint,
    ];

    /// Position in the canonical order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Field name used in records, artifacts and exports
    pub fn name(self) -> &'static str {
        match self {
            Feature::DeltaG => "delta_g",
            Feature::ElectrodePotential => "electrode_potential",
            Feature::Enthalpy => "enthalpy",
            Feature::OreGrade => "ore_grade",
            Feature::MeltingPoint => "melting_point",
            Feature::BoilingPoint => "boiling_point",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Feature::DeltaG => "ΔG",
            Feature::ElectrodePotential => "Electrode Potential",
            Feature::Enthalpy => "Enthalpy",
            Feature::OreGrade => "Ore Grade",
            Feature::MeltingPoint => "Melting Point",
            Feature::BoilingPoint => "Boiling Point",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Feature::DeltaG | Feature::Enthalpy => "kJ/mol",
            Feature::ElectrodePotential => "V",
            Feature::OreGrade => "%",
            Feature::MeltingPoint | Feature::BoilingPoint => "°C",
        }
    }

    /// Accepted value range
    pub fn domain(self) -> FieldDomain {
        match self {
            Feature::OreGrade => FieldDomain::LeftOpen {
                min: ORE_GRADE_MIN,
                max: ORE_GRADE_MAX,
            },
            _ => FieldDomain::Finite,
        }
    }

    /// Look up a feature by its field name
    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value range for a feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDomain {
    /// Any finite real
    Finite,
    /// `(min, max]`
    LeftOpen { min: f64, max: f64 },
}

impl FieldDomain {
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match *self {
            FieldDomain::Finite => true,
            FieldDomain::LeftOpen { min, max } => value > min && value <= max,
        }
    }
}

impl fmt::Display for FieldDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDomain::Finite => f.write_str("finite"),
            FieldDomain::LeftOpen { min, max } => write!(f, "({}, {}]", min, max),
        }
    }
}

/// Serializable description of one schema field
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub domain: String,
}

/// Describe the schema in canonical order
pub fn describe() -> Vec<FieldSpec> {
    Feature::ALL
        .iter()
        .map(|f| FieldSpec {
            name: f.name(),
            label: f.label(),
            unit: f.unit(),
            domain: f.domain().to_string(),
        })
        .collect()
}

/// Caller input that does not satisfy the schema
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not a finite number: {value}")]
    NonNumeric { field: &'static str, value: String },

    #[error("field '{field}' value {value} is outside {domain}")]
    OutOfDomain {
        field: &'static str,
        value: f64,
        domain: FieldDomain,
    },

    #[error("unknown field '{0}'")]
    UnknownField(String),
}

impl SchemaError {
    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            SchemaError::MissingField(field) => field,
            SchemaError::NonNumeric { field, .. } => field,
            SchemaError::OutOfDomain { field, .. } => field,
            SchemaError::UnknownField(field) => field,
        }
    }

    /// Short machine-readable reason, used as a metrics label
    pub fn reason(&self) -> &'static str {
        match self {
            SchemaError::MissingField(_) => "missing_field",
            SchemaError::NonNumeric { .. } => "non_numeric",
            SchemaError::OutOfDomain { .. } => "out_of_domain",
            SchemaError::UnknownField(_) => "unknown_field",
        }
    }
}

/// Validate a raw record and build a feature vector in canonical order.
///
/// Fields are checked in canonical order and the first failure is
/// returned. Unknown field names are rejected after all required fields
/// have been checked.
pub fn validate(record: &RawRecord) -> Result<FeatureVector, SchemaError> {
    let mut values = [0.0; FEATURE_COUNT];

    for feature in Feature::ALL {
        let raw = record
            .get(feature.name())
            .ok_or(SchemaError::MissingField(feature.name()))?;
        let value = parse_numeric(feature, raw)?;

        let domain = feature.domain();
        if !domain.contains(value) {
            return Err(SchemaError::OutOfDomain {
                field: feature.name(),
                value,
                domain,
            });
        }
        values[feature.index()] = value;
    }

    if let Some(unknown) = record.keys().find(|k| Feature::from_name(k).is_none()) {
        return Err(SchemaError::UnknownField(unknown.clone()));
    }

    Ok(FeatureVector::from_array(values))
}

fn parse_numeric(feature: Feature, raw: &Value) -> Result<f64, SchemaError> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(SchemaError::NonNumeric {
            field: feature.name(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn copper_record() -> RawRecord {
        let value = json!({
            "delta_g": -146,
            "electrode_potential": 0.34,
            "enthalpy": 219,
            "ore_grade": 1.2,
            "melting_point": 1085,
            "boiling_point": 2562
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_valid_record() {
        let v = validate(&copper_record()).unwrap();
        assert_eq!(v.delta_g, -146.0);
        assert_eq!(v.electrode_potential, 0.34);
        assert_eq!(v.enthalpy, 219.0);
        assert_eq!(v.ore_grade, 1.2);
        assert_eq!(v.melting_point, 1085.0);
        assert_eq!(v.boiling_point, 2562.0);
    }

    #[test]
    fn test_each_missing_field_is_rejected() {
        for feature in Feature::ALL {
            let mut record = copper_record();
            record.remove(feature.name());
            assert_eq!(
                validate(&record),
                Err(SchemaError::MissingField(feature.name())),
                "removing {} should fail",
                feature
            );
        }
    }

    #[test]
    fn test_zero_ore_grade_rejected() {
        let mut record = copper_record();
        record.insert("ore_grade".into(), json!(0));
        let err = validate(&record).unwrap_err();
        assert!(matches!(err, SchemaError::OutOfDomain { field: "ore_grade", .. }));
    }

    #[test]
    fn test_negative_ore_grade_rejected() {
        let mut record = copper_record();
        record.insert("ore_grade".into(), json!(-5));
        assert!(matches!(
            validate(&record),
            Err(SchemaError::OutOfDomain { field: "ore_grade", .. })
        ));
    }

    #[test]
    fn test_ore_grade_upper_bound_inclusive() {
        let mut record = copper_record();
        record.insert("ore_grade".into(), json!(100));
        assert!(validate(&record).is_ok());

        record.insert("ore_grade".into(), json!(100.01));
        assert!(validate(&record).is_err());
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let mut record = copper_record();
        record.insert("enthalpy".into(), json!(" 219.5 "));
        assert_eq!(validate(&record).unwrap().enthalpy, 219.5);
    }

    #[test]
    fn test_non_numeric_rejected() {
        for bad in [
            json!("copper"),
            json!(null),
            json!(true),
            json!([1.0]),
            json!("NaN"),
            json!("inf"),
        ] {
            let mut record = copper_record();
            record.insert("melting_point".into(), bad.clone());
            assert!(
                matches!(
                    validate(&record),
                    Err(SchemaError::NonNumeric { field: "melting_point", .. })
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut record = copper_record();
        record.insert("density".into(), json!(8.96));
        assert_eq!(
            validate(&record),
            Err(SchemaError::UnknownField("density".to_string()))
        );
    }

    #[test]
    fn test_error_reports_field_and_reason() {
        let err = SchemaError::MissingField("enthalpy");
        assert_eq!(err.field(), "enthalpy");
        assert_eq!(err.reason(), "missing_field");
        assert_eq!(err.to_string(), "missing required field 'enthalpy'");
    }

    #[test]
    fn test_canonical_order_is_stable() {
        let names: Vec<_> = Feature::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            [
                "delta_g",
                "electrode_potential",
                "enthalpy",
                "ore_grade",
                "melting_point",
                "boiling_point"
            ]
        );
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
            assert_eq!(Feature::from_name(feature.name()), Some(*feature));
        }
    }

    #[test]
    fn test_domain_display() {
        assert_eq!(Feature::OreGrade.domain().to_string(), "(0, 100]");
        assert_eq!(Feature::Enthalpy.domain().to_string(), "finite");
        assert_eq!(describe()[3].domain, "(0, 100]");
    }
}
