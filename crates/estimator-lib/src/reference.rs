//! Reference physicochemical properties for common metals
//!
//! Caller-side convenience data for pre-filling inputs. Missing ΔG values
//! stay missing: [`ReferenceMetal::to_record`] omits them and the schema
//! reports the field, leaving the substitution policy to the caller.

use crate::models::RawRecord;
use crate::schema::Feature;
use serde::Serialize;
use serde_json::json;

/// Reference row for one metal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceMetal {
    pub name: &'static str,
    pub extraction_method: &'static str,
    /// Gibbs free energy (kJ/mol), unknown for some metals
    pub delta_g: Option<f64>,
    pub electrode_potential: f64,
    pub enthalpy: f64,
    pub ore_grade: f64,
    pub melting_point: f64,
    pub boiling_point: f64,
}

/// Reference table
pub const REFERENCE_METALS: &[ReferenceMetal] = &[
    ReferenceMetal {
        name: "Aluminum",
        extraction_method: "Electrolysis",
        delta_g: Some(900.0),
        electrode_potential: -1.66,
        enthalpy: 1170.0,
        ore_grade: 40.0,
        melting_point: 660.0,
        boiling_point: 2519.0,
    },
    ReferenceMetal {
        name: "Copper",
        extraction_method: "Pyrometallurgy",
        delta_g: Some(-146.0),
        electrode_potential: 0.34,
        enthalpy: 219.0,
        ore_grade: 1.2,
        melting_point: 1085.0,
        boiling_point: 2562.0,
    },
    ReferenceMetal {
        name: "Lithium",
        extraction_method: "Hydrometallurgy",
        delta_g: Some(300.0),
        electrode_potential: -3.04,
        enthalpy: 650.0,
        ore_grade: 1.5,
        melting_point: 180.5,
        boiling_point: 1342.0,
    },
    ReferenceMetal {
        name: "Nickel",
        extraction_method: "Combo",
        delta_g: Some(-50.0),
        electrode_potential: -0.25,
        enthalpy: 400.0,
        ore_grade: 2.0,
        melting_point: 1455.0,
        boiling_point: 2913.0,
    },
    ReferenceMetal {
        name: "Zinc",
        extraction_method: "Roast+Electro",
        delta_g: Some(-230.0),
        electrode_potential: -0.76,
        enthalpy: 348.0,
        ore_grade: 8.0,
        melting_point: 419.5,
        boiling_point: 907.0,
    },
    ReferenceMetal {
        name: "Cobalt",
        extraction_method: "Combo",
        delta_g: Some(-225.0),
        electrode_potential: -0.28,
        enthalpy: 375.0,
        ore_grade: 0.5,
        melting_point: 1495.0,
        boiling_point: 2927.0,
    },
    ReferenceMetal {
        name: "Platinum",
        extraction_method: "Smelting",
        delta_g: None,
        electrode_potential: 1.18,
        enthalpy: 1000.0,
        ore_grade: 0.001,
        melting_point: 1768.0,
        boiling_point: 3825.0,
    },
    ReferenceMetal {
        name: "Gold",
        extraction_method: "Cyanidation",
        delta_g: None,
        electrode_potential: 1.50,
        enthalpy: 800.0,
        ore_grade: 0.0005,
        melting_point: 1064.0,
        boiling_point: 2856.0,
    },
];

/// Find a reference metal by name (case-insensitive)
pub fn find(name: &str) -> Option<&'static ReferenceMetal> {
    REFERENCE_METALS
        .iter()
        .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
}

impl ReferenceMetal {
    /// Reference value of a feature, `None` where the table has no value
    pub fn value(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::DeltaG => self.delta_g,
            Feature::ElectrodePotential => Some(self.electrode_potential),
            Feature::Enthalpy => Some(self.enthalpy),
            Feature::OreGrade => Some(self.ore_grade),
            Feature::MeltingPoint => Some(self.melting_point),
            Feature::BoilingPoint => Some(self.boiling_point),
        }
    }

    /// Raw record of the known values
    pub fn to_record(&self) -> RawRecord {
        Feature::ALL
            .iter()
            .filter_map(|f| self.value(*f).map(|v| (f.name().to_string(), json!(v))))
            .collect()
    }
}
