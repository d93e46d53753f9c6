//! # Reaction Records Module
//!
//! ## Purpose
//! Defines the typed reaction record that the rest of the crate operates on,
//! together with the error taxonomy of the database core. Every row of the
//! reaction table is one `ReactionRecord`: a reaction id, the reactant and
//! product phase lists, categorical type fields, the human-readable equation,
//! the citation, and the numeric P-T samples of the equilibrium curve or of
//! the experimental brackets.
//!
//! ## Key Logic
//! 1. **Entry parsing**: each catalog entry arrives as a serde_json Value of the
//!    form `{"type": ..., "plot_type": ..., "rxn": ..., "reactants": [...],
//!    "products": [...], "data": {"P": {"mid": [...], "half_range": [...]}, ...},
//!    "metadata": {"ref": {"short_cite": ...}}}` and is flattened into a record
//! 2. **Schema validation**: required fields must be present in every entry of
//!    the table, otherwise loading fails with a single `Schema` error listing
//!    everything that is missing
//! 3. **Tolerant categorical parsing**: the `type` field accepts spelling
//!    variants and maps unknown values to `Other` instead of failing the load

use log::warn;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::RxnData::normalizer::string_list;

/// Required per-entry fields of the persisted catalog. The record id is the
/// map key of the entry and is checked separately.
pub const REQUIRED_FIELDS: [&str; 5] = ["reactants", "products", "type", "rxn", "ref"];

/// error types of the database core
#[derive(Debug, Error)]
pub enum RxnDBError {
    #[error("Missing required fields: {missing:?}")]
    Schema { missing: Vec<String> },
    #[error("Reaction table is empty")]
    EmptyTable,
}

/// enum for the kind of data a reaction row carries
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RxnType {
    PhaseBoundary,
    RxnCalibration,
    Other,
}

impl<'de> Deserialize<'de> for RxnType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "phase_boundary" | "boundary" => Ok(RxnType::PhaseBoundary),
            "rxn_calibration" | "calibration" => Ok(RxnType::RxnCalibration),
            _ => Ok(RxnType::Other),
        }
    }
}

/// enum for how a reaction row is meant to be drawn
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotType {
    Curve,
    Point,
}

impl<'de> Deserialize<'de> for PlotType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "curve" | "line" => Ok(PlotType::Curve),
            "point" | "points" => Ok(PlotType::Point),
            _ => Err(serde::de::Error::custom(format!(
                "Unknown plot type: {}",
                s
            ))),
        }
    }
}

/// One row of the reaction table. Phase tokens in `reactants`/`products` are
/// lowercased at ingestion and may still carry a leading stoichiometric
/// coefficient ("2h2o"); coefficients are stripped at indexing time, not here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionRecord {
    pub id: String,
    pub rxn_type: RxnType,
    pub plot_type: PlotType,
    pub rxn: String,
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    pub ref_cite: String,
    pub t_mid: Vec<f64>,
    pub t_half_range: Vec<f64>,
    pub p_mid: Vec<f64>,
    pub p_half_range: Vec<f64>,
    pub ln_k_mid: Vec<f64>,
    pub ln_k_half_range: Vec<f64>,
    pub x_co2_mid: Vec<f64>,
    pub x_co2_half_range: Vec<f64>,
}

/// mid/half_range pair of one data column; null samples become NaN
#[derive(Debug, Clone, Default, Deserialize)]
struct MidHalf {
    #[serde(default)]
    mid: Vec<Option<f64>>,
    #[serde(default)]
    half_range: Vec<Option<f64>>,
}

impl MidHalf {
    fn mids(&self) -> Vec<f64> {
        self.mid.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
    }
    fn half_ranges(&self) -> Vec<f64> {
        self.half_range
            .iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DataBlock {
    #[serde(rename = "P", default)]
    p: MidHalf,
    #[serde(rename = "T", default)]
    t: MidHalf,
    #[serde(rename = "ln_K", default)]
    ln_k: MidHalf,
    #[serde(rename = "x_CO2", default)]
    x_co2: MidHalf,
}

#[derive(Debug, Clone, Deserialize)]
struct RefBlock {
    #[serde(default)]
    short_cite: String,
}

#[derive(Debug, Clone, Deserialize)]
struct MetadataBlock {
    #[serde(rename = "ref")]
    reference: RefBlock,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    #[serde(rename = "type")]
    rxn_type: RxnType,
    #[serde(default = "default_plot_type")]
    plot_type: PlotType,
    rxn: String,
    reactants: Value,
    products: Value,
    #[serde(default)]
    data: DataBlock,
    metadata: MetadataBlock,
}

fn default_plot_type() -> PlotType {
    PlotType::Curve
}

impl ReactionRecord {
    /// Parses one catalog entry into a record. The id comes from the entry key
    /// in the catalog, not from the entry body.
    pub fn from_entry(id: &str, entry: &Value) -> Result<Self, String> {
        let parsed: CatalogEntry = serde_json::from_value(entry.clone())
            .map_err(|e| format!("Entry '{}' failed to parse: {}", id, e))?;

        let reactants = string_list(&parsed.reactants);
        let products = string_list(&parsed.products);
        if reactants.is_empty() && products.is_empty() {
            warn!("Entry '{}' has neither reactants nor products", id);
        }

        Ok(ReactionRecord {
            id: id.to_string(),
            rxn_type: parsed.rxn_type,
            plot_type: parsed.plot_type,
            rxn: parsed.rxn.to_lowercase(),
            reactants,
            products,
            ref_cite: parsed.metadata.reference.short_cite,
            t_mid: parsed.data.t.mids(),
            t_half_range: parsed.data.t.half_ranges(),
            p_mid: parsed.data.p.mids(),
            p_half_range: parsed.data.p.half_ranges(),
            ln_k_mid: parsed.data.ln_k.mids(),
            ln_k_half_range: parsed.data.ln_k.half_ranges(),
            x_co2_mid: parsed.data.x_co2.mids(),
            x_co2_half_range: parsed.data.x_co2.half_ranges(),
        })
    }
}

/// Checks that every required field is present in every entry of the raw
/// table. Entries are (id, entry body) pairs. All missing fields across the
/// whole table are collected into a single error so the caller sees the full
/// damage at once; no partial index is ever built from a table that fails here.
pub fn validate_schema(entries: &[(String, Value)]) -> Result<(), RxnDBError> {
    let mut missing: Vec<String> = Vec::new();
    for field in REQUIRED_FIELDS {
        let absent = entries.iter().any(|(_, entry)| match field {
            "ref" => entry
                .get("metadata")
                .and_then(|m| m.get("ref"))
                .and_then(|r| r.get("short_cite"))
                .is_none(),
            _ => entry.get(field).is_none(),
        });
        if absent {
            missing.push(field.to_string());
        }
    }
    if !missing.is_empty() {
        return Err(RxnDBError::Schema { missing });
    }
    Ok(())
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn entry_json() -> Value {
        json!({
            "type": "phase_boundary",
            "plot_type": "curve",
            "rxn": "ky => and",
            "reactants": ["ky"],
            "products": ["and"],
            "data": {
                "P": {"mid": [0.4, 0.38], "half_range": [0.0, 0.0]},
                "T": {"mid": [500.0, 600.0], "half_range": [0.0, 0.0]},
                "ln_K": {"mid": [0.0, 0.0], "half_range": [0.0, 0.0]},
                "x_CO2": {"mid": [0.0, 0.0], "half_range": [0.0, 0.0]}
            },
            "metadata": {"ref": {"short_cite": "Holland & Powell, 2011"}}
        })
    }

    #[test]
    fn test_from_entry() {
        let record = ReactionRecord::from_entry("hp11-001", &entry_json()).unwrap();
        assert_eq!(record.id, "hp11-001");
        assert_eq!(record.rxn_type, RxnType::PhaseBoundary);
        assert_eq!(record.plot_type, PlotType::Curve);
        assert_eq!(record.reactants, vec!["ky".to_string()]);
        assert_eq!(record.products, vec!["and".to_string()]);
        assert_eq!(record.ref_cite, "Holland & Powell, 2011");
        assert_relative_eq!(record.p_mid[0], 0.4);
        assert_relative_eq!(record.t_mid[1], 600.0);
    }

    #[test]
    fn test_null_samples_become_nan() {
        let mut entry = entry_json();
        entry["data"]["P"]["mid"] = json!([null, 0.38]);
        let record = ReactionRecord::from_entry("hp11-001", &entry).unwrap();
        assert!(record.p_mid[0].is_nan());
        assert_relative_eq!(record.p_mid[1], 0.38);
    }

    #[test]
    fn test_unknown_type_maps_to_other() {
        let mut entry = entry_json();
        entry["type"] = json!("melting_curve");
        let record = ReactionRecord::from_entry("x-001", &entry).unwrap();
        assert_eq!(record.rxn_type, RxnType::Other);
    }

    #[test]
    fn test_unknown_plot_type_is_rejected() {
        let mut entry = entry_json();
        entry["plot_type"] = json!("histogram");
        let result = ReactionRecord::from_entry("x-001", &entry);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_string_tokens_are_skipped() {
        let mut entry = entry_json();
        entry["reactants"] = json!(["ky", null, 3, "2q"]);
        let record = ReactionRecord::from_entry("x-001", &entry).unwrap();
        assert_eq!(record.reactants, vec!["ky".to_string(), "2q".to_string()]);
    }

    #[test]
    fn test_validate_schema_ok() {
        let entries = vec![("hp11-001".to_string(), entry_json())];
        assert!(validate_schema(&entries).is_ok());
    }

    #[test]
    fn test_validate_schema_missing_fields() {
        let mut entry = entry_json();
        entry.as_object_mut().unwrap().remove("reactants");
        entry.as_object_mut().unwrap().remove("metadata");
        let entries = vec![("hp11-001".to_string(), entry)];
        let err = validate_schema(&entries).unwrap_err();
        match err {
            RxnDBError::Schema { missing } => {
                assert_eq!(missing, vec!["reactants".to_string(), "ref".to_string()]);
            }
            _ => panic!("Expected Schema error"),
        }
    }
}
