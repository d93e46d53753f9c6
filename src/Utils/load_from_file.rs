use log::{error, info, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::RxnData::records::{validate_schema, ReactionRecord, REQUIRED_FIELDS};

pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: String) -> Self {
        LoadData { file_name }
    }
    pub fn load_catalog(&self) -> Result<HashMap<String, Value>, String> {
        load_and_validate_catalog(&self.file_name)
    }
    pub fn load_entries(&self) -> Result<Vec<(String, Value)>, String> {
        let catalog = load_and_validate_catalog(&self.file_name)?;
        Ok(sorted_entries(catalog))
    }
    pub fn load_records(&self) -> Result<Vec<ReactionRecord>, String> {
        let entries = self.load_entries()?;
        validate_schema(&entries).map_err(|e| e.to_string())?;
        Ok(records_from_entries(&entries))
    }
}

/// Parses a catalog file holding a JSON object of the form
/// `{ "reaction id": { entry }, ... }`.
/// Returns a HashMap<String, Value> of entry bodies keyed by reaction id.
pub fn load_catalog_from_file(file_name: &str) -> Result<HashMap<String, Value>, String> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(format!("File '{}' does not exist", file_name));
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return Err(format!("Failed to read file '{}': {}", file_name, e)),
    };

    let result: Result<HashMap<String, Value>, serde_json::Error> =
        serde_json::from_str(&content);

    match result {
        Ok(catalog) => {
            info!(
                "Successfully parsed reaction catalog from file '{}'",
                file_name
            );
            Ok(catalog)
        }
        Err(e) => {
            let error_line = e.line();
            let error_column = e.column();

            let error_msg = format!(
                "Error parsing reaction catalog at line {}, column {}: {}",
                error_line, error_column, e
            );
            error!("{}", error_msg);

            // If possible, show the problematic line
            let lines: Vec<&str> = content.lines().collect();
            if error_line >= 1 && error_line <= lines.len() {
                let problem_line = lines[error_line - 1];
                error!("Problematic line: {}", problem_line);

                // Create a visual pointer to the error position
                if error_column <= problem_line.len() {
                    let pointer = " ".repeat(error_column - 1) + "^";
                    error!("{}", pointer);
                }
            }

            Err(error_msg)
        }
    }
}

/// Loads a catalog from a file and validates the structure.
/// This function provides additional validation and error reporting.
pub fn load_and_validate_catalog(file_name: &str) -> Result<HashMap<String, Value>, String> {
    let catalog = load_catalog_from_file(file_name)?;

    if catalog.is_empty() {
        warn!("Loaded reaction catalog is empty");
    }

    // Check each entry's data structure
    for (id, entry) in &catalog {
        if !entry.is_object() {
            warn!("Entry '{}' has invalid data format", id);
            continue;
        }
        for field in REQUIRED_FIELDS {
            let present = match field {
                "ref" => entry
                    .get("metadata")
                    .and_then(|m| m.get("ref"))
                    .and_then(|r| r.get("short_cite"))
                    .is_some(),
                _ => entry.get(field).is_some(),
            };
            if !present {
                warn!("Entry '{}' is missing '{}' field", id, field);
            }
        }
    }

    info!(
        "Loaded and validated reaction catalog from file '{}'",
        file_name
    );
    Ok(catalog)
}

/// Orders catalog entries by reaction id. The catalog arrives as a HashMap,
/// the table needs a fixed row order for deterministic grouping.
pub fn sorted_entries(catalog: HashMap<String, Value>) -> Vec<(String, Value)> {
    let mut entries: Vec<(String, Value)> = catalog.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}

/// Parses entries into typed records. Entries that fail to parse are skipped
/// with a warning so one bad entry cannot take down the whole catalog.
pub fn records_from_entries(entries: &[(String, Value)]) -> Vec<ReactionRecord> {
    let mut records = Vec::new();
    for (id, entry) in entries {
        match ReactionRecord::from_entry(id, entry) {
            Ok(record) => records.push(record),
            Err(msg) => warn!("Skipping entry: {}", msg),
        }
    }
    records
}

/// Loads and concatenates several catalog files into one table, in the given
/// file order. This is how the hp11 and jimmy source databases become a
/// single reaction table.
pub fn load_records_from_files(file_names: &[String]) -> Result<Vec<ReactionRecord>, String> {
    let mut records = Vec::new();
    for file_name in file_names {
        let ld = LoadData::new(file_name.clone());
        records.extend(ld.load_records()?);
    }
    info!(
        "Loaded {} reactions from {} catalog files",
        records.len(),
        file_names.len()
    );
    Ok(records)
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;

    use crate::RxnData::records::{PlotType, RxnType};
    use approx::assert_relative_eq;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn catalog_json() -> Value {
        json!({
            "hp11-002": {
                "type": "rxn_calibration",
                "plot_type": "point",
                "rxn": "cc + q => wo + co2",
                "reactants": ["cc", "q"],
                "products": ["wo", "co2"],
                "data": {
                    "P": {"mid": [0.2], "half_range": [0.05]},
                    "T": {"mid": [750.0], "half_range": [25.0]},
                    "ln_K": {"mid": [1.2], "half_range": [0.1]},
                    "x_CO2": {"mid": [1.0], "half_range": [0.0]}
                },
                "metadata": {"ref": {"short_cite": "Harker & Tuttle, 1956"}}
            },
            "hp11-001": {
                "type": "phase_boundary",
                "plot_type": "curve",
                "rxn": "ky => and",
                "reactants": ["ky"],
                "products": ["and"],
                "data": {
                    "P": {"mid": [0.4, 0.3], "half_range": [0.0, 0.0]},
                    "T": {"mid": [500.0, 600.0], "half_range": [0.0, 0.0]},
                    "ln_K": {"mid": [0.0, 0.0], "half_range": [0.0, 0.0]},
                    "x_CO2": {"mid": [0.0, 0.0], "half_range": [0.0, 0.0]}
                },
                "metadata": {"ref": {"short_cite": "Holland & Powell, 2011"}}
            }
        })
    }

    fn write_catalog(value: &Value) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", serde_json::to_string_pretty(value).unwrap()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_catalog_from_file() {
        let temp_file = write_catalog(&catalog_json());
        let file_path = temp_file.path().to_str().unwrap();

        let catalog = load_catalog_from_file(file_path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains_key("hp11-001"));
        assert!(catalog.contains_key("hp11-002"));
        assert_eq!(catalog["hp11-001"]["rxn"], "ky => and");
    }

    #[test]
    fn test_load_catalog_file_not_found() {
        let result = load_catalog_from_file("no_such_catalog.json");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("does not exist"));
    }

    #[test]
    fn test_load_catalog_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{{ \"hp11-001\": {{ \"rxn\": ").unwrap();
        let file_path = temp_file.path().to_str().unwrap();

        let result = load_catalog_from_file(file_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Error parsing reaction catalog"));
    }

    #[test]
    fn test_entries_are_sorted_by_id() {
        let temp_file = write_catalog(&catalog_json());
        let ld = LoadData::new(temp_file.path().to_str().unwrap().to_string());
        let entries = ld.load_entries().unwrap();
        let ids: Vec<&str> = entries.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["hp11-001", "hp11-002"]);
    }

    #[test]
    fn test_load_records_round_trip() {
        let temp_file = write_catalog(&catalog_json());
        let ld = LoadData::new(temp_file.path().to_str().unwrap().to_string());
        let records = ld.load_records().unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id, "hp11-001");
        assert_eq!(first.rxn_type, RxnType::PhaseBoundary);
        assert_eq!(first.plot_type, PlotType::Curve);
        assert_eq!(first.reactants, vec!["ky".to_string()]);
        assert_relative_eq!(first.p_mid[0], 0.4);
        assert_relative_eq!(first.t_mid[1], 600.0);

        let second = &records[1];
        assert_eq!(second.rxn_type, RxnType::RxnCalibration);
        assert_eq!(second.plot_type, PlotType::Point);
        assert_relative_eq!(second.t_half_range[0], 25.0);
    }

    #[test]
    fn test_load_records_schema_error() {
        let mut catalog = catalog_json();
        catalog["hp11-001"]
            .as_object_mut()
            .unwrap()
            .remove("products");
        let temp_file = write_catalog(&catalog);
        let ld = LoadData::new(temp_file.path().to_str().unwrap().to_string());
        let result = ld.load_records();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("products"));
    }

    #[test]
    fn test_bad_entry_is_skipped() {
        let mut catalog = catalog_json();
        // plot_type no deserializer accepts
        catalog["hp11-002"]["plot_type"] = json!("histogram");
        let temp_file = write_catalog(&catalog);
        let ld = LoadData::new(temp_file.path().to_str().unwrap().to_string());
        let records = ld.load_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "hp11-001");
    }

    #[test]
    fn test_load_records_from_files() {
        let first = write_catalog(&catalog_json());
        let second_catalog = json!({
            "jimmy-001": {
                "type": "phase_boundary",
                "plot_type": "curve",
                "rxn": "and => sil",
                "reactants": ["and"],
                "products": ["sil"],
                "data": {
                    "P": {"mid": [0.3], "half_range": [0.0]},
                    "T": {"mid": [700.0], "half_range": [0.0]},
                    "ln_K": {"mid": [0.0], "half_range": [0.0]},
                    "x_CO2": {"mid": [0.0], "half_range": [0.0]}
                },
                "metadata": {"ref": {"short_cite": "Pattison, 1992"}}
            }
        });
        let second = write_catalog(&second_catalog);
        let files = vec![
            first.path().to_str().unwrap().to_string(),
            second.path().to_str().unwrap().to_string(),
        ];
        let records = load_records_from_files(&files).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].id, "jimmy-001");
    }

    #[test]
    fn test_with_bundled_catalogs() {
        let records = load_records_from_files(&[
            "data/hp11_rxndb.json".to_string(),
            "data/jimmy_rxndb.json".to_string(),
        ])
        .unwrap();
        assert!(!records.is_empty());
        // every bundled record carries a citation
        for record in &records {
            assert!(!record.ref_cite.is_empty());
        }
    }
}
