//! # Phase Token Normalizer Module
//!
//! ## Purpose
//! Cleans phase tokens before they reach the index or any comparison: strips
//! leading stoichiometric coefficients ("2h2o" -> "h2o"), lowercases, folds
//! alternate abbreviation spellings to a canonical form ("sill" -> "sil",
//! "wd"/"wa"/"wds" -> "wad"), and cross-references abbreviations against
//! common mineral names and formulae.
//!
//! ## Key Logic
//! 1. **Coefficient stripping**: a leading run of ASCII digits plus any
//!    following whitespace is removed; tokens that end up empty are dropped
//! 2. **Spelling variants**: literature sources abbreviate the same phase in
//!    several ways, the variant map folds them to one canonical abbreviation
//! 3. **Cross-reference lookups**: abbreviation <-> name <-> formula maps are
//!    built once from a static phase catalog; a formula may resolve to several
//!    abbreviations (polymorphs), so the formula lookup is multi-valued
//!
//! The query engine takes abbreviation-form tokens as its canonical key space,
//! so all display-mode translation must go through these lookups before tokens
//! are handed to a filter.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

static COEFF_RE: OnceLock<Regex> = OnceLock::new();

fn coeff_re() -> &'static Regex {
    COEFF_RE.get_or_init(|| Regex::new(r"^\d+\s*").unwrap())
}

/// Strips a leading integer coefficient (and any whitespace after it) from
/// each token. Tokens that are empty after stripping are dropped. Order is
/// preserved, duplicates are kept.
pub fn strip_coefficients(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| coeff_re().replace(token, "").to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// lowercases a token for consistent indexing
pub fn normalize_case(token: &str) -> String {
    token.to_lowercase()
}

/// Converts a JSON value into a list of lowercase strings. Non-string entries
/// inside an array are skipped, never raised; a bare string becomes a
/// one-element list; anything else becomes an empty list.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(normalize_case)
            .collect(),
        Value::String(s) => vec![normalize_case(s)],
        _ => Vec::new(),
    }
}

// Define a struct to hold phase data
pub struct PhaseEntry {
    pub abbrev: &'static str,
    pub name: &'static str,
    pub formula: &'static str,
}

// Mineral phases that appear in the bundled reaction catalogs. Abbreviations
// follow Holland & Powell usage.
const PHASES: &[PhaseEntry] = &[
    PhaseEntry {
        abbrev: "ky",
        name: "kyanite",
        formula: "Al2SiO5",
    },
    PhaseEntry {
        abbrev: "and",
        name: "andalusite",
        formula: "Al2SiO5",
    },
    PhaseEntry {
        abbrev: "sil",
        name: "sillimanite",
        formula: "Al2SiO5",
    },
    PhaseEntry {
        abbrev: "q",
        name: "quartz",
        formula: "SiO2",
    },
    PhaseEntry {
        abbrev: "coe",
        name: "coesite",
        formula: "SiO2",
    },
    PhaseEntry {
        abbrev: "stv",
        name: "stishovite",
        formula: "SiO2",
    },
    PhaseEntry {
        abbrev: "ol",
        name: "olivine",
        formula: "(Mg,Fe)2SiO4",
    },
    PhaseEntry {
        abbrev: "wad",
        name: "wadsleyite",
        formula: "Mg2SiO4",
    },
    PhaseEntry {
        abbrev: "ring",
        name: "ringwoodite",
        formula: "Mg2SiO4",
    },
    PhaseEntry {
        abbrev: "fo",
        name: "forsterite",
        formula: "Mg2SiO4",
    },
    PhaseEntry {
        abbrev: "en",
        name: "enstatite",
        formula: "MgSiO3",
    },
    PhaseEntry {
        abbrev: "per",
        name: "periclase",
        formula: "MgO",
    },
    PhaseEntry {
        abbrev: "br",
        name: "brucite",
        formula: "Mg(OH)2",
    },
    PhaseEntry {
        abbrev: "mag",
        name: "magnesite",
        formula: "MgCO3",
    },
    PhaseEntry {
        abbrev: "cc",
        name: "calcite",
        formula: "CaCO3",
    },
    PhaseEntry {
        abbrev: "arag",
        name: "aragonite",
        formula: "CaCO3",
    },
    PhaseEntry {
        abbrev: "gr",
        name: "grossular",
        formula: "Ca3Al2Si3O12",
    },
    PhaseEntry {
        abbrev: "an",
        name: "anorthite",
        formula: "CaAl2Si2O8",
    },
    PhaseEntry {
        abbrev: "wo",
        name: "wollastonite",
        formula: "CaSiO3",
    },
    PhaseEntry {
        abbrev: "gph",
        name: "graphite",
        formula: "C",
    },
    PhaseEntry {
        abbrev: "dia",
        name: "diamond",
        formula: "C",
    },
    PhaseEntry {
        abbrev: "ta",
        name: "talc",
        formula: "Mg3Si4O10(OH)2",
    },
    PhaseEntry {
        abbrev: "atg",
        name: "antigorite",
        formula: "Mg48Si34O85(OH)62",
    },
    PhaseEntry {
        abbrev: "h2o",
        name: "water",
        formula: "H2O",
    },
    PhaseEntry {
        abbrev: "co2",
        name: "carbon dioxide",
        formula: "CO2",
    },
];

/// alternate spellings found in the literature sources -> canonical abbreviation
const VARIANTS: &[(&str, &str)] = &[
    ("sill", "sil"),
    ("wd", "wad"),
    ("wa", "wad"),
    ("wds", "wad"),
    ("rw", "ring"),
    ("arg", "arag"),
];

/// Folds an alternate spelling to its canonical abbreviation. Unknown tokens
/// pass through unchanged.
pub fn normalize_variant(token: &str) -> String {
    for (variant, canonical) in VARIANTS {
        if token == *variant {
            return canonical.to_string();
        }
    }
    token.to_string()
}

/// Full cleanup of a phase token: strip coefficient, lowercase, fold spelling
/// variants. This is the form under which tokens are indexed and compared.
pub fn canonical_phase(token: &str) -> String {
    let stripped = coeff_re().replace(token, "").to_string();
    normalize_variant(&normalize_case(&stripped))
}

/// Cross-reference maps between abbreviation, common name and formula.
/// Built once; lookups are plain HashMap reads.
#[derive(Debug, Clone)]
pub struct PhaseDictionary {
    by_abbrev: HashMap<&'static str, (&'static str, &'static str)>,
    by_name: HashMap<&'static str, &'static str>,
    by_formula: HashMap<&'static str, Vec<&'static str>>,
}

impl PhaseDictionary {
    pub fn new() -> Self {
        let mut by_abbrev = HashMap::new();
        let mut by_name = HashMap::new();
        let mut by_formula: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
        for phase in PHASES {
            by_abbrev.insert(phase.abbrev, (phase.name, phase.formula));
            by_name.insert(phase.name, phase.abbrev);
            by_formula.entry(phase.formula).or_default().push(phase.abbrev);
        }
        Self {
            by_abbrev,
            by_name,
            by_formula,
        }
    }

    /// common name for an abbreviation
    pub fn name_for(&self, abbrev: &str) -> Option<&'static str> {
        let canonical = normalize_variant(&normalize_case(abbrev));
        self.by_abbrev.get(canonical.as_str()).map(|(name, _)| *name)
    }

    /// chemical formula for an abbreviation
    pub fn formula_for(&self, abbrev: &str) -> Option<&'static str> {
        let canonical = normalize_variant(&normalize_case(abbrev));
        self.by_abbrev
            .get(canonical.as_str())
            .map(|(_, formula)| *formula)
    }

    /// abbreviation for a common name
    pub fn abbrev_for_name(&self, name: &str) -> Option<&'static str> {
        self.by_name.get(normalize_case(name).as_str()).copied()
    }

    /// All abbreviations sharing a formula. Polymorphs make this multi-valued:
    /// "Al2SiO5" resolves to ky, and, sil.
    pub fn abbrevs_for_formula(&self, formula: &str) -> Vec<&'static str> {
        self.by_formula.get(formula).cloned().unwrap_or_default()
    }
}

impl Default for PhaseDictionary {
    fn default() -> Self {
        Self::new()
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_coefficients() {
        let tokens: Vec<String> = vec!["2h2o", "h2o", "10sio2", ""]
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        let cleaned = strip_coefficients(&tokens);
        assert_eq!(
            cleaned,
            vec!["h2o".to_string(), "h2o".to_string(), "sio2".to_string()]
        );
    }

    #[test]
    fn test_strip_coefficients_with_whitespace() {
        let tokens = vec!["3 q".to_string(), "12cc".to_string()];
        assert_eq!(
            strip_coefficients(&tokens),
            vec!["q".to_string(), "cc".to_string()]
        );
    }

    #[test]
    fn test_normalize_case() {
        assert_eq!(normalize_case("Ky"), "ky");
        assert_eq!(normalize_case("SiO2"), "sio2");
    }

    #[test]
    fn test_string_list_skips_non_strings() {
        let value = json!(["Ky", null, 7, "2Q"]);
        assert_eq!(string_list(&value), vec!["ky".to_string(), "2q".to_string()]);
        let value = json!("Sil");
        assert_eq!(string_list(&value), vec!["sil".to_string()]);
        let value = json!(42);
        assert!(string_list(&value).is_empty());
    }

    #[test]
    fn test_normalize_variant() {
        assert_eq!(normalize_variant("sill"), "sil");
        assert_eq!(normalize_variant("wd"), "wad");
        assert_eq!(normalize_variant("wa"), "wad");
        assert_eq!(normalize_variant("wds"), "wad");
        assert_eq!(normalize_variant("ky"), "ky");
    }

    #[test]
    fn test_canonical_phase() {
        assert_eq!(canonical_phase("2Sill"), "sil");
        assert_eq!(canonical_phase("10SiO2"), "sio2");
        assert_eq!(canonical_phase("wd"), "wad");
    }

    #[test]
    fn test_dictionary_lookups() {
        let dict = PhaseDictionary::new();
        assert_eq!(dict.name_for("ky"), Some("kyanite"));
        assert_eq!(dict.formula_for("ky"), Some("Al2SiO5"));
        assert_eq!(dict.abbrev_for_name("kyanite"), Some("ky"));
        assert_eq!(dict.name_for("unobtainium"), None);
    }

    #[test]
    fn test_dictionary_variant_lookup() {
        let dict = PhaseDictionary::new();
        // alternate spelling resolves through the variant map
        assert_eq!(dict.name_for("sill"), Some("sillimanite"));
        assert_eq!(dict.name_for("wd"), Some("wadsleyite"));
    }

    #[test]
    fn test_formula_lookup_is_multi_valued() {
        let dict = PhaseDictionary::new();
        let polymorphs = dict.abbrevs_for_formula("Al2SiO5");
        assert_eq!(polymorphs.len(), 3);
        assert!(polymorphs.contains(&"ky"));
        assert!(polymorphs.contains(&"and"));
        assert!(polymorphs.contains(&"sil"));
    }
}
