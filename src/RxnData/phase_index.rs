//! # Phase Index Module
//!
//! ## Purpose
//! Builds and owns the two inverted indices of the reaction table:
//! reactant phase -> set of reaction ids and product phase -> set of reaction
//! ids. Every filter in the query engine is a few HashSet unions and
//! intersections over these maps, which is what keeps filtering responsive
//! while the user toggles checkboxes.
//!
//! ## Invariant
//! Every (phase, id) pair present in a record's cleaned reactant/product list
//! appears in the corresponding index entry, and no other pairs do. The index
//! is built wholesale from the table and never mutated afterwards; a new table
//! means a new index.

use std::collections::{HashMap, HashSet};

use crate::RxnData::normalizer::canonical_phase;
use crate::RxnData::records::ReactionRecord;

/// selector for which side of the reaction equation to look up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSide {
    Reactants,
    Products,
}

#[derive(Debug, Clone, Default)]
pub struct PhaseIndex {
    pub reactant_index: HashMap<String, HashSet<String>>,
    pub product_index: HashMap<String, HashSet<String>>,
}

impl PhaseIndex {
    /// Builds both indices from the full table. Tokens are cleaned with
    /// `canonical_phase` before insertion, so "2Sill" and "sil" land in the
    /// same entry. Building twice from the same records gives the same index.
    pub fn build(records: &[ReactionRecord]) -> Self {
        let mut reactant_index: HashMap<String, HashSet<String>> = HashMap::new();
        let mut product_index: HashMap<String, HashSet<String>> = HashMap::new();
        for record in records {
            for token in &record.reactants {
                let phase = canonical_phase(token);
                if phase.is_empty() {
                    continue;
                }
                reactant_index
                    .entry(phase)
                    .or_default()
                    .insert(record.id.clone());
            }
            for token in &record.products {
                let phase = canonical_phase(token);
                if phase.is_empty() {
                    continue;
                }
                product_index
                    .entry(phase)
                    .or_default()
                    .insert(record.id.clone());
            }
        }
        Self {
            reactant_index,
            product_index,
        }
    }

    /// Union of reaction ids over the given phase tokens on one index side.
    /// Tokens are cleaned before lookup. An empty input gives an empty set;
    /// whether that means "no restriction" is the query engine's decision,
    /// not this one's.
    pub fn ids_for_phases(&self, phases: &[String], which: IndexSide) -> HashSet<String> {
        let index = match which {
            IndexSide::Reactants => &self.reactant_index,
            IndexSide::Products => &self.product_index,
        };
        let mut ids: HashSet<String> = HashSet::new();
        for token in phases {
            let phase = canonical_phase(token);
            if let Some(found) = index.get(&phase) {
                ids.extend(found.iter().cloned());
            }
        }
        ids
    }

    /// Sorted union of all phase keys across both indices. This is what
    /// populates the selectable filter options in the UI layer.
    pub fn unique_phases(&self) -> Vec<String> {
        let mut phases: HashSet<&String> = self.reactant_index.keys().collect();
        phases.extend(self.product_index.keys());
        let mut phases: Vec<String> = phases.into_iter().cloned().collect();
        phases.sort();
        phases
    }
}
