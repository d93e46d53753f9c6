//! # Reaction Query Engine Module
//!
//! ## Purpose
//! This module provides the query API of the reaction database. It owns the
//! original (read-only) reaction table, the phase index built from it, and the
//! lazily built similarity grouping, and answers every filter request the UI
//! layer makes: by id set, by reactant phases, by product phases, by combined
//! reactant+product criteria, by type and by plot type.
//!
//! ## Empty-input convention
//! An EMPTY filter input means NO RESTRICTION: `filter_by_ids(&[])` returns the
//! whole original table, and the same holds for every other filter. A
//! non-empty input that matches nothing returns an empty row set, which is a
//! perfectly valid result and never an error. Callers must therefore
//! distinguish "nothing requested" from "nothing found" by the emptiness of
//! their own input, not by the shape of the output.
//!
//! ## Combined filters
//! `filter_by_reactants_and_products` evaluates four index match sets: forward
//! reactant, forward product, and the two reverse sets that catch reactions
//! recorded in the opposite direction. Under "and" the forward pair and the
//! reverse pair are intersected and the two intersections unioned; under "or"
//! all four sets are unioned. When a forward set is empty under "and" the
//! filter short-circuits to an empty result instead of evaluating the reverse
//! branch.
//!
//! ## Usage Pattern
//! ```rust, ignore
//! let processor = RxnProcessor::new(records)?;
//! let rows = processor.filter_by_reactants(&["ky".to_string()]);
//! let (reactants, products) = processor.get_phases_for_ids(&selected_ids);
//! let grouping = processor.build_groups(CombineMethod::And);
//! let annotated = grouping.annotate(&rows);
//! ```

use prettytable::{Cell, Row, Table};
use serde_json::Value;
use std::collections::HashSet;
use std::str::FromStr;

use crate::RxnData::normalizer::canonical_phase;
use crate::RxnData::phase_index::{IndexSide, PhaseIndex};
use crate::RxnData::records::{validate_schema, ReactionRecord, RxnDBError, RxnType, PlotType};
use crate::RxnData::similarity::SimilarityGrouping;

/// how reactant and product criteria are combined in filters and grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineMethod {
    And,
    Or,
}

impl FromStr for CombineMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "and" => Ok(CombineMethod::And),
            "or" => Ok(CombineMethod::Or),
            other => Err(format!("Unknown combine method: {}", other)),
        }
    }
}

/// Query engine over the original reaction table. The table and the index are
/// immutable after construction; a new table means a new processor. Only the
/// similarity grouping is rebuilt in place, and always wholesale.
#[derive(Debug, Clone)]
pub struct RxnProcessor {
    original_table: Vec<ReactionRecord>,
    index: PhaseIndex,
    grouping: Option<SimilarityGrouping>,
}

impl RxnProcessor {
    /// Builds the processor and its phase index. An empty table is refused;
    /// use `new_allow_empty` when an empty database is acceptable.
    pub fn new(records: Vec<ReactionRecord>) -> Result<Self, RxnDBError> {
        if records.is_empty() {
            return Err(RxnDBError::EmptyTable);
        }
        Ok(Self::new_allow_empty(records))
    }

    /// Same as `new` but tolerates an empty table and builds empty indices.
    pub fn new_allow_empty(records: Vec<ReactionRecord>) -> Self {
        let index = PhaseIndex::build(&records);
        Self {
            original_table: records,
            index,
            grouping: None,
        }
    }

    /// Builds the processor from raw (id, entry) pairs as loaded from the
    /// persisted catalog. The whole table is schema-checked first; entries
    /// that fail to parse afterwards are skipped with a warning.
    pub fn from_entries(entries: &[(String, Value)]) -> Result<Self, RxnDBError> {
        validate_schema(entries)?;
        let mut records = Vec::new();
        for (id, entry) in entries {
            match ReactionRecord::from_entry(id, entry) {
                Ok(record) => records.push(record),
                Err(msg) => log::warn!("Skipping entry: {}", msg),
            }
        }
        Self::new(records)
    }

    /// the original, unfiltered table; always available regardless of what
    /// filters have been asked for
    pub fn table(&self) -> &[ReactionRecord] {
        &self.original_table
    }

    pub fn index(&self) -> &PhaseIndex {
        &self.index
    }

    /// sorted list of all phases usable as filter options
    pub fn unique_phases(&self) -> Vec<String> {
        self.index.unique_phases()
    }

    fn rows_with_ids(&self, ids: &HashSet<String>) -> Vec<ReactionRecord> {
        self.original_table
            .iter()
            .filter(|record| ids.contains(&record.id))
            .cloned()
            .collect()
    }

    /// Rows whose id is in `ids`. Empty `ids` returns the entire table.
    pub fn filter_by_ids(&self, ids: &[String]) -> Vec<ReactionRecord> {
        if ids.is_empty() {
            return self.original_table.clone();
        }
        let ids: HashSet<String> = ids.iter().cloned().collect();
        self.rows_with_ids(&ids)
    }

    /// Rows having any requested phase among their reactants. Empty `phases`
    /// returns the entire table.
    pub fn filter_by_reactants(&self, phases: &[String]) -> Vec<ReactionRecord> {
        if phases.is_empty() {
            return self.original_table.clone();
        }
        let ids = self.index.ids_for_phases(phases, IndexSide::Reactants);
        self.rows_with_ids(&ids)
    }

    /// Rows having any requested phase among their products. Empty `phases`
    /// returns the entire table.
    pub fn filter_by_products(&self, phases: &[String]) -> Vec<ReactionRecord> {
        if phases.is_empty() {
            return self.original_table.clone();
        }
        let ids = self.index.ids_for_phases(phases, IndexSide::Products);
        self.rows_with_ids(&ids)
    }

    /// Combined reactant+product filter, including the reverse-direction
    /// check for reactions recorded the other way around. Degrades to the
    /// single-sided filter when one list is empty and to the full table when
    /// both are.
    pub fn filter_by_reactants_and_products(
        &self,
        reactants: &[String],
        products: &[String],
        method: CombineMethod,
    ) -> Vec<ReactionRecord> {
        if reactants.is_empty() && products.is_empty() {
            return self.original_table.clone();
        }
        if products.is_empty() {
            return self.filter_by_reactants(reactants);
        }
        if reactants.is_empty() {
            return self.filter_by_products(products);
        }

        let forward_r = self.index.ids_for_phases(reactants, IndexSide::Reactants);
        let forward_p = self.index.ids_for_phases(products, IndexSide::Products);

        let matching: HashSet<String> = match method {
            CombineMethod::And => {
                // an empty forward side cannot satisfy the intersection, skip
                // the reverse computation entirely
                if forward_r.is_empty() || forward_p.is_empty() {
                    return Vec::new();
                }
                let reverse_r = self.index.ids_for_phases(reactants, IndexSide::Products);
                let reverse_p = self.index.ids_for_phases(products, IndexSide::Reactants);
                let forward: HashSet<String> =
                    forward_r.intersection(&forward_p).cloned().collect();
                let reverse: HashSet<String> =
                    reverse_r.intersection(&reverse_p).cloned().collect();
                forward.union(&reverse).cloned().collect()
            }
            CombineMethod::Or => {
                let reverse_r = self.index.ids_for_phases(reactants, IndexSide::Products);
                let reverse_p = self.index.ids_for_phases(products, IndexSide::Reactants);
                forward_r
                    .into_iter()
                    .chain(forward_p.into_iter())
                    .chain(reverse_r.into_iter())
                    .chain(reverse_p.into_iter())
                    .collect()
            }
        };
        self.rows_with_ids(&matching)
    }

    /// Rows whose type is in `types`. Empty `types` returns the entire table.
    pub fn filter_by_type(&self, types: &[RxnType]) -> Vec<ReactionRecord> {
        if types.is_empty() {
            return self.original_table.clone();
        }
        self.original_table
            .iter()
            .filter(|record| types.contains(&record.rxn_type))
            .cloned()
            .collect()
    }

    /// drops rows drawn as points, keeping the reaction curves
    pub fn remove_point_data(&self) -> Vec<ReactionRecord> {
        self.original_table
            .iter()
            .filter(|record| record.plot_type != PlotType::Point)
            .cloned()
            .collect()
    }

    /// drops rows drawn as curves, keeping the experimental brackets
    pub fn remove_curve_data(&self) -> Vec<ReactionRecord> {
        self.original_table
            .iter()
            .filter(|record| record.plot_type != PlotType::Curve)
            .cloned()
            .collect()
    }

    /// All reactant phases and all product phases appearing in the rows with
    /// the given ids, cleaned, de-duplicated and sorted. Empty `ids` gives two
    /// empty lists, NOT the full phase set; this is the one place where empty
    /// input does not mean "unrestricted", because the result feeds a second
    /// filter round and an unrestricted phase set would select everything.
    pub fn get_phases_for_ids(&self, ids: &[String]) -> (Vec<String>, Vec<String>) {
        if ids.is_empty() {
            return (Vec::new(), Vec::new());
        }
        let ids: HashSet<&String> = ids.iter().collect();
        let mut reactants: HashSet<String> = HashSet::new();
        let mut products: HashSet<String> = HashSet::new();
        for record in &self.original_table {
            if !ids.contains(&record.id) {
                continue;
            }
            for token in &record.reactants {
                let phase = canonical_phase(token);
                if !phase.is_empty() {
                    reactants.insert(phase);
                }
            }
            for token in &record.products {
                let phase = canonical_phase(token);
                if !phase.is_empty() {
                    products.insert(phase);
                }
            }
        }
        let mut reactants: Vec<String> = reactants.into_iter().collect();
        let mut products: Vec<String> = products.into_iter().collect();
        reactants.sort();
        products.sort();
        (reactants, products)
    }

    /// Rebuilds the similarity grouping for the given method and stores it.
    /// Always a full rebuild; the previous grouping is replaced wholesale.
    pub fn build_groups(&mut self, method: CombineMethod) -> &SimilarityGrouping {
        let grouping = SimilarityGrouping::build(&self.original_table, &self.index, method);
        self.grouping = Some(grouping);
        self.grouping.as_ref().unwrap()
    }

    /// the current grouping, if one has been built
    pub fn grouping(&self) -> Option<&SimilarityGrouping> {
        self.grouping.as_ref()
    }
}

/// Prints a row subset as a table to stdout, the columns the explorer's data
/// table shows.
pub fn pretty_print_rxns(rows: &[ReactionRecord]) {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("id"),
        Cell::new("rxn"),
        Cell::new("type"),
        Cell::new("plot"),
        Cell::new("ref"),
    ]));
    for record in rows {
        table.add_row(Row::new(vec![
            Cell::new(&record.id),
            Cell::new(&record.rxn),
            Cell::new(&format!("{:?}", record.rxn_type)),
            Cell::new(&format!("{:?}", record.plot_type)),
            Cell::new(&record.ref_cite),
        ]));
    }
    table.printstd();
}
