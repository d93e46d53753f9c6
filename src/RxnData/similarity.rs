//! # Similarity Grouper Module
//!
//! ## Purpose
//! Partitions the whole reaction table into similarity groups: reactions that
//! share reactant/product phases, directly or with the equation written in the
//! opposite direction, receive the same group id and therefore the same plot
//! color. The grouping backs the "find similar reactions" behavior of the UI
//! layer, which only ever asks for a fresh annotated view.
//!
//! ## Key Logic
//! 1. Reaction ids are processed in table order; ids already placed in a group
//!    are skipped as pivots
//! 2. For the pivot's cleaned reactant/product lists the four index match sets
//!    are computed (forward-reactant, forward-product, reverse-reactant,
//!    reverse-product), the same sets the query engine uses for combined
//!    filters
//! 3. "and" keeps the forward intersection (shares a reactant AND a product in
//!    the same direction) and adds the reverse sets, which capture the
//!    swapped-direction relation where one reaction's reactants appear among
//!    another's products; "or" unions all four sets
//! 4. A final sweep hands every still-unassigned reaction its own singleton
//!    group, so after `build` every id has exactly one group
//!
//! Group ids are dense integers from 0 in discovery order; colors come from a
//! fixed palette cycled modulo its length, so rebuilding from the same table
//! and method reproduces the identical id -> color mapping. The grouping is
//! never patched incrementally: a new table or a new method means a full
//! rebuild.

use std::collections::{HashMap, HashSet};

use crate::RxnData::normalizer::canonical_phase;
use crate::RxnData::phase_index::{IndexSide, PhaseIndex};
use crate::RxnData::processor::CombineMethod;
use crate::RxnData::records::ReactionRecord;

/// Plotly's qualitative "Alphabet" palette, the one the explorer plots with.
pub const PALETTE: [&str; 26] = [
    "#AA0DFE", "#3283FE", "#85660D", "#782AB6", "#565656", "#1C8356", "#16FF32", "#F7E1A0",
    "#E2E2E2", "#1CBE4F", "#C4451C", "#DEA0FD", "#FE00FA", "#325A9B", "#FEAF16", "#F8A19F",
    "#90AD1C", "#F6222E", "#1CFFCE", "#2ED9FF", "#B10DA1", "#C075A6", "#FC1CBF", "#B00068",
    "#FBE426", "#FA0087",
];

/// color returned for ids not present in the current grouping
pub const UNKNOWN_COLOR: &str = "#808080";

/// a reaction row together with its derived similarity columns
#[derive(Debug, Clone)]
pub struct AnnotatedRecord {
    pub record: ReactionRecord,
    pub similarity_group: Option<usize>,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct SimilarityGrouping {
    pub method: CombineMethod,
    groups: HashMap<String, usize>,
    pub n_groups: usize,
}

impl SimilarityGrouping {
    /// Builds the full partition. The index must have been built from the same
    /// records, otherwise the match sets are meaningless.
    pub fn build(records: &[ReactionRecord], index: &PhaseIndex, method: CombineMethod) -> Self {
        let mut groups: HashMap<String, usize> = HashMap::new();
        let mut counter: usize = 0;

        for record in records {
            if groups.contains_key(&record.id) {
                continue;
            }
            let reactants = cleaned(&record.reactants);
            let products = cleaned(&record.products);
            // one-sided reactions cannot take part in the match-set algebra,
            // they fall into singleton groups in the final sweep
            if reactants.is_empty() || products.is_empty() {
                continue;
            }

            let forward_r = index.ids_for_phases(&reactants, IndexSide::Reactants);
            let forward_p = index.ids_for_phases(&products, IndexSide::Products);
            let reverse_r = index.ids_for_phases(&reactants, IndexSide::Products);
            let reverse_p = index.ids_for_phases(&products, IndexSide::Reactants);

            let matching: HashSet<String> = match method {
                CombineMethod::And => {
                    let forward: HashSet<String> =
                        forward_r.intersection(&forward_p).cloned().collect();
                    forward
                        .into_iter()
                        .chain(reverse_r.into_iter())
                        .chain(reverse_p.into_iter())
                        .collect()
                }
                CombineMethod::Or => forward_r
                    .into_iter()
                    .chain(forward_p.into_iter())
                    .chain(reverse_r.into_iter())
                    .chain(reverse_p.into_iter())
                    .collect(),
            };

            if matching.is_empty() {
                continue;
            }
            for id in matching {
                groups.entry(id).or_insert(counter);
            }
            groups.entry(record.id.clone()).or_insert(counter);
            counter += 1;
        }

        // singleton sweep
        for record in records {
            if !groups.contains_key(&record.id) {
                groups.insert(record.id.clone(), counter);
                counter += 1;
            }
        }

        Self {
            method,
            groups,
            n_groups: counter,
        }
    }

    /// group id of a reaction, None if the id is not in the current grouping
    pub fn group_for(&self, id: &str) -> Option<usize> {
        self.groups.get(id).copied()
    }

    /// Color of a reaction's group. Ids absent from the grouping (stale table,
    /// typo) get the sentinel unknown color instead of an error.
    pub fn color_for(&self, id: &str) -> &'static str {
        match self.group_for(id) {
            Some(group) => PALETTE[group % PALETTE.len()],
            None => UNKNOWN_COLOR,
        }
    }

    /// Returns the rows augmented with group id and color key. The input is
    /// not touched; callers keep their filtered views as they were.
    pub fn annotate(&self, rows: &[ReactionRecord]) -> Vec<AnnotatedRecord> {
        rows.iter()
            .map(|record| AnnotatedRecord {
                record: record.clone(),
                similarity_group: self.group_for(&record.id),
                color: self.color_for(&record.id).to_string(),
            })
            .collect()
    }
}

fn cleaned(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| canonical_phase(token))
        .filter(|token| !token.is_empty())
        .collect()
}
