//! The tie-breaking procedure resolving an n-tuple to grammar symbols.
//!
//! Resolution consults the thresholded region weight tables first, falls
//! back to raw parsing-block occurrence counts, refines `N2` ties through
//! the auxiliary tables, maps surviving labels through the active segment's
//! mapping table and finally applies the two merge rules. Multi-way ties
//! are deliberate: an n-tuple equally associated with several locations is
//! rendered as the whole group.
//!
//! The resolver is a pure function over immutable lookup tables; all state
//! it consults is scoped to one resolution run.

use std::collections::BTreeSet;

use crate::grammar::{
    merge_symbols, symbol_for, BlockCounts, GrammarSymbol, LocationLabel, SegmentContext,
    WeightTables,
};

/// Outcome of resolving one n-tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The merged symbol group; a single symbol for the unambiguous case.
    Symbols(BTreeSet<GrammarSymbol>),
    /// The n-tuple appears in no weight table and no parsing block.
    Unknown,
}

impl Resolution {
    /// Render the resolution for word assembly.
    ///
    /// A single symbol is emitted bare; a genuine ambiguity becomes the
    /// parenthesised comma-joined group in canonical symbol order. Unknown
    /// n-tuples render as a visible placeholder.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Unknown => "?".to_string(),
            Self::Symbols(symbols) => {
                if symbols.len() == 1 {
                    symbols.iter().next().map(ToString::to_string).unwrap_or_default()
                } else {
                    let joined = symbols
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(",");
                    format!("({joined})")
                }
            }
        }
    }

    /// Whether this resolution signals an unseen n-tuple.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// Resolver over one run's lookup tables and block counts.
#[derive(Debug, Clone, Copy)]
pub struct SymbolResolver<'a> {
    tables: &'a WeightTables,
    counts: &'a BlockCounts,
}

impl<'a> SymbolResolver<'a> {
    /// Create a resolver borrowing the run's tables and block counts.
    #[must_use]
    pub fn new(tables: &'a WeightTables, counts: &'a BlockCounts) -> Self {
        Self { tables, counts }
    }

    /// Resolve an n-tuple within the given word segment.
    #[must_use]
    pub fn resolve(&self, ntuple: &str, context: SegmentContext) -> Resolution {
        let labels = self.weighted_locations(ntuple);
        let labels = if labels.is_empty() {
            match self.occurrence_fallback(ntuple) {
                Some(labels) => labels,
                None => return Resolution::Unknown,
            }
        } else {
            labels
        };
        let labels = self.refine_n2(ntuple, labels);

        let symbols = labels
            .into_iter()
            .map(|label| symbol_for(context, label))
            .collect();
        Resolution::Symbols(merge_symbols(symbols))
    }

    /// Step 1: look the n-tuple up in the four thresholded region tables
    /// and keep every label sharing the maximum weight.
    fn weighted_locations(&self, ntuple: &str) -> BTreeSet<LocationLabel> {
        const REGION_LABELS: [LocationLabel; 4] = [
            LocationLabel::W1,
            LocationLabel::W2,
            LocationLabel::W3,
            LocationLabel::W4,
        ];

        let found: Vec<(LocationLabel, f64)> = self
            .tables
            .regions
            .iter()
            .zip(REGION_LABELS)
            .filter_map(|(table, label)| table.get(ntuple).map(|&weight| (label, weight)))
            .collect();

        max_value_group(found)
    }

    /// Step 2: fall back to the parsing-block occurrence counts, with the
    /// same multi-way-tie policy. An n-tuple absent from every block is
    /// truly unseen.
    fn occurrence_fallback(&self, ntuple: &str) -> Option<BTreeSet<LocationLabel>> {
        let (before, inside, after) = self.counts.counts_for(ntuple);
        if before == 0 && inside == 0 && after == 0 {
            return None;
        }

        Some(max_value_group(vec![
            (LocationLabel::N1, before),
            (LocationLabel::N2, inside),
            (LocationLabel::N3, after),
        ]))
    }

    /// Step 3: an `N2` in the tie set triggers a secondary lookup against
    /// the two auxiliary tables; any hit replaces `N2` with the secondary
    /// lookup's maximum-weight labels.
    fn refine_n2(
        &self,
        ntuple: &str,
        mut labels: BTreeSet<LocationLabel>,
    ) -> BTreeSet<LocationLabel> {
        if !labels.contains(&LocationLabel::N2) {
            return labels;
        }

        let found: Vec<(LocationLabel, f64)> = [
            (LocationLabel::W2, &self.tables.region2_extra),
            (LocationLabel::W3, &self.tables.region3_extra),
        ]
        .into_iter()
        .filter_map(|(label, table)| table.get(ntuple).map(|&weight| (label, weight)))
        .collect();

        let secondary = max_value_group(found);
        if secondary.is_empty() {
            return labels;
        }

        labels.remove(&LocationLabel::N2);
        labels.extend(secondary);
        labels
    }
}

/// All labels sharing the maximum value; empty input yields an empty set.
fn max_value_group<V: PartialOrd + Copy>(
    pairs: Vec<(LocationLabel, V)>,
) -> BTreeSet<LocationLabel> {
    let mut max: Option<V> = None;
    for (_, value) in &pairs {
        match max {
            None => max = Some(*value),
            Some(current) if *value > current => max = Some(*value),
            Some(_) => {}
        }
    }

    match max {
        None => BTreeSet::new(),
        Some(max) => pairs
            .into_iter()
            .filter(|(_, value)| *value == max)
            .map(|(label, _)| label)
            .collect(),
    }
}
