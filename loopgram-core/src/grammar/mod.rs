//! The fixed grammar alphabet and its region-keyed mapping tables.
//!
//! Frequent n-tuples are rendered as Greek-letter symbols describing which
//! canonical location they are most associated with. Three mapping tables
//! exist, one per word segment: the leading block before the R-loop, the
//! loop interior, and the trailing block after it. The alphabet, the
//! tables and the two merge rules are immutable and defined once here.
//!
//! ## Modules
//!
//! - [`blocks`]: parsing-block splitting and sub-block occurrence counts
//! - [`resolver`]: the tie-breaking n-tuple-to-symbol procedure
//! - [`word`]: word assembly over a training interval

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::constants::REGION_COUNT;
use crate::types::{GrammarError, RegionSummary};

pub mod blocks;
pub mod resolver;
pub mod word;

pub use blocks::{BlockCounts, ParsingBlocks};
pub use resolver::{Resolution, SymbolResolver};
pub use word::{EncodedWord, WordAssembler};

/// One atomic symbol of the grammar alphabet.
///
/// `Delta` and `Beta` are the merge targets of the two tie-collapse rules;
/// `Alpha` and `Omega` carry the boundary-distance markers of assembled
/// words. The derived order is the canonical rendering order for ambiguous
/// symbol groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrammarSymbol {
    Alpha,
    Beta,
    Delta,
    Rho,
    RhoHat,
    Sigma,
    SigmaHat,
    Tau,
    TauHat,
    Omega,
}

impl fmt::Display for GrammarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            Self::Alpha => "\u{03b1}",
            Self::Beta => "\u{03b2}",
            Self::Delta => "\u{03b4}",
            Self::Rho => "\u{03c1}",
            Self::RhoHat => "\u{03c1}\u{0304}",
            Self::Sigma => "\u{03c3}",
            Self::SigmaHat => "\u{03c3}\u{0304}",
            Self::Tau => "\u{03c4}",
            Self::TauHat => "\u{03c4}\u{0304}",
            Self::Omega => "\u{03c9}",
        };
        f.write_str(rendered)
    }
}

/// Location label attached to an n-tuple during resolution.
///
/// `W1`..`W4` name the four thresholded region weight tables; `N1`..`N3`
/// name the three parsing-block occurrence counts (leading block, loop
/// interior, trailing block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocationLabel {
    W1,
    W2,
    W3,
    W4,
    N1,
    N2,
    N3,
}

impl fmt::Display for LocationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            Self::W1 => "W1",
            Self::W2 => "W2",
            Self::W3 => "W3",
            Self::W4 => "W4",
            Self::N1 => "N1",
            Self::N2 => "N2",
            Self::N3 => "N3",
        };
        f.write_str(rendered)
    }
}

/// Which word segment a sub-block belongs to, selecting the mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentContext {
    /// The gene prefix running up to the R-loop start.
    Leading,
    /// The loop interior, processed back to front.
    Interior,
    /// The gene suffix following the R-loop end.
    Trailing,
}

/// Map a location label through the segment's mapping table.
///
/// The leading and trailing tables coincide; the interior table swaps the
/// sigma family for the tau family. `N2` maps to rho in every table.
#[must_use]
pub fn symbol_for(context: SegmentContext, label: LocationLabel) -> GrammarSymbol {
    use LocationLabel::*;

    match context {
        SegmentContext::Leading | SegmentContext::Trailing => match label {
            W1 | W2 | N1 => GrammarSymbol::SigmaHat,
            W3 | W4 | N3 => GrammarSymbol::Sigma,
            N2 => GrammarSymbol::Rho,
        },
        SegmentContext::Interior => match label {
            W1 | W2 | N1 => GrammarSymbol::Tau,
            W3 | W4 | N3 => GrammarSymbol::TauHat,
            N2 => GrammarSymbol::Rho,
        },
    }
}

/// Collapse the two complementary symbol pairs.
///
/// Tau together with tau-with-macron becomes delta; sigma together with
/// sigma-with-macron becomes beta. No other pairs merge.
#[must_use]
pub fn merge_symbols(mut symbols: BTreeSet<GrammarSymbol>) -> BTreeSet<GrammarSymbol> {
    if symbols.contains(&GrammarSymbol::Tau) && symbols.contains(&GrammarSymbol::TauHat) {
        symbols.remove(&GrammarSymbol::Tau);
        symbols.remove(&GrammarSymbol::TauHat);
        symbols.insert(GrammarSymbol::Delta);
    }
    if symbols.contains(&GrammarSymbol::Sigma) && symbols.contains(&GrammarSymbol::SigmaHat) {
        symbols.remove(&GrammarSymbol::Sigma);
        symbols.remove(&GrammarSymbol::SigmaHat);
        symbols.insert(GrammarSymbol::Beta);
    }
    symbols
}

/// The resolver's lookup tables: the four thresholded region weight tables
/// plus the two auxiliary tables consulted by the N2 refinement step.
///
/// Tables are keyed by n-tuple value. A `train` run fills the region tables
/// and leaves the extra tables empty; a prior run's persisted tables can be
/// loaded instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightTables {
    /// Thresholded weight per n-tuple, per region id.
    pub regions: [BTreeMap<String, f64>; REGION_COUNT],
    /// Auxiliary region-2 table for the N2 refinement step.
    pub region2_extra: BTreeMap<String, f64>,
    /// Auxiliary region-3 table for the N2 refinement step.
    pub region3_extra: BTreeMap<String, f64>,
}

impl WeightTables {
    /// Build lookup tables from thresholded region summaries.
    #[must_use]
    pub fn from_summaries(summaries: &[RegionSummary]) -> Self {
        let mut tables = Self::default();
        for summary in summaries {
            if summary.region < REGION_COUNT {
                let table = &mut tables.regions[summary.region];
                for entry in &summary.entries {
                    table.insert(entry.ntuple.clone(), entry.weight);
                }
            }
        }
        tables
    }

    /// Serialise the tables as JSON.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), GrammarError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserialise tables from JSON.
    pub fn load<R: Read>(reader: R) -> Result<Self, GrammarError> {
        Ok(serde_json::from_reader(reader)?)
    }
}
