use crate::grammar::{EncodedWord, WeightTables};
use crate::types::{GenomicInterval, RegionSummary};

/// Everything produced by a grammar training run.
///
/// The raw and thresholded summaries are kept for persistence and
/// reporting; the lookup tables feed later encoding runs.
#[derive(Debug, Clone)]
pub struct TrainingResults {
    /// The four weight-sorted region summaries.
    pub region_summaries: Vec<RegionSummary>,
    /// The entropy-thresholded prefixes of the region summaries.
    pub thresholded_summaries: Vec<RegionSummary>,
    /// Resolver lookup tables built from the thresholded summaries.
    pub tables: WeightTables,
    /// The width-normalised training intervals, in input order.
    pub intervals: Vec<GenomicInterval>,
    /// Number of training intervals processed.
    pub rloop_count: usize,
}

/// Everything produced by a word encoding run.
#[derive(Debug, Clone)]
pub struct WordResults {
    /// One word per interval, in input order.
    pub words: Vec<EncodedWord>,
    /// Total number of sub-block positions that resolved to no symbol,
    /// across all words.
    pub unresolved_positions: usize,
}
