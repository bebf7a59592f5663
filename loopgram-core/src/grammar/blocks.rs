use std::collections::BTreeMap;

use crate::sequence::{chop_forward, chop_reversed};
use crate::types::{GenomicInterval, GrammarError};

/// The width-`w` sub-blocks of one interval's gene-bounded sequence.
///
/// The gene sequence is split at the interval boundaries into a leading
/// block, the loop interior and a trailing block. The leading block is
/// chopped left to right; interior and trailing blocks are chopped aligned
/// to their ends, so their sub-block lists run backwards through the
/// sequence while character order inside each sub-block is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingBlocks {
    /// Sub-blocks of the gene prefix, in sequence order; the trailing
    /// partial sub-block, if any, touches the interval start.
    pub before: Vec<String>,
    /// Sub-blocks of the loop interior, from its end towards its start.
    pub inside_reversed: Vec<String>,
    /// Sub-blocks of the gene suffix, from the gene end towards the
    /// interval end; the final partial sub-block, if any, touches the
    /// interval end.
    pub after_reversed: Vec<String>,
}

impl ParsingBlocks {
    /// Split a gene-bounded sequence at an interval into parsing blocks.
    ///
    /// `interval` uses absolute sequence coordinates; `gene` provides the
    /// bounds the interval must lie within.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::IntervalOutsideGene`] when the interval is
    /// not contained in the gene bounds.
    pub fn split(
        gene_sequence: &str,
        gene: &GenomicInterval,
        interval: &GenomicInterval,
        width: usize,
    ) -> Result<Self, GrammarError> {
        if !gene.contains(interval) {
            return Err(GrammarError::IntervalOutsideGene {
                interval: *interval,
                gene_start: gene.start,
                gene_end: gene.end,
            });
        }

        let start = interval.start - gene.start;
        let end = interval.end - gene.start;

        Ok(Self {
            before: chop_forward(&gene_sequence[..start], width),
            inside_reversed: chop_reversed(&gene_sequence[start..end], width),
            after_reversed: chop_reversed(&gene_sequence[end..], width),
        })
    }
}

/// Sub-block occurrence counts aggregated over a set of parsing blocks.
///
/// Counts how many sub-blocks of each stream equal a given n-tuple, summed
/// over all training intervals. These are the `N1`/`N2`/`N3` fallback
/// counts of the resolver, kept as explicit per-run state rather than a
/// process-wide cache so runs with different parameters cannot
/// cross-contaminate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockCounts {
    before: BTreeMap<String, usize>,
    inside: BTreeMap<String, usize>,
    after: BTreeMap<String, usize>,
}

impl BlockCounts {
    /// Aggregate counts over every interval's parsing blocks.
    #[must_use]
    pub fn from_blocks(blocks: &[ParsingBlocks]) -> Self {
        let mut counts = Self::default();
        for parsed in blocks {
            for sub_block in &parsed.before {
                *counts.before.entry(sub_block.clone()).or_insert(0) += 1;
            }
            for sub_block in &parsed.inside_reversed {
                *counts.inside.entry(sub_block.clone()).or_insert(0) += 1;
            }
            for sub_block in &parsed.after_reversed {
                *counts.after.entry(sub_block.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// The three stream counts of an n-tuple: leading block, loop interior,
    /// trailing block.
    #[must_use]
    pub fn counts_for(&self, ntuple: &str) -> (usize, usize, usize) {
        (
            self.before.get(ntuple).copied().unwrap_or(0),
            self.inside.get(ntuple).copied().unwrap_or(0),
            self.after.get(ntuple).copied().unwrap_or(0),
        )
    }
}
