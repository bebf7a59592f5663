//! Occurrence aggregation and weight calculation.
//!
//! Every n-tuple seen in a region is counted across the whole training set,
//! then normalised by its baseline frequency inside the gene bounds and the
//! training-set size:
//!
//! ```text
//! weight = region_count / (gene_count * rloop_count)
//! ```
//!
//! Aggregation over intervals is associative and commutative, so interval
//! extraction runs in parallel and partial counts are merged by addition.
//! The final entry order is made deterministic by sorting on weight
//! descending with lexicographic n-tuple order as the tie break, so results
//! never depend on traversal or merge order.

use std::collections::BTreeMap;

use log::debug;
use rayon::prelude::*;

use crate::constants::REGION_COUNT;
use crate::regions::RegionExtractor;
use crate::sequence::{count_overlapping, nucleotide_counts};
use crate::types::{GenomicInterval, GrammarError, RegionSummary, WeightEntry};

/// Occurrence counts of one region: n-tuple value to count, zero default.
pub type OccurrenceTable = BTreeMap<String, usize>;

/// Count every window of every interval, per region, across the training
/// set.
///
/// Repeats count individually; the windows of one interval form a multiset,
/// not a set. Returns the four occurrence tables and the number of
/// intervals processed.
#[must_use]
pub fn aggregate_occurrences(
    extractor: &RegionExtractor,
    sequence: &str,
    intervals: &[GenomicInterval],
) -> ([OccurrenceTable; REGION_COUNT], usize) {
    let tables = intervals
        .par_iter()
        .map(|interval| {
            let mut partial: [OccurrenceTable; REGION_COUNT] = Default::default();
            for (table, windows) in partial.iter_mut().zip(extractor.extract(sequence, interval))
            {
                for window in windows {
                    *table.entry(window).or_insert(0) += 1;
                }
            }
            partial
        })
        .reduce(Default::default, merge_tables);

    debug!(
        "aggregated {} intervals into {} distinct n-tuples",
        intervals.len(),
        tables.iter().map(|t| t.len()).sum::<usize>()
    );

    (tables, intervals.len())
}

fn merge_tables(
    mut left: [OccurrenceTable; REGION_COUNT],
    right: [OccurrenceTable; REGION_COUNT],
) -> [OccurrenceTable; REGION_COUNT] {
    for (into, from) in left.iter_mut().zip(right) {
        for (ntuple, count) in from {
            *into.entry(ntuple).or_insert(0) += count;
        }
    }
    left
}

/// Turn raw occurrence tables into weight-sorted region summaries.
///
/// For each distinct n-tuple the independent A/T/C/G character counts and
/// the overlap-permitting occurrence count inside the gene bounds are
/// computed, then the normalised weight.
///
/// # Errors
///
/// Returns [`GrammarError::DegenerateNtuple`] when an n-tuple never occurs
/// inside the gene bounds (its weight would divide by zero) and
/// [`GrammarError::EmptyTrainingSet`] when `rloop_count` is zero.
pub fn compute_region_summaries(
    tables: &[OccurrenceTable; REGION_COUNT],
    sequence: &str,
    gene: &GenomicInterval,
    rloop_count: usize,
) -> Result<Vec<RegionSummary>, GrammarError> {
    if rloop_count == 0 {
        return Err(GrammarError::EmptyTrainingSet);
    }

    let gene_sequence = &sequence[gene.start..gene.end];
    let mut summaries = Vec::with_capacity(REGION_COUNT);

    for (region, table) in tables.iter().enumerate() {
        let mut entries = Vec::with_capacity(table.len());

        for (ntuple, &region_count) in table {
            let gene_count = count_overlapping(gene_sequence, ntuple);
            if gene_count == 0 {
                return Err(GrammarError::DegenerateNtuple {
                    ntuple: ntuple.clone(),
                    region,
                });
            }

            entries.push(WeightEntry {
                ntuple: ntuple.clone(),
                region_count,
                nucleotide_count: nucleotide_counts(ntuple),
                gene_count,
                weight: region_count as f64 / (gene_count * rloop_count) as f64,
            });
        }

        entries.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.ntuple.cmp(&b.ntuple))
        });

        summaries.push(RegionSummary { region, entries });
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_and_weigh(
        sequence: &str,
        intervals: &[GenomicInterval],
        gene: GenomicInterval,
        width: usize,
        padding: usize,
    ) -> Vec<RegionSummary> {
        let extractor = RegionExtractor::new(width, padding);
        let (tables, count) = aggregate_occurrences(&extractor, sequence, intervals);
        compute_region_summaries(&tables, sequence, &gene, count).unwrap()
    }

    #[test]
    fn test_aggregate_single_interval() {
        let extractor = RegionExtractor::new(2, 2);
        let sequence = "ACGTACGTACGT";
        let intervals = [GenomicInterval::new(4, 8).unwrap()];

        let (tables, count) = aggregate_occurrences(&extractor, sequence, &intervals);
        assert_eq!(count, 1);
        for table in &tables {
            assert_eq!(table.get("AC"), Some(&1));
            assert_eq!(table.get("CG"), Some(&1));
            assert_eq!(table.get("GT"), Some(&1));
            assert_eq!(table.values().sum::<usize>(), 3);
        }
    }

    #[test]
    fn test_aggregate_counts_repeats() {
        let extractor = RegionExtractor::new(2, 4);
        // Before-start flank of (6, 8) is "AAAAAA": five overlapping "AA".
        let sequence = "AAAAAAAAAA";
        let intervals = [GenomicInterval::new(6, 8).unwrap()];

        let (tables, _) = aggregate_occurrences(&extractor, sequence, &intervals);
        assert_eq!(tables[0].get("AA"), Some(&5));
    }

    #[test]
    fn test_aggregate_window_total_matches_generated() {
        let extractor = RegionExtractor::new(3, 4);
        let sequence = "ACGTACGTACGTACGTACGT";
        let intervals = [
            GenomicInterval::new(8, 12).unwrap(),
            GenomicInterval::new(9, 15).unwrap(),
        ];

        let (tables, _) = aggregate_occurrences(&extractor, sequence, &intervals);
        for region in 0..REGION_COUNT {
            let generated: usize = intervals
                .iter()
                .map(|iv| extractor.extract(sequence, iv)[region].len())
                .sum();
            assert_eq!(tables[region].values().sum::<usize>(), generated);
        }
    }

    #[test]
    fn test_weights_positive_and_sorted() {
        let sequence = "ACGTACGTACGTACGTACGT";
        let gene = GenomicInterval::new(0, 20).unwrap();
        let intervals = [GenomicInterval::new(8, 12).unwrap()];

        let summaries = extract_and_weigh(sequence, &intervals, gene, 3, 2);
        assert_eq!(summaries.len(), REGION_COUNT);
        for summary in &summaries {
            assert!(!summary.entries.is_empty());
            for entry in &summary.entries {
                assert!(entry.weight > 0.0);
                assert!(entry.gene_count > 0);
            }
            for pair in summary.entries.windows(2) {
                assert!(pair[0].weight >= pair[1].weight);
            }
        }
    }

    #[test]
    fn test_weight_value() {
        // "AA" occurs 5 times in the before-start flank, 9 times in the
        // gene, over 1 interval: weight = 5 / (9 * 1).
        let sequence = "AAAAAAAAAA";
        let gene = GenomicInterval::new(0, 10).unwrap();
        let intervals = [GenomicInterval::new(6, 8).unwrap()];

        let summaries = extract_and_weigh(sequence, &intervals, gene, 2, 4);
        let entry = &summaries[0].entries[0];
        assert_eq!(entry.ntuple, "AA");
        assert_eq!(entry.region_count, 5);
        assert_eq!(entry.gene_count, 9);
        assert_eq!(entry.nucleotide_count, [2, 0, 0, 0]);
        assert!((entry.weight - 5.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_ntuple_rejected() {
        // The flank n-tuples never occur inside the narrow gene bounds.
        let sequence = "AAAATTTTAAAA";
        let gene = GenomicInterval::new(0, 4).unwrap();
        let intervals = [GenomicInterval::new(6, 8).unwrap()];

        let extractor = RegionExtractor::new(2, 0);
        let (tables, count) = aggregate_occurrences(&extractor, sequence, &intervals);
        let result = compute_region_summaries(&tables, sequence, &gene, count);
        assert!(matches!(
            result,
            Err(GrammarError::DegenerateNtuple { .. })
        ));
    }

    #[test]
    fn test_empty_training_set_rejected() {
        let tables: [OccurrenceTable; REGION_COUNT] = Default::default();
        let gene = GenomicInterval::new(0, 4).unwrap();
        let result = compute_region_summaries(&tables, "ACGT", &gene, 0);
        assert!(matches!(result, Err(GrammarError::EmptyTrainingSet)));
    }

    #[test]
    fn test_deterministic_across_runs() {
        let sequence = "ACGTACGTACGTACGTACGTACGT";
        let gene = GenomicInterval::new(0, 24).unwrap();
        let intervals = [
            GenomicInterval::new(8, 12).unwrap(),
            GenomicInterval::new(12, 20).unwrap(),
        ];

        let first = extract_and_weigh(sequence, &intervals, gene, 3, 3);
        let second = extract_and_weigh(sequence, &intervals, gene, 3, 3);
        assert_eq!(first, second);
    }
}
