//! Cumulative-surprise significance gate over weight-sorted summaries.
//!
//! Candidates are admitted while the Shannon information content per
//! candidate is non-decreasing; the first decrease ends the region's pass.
//! This selects a statistically significant prefix instead of a fixed
//! top-K, so regions with sharply peaked weight distributions keep few
//! entries while flat distributions keep them all.

use log::warn;

use crate::types::RegionSummary;

/// Retain the prefix of each region summary selected by the entropy rule.
///
/// Each result summary holds a contiguous leading segment of its input's
/// entries, in unchanged order; the first entry of a non-empty summary is
/// always retained. A possibly-empty result is legitimate.
#[must_use]
pub fn threshold_summaries(summaries: &[RegionSummary]) -> Vec<RegionSummary> {
    summaries
        .iter()
        .map(|summary| RegionSummary {
            region: summary.region,
            entries: threshold_entries(summary),
        })
        .collect()
}

fn threshold_entries(summary: &RegionSummary) -> Vec<crate::types::WeightEntry> {
    let mut kept = Vec::new();

    let mut count = 1usize;
    let mut cumulative_surprise = 0f64;
    let mut max_weight = 0f64;
    let mut prev_entropy = f64::NEG_INFINITY;

    for entry in &summary.entries {
        if count == 1 || max_weight == 0.0 {
            max_weight = entry.weight;
        }
        if max_weight == 0.0 {
            // Zero weights cannot be normalised; skip the entropy pass.
            warn!(
                "region {}: zero maximum weight, skipping entropy pass",
                summary.region
            );
            break;
        }

        let p = entry.weight / max_weight;
        let surprise = -p * p.log10();
        cumulative_surprise += surprise;
        let entropy = cumulative_surprise / count as f64;

        if entropy >= prev_entropy {
            kept.push(entry.clone());
            prev_entropy = entropy;
            count += 1;
        } else {
            break;
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::nucleotide_counts;
    use crate::types::WeightEntry;

    fn summary_with_weights(weights: &[f64]) -> RegionSummary {
        let entries = weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| WeightEntry {
                ntuple: format!("N{i}"),
                region_count: 1,
                nucleotide_count: nucleotide_counts(""),
                gene_count: 1,
                weight,
            })
            .collect();
        RegionSummary { region: 0, entries }
    }

    fn kept_weights(summary: &RegionSummary) -> Vec<f64> {
        threshold_summaries(std::slice::from_ref(summary))[0]
            .entries
            .iter()
            .map(|e| e.weight)
            .collect()
    }

    #[test]
    fn test_first_entry_always_kept() {
        let summary = summary_with_weights(&[0.9]);
        assert_eq!(kept_weights(&summary), vec![0.9]);
    }

    #[test]
    fn test_equal_weights_keep_everything() {
        // Constant p keeps entropy constant, which never decreases.
        let summary = summary_with_weights(&[5.0, 5.0, 5.0]);
        assert_eq!(kept_weights(&summary), vec![5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_stops_at_first_entropy_decrease() {
        // The tiny tail weight carries almost no information, dropping the
        // per-candidate average below its previous value.
        let summary = summary_with_weights(&[1.0, 0.4, 0.001, 0.001]);
        assert_eq!(kept_weights(&summary), vec![1.0, 0.4]);
    }

    #[test]
    fn test_prefix_property() {
        let summary = summary_with_weights(&[0.8, 0.4, 0.3, 0.2, 0.1, 0.05]);
        let thresholded = threshold_summaries(std::slice::from_ref(&summary));
        let kept = &thresholded[0].entries;
        assert!(!kept.is_empty());
        assert_eq!(kept.as_slice(), &summary.entries[..kept.len()]);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summary_with_weights(&[]);
        assert!(kept_weights(&summary).is_empty());
    }

    #[test]
    fn test_region_ids_preserved() {
        let summaries = vec![
            RegionSummary {
                region: 0,
                entries: vec![],
            },
            RegionSummary {
                region: 1,
                entries: vec![],
            },
        ];
        let thresholded = threshold_summaries(&summaries);
        assert_eq!(thresholded[0].region, 0);
        assert_eq!(thresholded[1].region, 1);
    }
}
