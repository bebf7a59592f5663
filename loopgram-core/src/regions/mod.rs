//! Boundary-flank region extraction.
//!
//! For every training interval, four ordered lists of overlapping n-tuples
//! are drawn from padded windows flanking the interval's start and end:
//! region 0 before the start, region 1 after the start, region 2 before the
//! end, region 3 after the end. Region ids are fixed and never reordered.
//!
//! ## Modules
//!
//! - [`weights`]: occurrence aggregation and weight calculation
//! - [`threshold`]: the cumulative-surprise significance gate

pub mod threshold;
pub mod weights;

pub use threshold::threshold_summaries;
pub use weights::{aggregate_occurrences, compute_region_summaries};

use crate::constants::REGION_COUNT;
use crate::types::GenomicInterval;

/// The four ordered window lists of one interval, indexed by region id.
pub type RegionWindows = [Vec<String>; REGION_COUNT];

/// Sliding-window extractor for the padded flanks of interval boundaries.
#[derive(Debug, Clone)]
pub struct RegionExtractor {
    window_width: usize,
    padding: usize,
}

impl RegionExtractor {
    /// Create an extractor for the given window width and padding.
    #[must_use]
    pub fn new(window_width: usize, padding: usize) -> Self {
        Self {
            window_width,
            padding,
        }
    }

    /// Extract the four region window lists for one interval.
    ///
    /// Flanks near the sequence ends are silently truncated; a flank
    /// shorter than the window width yields no windows.
    #[must_use]
    pub fn extract(&self, sequence: &str, interval: &GenomicInterval) -> RegionWindows {
        let (before_start, after_start) = self.divide_flanks(sequence, interval.start);
        let (before_end, after_end) = self.divide_flanks(sequence, interval.end);

        [before_start, after_start, before_end, after_end]
    }

    /// Slice the two padded flanks around a boundary and chop each into
    /// step-1 sliding windows.
    fn divide_flanks(&self, sequence: &str, boundary: usize) -> (Vec<String>, Vec<String>) {
        let flank = self.window_width + self.padding;
        let boundary = boundary.min(sequence.len());

        let before = &sequence[boundary.saturating_sub(flank)..boundary];
        let after = &sequence[boundary..(boundary + flank).min(sequence.len())];

        (
            sliding_windows(before, self.window_width),
            sliding_windows(after, self.window_width),
        )
    }
}

/// Every contiguous width-`w` substring of a segment, step 1.
///
/// A segment shorter than the width yields no windows; this is not an
/// error.
#[must_use]
pub fn sliding_windows(segment: &str, width: usize) -> Vec<String> {
    if segment.len() < width || width == 0 {
        return Vec::new();
    }
    segment
        .as_bytes()
        .windows(width)
        .map(|window| String::from_utf8_lossy(window).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sliding_windows_count() {
        // A segment of length L yields max(0, L - w + 1) windows.
        assert_eq!(sliding_windows("ACGTAC", 4).len(), 3);
        assert_eq!(sliding_windows("ACGT", 4).len(), 1);
        assert_eq!(sliding_windows("ACG", 4).len(), 0);
        assert_eq!(sliding_windows("", 4).len(), 0);
    }

    #[test]
    fn test_sliding_windows_overlap() {
        assert_eq!(sliding_windows("ACGTA", 4), vec!["ACGT", "CGTA"]);
    }

    #[test]
    fn test_extract_interior_interval() {
        // Flanks of length w + padding around both boundaries.
        let extractor = RegionExtractor::new(2, 2);
        let sequence = "ACGTACGTACGT";
        let interval = GenomicInterval::new(4, 8).unwrap();

        let regions = extractor.extract(sequence, &interval);
        assert_eq!(regions[0], vec!["AC", "CG", "GT"]);
        assert_eq!(regions[1], vec!["AC", "CG", "GT"]);
        assert_eq!(regions[2], vec!["AC", "CG", "GT"]);
        assert_eq!(regions[3], vec!["AC", "CG", "GT"]);
    }

    #[test]
    fn test_extract_truncates_at_sequence_ends() {
        let extractor = RegionExtractor::new(3, 5);
        let sequence = "ACGTACGTAC";

        // Start boundary at 2: before-flank truncates to "AC", too short.
        let regions = extractor.extract(sequence, &GenomicInterval::new(2, 9).unwrap());
        assert!(regions[0].is_empty());
        // After-start flank "GTACGTAC" has length 8 and yields 8 - 3 + 1 windows.
        assert_eq!(regions[1].len(), 6);
        // End boundary at 9: after-flank truncates to "C", too short.
        assert!(regions[3].is_empty());
    }

    #[test]
    fn test_extract_boundary_past_sequence_end() {
        let extractor = RegionExtractor::new(2, 0);
        let sequence = "ACGT";
        let regions = extractor.extract(sequence, &GenomicInterval::new(3, 10).unwrap());
        // End boundary clamps to the sequence end; no after-end windows.
        assert_eq!(regions[2], vec!["GT"]);
        assert!(regions[3].is_empty());
    }
}
