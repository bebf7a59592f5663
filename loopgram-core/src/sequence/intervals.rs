use std::fs::File;
use std::io::Write;
use std::path::Path;

use bio::io::bed;

use crate::types::{GenomicInterval, GrammarError};

/// Read genomic intervals from a BED file using rust-bio.
///
/// Only the chrom/start/end columns are consumed; any further columns are
/// ignored.
///
/// # Errors
///
/// Returns [`GrammarError::Io`] if the file cannot be opened,
/// [`GrammarError::Parse`] for malformed records and
/// [`GrammarError::InvalidInterval`] when a record has `start > end`.
pub fn read_intervals<P: AsRef<Path>>(path: P) -> Result<Vec<GenomicInterval>, GrammarError> {
    let file = File::open(path)?;
    let mut reader = bed::Reader::new(file);
    let mut intervals = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| GrammarError::Parse(e.to_string()))?;
        intervals.push(GenomicInterval::new(
            record.start() as usize,
            record.end() as usize,
        )?);
    }

    Ok(intervals)
}

/// Write intervals as a three-column BED file.
///
/// Used to materialise the (normalised) training set of a run so that a
/// later encoding run can be fed the exact same intervals.
pub fn write_intervals<W: Write>(
    writer: W,
    chrom: &str,
    intervals: &[GenomicInterval],
) -> Result<(), GrammarError> {
    let mut writer = bed::Writer::new(writer);
    for interval in intervals {
        let mut record = bed::Record::new();
        record.set_chrom(chrom);
        record.set_start(interval.start as u64);
        record.set_end(interval.end as u64);
        writer
            .write(&record)
            .map_err(|e| GrammarError::Parse(e.to_string()))?;
    }
    Ok(())
}

/// Snap an interval's length to the nearest multiple of `width` by moving
/// its start.
///
/// A remainder of more than half the window widens the interval to the next
/// multiple (start moves left); otherwise the interval shrinks to the
/// previous multiple (start moves right). A start too close to the sequence
/// origin to move left falls back to shrinking.
#[must_use]
pub fn snap_to_width(interval: GenomicInterval, width: usize) -> GenomicInterval {
    let remainder = interval.len() % width;
    if remainder == 0 {
        return interval;
    }

    let grow = width - remainder;
    if remainder > width / 2 && interval.start >= grow {
        GenomicInterval {
            start: interval.start - grow,
            end: interval.end,
        }
    } else {
        GenomicInterval {
            start: interval.start + remainder,
            end: interval.end,
        }
    }
}
