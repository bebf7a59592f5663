//! Report writers for training and encoding results.
//!
//! The persisted content contract is the pipeline's: weight tables carry
//! exactly the columns `Sequence`, `Region Count`, `#A`, `#T`, `#C`, `#G`,
//! `Gene Count`, `Weight`; word reports carry one `key: word` line per
//! interval. Resolver lookup tables are persisted as JSON via
//! [`WeightTables::save`](crate::grammar::WeightTables::save).

use std::io::Write;

use crate::results::WordResults;
use crate::types::{GrammarError, RegionSummary};

mod formats {
    pub mod tsv;
    pub mod words;
}

use formats::{tsv::write_tsv_format, words::write_words_format};

/// Write region summaries as tab-separated tables, one section per region.
///
/// # Errors
///
/// Returns [`GrammarError`] if writing fails.
pub fn write_region_summaries<W: Write>(
    writer: &mut W,
    summaries: &[RegionSummary],
) -> Result<(), GrammarError> {
    write_tsv_format(writer, summaries)
}

/// Write one `key: word` line per encoded interval.
///
/// # Errors
///
/// Returns [`GrammarError`] if writing fails.
pub fn write_words<W: Write>(
    writer: &mut W,
    results: &WordResults,
) -> Result<(), GrammarError> {
    write_words_format(writer, results)
}
