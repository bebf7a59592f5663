use std::io::Write;

use crate::results::WordResults;
use crate::types::GrammarError;

/// Write one `key: word` line per interval, in input order.
pub fn write_words_format<W: Write>(
    writer: &mut W,
    results: &WordResults,
) -> Result<(), GrammarError> {
    for word in &results.words {
        writeln!(writer, "{}: {}", word.key, word.word)?;
    }
    Ok(())
}
