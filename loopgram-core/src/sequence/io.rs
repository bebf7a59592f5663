use std::fs::File;

use bio::io::fasta;

use crate::types::GrammarError;

/// One FASTA record: id, optional description, uppercased sequence.
pub type FastaRecord = (String, Option<String>, String);

/// Read sequences from a FASTA file using rust-bio.
///
/// Sequences are uppercased so that n-tuple identity is case-insensitive.
///
/// # Errors
///
/// Returns [`GrammarError::Io`] if the file cannot be opened and
/// [`GrammarError::Parse`] for malformed records.
pub fn read_fasta_sequences(filename: &str) -> Result<Vec<FastaRecord>, GrammarError> {
    let file = File::open(filename)?;
    let reader = fasta::Reader::new(file);
    let mut sequences = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| GrammarError::Parse(e.to_string()))?;
        let id = record.id().to_string();
        let description = record.desc().map(String::from);
        let seq = String::from_utf8_lossy(record.seq()).to_ascii_uppercase();
        sequences.push((id, description, seq));
    }

    Ok(sequences)
}
