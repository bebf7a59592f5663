use std::io::Write;

use crate::constants::TABLE_HEADING;
use crate::types::{GrammarError, RegionSummary};

/// Write summaries as tab-separated sections, one per region, each with the
/// canonical column heading row.
pub fn write_tsv_format<W: Write>(
    writer: &mut W,
    summaries: &[RegionSummary],
) -> Result<(), GrammarError> {
    for summary in summaries {
        writeln!(writer, "# Region {}", summary.region + 1)?;
        writeln!(writer, "{}", TABLE_HEADING.join("\t"))?;

        for entry in &summary.entries {
            let [a, t, c, g] = entry.nucleotide_count;
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                entry.ntuple,
                entry.region_count,
                a,
                t,
                c,
                g,
                entry.gene_count,
                entry.weight
            )?;
        }
    }
    Ok(())
}
