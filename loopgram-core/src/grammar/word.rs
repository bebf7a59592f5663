//! Word assembly over one training interval.
//!
//! A word walks the gene sequence the way the encoded process runs: the
//! leading sub-blocks left to right, then the loop interior and the
//! trailing block in reverse sub-block order, all resolved to grammar
//! symbols and concatenated without separators. The single
//! boundary-adjacent position of each outer segment carries a numeric
//! distance-to-boundary marker instead of a plain resolved symbol.

use crate::grammar::{GrammarSymbol, ParsingBlocks, SegmentContext, SymbolResolver};

/// One interval's encoded word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedWord {
    /// `start_end_index` identifier of the (normalised) interval.
    pub key: String,
    /// The concatenated symbol string.
    pub word: String,
    /// Number of sub-blocks that resolved to no symbol at all.
    pub unresolved: usize,
}

/// Assembles words by running a resolver over parsing blocks.
#[derive(Debug, Clone, Copy)]
pub struct WordAssembler<'a> {
    resolver: SymbolResolver<'a>,
    width: usize,
}

impl<'a> WordAssembler<'a> {
    /// Create an assembler for the given resolver and sub-block width.
    #[must_use]
    pub fn new(resolver: SymbolResolver<'a>, width: usize) -> Self {
        Self { resolver, width }
    }

    /// Encode one interval's parsing blocks into a word.
    #[must_use]
    pub fn assemble(&self, key: String, blocks: &ParsingBlocks) -> EncodedWord {
        let mut unresolved = 0usize;

        let mut leading = self.render_segment(
            &blocks.before,
            SegmentContext::Leading,
            &mut unresolved,
        );
        // The sub-block touching the loop start carries the omega marker:
        // its own length for a partial sub-block, a zero suffix after the
        // resolved symbol for a full-width one.
        if let (Some(symbol), Some(block)) = (leading.last_mut(), blocks.before.last()) {
            *symbol = if block.len() < self.width {
                format!("{}{}", GrammarSymbol::Omega, block.len())
            } else {
                format!("{}{}0", symbol, GrammarSymbol::Omega)
            };
        }

        let interior = self.render_segment(
            &blocks.inside_reversed,
            SegmentContext::Interior,
            &mut unresolved,
        );

        let mut trailing = self.render_segment(
            &blocks.after_reversed,
            SegmentContext::Trailing,
            &mut unresolved,
        );
        // The sub-block touching the loop end carries the alpha marker,
        // prefixed since the trailing segment is emitted reversed.
        if let (Some(symbol), Some(block)) = (trailing.last_mut(), blocks.after_reversed.last()) {
            *symbol = if block.len() < self.width {
                format!("{}{}", GrammarSymbol::Alpha, block.len())
            } else {
                format!("{}0{}", GrammarSymbol::Alpha, symbol)
            };
        }

        let word: String = leading
            .into_iter()
            .chain(interior.into_iter().rev())
            .chain(trailing.into_iter().rev())
            .collect();

        EncodedWord {
            key,
            word,
            unresolved,
        }
    }

    fn render_segment(
        &self,
        sub_blocks: &[String],
        context: SegmentContext,
        unresolved: &mut usize,
    ) -> Vec<String> {
        sub_blocks
            .iter()
            .map(|sub_block| {
                let resolution = self.resolver.resolve(sub_block, context);
                if resolution.is_unknown() {
                    *unresolved += 1;
                }
                resolution.render()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{BlockCounts, WeightTables};
    use crate::types::GenomicInterval;

    fn assemble(
        sequence: &str,
        start: usize,
        end: usize,
        width: usize,
        tables: &WeightTables,
    ) -> EncodedWord {
        let gene = GenomicInterval::new(0, sequence.len()).unwrap();
        let interval = GenomicInterval::new(start, end).unwrap();
        let blocks =
            vec![ParsingBlocks::split(sequence, &gene, &interval, width).unwrap()];
        let counts = BlockCounts::from_blocks(&blocks);
        let resolver = SymbolResolver::new(tables, &counts);
        WordAssembler::new(resolver, width)
            .assemble(format!("{interval}_1"), &blocks[0])
    }

    #[test]
    fn test_word_with_full_width_markers() {
        let tables = WeightTables::default();
        let word = assemble("ACGTAAAATTTTACGT", 4, 12, 4, &tables);

        // Leading "ACGT" resolves to beta and keeps its symbol with a zero
        // omega marker; the trailing counterpart gets the alpha prefix.
        assert_eq!(word.key, "4_12_1");
        assert_eq!(word.word, "βω0ρρα0β");
        assert_eq!(word.unresolved, 0);
    }

    #[test]
    fn test_word_with_partial_markers() {
        let tables = WeightTables::default();
        let word = assemble("ACGTAAAATTTTACGT", 6, 10, 4, &tables);

        // Both outer segments end in a 2-wide partial sub-block, so the
        // markers carry that length and replace the resolved symbol.
        assert_eq!(word.word, "βω2ρα2β");
        assert_eq!(word.unresolved, 0);
    }

    #[test]
    fn test_word_reverses_interior_symbols() {
        let mut tables = WeightTables::default();
        // Pin distinct symbols onto the two interior sub-blocks.
        tables.regions[0].insert("TTTT".to_string(), 0.9); // W1 -> tau
        tables.regions[2].insert("AAAA".to_string(), 0.9); // W3 -> tau-with-macron
        let word = assemble("ACGTAAAATTTTACGT", 4, 12, 4, &tables);

        // Interior resolved end-to-start as [tau, tau-with-macron], then
        // emitted reversed: the loop reads tau-with-macron first.
        assert_eq!(word.word, "βω0τ̄τα0β");
    }

    #[test]
    fn test_word_empty_leading_segment() {
        let tables = WeightTables::default();
        let word = assemble("AAAATTTTACGT", 0, 8, 4, &tables);

        // No leading sub-blocks: no omega marker at all.
        assert!(!word.word.contains('ω'));
        assert!(word.word.contains('α'));
    }

    #[test]
    fn test_word_deterministic() {
        let tables = WeightTables::default();
        let first = assemble("ACGTAAAATTTTACGT", 4, 12, 4, &tables);
        let second = assemble("ACGTAAAATTTTACGT", 4, 12, 4, &tables);
        assert_eq!(first, second);
    }
}
