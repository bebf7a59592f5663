//! Pipeline orchestration: training and word encoding.
//!
//! Training runs the statistics side of the pipeline: width-normalise the
//! intervals, extract and aggregate boundary-flank windows, weigh them
//! against the gene baseline, gate each region with the entropy rule and
//! build the resolver lookup tables. Encoding runs the symbol side: split
//! each interval into parsing blocks, resolve every sub-block and assemble
//! one word per interval.
//!
//! Both runs are deterministic for identical inputs; interval-level
//! extraction is the only parallel stage and its merge is order-free.

use log::info;

use crate::config::GrammarConfig;
use crate::grammar::{
    BlockCounts, ParsingBlocks, SymbolResolver, WeightTables, WordAssembler,
};
use crate::regions::{
    aggregate_occurrences, compute_region_summaries, threshold_summaries, RegionExtractor,
};
use crate::results::{TrainingResults, WordResults};
use crate::sequence::snap_to_width;
use crate::types::{GenomicInterval, GrammarError};

/// Grammar training and encoding engine for one parameter combination.
///
/// # Examples
///
/// ```rust
/// use loopgram_core::config::GrammarConfig;
/// use loopgram_core::engine::GrammarAnalyzer;
/// use loopgram_core::types::GenomicInterval;
///
/// let config = GrammarConfig {
///     window_width: 4,
///     padding: 2,
///     ..Default::default()
/// };
/// let analyzer = GrammarAnalyzer::new(config);
///
/// let sequence = "ACGTAAAATTTTACGTACGTAAAA";
/// let gene = GenomicInterval::new(0, 24)?;
/// let intervals = vec![GenomicInterval::new(8, 16)?];
///
/// let training = analyzer.train(sequence, &gene, &intervals)?;
/// let words = analyzer.encode_words(sequence, &gene, &intervals, &training.tables)?;
/// assert_eq!(words.words.len(), 1);
/// # Ok::<(), loopgram_core::types::GrammarError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GrammarAnalyzer {
    /// Run configuration.
    pub config: GrammarConfig,
}

impl GrammarAnalyzer {
    /// Create an analyzer with the given configuration.
    #[must_use]
    pub fn new(config: GrammarConfig) -> Self {
        Self { config }
    }

    /// Train weight tables from a sequence and a labelled training set.
    ///
    /// # Errors
    ///
    /// Configuration errors (zero width, malformed intervals or gene
    /// bounds, empty training set) and the degenerate-ntuple condition are
    /// fatal and abort the run.
    pub fn train(
        &self,
        sequence: &str,
        gene: &GenomicInterval,
        intervals: &[GenomicInterval],
    ) -> Result<TrainingResults, GrammarError> {
        self.config.validate()?;
        validate_gene_bounds(sequence, gene)?;
        if intervals.is_empty() {
            return Err(GrammarError::EmptyTrainingSet);
        }

        let intervals = self.normalise(intervals);
        info!(
            "training on {} intervals (w={}, padding={})",
            intervals.len(),
            self.config.window_width,
            self.config.padding
        );

        let extractor = RegionExtractor::new(self.config.window_width, self.config.padding);
        let (tables, rloop_count) = self.run_in_pool(|| {
            aggregate_occurrences(&extractor, sequence, &intervals)
        })?;

        let region_summaries =
            compute_region_summaries(&tables, sequence, gene, rloop_count)?;
        let thresholded_summaries = threshold_summaries(&region_summaries);
        info!(
            "thresholding kept {} of {} entries",
            thresholded_summaries
                .iter()
                .map(|s| s.entries.len())
                .sum::<usize>(),
            region_summaries
                .iter()
                .map(|s| s.entries.len())
                .sum::<usize>()
        );

        let tables = WeightTables::from_summaries(&thresholded_summaries);

        Ok(TrainingResults {
            region_summaries,
            thresholded_summaries,
            tables,
            intervals,
            rloop_count,
        })
    }

    /// Encode one word per interval using the given lookup tables.
    ///
    /// The tables usually come from a [`train`](Self::train) run or from a
    /// persisted model of a prior run.
    ///
    /// # Errors
    ///
    /// Configuration errors are fatal; unresolved sub-blocks are not, and
    /// are reported in aggregate on the result.
    pub fn encode_words(
        &self,
        sequence: &str,
        gene: &GenomicInterval,
        intervals: &[GenomicInterval],
        tables: &WeightTables,
    ) -> Result<WordResults, GrammarError> {
        self.config.validate()?;
        validate_gene_bounds(sequence, gene)?;
        if intervals.is_empty() {
            return Err(GrammarError::EmptyTrainingSet);
        }

        let width = self.config.window_width;
        let intervals = self.normalise(intervals);
        let gene_sequence = &sequence[gene.start..gene.end];

        let blocks = intervals
            .iter()
            .map(|interval| ParsingBlocks::split(gene_sequence, gene, interval, width))
            .collect::<Result<Vec<_>, _>>()?;
        let counts = BlockCounts::from_blocks(&blocks);

        let resolver = SymbolResolver::new(tables, &counts);
        let assembler = WordAssembler::new(resolver, width);

        let words: Vec<_> = intervals
            .iter()
            .zip(&blocks)
            .enumerate()
            .map(|(index, (interval, parsed))| {
                assembler.assemble(format!("{}_{}", interval, index + 1), parsed)
            })
            .collect();

        let unresolved_positions = words.iter().map(|word| word.unresolved).sum();
        if unresolved_positions > 0 {
            info!("{unresolved_positions} sub-block positions resolved to no symbol");
        }

        Ok(WordResults {
            words,
            unresolved_positions,
        })
    }

    /// Snap every interval's length to a multiple of the window width.
    fn normalise(&self, intervals: &[GenomicInterval]) -> Vec<GenomicInterval> {
        intervals
            .iter()
            .map(|interval| snap_to_width(*interval, self.config.window_width))
            .collect()
    }

    /// Run a closure in a dedicated Rayon pool when a thread count is
    /// configured, otherwise in the global pool.
    fn run_in_pool<T: Send>(
        &self,
        task: impl FnOnce() -> T + Send,
    ) -> Result<T, GrammarError> {
        match self.config.num_threads {
            None => Ok(task()),
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| GrammarError::ThreadPool(e.to_string()))?;
                Ok(pool.install(task))
            }
        }
    }
}

fn validate_gene_bounds(
    sequence: &str,
    gene: &GenomicInterval,
) -> Result<(), GrammarError> {
    if gene.start >= gene.end || gene.end > sequence.len() {
        return Err(GrammarError::InvalidGeneBounds {
            start: gene.start,
            end: gene.end,
            sequence_length: sequence.len(),
        });
    }
    Ok(())
}
