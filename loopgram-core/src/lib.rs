//! # Loopgram Core - R-loop Grammar Extraction
//!
//! A statistics-to-symbol pipeline that turns a reference nucleotide
//! sequence and a training set of labelled R-loop intervals into a small
//! symbolic alphabet characterising the short nucleotide windows flanking
//! each loop boundary. The resulting grammar words feed a downstream
//! probabilistic language model.
//!
//! ## Overview
//!
//! A training run walks the pipeline leaf to root:
//!
//! 1. **Region extraction**: four ordered lists of overlapping fixed-width
//!    n-tuples are drawn from padded windows flanking each interval's start
//!    and end
//! 2. **Occurrence aggregation**: per-region counts of every n-tuple across
//!    the whole training set
//! 3. **Weighting**: counts normalised by each n-tuple's baseline frequency
//!    inside the gene bounds and the training-set size
//! 4. **Entropy thresholding**: a cumulative-surprise rule keeps a
//!    statistically significant prefix of each weight-sorted region
//! 5. **Symbol resolution**: a layered tie-break procedure renders each
//!    frequent n-tuple as one or more symbols of a fixed Greek alphabet
//! 6. **Word assembly**: one symbol word per interval, walking the gene
//!    sequence through the loop and out the other side
//!
//! ## Quick Start
//!
//! ```rust
//! use loopgram_core::config::GrammarConfig;
//! use loopgram_core::engine::GrammarAnalyzer;
//! use loopgram_core::types::GenomicInterval;
//!
//! let analyzer = GrammarAnalyzer::new(GrammarConfig {
//!     window_width: 4,
//!     padding: 2,
//!     ..Default::default()
//! });
//!
//! let sequence = "ACGTAAAATTTTACGTACGTAAAA";
//! let gene = GenomicInterval::new(0, 24)?;
//! let intervals = vec![GenomicInterval::new(8, 16)?];
//!
//! let training = analyzer.train(sequence, &gene, &intervals)?;
//! let words = analyzer.encode_words(sequence, &gene, &intervals, &training.tables)?;
//!
//! println!("Encoded {} words", words.words.len());
//! # Ok::<(), loopgram_core::types::GrammarError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: run configuration (window width, padding, threads)
//! - [`engine`]: training and encoding orchestration
//! - [`types`]: core data types and the error enum
//! - [`results`]: training and encoding results
//! - [`sequence`]: sequence utilities plus FASTA/BED collaborators
//! - [`regions`]: flank extraction, weighting and thresholding
//! - [`grammar`]: the symbol alphabet, resolver and word assembly
//! - [`output`]: tabular and word report writers
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, GrammarError>`](types::GrammarError).
//! Configuration and degenerate-weight errors abort a run before or during
//! processing; unresolved n-tuples are per-position conditions collected
//! and reported in aggregate.

pub mod config;
pub mod constants;
pub mod engine;
pub mod grammar;
pub mod output;
pub mod regions;
pub mod results;
pub mod sequence;
pub mod types;

pub use engine::GrammarAnalyzer;
