//! # Loopgram CLI - R-loop Grammar Tool
//!
//! A command-line interface for training R-loop grammar weight tables and
//! encoding intervals into grammar words.
//!
//! ## Usage
//!
//! ```bash
//! # Train weight tables from a plasmid and its R-loop intervals
//! loopgram train -i pFC53.fa -b pFC53.bed -s 80 -e 1829 -o pFC53_p13_w4
//!
//! # Train on a random sample of 10 intervals
//! loopgram train -i pFC53.fa -b pFC53.bed -s 80 -e 1829 -n 10 --seed 7 -o run0
//!
//! # Encode words using a previously trained model
//! loopgram encode -i pFC53.fa -b pFC53.bed -m run0_model.json \
//!     -s 80 -e 1829 -o run0_words.txt
//! ```
//!
//! ## Outputs
//!
//! A `train` run writes four files under the output prefix:
//!
//! - `<prefix>_weight.tsv`: the four region weight tables
//! - `<prefix>_weight_shannon.tsv`: their entropy-thresholded prefixes
//! - `<prefix>_model.json`: the resolver lookup tables
//! - `<prefix>_training-set.bed`: the width-normalised training intervals
//!
//! An `encode` run writes one `key: word` line per interval.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use clap::{Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use simplelog::{Config, SimpleLogger};

use loopgram_core::config::GrammarConfig;
use loopgram_core::constants::{DEFAULT_PADDING, DEFAULT_WINDOW_WIDTH};
use loopgram_core::engine::GrammarAnalyzer;
use loopgram_core::grammar::WeightTables;
use loopgram_core::output::{write_region_summaries, write_words};
use loopgram_core::sequence::{read_fasta_sequences, read_intervals, write_intervals};
use loopgram_core::types::{GenomicInterval, GrammarError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("loopgram")
        .version(env!("CARGO_PKG_VERSION"))
        .about("R-loop grammar training and word encoding")
        .subcommand_required(true)
        .subcommand(train_command())
        .subcommand(encode_command())
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_matches)) => run_train(sub_matches),
        Some(("encode", sub_matches)) => run_encode(sub_matches),
        _ => unreachable!("subcommand is required"),
    }
}

fn common_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FASTA_FILE")
                .required(true)
                .help("Input FASTA file"),
        )
        .arg(
            Arg::new("bed")
                .short('b')
                .long("bed")
                .value_name("BED_FILE")
                .required(true)
                .help("BED file with R-loop intervals"),
        )
        .arg(
            Arg::new("start-index")
                .short('s')
                .long("start-index")
                .value_name("START")
                .required(true)
                .help("Start index of the gene region"),
        )
        .arg(
            Arg::new("end-index")
                .short('e')
                .long("end-index")
                .value_name("END")
                .required(true)
                .help("End index of the gene region"),
        )
        .arg(
            Arg::new("window-length")
                .short('w')
                .long("window-length")
                .value_name("WIDTH")
                .help("Number of nucleotides in a single window"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Quiet mode"),
        )
}

fn train_command() -> Command {
    common_args(Command::new("train").about("Train weight tables from a training set"))
        .arg(
            Arg::new("padding")
                .short('p')
                .long("padding")
                .value_name("PADDING")
                .help("Padding added to each boundary flank"),
        )
        .arg(
            Arg::new("sample")
                .short('n')
                .long("sample")
                .value_name("NUM_RLOOPS")
                .help("Train on only NUM_RLOOPS randomly sampled intervals"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Random seed for interval sampling"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PREFIX")
                .default_value("output")
                .help("Output file prefix"),
        )
}

fn encode_command() -> Command {
    common_args(Command::new("encode").about("Encode intervals into grammar words"))
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL_FILE")
                .required(true)
                .help("Weight-table model from a prior train run"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .default_value("words.txt")
                .help("Output words file"),
        )
}

fn init_logging(quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    SimpleLogger::init(level, Config::default())?;
    Ok(())
}

fn parse_number<T: std::str::FromStr>(
    matches: &ArgMatches,
    name: &str,
    default: T,
) -> Result<T, Box<dyn std::error::Error>> {
    match matches.get_one::<String>(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| format!("invalid value for --{name}: {value}").into()),
    }
}

/// Read the gene sequence and interval list shared by both subcommands.
fn load_inputs(
    matches: &ArgMatches,
) -> Result<(String, GenomicInterval, Vec<GenomicInterval>), Box<dyn std::error::Error>> {
    let fasta_file = matches.get_one::<String>("input").unwrap();
    let bed_file = matches.get_one::<String>("bed").unwrap();
    let gene_start: usize = parse_number(matches, "start-index", 0)?;
    let gene_end: usize = parse_number(matches, "end-index", 0)?;

    let sequences = read_fasta_sequences(fasta_file)?;
    let (_, _, sequence) = sequences
        .into_iter()
        .next()
        .ok_or_else(|| GrammarError::Parse(format!("no sequences in {fasta_file}")))?;

    let gene = GenomicInterval::new(gene_start, gene_end)?;
    let intervals = read_intervals(bed_file)?;

    Ok((sequence, gene, intervals))
}

fn run_train(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let quiet = matches.get_flag("quiet");
    init_logging(quiet)?;

    let config = GrammarConfig {
        window_width: parse_number(matches, "window-length", DEFAULT_WINDOW_WIDTH)?,
        padding: parse_number(matches, "padding", DEFAULT_PADDING)?,
        ..Default::default()
    };
    let prefix = matches.get_one::<String>("output").unwrap();

    let (sequence, gene, mut intervals) = load_inputs(matches)?;

    if let Some(sample) = matches.get_one::<String>("sample") {
        let sample: usize = sample
            .parse()
            .map_err(|_| format!("invalid value for --sample: {sample}"))?;
        let seed: u64 = parse_number(matches, "seed", 0)?;
        let mut rng = StdRng::seed_from_u64(seed);
        intervals = intervals
            .choose_multiple(&mut rng, sample.min(intervals.len()))
            .copied()
            .collect();
    }

    let analyzer = GrammarAnalyzer::new(config);
    let results = analyzer.train(&sequence, &gene, &intervals)?;

    let mut weight_out = BufWriter::new(File::create(format!("{prefix}_weight.tsv"))?);
    write_region_summaries(&mut weight_out, &results.region_summaries)?;

    let mut shannon_out =
        BufWriter::new(File::create(format!("{prefix}_weight_shannon.tsv"))?);
    write_region_summaries(&mut shannon_out, &results.thresholded_summaries)?;

    let model_out = BufWriter::new(File::create(format!("{prefix}_model.json"))?);
    results.tables.save(model_out)?;

    let training_set_out =
        BufWriter::new(File::create(format!("{prefix}_training-set.bed"))?);
    write_intervals(training_set_out, "gene", &results.intervals)?;

    if !quiet {
        eprintln!(
            "Training complete! {} intervals, {} thresholded n-tuples.",
            results.rloop_count,
            results
                .thresholded_summaries
                .iter()
                .map(|s| s.entries.len())
                .sum::<usize>()
        );
    }

    Ok(())
}

fn run_encode(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let quiet = matches.get_flag("quiet");
    init_logging(quiet)?;

    let config = GrammarConfig {
        window_width: parse_number(matches, "window-length", DEFAULT_WINDOW_WIDTH)?,
        ..Default::default()
    };
    let model_file = matches.get_one::<String>("model").unwrap();
    let output_file = matches.get_one::<String>("output").unwrap();

    let (sequence, gene, intervals) = load_inputs(matches)?;
    let tables = WeightTables::load(BufReader::new(File::open(model_file)?))?;

    let analyzer = GrammarAnalyzer::new(config);
    let results = analyzer.encode_words(&sequence, &gene, &intervals, &tables)?;

    let mut words_out = BufWriter::new(File::create(output_file)?);
    write_words(&mut words_out, &results)?;

    if !quiet {
        eprintln!(
            "Encoding complete! {} words, {} unresolved positions.",
            results.words.len(),
            results.unresolved_positions
        );
    }

    Ok(())
}
