use criterion::{criterion_group, criterion_main, Criterion};

use loopgram_core::config::GrammarConfig;
use loopgram_core::engine::GrammarAnalyzer;
use loopgram_core::types::GenomicInterval;

/// A deterministic pseudo-random plasmid-like sequence.
fn synthetic_sequence(length: usize) -> String {
    let mut state = 0x9e3779b97f4a7c15u64;
    (0..length)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            match (state >> 33) % 4 {
                0 => 'A',
                1 => 'C',
                2 => 'G',
                _ => 'T',
            }
        })
        .collect()
}

fn training_set(gene: &GenomicInterval, count: usize, width: usize) -> Vec<GenomicInterval> {
    (0..count)
        .map(|i| {
            let start = gene.start + 40 + i * 17;
            GenomicInterval::new(start, start + 8 * width).unwrap()
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let sequence = synthetic_sequence(2000);
    let gene = GenomicInterval::new(80, 1900).unwrap();
    let intervals = training_set(&gene, 20, 4);
    let analyzer = GrammarAnalyzer::new(GrammarConfig {
        window_width: 4,
        padding: 13,
        ..Default::default()
    });

    c.bench_function("train_20_intervals", |b| {
        b.iter(|| analyzer.train(&sequence, &gene, &intervals).unwrap())
    });

    let training = analyzer.train(&sequence, &gene, &intervals).unwrap();
    c.bench_function("encode_20_intervals", |b| {
        b.iter(|| {
            analyzer
                .encode_words(&sequence, &gene, &intervals, &training.tables)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
