//! Performance benchmarks for chord recognition

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chordline::{analyze_features, ClipInfo, FeatureSequence, RecognitionConfig};

fn bench_analyze_features(c: &mut Criterion) {
    // Synthetic features: 120 seconds at ~10.8 frames/s (22.05 kHz, hop 2048),
    // cycling through C, G, Am, F every 4 seconds
    let hop = 2048.0 / 22050.0;
    let triads: [[usize; 3]; 4] = [[0, 4, 7], [7, 11, 2], [9, 0, 4], [5, 9, 0]];
    let n_frames = (120.0 / hop) as usize;
    let rows: Vec<[f32; 12]> = (0..n_frames)
        .map(|i| {
            let t = i as f32 * hop;
            let tones = triads[(t / 4.0) as usize % 4];
            let mut chroma = [0.05f32; 12];
            for tone in tones {
                chroma[tone] = 1.0;
            }
            chroma
        })
        .collect();
    let features = FeatureSequence::from_hop(rows, hop).unwrap();
    let clip = ClipInfo::new("bench", 120.0, None).unwrap();
    let config = RecognitionConfig::default();

    c.bench_function("analyze_features_120s", |b| {
        b.iter(|| {
            let _ = analyze_features(black_box(&features), black_box(&clip), black_box(&config));
        });
    });

    let dense = RecognitionConfig {
        frame_stride: 1,
        ..Default::default()
    };
    c.bench_function("analyze_features_120s_stride1", |b| {
        b.iter(|| {
            let _ = analyze_features(black_box(&features), black_box(&clip), black_box(&dense));
        });
    });
}

criterion_group!(benches, bench_analyze_features);
criterion_main!(benches);
