// ABOUTME: Criterion benchmarks for the technique scoring pipeline
// ABOUTME: Measures normalization, model scoring, and weakest-feature selection on motion tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the technique scoring pipeline.
//!
//! A five second clip at 30 fps is about 150 frames; longer clips and
//! multi-person runs push that into the thousands.

#![allow(clippy::missing_docs_in_private_items, clippy::expect_used, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use technique_intelligence::model::LinearModel;
use technique_intelligence::{
    normalize, score, weakest_features, FeatureWeights, MotionRecord, TechniqueAnalyzer,
};

/// Joint-angle columns in a typical Sports2D angles file
const COLUMNS: [&str; 20] = [
    "right ankle",
    "left ankle",
    "right knee",
    "left knee",
    "right hip",
    "left hip",
    "right shoulder",
    "left shoulder",
    "right elbow",
    "left elbow",
    "right foot",
    "left foot",
    "right shank",
    "left shank",
    "right thigh",
    "left thigh",
    "pelvis",
    "trunk",
    "shoulders",
    "head",
];

/// Deterministic angle table with `frames` rows
fn synthetic_record(frames: usize) -> MotionRecord {
    let columns = COLUMNS
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let values = (0..frames)
                .map(|frame| {
                    let phase = (frame * (col + 3)) as f64 / 17.0;
                    90.0 + 60.0 * phase.sin()
                })
                .collect();
            ((*name).to_owned(), values)
        })
        .collect();
    MotionRecord::from_columns(columns).expect("synthetic record is rectangular")
}

fn linear_model() -> LinearModel {
    LinearModel {
        feature_names: Some(COLUMNS.iter().map(|c| (*c).to_owned()).collect()),
        coefficients: (0..COLUMNS.len()).map(|i| 0.1 + i as f64 * 0.01).collect(),
        intercept: 1.5,
    }
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for frames in [150_usize, 1_500, 15_000] {
        let record = synthetic_record(frames);
        group.throughput(Throughput::Elements(frames as u64));
        group.bench_with_input(BenchmarkId::from_parameter(frames), &record, |b, record| {
            b.iter(|| normalize(black_box(record)));
        });
    }
    group.finish();
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let model = linear_model();
    for frames in [150_usize, 1_500] {
        let normalized = normalize(&synthetic_record(frames));
        group.throughput(Throughput::Elements(frames as u64));
        group.bench_with_input(
            BenchmarkId::new("linear", frames),
            &normalized,
            |b, normalized| {
                b.iter(|| score(black_box(normalized), &model));
            },
        );
    }
    group.finish();
}

fn bench_feedback(c: &mut Criterion) {
    let mut group = c.benchmark_group("feedback");
    let normalized = normalize(&synthetic_record(1_500));
    let weights = FeatureWeights::default();

    group.bench_function("weakest_three", |b| {
        b.iter(|| weakest_features(black_box(&normalized), &weights, 3));
    });

    let analyzer = TechniqueAnalyzer::default();
    let record = synthetic_record(1_500);
    let model = linear_model();
    group.bench_function("analyze_record_long_jump", |b| {
        b.iter(|| analyzer.analyze_record("person00", black_box(&record), "long-jump", &model));
    });
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_score, bench_feedback);
criterion_main!(benches);
