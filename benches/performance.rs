// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for DRILLSEQ
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Page naming over long shows
//! - Change-set computation for inserts and deletes
//! - Alignment of page counts onto measures

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use drillseq::pages::naming::assign_names;
use drillseq::{
    align_with_measures, create_pages, delete_page, diff, renumber, BeatUnit, Measure,
    NewPageArgs, Page, PageId, TimeSignature,
};

/// A show where every fourth page starts a new primary
fn build_pages(size: usize) -> Vec<Page> {
    let flags = (0..size).map(|i| i % 4 != 0);
    assign_names(flags)
        .into_iter()
        .enumerate()
        .map(|(i, name)| Page::new(PageId(i as u64 + 1), i as i64, name, 8))
        .collect()
}

/// Enough 4/4 and 3/4 measures to hold `beats` counts
fn build_measures(beats: u32) -> Vec<Measure> {
    let common = TimeSignature::COMMON;
    let waltz: TimeSignature = "3/4".parse().unwrap_or(common);
    let mut measures = Vec::new();
    let mut total = 0;
    let mut number = 1;
    while total < beats {
        let ts = if number % 3 == 0 { waltz } else { common };
        let tempo = if number % 16 < 8 { 120.0 } else { 144.0 };
        let measure = Measure::new(number, ts, tempo, BeatUnit::Quarter).unwrap();
        total += measure.beats();
        measures.push(measure);
        number += 1;
    }
    measures
}

/// Benchmark naming a run of subset flags
fn bench_naming(c: &mut Criterion) {
    let mut group = c.benchmark_group("naming");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::new("assign_names", size), size, |b, &size| {
            b.iter(|| {
                let flags = (0..size).map(|i| i % 27 != 0);
                black_box(assign_names(flags))
            })
        });
    }

    group.finish();
}

/// Benchmark renumbering and diffing (the repair path)
fn bench_renumber(c: &mut Criterion) {
    let mut group = c.benchmark_group("renumber");

    for size in [100, 1000, 10000].iter() {
        let mut pages = build_pages(*size);
        // Scramble names so the diff has work to do
        pages.swap(0, size / 2);

        group.bench_with_input(BenchmarkId::new("renumber", size), &pages, |b, pages| {
            b.iter(|| black_box(renumber(black_box(pages))))
        });

        group.bench_with_input(BenchmarkId::new("diff", size), &pages, |b, pages| {
            let fixed = renumber(pages);
            b.iter(|| black_box(diff(black_box(pages), &fixed)))
        });
    }

    group.finish();
}

/// Benchmark change sets for inserts and deletes
fn bench_change_sets(c: &mut Criterion) {
    let mut group = c.benchmark_group("change_sets");

    for size in [100, 1000, 10000].iter() {
        let pages = build_pages(*size);
        let middle = PageId(*size as u64 / 2);

        group.bench_with_input(BenchmarkId::new("create_one", size), &pages, |b, pages| {
            let requests = [NewPageArgs::primary(8).after(middle)];
            b.iter(|| black_box(create_pages(&requests, pages)))
        });

        group.bench_with_input(BenchmarkId::new("create_batch", size), &pages, |b, pages| {
            b.iter_batched(
                || {
                    (0..32)
                        .map(|i| {
                            let target = PageId((i * 7 % pages.len()) as u64 + 1);
                            NewPageArgs::subset(4).after(target)
                        })
                        .collect::<Vec<_>>()
                },
                |requests| black_box(create_pages(&requests, pages)),
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("delete", size), &pages, |b, pages| {
            b.iter(|| black_box(delete_page(middle, pages)))
        });
    }

    group.finish();
}

/// Benchmark walking page counts across measures
fn bench_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("alignment");

    for size in [100, 1000, 10000].iter() {
        let pages = build_pages(*size);
        let beats: u32 = pages.iter().map(|p| p.counts()).sum();
        let measures = build_measures(beats + 4);

        group.bench_with_input(
            BenchmarkId::new("align_with_measures", size),
            &(pages, measures),
            |b, (pages, measures)| b.iter(|| black_box(align_with_measures(pages, measures))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_naming,
    bench_renumber,
    bench_change_sets,
    bench_alignment,
);

criterion_main!(benches);
