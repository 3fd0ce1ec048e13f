//! # Meowncil Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Voter identity hash | < 5µs |
//! | Name validation | < 1µs |
//! | Vote intake (in-memory store) | < 50µs per vote |
//! | Winner selection, 1k suggestions | < 100µs |

use chrono::{Duration as ChronoDuration, Utc};
use cm_02_naming_workflow::{derive_voter_identity, select_winner, NamingWorkflowApi, SuggestedName};
use cm_tests::fixtures::Stack;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::{CatId, NameSuggestion};

fn bench_voter_identity(c: &mut Criterion) {
    let mut group = c.benchmark_group("cm-02-identity");
    let forwarded = ["203.0.113.195".to_string(), "10.0.0.1".to_string()];
    group.bench_function("derive_voter_identity", |b| {
        b.iter(|| black_box(derive_voter_identity(black_box(&forwarded[..]))))
    });
    group.bench_function("derive_voter_identity_fallback", |b| {
        let empty: [&str; 3] = ["", " ", ""];
        b.iter(|| black_box(derive_voter_identity(black_box(&empty[..]))))
    });
    group.finish();
}

fn bench_name_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cm-02-names");
    for raw in ["Luna", "  Sir Pounce-a-Lot  ", "Mr. Whiskers!"] {
        group.bench_with_input(BenchmarkId::new("parse", raw.trim()), raw, |b, raw| {
            b.iter(|| black_box(SuggestedName::parse(black_box(raw))).is_ok())
        });
    }
    group.finish();
}

fn bench_vote_intake(c: &mut Criterion) {
    let mut group = c.benchmark_group("cm-02-votes");
    for batch in [100usize, 1_000] {
        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::new("submit_vote", batch), &batch, |b, &batch| {
            b.iter_with_setup(
                || {
                    let stack = Stack::in_memory();
                    let (_, suggestions) = stack.cat_in_voting("Bench", &["Alpha", "Beta"]);
                    (stack, suggestions)
                },
                |(stack, suggestions)| {
                    for i in 0..batch {
                        let origin = [format!("10.{}.{}.{}", i >> 16, (i >> 8) & 0xff, i & 0xff)];
                        stack
                            .naming
                            .submit_vote(suggestions[i % 2].id, &origin)
                            .unwrap();
                    }
                },
            )
        });
    }
    group.finish();
}

fn bench_winner_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("cm-02-winner");
    let cat_id = CatId::new();
    let start = Utc::now();
    let suggestions: Vec<NameSuggestion> = (0..1_000u32)
        .map(|i| {
            let mut s = NameSuggestion::new(
                cat_id,
                format!("Name {}", i),
                start + ChronoDuration::milliseconds(i as i64),
            );
            s.vote_count = u64::from(i % 97);
            s
        })
        .collect();
    group.bench_function("select_winner_1k", |b| {
        b.iter(|| black_box(select_winner(black_box(&suggestions)).is_ok()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_voter_identity,
    bench_name_validation,
    bench_vote_intake,
    bench_winner_selection
);
criterion_main!(benches);
