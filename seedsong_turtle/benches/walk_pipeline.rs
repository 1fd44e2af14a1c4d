// Benchmarks for the expand + draw-walk pipeline.
//
// The draw walk is re-run from scratch every animation frame, so its
// throughput on deep expansions bounds the usable frame rate.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use seedsong_grammar::{RuleSet, expand};
use seedsong_turtle::{DrawParams, interpret_for_drawing};

fn bushy_rules() -> RuleSet {
    let mut rules = RuleSet::new();
    rules.insert('F', "F[+F]F[-F]");
    rules
}

fn bench_expand(c: &mut Criterion) {
    let rules = bushy_rules();
    c.bench_function("expand_depth_6", |b| {
        b.iter(|| expand(black_box("F"), black_box(&rules), 6));
    });
}

fn bench_draw_walk(c: &mut Criterion) {
    let rules = bushy_rules();
    let path = expand("F", &rules, 6);
    let params = DrawParams::default();
    c.bench_function("draw_walk_depth_6_growing", |b| {
        b.iter(|| interpret_for_drawing(black_box(&path), &params, 1_500.0, None));
    });
    c.bench_function("draw_walk_depth_6_settled", |b| {
        b.iter(|| interpret_for_drawing(black_box(&path), &params, f64::INFINITY, None));
    });
}

criterion_group!(benches, bench_expand, bench_draw_walk);
criterion_main!(benches);
