//! Benchmarks for chatheat loading, aggregation and rendering.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench pipeline -- aggregate`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatheat::chart::{ChartKind, build_figures};
use chatheat::config::CategoryOrder;
use chatheat::core::{FeatureTable, aggregate, aggregate_all};
use chatheat::parser::Parser;
use chatheat::parsers::SkypeParser;
use chatheat::report::render_html;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Two group conversations and one personal one, messages spread over
/// five years at a prime-ish stride so every hour and weekday is hit.
fn generate_skype_json(count: usize) -> String {
    let senders = ["Alice", "Bob", "Carol", "Dan"];
    let mut lists: [Vec<String>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for i in 0..count {
        let ts = 1_483_228_800_i64 + (i as i64 * 7_919) % (5 * 365 * 86_400);
        let arrival = chrono::DateTime::from_timestamp(ts, 0)
            .unwrap()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ");
        lists[i % 3].push(format!(
            r#"{{"id": "{}", "displayName": "{}", "originalarrivaltime": "{}", "content": "Message number {}"}}"#,
            i,
            senders[i % senders.len()],
            arrival,
            i
        ));
    }
    format!(
        r#"{{"conversations": [
            {{"id": "19:a@thread.skype", "displayName": "Team &amp; Co", "threadProperties": {{"topic": "a"}}, "MessageList": [{}]}},
            {{"id": "19:b@thread.skype", "displayName": "Family", "threadProperties": {{"topic": "b"}}, "MessageList": [{}]}},
            {{"id": "8:live:bob", "displayName": "Bob", "MessageList": [{}]}},
            {{"id": "48:calllogs", "displayName": null, "MessageList": []}}
        ]}}"#,
        lists[0].join(",\n"),
        lists[1].join(",\n"),
        lists[2].join(",\n")
    )
}

fn feature_table(count: usize) -> FeatureTable {
    let json = generate_skype_json(count);
    FeatureTable::from_table(SkypeParser::new().parse_str(&json).unwrap())
}

// =============================================================================
// Loading Benchmarks
// =============================================================================

fn bench_skype_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("skype_parsing");
    let parser = SkypeParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let json = generate_skype_json(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| {
                let table = parser.parse_str(black_box(json)).unwrap();
                black_box(table)
            });
        });
    }
    group.finish();
}

fn bench_feature_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_derivation");
    let parser = SkypeParser::new();

    for size in [1_000_usize, 10_000, 50_000] {
        let table = parser.parse_str(&generate_skype_json(size)).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| black_box(FeatureTable::from_table(table.clone())));
        });
    }
    group.finish();
}

// =============================================================================
// Aggregation Benchmarks
// =============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let order = CategoryOrder::default();
    let table = feature_table(50_000);
    group.throughput(Throughput::Elements(table.len() as u64));

    for kind in ChartKind::all() {
        group.bench_with_input(BenchmarkId::from_parameter(kind.title()), kind, |b, kind| {
            b.iter(|| black_box(aggregate(*kind, black_box(&table), &order)));
        });
    }
    group.finish();
}

// =============================================================================
// Rendering Benchmarks
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let order = CategoryOrder::default();

    for size in [1_000_usize, 50_000] {
        let table = feature_table(size);
        let aggregates = aggregate_all(ChartKind::all(), &table, &order);
        let figures = build_figures(&aggregates, &order);
        group.bench_with_input(BenchmarkId::from_parameter(size), &figures, |b, figures| {
            b.iter(|| black_box(render_html(black_box(figures), "Benchmark").unwrap()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_skype_parsing,
    bench_feature_derivation,
    bench_aggregate,
    bench_render,
);

criterion_main!(benches);
