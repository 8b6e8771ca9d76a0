use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use snow_report::models::{aggregate_score, Grade, ResortRecord};
use snow_report::services::dashboard::{filter, sort, ResortFilter, SortMode};
use std::collections::HashSet;
use std::hint::black_box;

/// A state-sized snapshot with a spread of open ratios and sentinels.
fn snapshot(count: usize) -> Value {
    let resorts: Vec<Value> = (0..count)
        .map(|i| {
            let total = 10 + (i % 40) as u32;
            let open = (i as u32 * 7) % (total + 1);
            let lifts = if i % 13 == 0 {
                "n/a".to_string()
            } else {
                format!("{}/{}", open, total)
            };
            json!({
                "id": i,
                "resort": format!("Resort {:04}", (i * 7919) % count),
                "state": "Colorado",
                "open_lifts": lifts,
                "open_trails": format!("{}/{}", open * 3, total * 3),
                "snowfall24h": format!("{}\"", i % 5),
            })
        })
        .collect();
    Value::Array(resorts)
}

fn benchmark_scoring(c: &mut Criterion) {
    let payload = snapshot(500);
    let resorts = ResortRecord::list_from_value(&payload);

    let mut group = c.benchmark_group("snow_dashboard");

    group.bench_function("parse_snapshot", |b| {
        b.iter(|| ResortRecord::list_from_value(black_box(&payload)))
    });

    group.bench_function("aggregate", |b| {
        b.iter(|| aggregate_score(black_box(&resorts)))
    });

    let resort_filter = ResortFilter {
        search: "resort 01".to_string(),
        grades: HashSet::from([Grade::A, Grade::B, Grade::C]),
        require_new_snow: true,
    };
    group.bench_function("filter_and_sort", |b| {
        b.iter(|| {
            let mut shown = filter(black_box(resorts.clone()), &resort_filter);
            sort(&mut shown, SortMode::ScoreDesc);
            shown
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_scoring);
criterion_main!(benches);
