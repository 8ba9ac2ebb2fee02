//! Performance benchmarks for edgectl output rendering
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.
//!
//! These benchmarks measure list rendering for services with many logging
//! endpoints, in both the compact table and the verbose field dump.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use edgectl_core::endpoint::Timestamps;
use edgectl_core::newrelic::NewRelic;
use edgectl_core::render::{endpoint_list_verbose, endpoint_table};
use edgectl_core::resolve::{ResolvedService, ServiceIdSource};

/// Generate `count` endpoints on one service version
fn generate_endpoints(count: usize) -> Vec<NewRelic> {
    let ts = Utc.with_ymd_and_hms(2021, 6, 15, 23, 0, 0).unwrap();
    (0..count)
        .map(|i| NewRelic {
            name: format!("endpoint_{i}"),
            token: format!("token-{i:08}"),
            format: "%h %l %u %t \"%r\" %>s %b".to_string(),
            format_version: 2,
            region: if i % 2 == 0 { "US" } else { "EU" }.to_string(),
            service_id: "SU1Z0isxPaozGVKXdv0eY".to_string(),
            service_version: 42,
            timestamps: Timestamps {
                created_at: Some(ts),
                updated_at: Some(ts),
                deleted_at: None,
            },
            ..NewRelic::default()
        })
        .collect()
}

fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("table");

    for count in [10, 100, 1000] {
        let endpoints = generate_endpoints(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &endpoints, |b, e| {
            b.iter(|| endpoint_table(black_box(e)))
        });
    }

    group.finish();
}

fn bench_verbose(c: &mut Criterion) {
    let mut group = c.benchmark_group("verbose");
    let service = ResolvedService {
        id: "SU1Z0isxPaozGVKXdv0eY".to_string(),
        source: ServiceIdSource::Flag,
    };
    let diagnostics = vec!["API endpoint: https://api.edgectl.dev".to_string()];

    for count in [10, 100, 1000] {
        let endpoints = generate_endpoints(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &endpoints, |b, e| {
            b.iter(|| endpoint_list_verbose(&diagnostics, &service, 42, black_box(e)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_table, bench_verbose);
criterion_main!(benches);
