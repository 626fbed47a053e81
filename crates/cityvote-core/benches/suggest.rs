// crates/cityvote-core/benches/suggest.rs

use criterion::{criterion_group, criterion_main, Criterion};

use cityvote_core::{build_records, suggest, CityRaw, IsoCountryNames, RawPayloads, MAX_SUGGESTIONS};

fn synthetic_dataset(n: usize) -> Vec<cityvote_core::CityRecord> {
    let cities = (0..n)
        .map(|i| CityRaw {
            name: format!("City {i} Ville"),
            country: if i % 2 == 0 { "PE" } else { "US" }.to_string(),
            admin1: None,
            admin2: None,
            lat: i as f64 / 1000.0,
            lng: -(i as f64) / 1000.0,
        })
        .collect();
    build_records(
        RawPayloads {
            cities,
            admin1: vec![],
            admin2: vec![],
        },
        &IsoCountryNames,
        |_| {},
    )
}

fn bench_suggest(c: &mut Criterion) {
    let db = synthetic_dataset(50_000);

    c.bench_function("suggest prefix 50k", |b| {
        b.iter(|| suggest("city 4", &db, MAX_SUGGESTIONS))
    });

    c.bench_function("suggest location-only 50k", |b| {
        b.iter(|| suggest("peru", &db, MAX_SUGGESTIONS))
    });

    c.bench_function("suggest no-match 50k", |b| {
        b.iter(|| suggest("zzzzzz", &db, MAX_SUGGESTIONS))
    });
}

criterion_group!(benches, bench_suggest);
criterion_main!(benches);
