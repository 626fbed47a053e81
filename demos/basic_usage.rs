//! Basic usage example for cityvote-rs
//!
//! This example demonstrates how to:
//! - Build an enriched city dataset from raw payloads
//! - Rank suggestions for a free-text query
//! - Drive the headless controller state through a selection

use cityvote_rs::prelude::*;

fn main() {
    println!("=== cityvote-rs Basic Usage Example ===\n");

    let payloads = RawPayloads {
        cities: vec![
            city("Springfield", "US", 39.8, -89.6),
            city("West Springfield", "US", 42.1, -72.6),
            city("São Paulo", "BR", -23.5, -46.6),
            city("Lima", "PE", -12.0, -77.0),
        ],
        admin1: vec![],
        admin2: vec![],
    };

    println!("Building dataset...");
    let records = build_records(payloads, &IsoCountryNames, |percent| {
        println!("  progress: {percent}%");
    });
    println!("✓ {} cities ready\n", records.len());

    println!("--- Suggestions for \"spring\" ---");
    for hit in suggest("spring", &records, MAX_SUGGESTIONS) {
        println!("- {} ({})", hit.display_name(), hit.location_label());
    }
    println!();

    println!("--- Diacritic-insensitive match ---");
    for hit in suggest("sao pa", &records, MAX_SUGGESTIONS) {
        println!("- {} ({})", hit.display_name(), hit.location_label());
    }
    println!();

    println!("--- Controller state ---");
    let mut state = AppState::new();
    state.apply(Event::SessionResolved(SessionState::Valid {
        uid: "demo".into(),
    }));
    state.apply(Event::DatasetLoaded(records));
    state.apply(Event::QueryChanged("lima".into()));

    let snapshot = render(&state);
    println!("input enabled: {}", snapshot.input_enabled);
    println!("submit enabled: {}", snapshot.submit_enabled);
    for row in &snapshot.suggestions {
        println!("suggestion: {} — {}", row.label, row.meta);
    }

    println!("\n=== Example completed successfully ===");
}

fn city(name: &str, country: &str, lat: f64, lng: f64) -> CityRaw {
    CityRaw {
        name: name.to_string(),
        country: country.to_string(),
        admin1: None,
        admin2: None,
        lat,
        lng,
    }
}
