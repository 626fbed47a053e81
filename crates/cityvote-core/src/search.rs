// crates/cityvote-core/src/search.rs

//! Suggestion ranking for the city input.
//!
//! Matches are bucketed by priority — name prefix, name substring,
//! location substring — and each bucket preserves dataset (ingestion)
//! order, so the output is fully deterministic for a given query and
//! dataset.

use crate::model::CityRecord;
use crate::text::normalize;

/// Cap on the suggestion list shown to the user.
pub const MAX_SUGGESTIONS: usize = 12;

/// Rank `records` against `query`, returning at most `limit` suggestions.
///
/// An empty (or whitespace/diacritic-only) query yields no suggestions,
/// not the whole dataset. Each record lands in at most one bucket,
/// name-starts-with checked before name-contains, location matches only
/// when the name does not match at all.
pub fn suggest<'a>(query: &str, records: &'a [CityRecord], limit: usize) -> Vec<&'a CityRecord> {
    let q = normalize(query);
    if q.is_empty() {
        return Vec::new();
    }

    let mut name_starts = Vec::new();
    let mut name_contains = Vec::new();
    let mut location_matches = Vec::new();

    for record in records {
        if record.searchable_name.starts_with(&q) {
            name_starts.push(record);
        } else if record.searchable_name.contains(&q) {
            name_contains.push(record);
        } else if record.searchable_location.contains(&q) {
            location_matches.push(record);
        }
    }

    name_starts
        .into_iter()
        .chain(name_contains)
        .chain(location_matches)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::build_records;
    use crate::model::{CityRaw, RawPayloads};
    use crate::names::IsoCountryNames;

    fn records(cities: &[(&str, &str)]) -> Vec<CityRecord> {
        let payloads = RawPayloads {
            cities: cities
                .iter()
                .enumerate()
                .map(|(i, (name, country))| CityRaw {
                    name: name.to_string(),
                    country: country.to_string(),
                    admin1: None,
                    admin2: None,
                    lat: i as f64,
                    lng: -(i as f64),
                })
                .collect(),
            admin1: vec![],
            admin2: vec![],
        };
        build_records(payloads, &IsoCountryNames, |_| {})
    }

    #[test]
    fn empty_query_yields_nothing() {
        let db = records(&[("Lima", "PE")]);
        assert!(suggest("", &db, MAX_SUGGESTIONS).is_empty());
        assert!(suggest("   ", &db, MAX_SUGGESTIONS).is_empty());
    }

    #[test]
    fn prefix_beats_substring() {
        let db = records(&[("West Springfield", "US"), ("Springfield", "US")]);
        let out = suggest("spring", &db, MAX_SUGGESTIONS);
        let names: Vec<_> = out.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["Springfield", "West Springfield"]);
    }

    #[test]
    fn location_only_match_ranks_last() {
        // "Paris, TX" matches "texas" only through its location label.
        let payloads = RawPayloads {
            cities: vec![
                CityRaw {
                    name: "Paris".into(),
                    country: "US".into(),
                    admin1: Some("TX".into()),
                    admin2: None,
                    lat: 33.6,
                    lng: -95.5,
                },
                CityRaw {
                    name: "Texas City".into(),
                    country: "US".into(),
                    admin1: Some("TX".into()),
                    admin2: None,
                    lat: 29.4,
                    lng: -94.9,
                },
            ],
            admin1: vec![crate::model::AdminEntryRaw {
                code: "US.TX".into(),
                name: "Texas".into(),
            }],
            admin2: vec![],
        };
        let db = build_records(payloads, &IsoCountryNames, |_| {});
        let out = suggest("texas", &db, MAX_SUGGESTIONS);
        let names: Vec<_> = out.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["Texas City", "Paris"]);
    }

    #[test]
    fn output_is_capped_at_limit() {
        let cities: Vec<(String, &str)> = (0..40).map(|i| (format!("Lima {i}"), "PE")).collect();
        let pairs: Vec<(&str, &str)> = cities.iter().map(|(n, c)| (n.as_str(), *c)).collect();
        let db = records(&pairs);
        assert_eq!(suggest("lima", &db, MAX_SUGGESTIONS).len(), MAX_SUGGESTIONS);
        assert_eq!(suggest("lima", &db, 3).len(), 3);
    }

    #[test]
    fn ties_keep_ingestion_order() {
        let db = records(&[("Lima Norte", "PE"), ("Lima Sur", "PE"), ("Lima", "PE")]);
        let out = suggest("lima", &db, MAX_SUGGESTIONS);
        let names: Vec<_> = out.iter().map(|r| r.display_name.as_str()).collect();
        assert_eq!(names, vec!["Lima Norte", "Lima Sur", "Lima"]);
    }

    #[test]
    fn matching_is_diacritic_insensitive() {
        let db = records(&[("São Paulo", "BR")]);
        assert_eq!(suggest("sao pa", &db, MAX_SUGGESTIONS).len(), 1);
        assert_eq!(suggest("SÃO", &db, MAX_SUGGESTIONS).len(), 1);
    }
}
