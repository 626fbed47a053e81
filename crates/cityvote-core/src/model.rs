// crates/cityvote-core/src/model.rs

use serde::Deserialize;

/// Raw city structure as it comes from `cities.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CityRaw {
    pub name: String,
    /// ISO 3166-1 alpha-2 code, e.g. "IN".
    pub country: String,
    #[serde(default)]
    pub admin1: Option<String>,
    #[serde(default)]
    pub admin2: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

/// Raw admin-region mapping entry, shared by `admin1.json` and
/// `admin2.json`: `{ "code": "US.TX", "name": "Texas" }`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminEntryRaw {
    pub code: String,
    pub name: String,
}

/// The three dataset payloads, fetched together and converted together.
#[derive(Debug, Default)]
pub struct RawPayloads {
    pub cities: Vec<CityRaw>,
    pub admin1: Vec<AdminEntryRaw>,
    pub admin2: Vec<AdminEntryRaw>,
}

impl RawPayloads {
    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            cities: self.cities.len(),
            admin1: self.admin1.len(),
            admin2: self.admin2.len(),
        }
    }
}

/// Simple aggregate statistics for a fetched dataset.
#[derive(Debug, Clone, Copy)]
pub struct DatasetStats {
    pub cities: usize,
    pub admin1: usize,
    pub admin2: usize,
}

/// An enriched city entry, immutable after load.
///
/// `searchable_name` and `searchable_location` are normalized projections
/// computed once by the loader and never recomputed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CityRecord {
    pub name: String,
    /// Diacritic-stripped for Indian cities, the raw name otherwise.
    pub display_name: String,
    pub country: String,
    pub admin1: Option<String>,
    pub admin2: Option<String>,
    /// Coordinates are only used to make `id` unique.
    pub lat: f64,
    pub lng: f64,
    /// Unique within a single loaded dataset, composed from name,
    /// coordinates and ingestion index. Not stable across reloads.
    pub id: String,
    /// Resolved admin-level-1 name, empty when the code is absent or
    /// unknown.
    pub admin1_name: String,
    pub admin2_name: String,
    /// Resolved country display name, falling back to the raw code.
    pub country_name: String,
    /// "admin2, admin1, country" with empty parts omitted.
    pub location_label: String,
    pub searchable_name: String,
    pub searchable_location: String,
}

impl CityRecord {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn location_label(&self) -> &str {
        &self.location_label
    }
}
