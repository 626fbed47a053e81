// crates/cityvote-core/src/loader.rs

//! # Dataset Loader
//!
//! Fetches the three JSON resources (cities, admin-level-1, admin-level-2),
//! joins them into enriched [`CityRecord`]s and converts the city list in
//! bounded batches so a cooperative host can keep its UI thread responsive.
//!
//! The load is all-or-nothing: any fetch or parse failure aborts the whole
//! load and no partial dataset is published. Batching is a performance
//! detail only — the produced records are identical for any batch size.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{Result, VoteError};
use crate::model::{AdminEntryRaw, CityRaw, CityRecord, RawPayloads};
use crate::names::CountryNames;
use crate::text::{normalize, strip_diacritics};

/// Number of city entries converted per batch. The progress callback runs
/// between batches and doubles as the cooperative yield point.
pub const BATCH_SIZE: usize = 1000;

pub const CITIES_FILE: &str = "cities.json";
pub const ADMIN1_FILE: &str = "admin1.json";
pub const ADMIN2_FILE: &str = "admin2.json";

/// Where the three dataset files live: an HTTP base URL or a local
/// directory (plain `.json` or gzipped `.json.gz`).
#[derive(Debug, Clone)]
pub enum DataSource {
    Url(String),
    Dir(PathBuf),
}

impl DataSource {
    /// Interpret a CLI-style argument: anything with an http(s) scheme is
    /// a base URL, everything else a local directory.
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            DataSource::Url(arg.trim_end_matches('/').to_string())
        } else {
            DataSource::Dir(PathBuf::from(arg))
        }
    }

    /// Fetch all three payloads. Fails on the first non-success status or
    /// missing file; nothing is returned unless everything parsed.
    pub fn fetch(&self) -> Result<RawPayloads> {
        match self {
            DataSource::Url(base) => fetch_http(base),
            DataSource::Dir(dir) => fetch_dir(dir),
        }
    }
}

fn fetch_http(base: &str) -> Result<RawPayloads> {
    let client = reqwest::blocking::Client::new();
    debug!(%base, "fetching dataset over http");
    Ok(RawPayloads {
        cities: fetch_json(&client, base, CITIES_FILE, "cities")?,
        admin1: fetch_json(&client, base, ADMIN1_FILE, "admin1 metadata")?,
        admin2: fetch_json(&client, base, ADMIN2_FILE, "admin2 metadata")?,
    })
}

fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::blocking::Client,
    base: &str,
    file: &str,
    resource: &'static str,
) -> Result<T> {
    let url = format!("{base}/{file}");
    let resp = client.get(&url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(VoteError::Fetch {
            resource,
            status: status.as_u16(),
        });
    }
    Ok(resp.json()?)
}

fn fetch_dir(dir: &Path) -> Result<RawPayloads> {
    debug!(dir = %dir.display(), "reading dataset from disk");
    Ok(RawPayloads {
        cities: read_json(dir, CITIES_FILE)?,
        admin1: read_json(dir, ADMIN1_FILE)?,
        admin2: read_json(dir, ADMIN2_FILE)?,
    })
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    let reader = open_stream(dir, file)?;
    Ok(serde_json::from_reader(reader)?)
}

/// Opens `<dir>/<file>`, falling back to the gzipped `<file>.gz` variant.
/// Returns a generic reader so the caller doesn't care about compression.
fn open_stream(dir: &Path, file: &str) -> Result<Box<dyn Read>> {
    let plain = dir.join(file);
    if plain.is_file() {
        let reader = BufReader::new(File::open(&plain)?);
        return Ok(Box::new(reader));
    }
    let gz = dir.join(format!("{file}.gz"));
    if gz.is_file() {
        let reader = BufReader::new(File::open(&gz)?);
        return Ok(Box::new(GzDecoder::new(reader)));
    }
    Err(VoteError::NotFound(plain.display().to_string()))
}

/// Convert raw payloads into enriched records.
///
/// `progress` receives an advisory 0–100 percentage as batches complete.
pub fn build_records<N: CountryNames + ?Sized>(
    payloads: RawPayloads,
    names: &N,
    progress: impl FnMut(u8),
) -> Vec<CityRecord> {
    build_records_batched(payloads, names, BATCH_SIZE, progress)
}

/// Batch-size-parameterized worker behind [`build_records`]. The output
/// must be identical for any `batch > 0`.
pub(crate) fn build_records_batched<N: CountryNames + ?Sized>(
    payloads: RawPayloads,
    names: &N,
    batch: usize,
    mut progress: impl FnMut(u8),
) -> Vec<CityRecord> {
    let admin1_lookup: HashMap<&str, &str> = payloads
        .admin1
        .iter()
        .map(|e| (e.code.as_str(), e.name.as_str()))
        .collect();
    let admin2_lookup: HashMap<&str, &str> = payloads
        .admin2
        .iter()
        .map(|e| (e.code.as_str(), e.name.as_str()))
        .collect();

    let total = payloads.cities.len();
    let mut records = Vec::with_capacity(total);

    for chunk in payloads.cities.chunks(batch.max(1)) {
        for city in chunk {
            let index = records.len();
            records.push(enrich(city, index, &admin1_lookup, &admin2_lookup, names));
        }
        let percent = ((records.len() * 100) / total.max(1)).min(100) as u8;
        progress(percent);
    }
    if total == 0 {
        progress(100);
    }

    info!(cities = records.len(), "dataset ready");
    records
}

fn enrich<N: CountryNames + ?Sized>(
    city: &CityRaw,
    index: usize,
    admin1_lookup: &HashMap<&str, &str>,
    admin2_lookup: &HashMap<&str, &str>,
    names: &N,
) -> CityRecord {
    // Indian names are shown without diacritics; everyone else keeps the
    // raw spelling.
    let display_name = if city.country == "IN" {
        strip_diacritics(&city.name)
    } else {
        city.name.clone()
    };

    let admin1 = city.admin1.as_deref().unwrap_or("");
    let admin2 = city.admin2.as_deref().unwrap_or("");

    let admin1_code = if admin1.is_empty() {
        String::new()
    } else {
        format!("{}.{}", city.country, admin1)
    };
    let admin2_code = if admin2.is_empty() || admin1.is_empty() {
        String::new()
    } else {
        format!("{}.{}.{}", city.country, admin1, admin2)
    };

    // A code that resolves to nothing yields an empty name, not an error.
    let admin1_name = lookup_name(&admin1_code, admin1_lookup);
    let admin2_name = lookup_name(&admin2_code, admin2_lookup);

    let country_name = if city.country.is_empty() {
        String::new()
    } else {
        names
            .resolve(&city.country)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| city.country.clone())
    };

    let location_label = [
        admin2_name.as_str(),
        admin1_name.as_str(),
        country_name.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(", ");

    let searchable_name = normalize(&display_name);
    let searchable_location = normalize(&location_label);

    CityRecord {
        id: format!("{}-{}-{}-{}", city.name, city.lat, city.lng, index),
        name: city.name.clone(),
        display_name,
        country: city.country.clone(),
        admin1: city.admin1.clone(),
        admin2: city.admin2.clone(),
        lat: city.lat,
        lng: city.lng,
        admin1_name,
        admin2_name,
        country_name,
        location_label,
        searchable_name,
        searchable_location,
    }
}

fn lookup_name(code: &str, lookup: &HashMap<&str, &str>) -> String {
    if code.is_empty() {
        return String::new();
    }
    lookup.get(code).copied().unwrap_or("").to_string()
}

/// Fetch and build in one step.
pub fn load<N: CountryNames + ?Sized>(
    source: &DataSource,
    names: &N,
    progress: impl FnMut(u8),
) -> Result<Vec<CityRecord>> {
    let payloads = source.fetch()?;
    Ok(build_records(payloads, names, progress))
}
