// crates/cityvote-core/src/names.rs

use isocountry::CountryCode;

/// Resolver from ISO 3166-1 alpha-2 codes to display names.
///
/// The loader treats `None` as "resolution unavailable" and falls back to
/// the raw code, so an implementation never needs to error.
pub trait CountryNames {
    fn resolve(&self, code: &str) -> Option<String>;
}

/// Registry-backed resolver using the ISO 3166-1 tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct IsoCountryNames;

impl CountryNames for IsoCountryNames {
    fn resolve(&self, code: &str) -> Option<String> {
        CountryCode::for_alpha2(code)
            .ok()
            .map(|c| c.name().to_string())
    }
}
