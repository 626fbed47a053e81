// crates/cityvote-core/src/text.rs

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Decompose to NFD and drop combining diacritical marks.
///
/// This keeps the base letters untouched (`São Paulo` -> `Sao Paulo`) and is
/// what the dataset loader applies to Indian city display names.
///
/// # Examples
///
/// ```rust
/// use cityvote_core::text::strip_diacritics;
///
/// assert_eq!(strip_diacritics("São Paulo"), "Sao Paulo");
/// assert_eq!(strip_diacritics("Chişinău"), "Chisinau");
/// ```
pub fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Fold a string into the form used for matching: diacritics stripped,
/// lowercased, trimmed.
///
/// Pure and idempotent: `normalize(normalize(x)) == normalize(x)`.
///
/// # Examples
///
/// ```rust
/// use cityvote_core::text::normalize;
///
/// assert_eq!(normalize("  São Paulo "), "sao paulo");
/// assert_eq!(normalize("MÜNCHEN"), "munchen");
/// ```
pub fn normalize(s: &str) -> String {
    strip_diacritics(s).to_lowercase().trim().to_string()
}
