// File: crates/provenance-core/src/metadata.rs

//! Textual metadata heuristics.
//!
//! The buffer is decoded as Latin-1, which maps every byte to exactly one
//! char, and a set of independent substring/pattern detectors run over the
//! result. None of them parse EXIF structures; they only look for the
//! strings a camera or editor typically leaves behind.

use crate::catalog::Catalog;
use memchr::memmem;
use regex::Regex;
use std::sync::LazyLock;

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"20[0-9]{2}:[0-9]{2}:[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}")
        .expect("timestamp pattern is valid")
});

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?[0-9]{1,3}\.[0-9]+").expect("decimal pattern is valid"));

const EXIF_SIGNATURE: &[u8] = b"Exif";
const ORIENTATION_KEY: &str = "Orientation";
const ORIENTATION_WINDOW: usize = 30;

/// Everything the textual pass found. Undetermined fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataSignals {
    pub exif_present: bool,
    pub make: Option<&'static str>,
    pub model: Option<&'static str>,
    pub editing_tag: Option<&'static str>,
    pub timestamp: Option<String>,
    pub orientation: Option<String>,
    pub gps_present: bool,
}

impl MetadataSignals {
    pub fn has_device(&self) -> bool {
        self.make.is_some() || self.model.is_some()
    }
}

/// Decodes bytes one-to-one into chars (ISO-8859-1). Never fails.
pub fn latin1(data: &[u8]) -> String {
    data.iter().copied().map(char::from).collect()
}

/// Runs every detector over `data`.
///
/// `exif_window` bounds the raw-byte search for the `Exif` signature; the
/// catalog's markers are then searched across the whole decoded text.
pub fn extract(data: &[u8], catalog: &Catalog, exif_window: usize) -> MetadataSignals {
    let text = latin1(data);
    MetadataSignals {
        exif_present: exif_in_header(data, exif_window) || catalog.has_exif_marker(&text),
        make: catalog.find_make(&text),
        model: catalog.find_model(&text),
        editing_tag: catalog.find_editing_tool(&text),
        timestamp: timestamp(&text),
        orientation: orientation(&text),
        gps_present: gps_present(&text),
    }
}

pub fn exif_in_header(data: &[u8], window: usize) -> bool {
    let header = &data[..data.len().min(window)];
    memmem::find(header, EXIF_SIGNATURE).is_some()
}

/// First `20YY:MM:DD HH:MM:SS` stamp in the text.
pub fn timestamp(text: &str) -> Option<String> {
    TIMESTAMP.find(text).map(|m| m.as_str().to_owned())
}

/// The 30 characters starting at the first `Orientation` key. The value is
/// not parsed; the raw window is reported as-is.
pub fn orientation(text: &str) -> Option<String> {
    let start = text.find(ORIENTATION_KEY)?;
    Some(text[start..].chars().take(ORIENTATION_WINDOW).collect())
}

/// True if any short decimal number in the text could be a coordinate.
///
/// This is deliberately loose: any `[-+]ddd.d+` within ±180 trips it.
pub fn gps_present(text: &str) -> bool {
    DECIMAL
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .any(|value| (-180.0..=180.0).contains(&value))
}
