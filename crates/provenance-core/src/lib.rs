// crates/provenance-core/src/lib.rs

//! Container-level photo provenance checks.
//!
//! [`analyze`] takes the raw bytes of an image and estimates whether it came
//! from a real camera, was edited, or is a screenshot. Only container
//! structure and embedded strings are inspected; pixel data is never
//! decoded. Malformed input degrades to absent signals instead of errors.

pub mod bmp;
mod bytes;
pub mod catalog;
pub mod format;
pub mod jpeg;
pub mod metadata;
pub mod png;
pub mod scoring;
pub mod tags;
pub mod tiff;
pub mod verdict;
pub mod webp;

pub use catalog::Catalog;
pub use format::{ContainerFormat, Dimensions, Probe};
pub use metadata::MetadataSignals;
pub use scoring::Thresholds;
pub use verdict::{Label, Reason, Verdict};

use scoring::Evidence;
use thiserror::Error;

/// Errors from the fallible helpers around the analyzer.
#[derive(Error, Debug)]
pub enum ProvenanceError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File parsing failed: {0}")]
    ParsingError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Represents a single piece of structured metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
    pub category: String, // e.g., "IFD0", "GPS", "tEXt"
}

/// Tables and limits the analyzer runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalyzerConfig {
    pub catalog: Catalog,
    pub thresholds: Thresholds,
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), ProvenanceError> {
        let t = &self.thresholds;
        let invalid = |msg: String| Err(ProvenanceError::InvalidConfig(msg));

        if !(t.min_size_mib.is_finite() && t.max_size_mib.is_finite()) || t.min_size_mib < 0.0 {
            return invalid(format!(
                "size limits must be finite and non-negative, got {}..{} MiB",
                t.min_size_mib, t.max_size_mib
            ));
        }
        if t.min_size_mib >= t.max_size_mib {
            return invalid(format!(
                "minimum size {} MiB must be below maximum {} MiB",
                t.min_size_mib, t.max_size_mib
            ));
        }
        if t.min_axis >= t.max_axis {
            return invalid(format!(
                "minimum resolution {}px must be below maximum {}px",
                t.min_axis, t.max_axis
            ));
        }
        if !t.aspect_tolerance.is_finite() || t.aspect_tolerance <= 0.0 {
            return invalid(format!("aspect tolerance must be positive, got {}", t.aspect_tolerance));
        }
        if t.screenshot_aspects.is_empty() {
            return invalid("screenshot aspect list is empty".to_string());
        }

        let c = &self.catalog;
        if c.makes.is_empty() {
            return invalid("make catalog is empty".to_string());
        }
        if let Some(stray) = c.standalone_cameras.iter().find(|m| !c.makes.contains(*m)) {
            return invalid(format!("standalone camera make {stray:?} is not in the make catalog"));
        }
        Ok(())
    }
}

/// Runs the full pipeline with a fixed configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, ProvenanceError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Analyzes one in-memory image. Never fails.
    pub fn analyze(&self, data: &[u8]) -> Verdict {
        let AnalyzerConfig { catalog, thresholds } = &self.config;

        let format = ContainerFormat::sniff(data);
        let probe = format.probe(data);
        let signals = metadata::extract(data, catalog, thresholds.exif_window);
        let screenshot = scoring::looks_like_screenshot(&signals, probe.dimensions, thresholds);

        let evidence = Evidence {
            signals: &signals,
            probe,
            byte_len: data.len(),
            screenshot,
        };
        let assessment = scoring::assess(&evidence, thresholds);
        let label = scoring::label(&evidence, assessment.score, catalog);

        log::debug!(
            "analyzed {} bytes as {format}: dimensions {:?}, score {}, label {label:?}",
            data.len(),
            probe.dimensions,
            assessment.score
        );

        Verdict {
            identifier: None,
            label,
            score: assessment.score,
            format,
            dimensions: probe.dimensions,
            quantization_tables: probe.quantization_tables,
            metadata: signals,
            screenshot,
            reasons: assessment.reasons,
        }
    }
}

/// Analyzes `data` with the default catalog and thresholds.
pub fn analyze(data: &[u8]) -> Verdict {
    Analyzer::default().analyze(data)
}
