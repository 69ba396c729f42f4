// File: crates/provenance-core/src/scoring.rs

//! Score contributions, plausibility and screenshot checks, and the label
//! cascade.

use crate::catalog::Catalog;
use crate::format::{Dimensions, Probe};
use crate::metadata::MetadataSignals;
use crate::verdict::{Label, Reason};

const MIB: f64 = 1024.0 * 1024.0;

/// Aspect ratios typical of phone and desktop screens.
pub const SCREEN_ASPECTS: &[f64] = &[1.33, 1.5, 1.6, 1.77, 2.0];

/// Numeric limits used by the checks below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub min_size_mib: f64,
    pub max_size_mib: f64,
    /// Smallest allowed pixel count on either axis.
    pub min_axis: u32,
    /// Largest allowed pixel count on either axis.
    pub max_axis: u32,
    /// How far into the raw bytes to look for the `Exif` signature.
    pub exif_window: usize,
    pub screenshot_aspects: &'static [f64],
    pub aspect_tolerance: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_size_mib: 0.1,
            max_size_mib: 20.0,
            min_axis: 500,
            max_axis: 12_000,
            exif_window: 4096,
            screenshot_aspects: SCREEN_ASPECTS,
            aspect_tolerance: 0.05,
        }
    }
}

/// Checks file size, then resolution. The first failing check wins.
pub fn plausibility(
    byte_len: usize,
    dimensions: Option<Dimensions>,
    thresholds: &Thresholds,
) -> Result<(), Reason> {
    let size_mib = byte_len as f64 / MIB;
    if size_mib < thresholds.min_size_mib {
        return Err(Reason::FileTooSmall);
    }
    if size_mib > thresholds.max_size_mib {
        return Err(Reason::FileTooLarge);
    }
    if let Some(dims) = dimensions {
        let (w, h) = (dims.width(), dims.height());
        if w < thresholds.min_axis || h < thresholds.min_axis {
            return Err(Reason::ResolutionTooLow);
        }
        if w > thresholds.max_axis || h > thresholds.max_axis {
            return Err(Reason::ResolutionTooHigh);
        }
    }
    Ok(())
}

/// An image with no EXIF, no device names and a screen-shaped frame.
pub fn looks_like_screenshot(
    signals: &MetadataSignals,
    dimensions: Option<Dimensions>,
    thresholds: &Thresholds,
) -> bool {
    if signals.exif_present || signals.has_device() {
        return false;
    }
    let Some(dims) = dimensions else {
        return false;
    };
    let aspect = dims.aspect_ratio();
    thresholds
        .screenshot_aspects
        .iter()
        .any(|common| (aspect - common).abs() < thresholds.aspect_tolerance)
}

/// Every input the scorer looks at.
#[derive(Debug, Clone, Copy)]
pub struct Evidence<'a> {
    pub signals: &'a MetadataSignals,
    pub probe: Probe,
    pub byte_len: usize,
    pub screenshot: bool,
}

/// Score and the reasons collected on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assessment {
    pub score: i32,
    pub reasons: Vec<Reason>,
}

impl Assessment {
    fn award(&mut self, hit: bool, miss: Option<Reason>) {
        if hit {
            self.score += 1;
        } else if let Some(reason) = miss {
            self.reasons.push(reason);
        }
    }

    fn penalize(&mut self, reason: Reason) {
        self.score -= 1;
        self.reasons.push(reason);
    }
}

/// Applies the seven contributions in their fixed order.
pub fn assess(evidence: &Evidence<'_>, thresholds: &Thresholds) -> Assessment {
    let signals = evidence.signals;
    let mut assessment = Assessment::default();

    assessment.award(signals.exif_present, Some(Reason::MissingExif));
    assessment.award(signals.has_device(), Some(Reason::NoDevice));

    if let Some(tables) = evidence.probe.quantization_tables {
        assessment.award(tables > 0, Some(Reason::NoQuantizationTables));
    }

    let plausible = plausibility(evidence.byte_len, evidence.probe.dimensions, thresholds);
    assessment.award(plausible.is_ok(), plausible.err());

    if let Some(tag) = signals.editing_tag {
        assessment.penalize(Reason::EditingSoftware(tag));
    }
    if evidence.screenshot {
        assessment.penalize(Reason::Screenshot);
    }
    if signals.gps_present {
        assessment.reasons.push(Reason::GpsEmbedded);
    }
    assessment
}

/// First-match label cascade.
pub fn label(evidence: &Evidence<'_>, score: i32, catalog: &Catalog) -> Label {
    let signals = evidence.signals;
    if evidence.screenshot {
        return Label::Screenshot;
    }
    if let Some(make) = signals.make.filter(|m| catalog.is_standalone_camera(m)) {
        return Label::StandaloneCamera(make);
    }
    if signals.has_device() {
        return Label::Device {
            make: signals.make,
            model: signals.model,
        };
    }
    match score {
        s if s >= 4 => Label::LikelyCamera,
        3 => Label::PossiblyCamera,
        _ => Label::Insufficient,
    }
}
