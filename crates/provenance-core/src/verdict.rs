// File: crates/provenance-core/src/verdict.rs

use crate::format::{ContainerFormat, Dimensions};
use crate::metadata::MetadataSignals;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Why the score missed a point, or a note worth surfacing to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    MissingExif,
    NoDevice,
    NoQuantizationTables,
    FileTooSmall,
    FileTooLarge,
    ResolutionTooLow,
    ResolutionTooHigh,
    EditingSoftware(&'static str),
    Screenshot,
    GpsEmbedded,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::MissingExif => f.write_str("Missing EXIF metadata"),
            Reason::NoDevice => f.write_str("No recognizable make/model detected"),
            Reason::NoQuantizationTables => f.write_str("No JPEG quantization tables found"),
            Reason::FileTooSmall => f.write_str("File too small to be a natural camera photo"),
            Reason::FileTooLarge => f.write_str("Unusually large for a typical JPEG capture"),
            Reason::ResolutionTooLow => f.write_str("Resolution unusually low"),
            Reason::ResolutionTooHigh => {
                f.write_str("Resolution unusually high (possible synthetic or scan)")
            }
            Reason::EditingSoftware(tag) => write!(f, "Editing software tag detected: {tag}"),
            Reason::Screenshot => f.write_str(
                "Pattern matches screenshot (no EXIF, common screen aspect ratio)",
            ),
            Reason::GpsEmbedded => f.write_str("GPS coordinates embedded (redacted in this report)"),
        }
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The verdict label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Screenshot,
    StandaloneCamera(&'static str),
    Device {
        make: Option<&'static str>,
        model: Option<&'static str>,
    },
    LikelyCamera,
    PossiblyCamera,
    Insufficient,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Screenshot => f.write_str("Likely screenshot"),
            Label::StandaloneCamera(make) => {
                write!(f, "Likely standalone camera capture ({make})")
            }
            Label::Device { make, model } => {
                write!(f, "Captured with {}", make.unwrap_or("unknown make"))?;
                match model {
                    Some(model) => write!(f, " {model}"),
                    None => Ok(()),
                }
            }
            Label::LikelyCamera => f.write_str("Likely captured with a real-world camera"),
            Label::PossiblyCamera => f.write_str("Possibly captured with a real-world camera"),
            Label::Insufficient => f.write_str("Insufficient evidence for camera capture"),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The outcome of one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Opaque, caller-chosen name for the analyzed buffer.
    pub identifier: Option<String>,
    pub label: Label,
    pub score: i32,
    pub format: ContainerFormat,
    pub dimensions: Option<Dimensions>,
    pub quantization_tables: Option<usize>,
    pub metadata: MetadataSignals,
    pub screenshot: bool,
    pub reasons: Vec<Reason>,
}

impl Verdict {
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// `WIDTHxHEIGHT`, when both axes are known.
    pub fn resolution(&self) -> Option<String> {
        self.dimensions.map(|d| d.to_string())
    }

    /// Whether the score alone reaches the "possibly a camera" level.
    pub fn is_confident(&self) -> bool {
        self.score >= 3
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("Verdict", 12)?;
        record.serialize_field("file", &self.identifier)?;
        record.serialize_field("verdict", &self.label)?;
        record.serialize_field("score", &self.score)?;
        record.serialize_field("format", &self.format)?;
        record.serialize_field("make", &self.metadata.make)?;
        record.serialize_field("model", &self.metadata.model)?;
        record.serialize_field("resolution", &self.resolution())?;
        record.serialize_field("timestamp", &self.metadata.timestamp)?;
        record.serialize_field("orientation", &self.metadata.orientation)?;
        record.serialize_field("gps_info_present", &self.metadata.gps_present)?;
        record.serialize_field("screenshot_detected", &self.screenshot)?;
        record.serialize_field("reasons", &self.reasons)?;
        record.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_label_trims_missing_parts() {
        let both = Label::Device { make: Some("Apple"), model: Some("iPhone") };
        assert_eq!(both.to_string(), "Captured with Apple iPhone");
        let make_only = Label::Device { make: Some("Sony"), model: None };
        assert_eq!(make_only.to_string(), "Captured with Sony");
        let model_only = Label::Device { make: None, model: Some("Pixel") };
        assert_eq!(model_only.to_string(), "Captured with unknown make Pixel");
    }

    #[test]
    fn reason_strings() {
        assert_eq!(
            Reason::EditingSoftware("Lightroom").to_string(),
            "Editing software tag detected: Lightroom"
        );
        assert_eq!(Reason::MissingExif.to_string(), "Missing EXIF metadata");
    }

    #[test]
    fn serializes_flat_record() {
        let verdict = Verdict {
            identifier: None,
            label: Label::Screenshot,
            score: -1,
            format: ContainerFormat::Png,
            dimensions: Dimensions::new(1920, 1080),
            quantization_tables: None,
            metadata: MetadataSignals::default(),
            screenshot: true,
            reasons: vec![Reason::MissingExif, Reason::Screenshot],
        }
        .with_identifier("shot.png");

        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["file"], "shot.png");
        assert_eq!(json["verdict"], "Likely screenshot");
        assert_eq!(json["score"], -1);
        assert_eq!(json["format"], "PNG");
        assert_eq!(json["resolution"], "1920x1080");
        assert!(json["make"].is_null());
        assert!(json["timestamp"].is_null());
        assert_eq!(json["screenshot_detected"], true);
        assert_eq!(json["reasons"][1], Reason::Screenshot.to_string());
        assert_eq!(json.as_object().unwrap().len(), 12);
    }
}
