// File: crates/provenance-core/src/format.rs

//! Container sniffing and per-format dimension dispatch.

use crate::{bmp, jpeg, png, tiff, webp};
use serde::Serialize;
use std::fmt;

/// The container formats the analyzer understands.
///
/// Every buffer maps to exactly one variant; `Unknown` is a normal outcome
/// rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContainerFormat {
    Jpeg,
    Png,
    Tiff,
    Webp,
    Bmp,
    Unknown,
}

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8];
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47];
const TIFF_LE_MAGIC: &[u8] = &[0x49, 0x49, 0x2A, 0x00];
const TIFF_BE_MAGIC: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];
const BMP_MAGIC: &[u8] = b"BM";

impl ContainerFormat {
    /// Classifies a buffer by its magic prefix.
    ///
    /// Checks run in a fixed priority order (JPEG, PNG, TIFF, WEBP, BMP);
    /// buffers too short for any prefix fall through to `Unknown`.
    pub fn sniff(data: &[u8]) -> Self {
        if data.starts_with(JPEG_MAGIC) {
            ContainerFormat::Jpeg
        } else if data.starts_with(PNG_MAGIC) {
            ContainerFormat::Png
        } else if data.starts_with(TIFF_LE_MAGIC) || data.starts_with(TIFF_BE_MAGIC) {
            ContainerFormat::Tiff
        } else if webp::is_webp(data) {
            ContainerFormat::Webp
        } else if data.starts_with(BMP_MAGIC) {
            ContainerFormat::Bmp
        } else {
            ContainerFormat::Unknown
        }
    }

    /// Reads the structural signals this container exposes.
    ///
    /// Only JPEG carries a quantization-table count; for every other format
    /// it is `None`, which the scorer treats as "not applicable".
    pub fn probe(self, data: &[u8]) -> Probe {
        match self {
            ContainerFormat::Jpeg => {
                let scan = jpeg::scan(data);
                Probe {
                    dimensions: scan.dimensions,
                    quantization_tables: Some(scan.quantization_tables),
                }
            }
            ContainerFormat::Png => Probe::dimensions_only(png::dimensions(data)),
            ContainerFormat::Tiff => Probe::dimensions_only(tiff::dimensions(data)),
            ContainerFormat::Webp => Probe::dimensions_only(webp::dimensions(data)),
            ContainerFormat::Bmp => Probe::dimensions_only(bmp::dimensions(data)),
            ContainerFormat::Unknown => Probe::default(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ContainerFormat::Jpeg => "JPEG",
            ContainerFormat::Png => "PNG",
            ContainerFormat::Tiff => "TIFF",
            ContainerFormat::Webp => "WEBP",
            ContainerFormat::Bmp => "BMP",
            ContainerFormat::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural signals extracted from a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Probe {
    pub dimensions: Option<Dimensions>,
    /// Number of `FF DB` segments; `None` outside JPEG.
    pub quantization_tables: Option<usize>,
}

impl Probe {
    fn dimensions_only(dimensions: Option<Dimensions>) -> Self {
        Self {
            dimensions,
            quantization_tables: None,
        }
    }
}

/// Pixel dimensions of an image. Both axes are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Returns `None` if either axis is zero: a zero read from a header is
    /// indistinguishable from garbage and is reported as absent.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height, rounded to two decimal places.
    ///
    /// Rounding works on the exact decimal expansion of the quotient, so
    /// 3090/2000 (stored as 1.54499...) becomes 1.54, and an exact tie such
    /// as 1.125 goes to the even digit.
    pub fn aspect_ratio(&self) -> f64 {
        let raw = f64::from(self.width) / f64::from(self.height);
        format!("{raw:.2}").parse().unwrap_or(raw)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
