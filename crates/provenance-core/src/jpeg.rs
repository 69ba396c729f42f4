// File: crates/provenance-core/src/jpeg.rs

//! JPEG marker scanning: quantization-table count and frame size.
//!
//! Both walks look at raw `FF xx` pairs anywhere in the buffer rather than
//! following the segment chain from SOI, so a marker pair embedded inside
//! an APP segment is counted too. Every step moves the cursor forward by at
//! least one byte.

use crate::bytes::u16_be;
use crate::format::Dimensions;
use memchr::memchr;

const MARKER_PREFIX: u8 = 0xFF;
const DQT: u8 = 0xDB;
const SOF0: u8 = 0xC0;
const SOF2: u8 = 0xC2;

/// Result of scanning a JPEG byte stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JpegScan {
    pub quantization_tables: usize,
    pub dimensions: Option<Dimensions>,
}

pub fn scan(data: &[u8]) -> JpegScan {
    let scan = JpegScan {
        quantization_tables: quantization_tables(data),
        dimensions: frame_dimensions(data),
    };
    log::trace!(
        "jpeg scan: {} quantization table(s), frame {:?}",
        scan.quantization_tables,
        scan.dimensions
    );
    scan
}

/// Yields the offset of every `FF` byte that still has a following byte,
/// starting at or after `from`.
fn next_marker(data: &[u8], from: usize) -> Option<usize> {
    let rest = data.get(from..)?;
    let pos = from + memchr(MARKER_PREFIX, rest)?;
    (pos + 1 < data.len()).then_some(pos)
}

/// Counts `FF DB` segments, skipping each by its declared length.
///
/// The length field counts itself but not the marker, so a segment spans
/// `2 + length` bytes. A length below 2 cannot describe a segment; the
/// walk then steps a single byte.
pub fn quantization_tables(data: &[u8]) -> usize {
    let mut tables = 0;
    let mut cursor = 0;
    while let Some(pos) = next_marker(data, cursor) {
        if data[pos + 1] != DQT {
            cursor = pos + 1;
            continue;
        }
        cursor = match u16_be(data, pos + 2) {
            Some(length) => {
                tables += 1;
                if length >= 2 {
                    pos + 2 + usize::from(length)
                } else {
                    pos + 1
                }
            }
            None => pos + 1,
        };
    }
    tables
}

/// Height and width from the first baseline or progressive SOF marker.
///
/// The frame header is `FF Cx len(2) precision(1) height(2) width(2)`.
pub fn frame_dimensions(data: &[u8]) -> Option<Dimensions> {
    let mut cursor = 0;
    while let Some(pos) = next_marker(data, cursor) {
        if matches!(data[pos + 1], SOF0 | SOF2) {
            let height = u16_be(data, pos + 5)?;
            let width = u16_be(data, pos + 7)?;
            return Dimensions::new(u32::from(width), u32::from(height));
        }
        cursor = pos + 1;
    }
    None
}
