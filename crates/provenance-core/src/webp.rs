// File: crates/provenance-core/src/webp.rs

//! WebP canvas size for the three bitstream variants.

use crate::bytes::{u16_le, u24_le};
use crate::format::Dimensions;

const FOURCC: usize = 12;

pub(crate) fn is_webp(data: &[u8]) -> bool {
    data.starts_with(b"RIFF") && data.get(8..12) == Some(b"WEBP".as_slice())
}

pub fn dimensions(data: &[u8]) -> Option<Dimensions> {
    match data.get(FOURCC..FOURCC + 4)? {
        b"VP8 " => lossy(data),
        b"VP8L" => lossless(data),
        b"VP8X" => extended(data),
        _ => None,
    }
}

/// Key-frame header: 14-bit width and height, top two bits are scale.
fn lossy(data: &[u8]) -> Option<Dimensions> {
    let width = u16_le(data, 26)? & 0x3FFF;
    let height = u16_le(data, 28)? & 0x3FFF;
    Dimensions::new(u32::from(width), u32::from(height))
}

/// Lossless header: after the 0x2F signature byte, width-1 and height-1 are
/// packed as two consecutive 14-bit little-endian fields.
fn lossless(data: &[u8]) -> Option<Dimensions> {
    let b: [u8; 4] = data.get(21..25)?.try_into().ok()?;
    let [b0, b1, b2, b3] = b.map(u32::from);
    let width = 1 + (((b1 & 0x3F) << 8) | b0);
    let height = 1 + (((b3 & 0x0F) << 10) | (b2 << 2) | ((b1 & 0xC0) >> 6));
    Dimensions::new(width, height)
}

/// Extended header: 24-bit canvas width-1 and height-1.
fn extended(data: &[u8]) -> Option<Dimensions> {
    let width = u24_le(data, 24)? + 1;
    let height = u24_le(data, 27)? + 1;
    Dimensions::new(width, height)
}
