// File: crates/provenance-core/src/png.rs

use crate::bytes::u32_be;
use crate::format::Dimensions;

/// IHDR width/height offsets, assuming IHDR directly follows the 8-byte
/// signature. The chunk tag and CRC are not checked.
const IHDR_WIDTH: usize = 16;
const IHDR_HEIGHT: usize = 20;

pub fn dimensions(data: &[u8]) -> Option<Dimensions> {
    let width = u32_be(data, IHDR_WIDTH)?;
    let height = u32_be(data, IHDR_HEIGHT)?;
    Dimensions::new(width, height)
}
