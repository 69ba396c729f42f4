// File: crates/provenance-core/src/bmp.rs

use crate::bytes::u32_le;
use crate::format::Dimensions;

const DIB_WIDTH: usize = 18;
const DIB_HEIGHT: usize = 22;

/// Reads the BITMAPINFOHEADER width and height.
///
/// Both fields are signed on disk. A negative height marks a top-down
/// bitmap and its magnitude is the row count; a negative width is invalid.
pub fn dimensions(data: &[u8]) -> Option<Dimensions> {
    let width = u32_le(data, DIB_WIDTH)? as i32;
    let height = u32_le(data, DIB_HEIGHT)? as i32;
    if width <= 0 {
        return None;
    }
    Dimensions::new(width.unsigned_abs(), height.unsigned_abs())
}
