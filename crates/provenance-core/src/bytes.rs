// File: crates/provenance-core/src/bytes.rs

//! Bounds-checked fixed-width integer reads.
//!
//! Every reader returns `None` when the requested range runs past the end of
//! the buffer (or the offset arithmetic overflows), so extractors can chain
//! them with `?` and degrade to "absent" on truncated input.

fn array<const N: usize>(data: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    data.get(offset..end)?.try_into().ok()
}

pub(crate) fn u16_be(data: &[u8], offset: usize) -> Option<u16> {
    array(data, offset).map(u16::from_be_bytes)
}

pub(crate) fn u16_le(data: &[u8], offset: usize) -> Option<u16> {
    array(data, offset).map(u16::from_le_bytes)
}

pub(crate) fn u24_le(data: &[u8], offset: usize) -> Option<u32> {
    let [b0, b1, b2] = array::<3>(data, offset)?;
    Some(u32::from_le_bytes([b0, b1, b2, 0]))
}

pub(crate) fn u32_be(data: &[u8], offset: usize) -> Option<u32> {
    array(data, offset).map(u32::from_be_bytes)
}

pub(crate) fn u32_le(data: &[u8], offset: usize) -> Option<u32> {
    array(data, offset).map(u32::from_le_bytes)
}

/// Byte order of a TIFF-style structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endian {
    Little,
    Big,
}

impl Endian {
    pub(crate) fn u16(self, data: &[u8], offset: usize) -> Option<u16> {
        match self {
            Endian::Little => u16_le(data, offset),
            Endian::Big => u16_be(data, offset),
        }
    }

    pub(crate) fn u32(self, data: &[u8], offset: usize) -> Option<u32> {
        match self {
            Endian::Little => u32_le(data, offset),
            Endian::Big => u32_be(data, offset),
        }
    }
}
