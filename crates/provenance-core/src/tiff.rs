// File: crates/provenance-core/src/tiff.rs

use crate::bytes::Endian;
use crate::format::Dimensions;

const TAG_IMAGE_WIDTH: u16 = 256;
const TAG_IMAGE_LENGTH: u16 = 257;
const TYPE_SHORT: u16 = 3;
const ENTRY_SIZE: usize = 12;

/// Scans the first IFD for ImageWidth and ImageLength.
pub fn dimensions(data: &[u8]) -> Option<Dimensions> {
    let endian = match data.get(0..2)? {
        b"II" => Endian::Little,
        b"MM" => Endian::Big,
        _ => return None,
    };
    let ifd = usize::try_from(endian.u32(data, 4)?).ok()?;
    let count = endian.u16(data, ifd)?;

    let mut width = None;
    let mut height = None;
    for index in 0..usize::from(count) {
        let Some(entry) = ifd
            .checked_add(2)
            .and_then(|start| start.checked_add(index * ENTRY_SIZE))
        else {
            break;
        };
        let Some(tag) = endian.u16(data, entry) else {
            break;
        };
        if tag != TAG_IMAGE_WIDTH && tag != TAG_IMAGE_LENGTH {
            continue;
        }
        let Some(value) = entry_value(data, endian, entry) else {
            break;
        };
        if tag == TAG_IMAGE_WIDTH {
            width = Some(value);
        } else {
            height = Some(value);
        }
        if width.is_some() && height.is_some() {
            break;
        }
    }
    Dimensions::new(width?, height?)
}

/// Width and height are SHORT or LONG; a SHORT sits left-justified in the
/// 4-byte value field.
fn entry_value(data: &[u8], endian: Endian, entry: usize) -> Option<u32> {
    let field_type = endian.u16(data, entry + 2)?;
    if field_type == TYPE_SHORT {
        endian.u16(data, entry + 8).map(u32::from)
    } else {
        endian.u32(data, entry + 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(big: bool, tag: u16, field_type: u16, value: u32) -> Vec<u8> {
        let mut out = Vec::with_capacity(ENTRY_SIZE);
        if big {
            out.extend_from_slice(&tag.to_be_bytes());
            out.extend_from_slice(&field_type.to_be_bytes());
            out.extend_from_slice(&1u32.to_be_bytes());
            if field_type == TYPE_SHORT {
                out.extend_from_slice(&(value as u16).to_be_bytes());
                out.extend_from_slice(&[0, 0]);
            } else {
                out.extend_from_slice(&value.to_be_bytes());
            }
        } else {
            out.extend_from_slice(&tag.to_le_bytes());
            out.extend_from_slice(&field_type.to_le_bytes());
            out.extend_from_slice(&1u32.to_le_bytes());
            if field_type == TYPE_SHORT {
                out.extend_from_slice(&(value as u16).to_le_bytes());
                out.extend_from_slice(&[0, 0]);
            } else {
                out.extend_from_slice(&value.to_le_bytes());
            }
        }
        out
    }

    fn tiff(big: bool, entries: &[Vec<u8>]) -> Vec<u8> {
        let mut data = if big {
            b"MM\0*\0\0\0\x08".to_vec()
        } else {
            b"II*\0\x08\0\0\0".to_vec()
        };
        let count = entries.len() as u16;
        data.extend_from_slice(&if big { count.to_be_bytes() } else { count.to_le_bytes() });
        for e in entries {
            data.extend_from_slice(e);
        }
        data.extend_from_slice(&[0; 4]);
        data
    }

    #[test]
    fn little_endian_short_fields() {
        let data = tiff(
            false,
            &[
                entry(false, 254, 4, 0),
                entry(false, TAG_IMAGE_WIDTH, TYPE_SHORT, 6000),
                entry(false, TAG_IMAGE_LENGTH, TYPE_SHORT, 4000),
            ],
        );
        let dims = dimensions(&data).unwrap();
        assert_eq!((dims.width(), dims.height()), (6000, 4000));
    }

    #[test]
    fn big_endian_long_fields() {
        let data = tiff(
            true,
            &[
                entry(true, TAG_IMAGE_LENGTH, 4, 5504),
                entry(true, TAG_IMAGE_WIDTH, 4, 8256),
            ],
        );
        let dims = dimensions(&data).unwrap();
        assert_eq!((dims.width(), dims.height()), (8256, 5504));
    }

    #[test]
    fn missing_height_is_absent() {
        let data = tiff(false, &[entry(false, TAG_IMAGE_WIDTH, TYPE_SHORT, 6000)]);
        assert_eq!(dimensions(&data), None);
    }

    #[test]
    fn bogus_offsets_are_absent() {
        assert_eq!(dimensions(b"II*\0\xff\xff\xff\x7f"), None);
        let mut data = tiff(false, &[entry(false, TAG_IMAGE_WIDTH, TYPE_SHORT, 10)]);
        // Entry count claims far more entries than the buffer holds.
        data[8] = 0xFF;
        data[9] = 0xFF;
        assert_eq!(dimensions(&data), None);
        assert_eq!(dimensions(b"XX*\0"), None);
    }
}
