// File: crates/provenance-core/src/tags.rs

//! Structured metadata listing.
//!
//! Unlike the textual heuristics this parses the container properly, so it
//! can fail. It is a companion view for the report and never feeds the
//! score.

use crate::format::ContainerFormat;
use crate::{MetadataEntry, ProvenanceError};
use nom_exif::{ExifIter, MediaParser, MediaSource};
use std::io::Cursor;

/// Category used for EXIF entries from the GPS IFD.
pub const GPS_CATEGORY: &str = "GPS";

/// Something that can list the tagged metadata of one container family.
pub trait TagReader {
    fn read_tags(&self, data: &[u8]) -> Result<Vec<MetadataEntry>, ProvenanceError>;
}

/// EXIF reader for JPEG and TIFF, backed by `nom-exif`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifTagReader;

/// Textual chunk reader for PNG, backed by the `png` decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngTextReader;

/// Picks the reader for a container format.
pub fn reader_for(format: ContainerFormat) -> Result<Box<dyn TagReader>, ProvenanceError> {
    match format {
        ContainerFormat::Jpeg | ContainerFormat::Tiff => Ok(Box::new(ExifTagReader)),
        ContainerFormat::Png => Ok(Box::new(PngTextReader)),
        other => Err(ProvenanceError::UnsupportedFileType(format!(
            "no tag reader for {other} files"
        ))),
    }
}

/// Sniffs `data` and lists its metadata entries.
pub fn read_tags(data: &[u8]) -> Result<Vec<MetadataEntry>, ProvenanceError> {
    reader_for(ContainerFormat::sniff(data))?.read_tags(data)
}

fn ifd_category(index: usize) -> String {
    match index {
        0 => "IFD0".to_string(),
        1 => "IFD1".to_string(),
        2 => "EXIF".to_string(),
        3 => GPS_CATEGORY.to_string(),
        4 => "Interop".to_string(),
        n => format!("IFD_{n}"),
    }
}

impl TagReader for ExifTagReader {
    fn read_tags(&self, data: &[u8]) -> Result<Vec<MetadataEntry>, ProvenanceError> {
        let source = MediaSource::seekable(Cursor::new(data)).map_err(|e| {
            ProvenanceError::ParsingError(format!("failed to open media source: {e:?}"))
        })?;
        if !source.has_exif() {
            return Ok(Vec::new());
        }

        let mut parser = MediaParser::new();
        let entries: ExifIter = parser
            .parse(source)
            .map_err(|e| ProvenanceError::ParsingError(format!("failed to parse EXIF: {e:?}")))?;

        Ok(entries
            .map(|entry| MetadataEntry {
                key: entry
                    .tag()
                    .map(|tag| format!("{tag:?}"))
                    .unwrap_or_else(|| "<Unknown Tag>".to_string()),
                value: entry
                    .get_value()
                    .map(|value| format!("{value:?}"))
                    .unwrap_or_else(|| "<No Value>".to_string()),
                category: ifd_category(entry.ifd_index()),
            })
            .collect())
    }
}

impl TagReader for PngTextReader {
    fn read_tags(&self, data: &[u8]) -> Result<Vec<MetadataEntry>, ProvenanceError> {
        let decoder = ::png::Decoder::new(Cursor::new(data));
        let reader = decoder
            .read_info()
            .map_err(|e| ProvenanceError::ParsingError(e.to_string()))?;
        let info = reader.info();

        let mut entries = Vec::new();
        for chunk in &info.uncompressed_latin1_text {
            entries.push(MetadataEntry {
                key: chunk.keyword.clone(),
                value: chunk.text.clone(),
                category: "tEXt".to_string(),
            });
        }
        for chunk in &info.compressed_latin1_text {
            let value = chunk
                .get_text()
                .map_err(|e| ProvenanceError::ParsingError(e.to_string()))?;
            entries.push(MetadataEntry {
                key: chunk.keyword.clone(),
                value,
                category: "zTXt".to_string(),
            });
        }
        for chunk in &info.utf8_text {
            let value = chunk
                .get_text()
                .map_err(|e| ProvenanceError::ParsingError(e.to_string()))?;
            entries.push(MetadataEntry {
                key: chunk.keyword.clone(),
                value,
                category: "iTXt".to_string(),
            });
        }
        Ok(entries)
    }
}
