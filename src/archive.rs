//! Zip packaging of the metadata document and the raw scalar payload

use crate::array::NdArray;
use crate::error::{PackError, Result};
use crate::metadata::ImageDataDescriptor;
use bytes::Bytes;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Archive path of the metadata document
pub const INDEX_ENTRY: &str = "index.json";

/// Archive path of the raw scalar payload
pub const PAYLOAD_ENTRY: &str = "data/volume";

/// One named file inside an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub bytes: Bytes,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }
}

/// Package `metadata` and the element buffer of `reordered` into a zip archive.
///
/// `index.json` is compact UTF-8 JSON; `data/volume` is the buffer verbatim.
/// Both entries are stored uncompressed.
pub fn assemble(metadata: &ImageDataDescriptor, reordered: &NdArray) -> Result<Bytes> {
    assemble_with(metadata, reordered, false)
}

/// Same as [`assemble`], optionally indenting `index.json`
pub fn assemble_with(
    metadata: &ImageDataDescriptor,
    reordered: &NdArray,
    pretty: bool,
) -> Result<Bytes> {
    let index = if pretty {
        serde_json::to_vec_pretty(metadata)?
    } else {
        serde_json::to_vec(metadata)?
    };

    write_archive(&[
        ArchiveEntry::new(INDEX_ENTRY, index),
        ArchiveEntry::new(PAYLOAD_ENTRY, reordered.bytes()),
    ])
}

/// Write `entries` in order into an in-memory zip archive
pub fn write_archive(entries: &[ArchiveEntry]) -> Result<Bytes> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in entries {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .large_file(entry.bytes.len() as u64 >= u32::MAX as u64);
        writer.start_file(entry.path.as_str(), options)?;
        writer.write_all(&entry.bytes)?;
    }

    let cursor = writer.finish()?;
    Ok(Bytes::from(cursor.into_inner()))
}

/// Unpack every entry of an archive, in archive order
pub fn read_archive(bytes: &[u8]) -> Result<Vec<ArchiveEntry>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        entries.push(ArchiveEntry::new(file.name(), contents));
    }

    Ok(entries)
}

/// Find an entry by path
pub fn find_entry<'a>(entries: &'a [ArchiveEntry], path: &str) -> Result<&'a ArchiveEntry> {
    entries
        .iter()
        .find(|e| e.path == path)
        .ok_or_else(|| PackError::Archive(format!("Missing archive entry: {}", path)))
}
