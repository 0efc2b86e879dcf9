//! Reading the CSV payload out of a daily K-line archive.

use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;
use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("cannot open archive: {0}")]
    Open(#[source] io::Error),

    #[error("not a valid zip archive: {0}")]
    Zip(#[from] ZipError),

    #[error("archive holds no file entries")]
    NoPayload,

    #[error("payload could not be decompressed: {0}")]
    Decompress(#[source] io::Error),
}

/// Read the CSV payload of an archive into memory.
///
/// Picks the first entry ending in `.csv`, falling back to the first file
/// entry when none is named that way.
pub fn read_payload(path: &Path) -> Result<Vec<u8>, ArchiveError> {
    let file = File::open(path).map_err(ArchiveError::Open)?;
    let mut archive = ZipArchive::new(file)?;

    let index = payload_index(&mut archive)?.ok_or(ArchiveError::NoPayload)?;
    let mut entry = archive.by_index(index)?;

    // Declared sizes come from the archive itself and are not trusted.
    let mut payload = Vec::new();
    entry
        .read_to_end(&mut payload)
        .map_err(ArchiveError::Decompress)?;
    Ok(payload)
}

fn payload_index<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Option<usize>, ZipError> {
    let mut first_file = None;
    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        if entry.is_dir() {
            continue;
        }
        if entry.name().to_ascii_lowercase().ends_with(".csv") {
            return Ok(Some(i));
        }
        first_file.get_or_insert(i);
    }
    Ok(first_file)
}
