//! Single-archive conversion: zip → normalized K-lines → Parquet partition.

use polars::prelude::*;
use std::fs;
use std::path::Path;

use crate::archive;
use crate::continuity::check_continuity;
use crate::error::ConvertError;
use crate::normalize::Normalizer;
use crate::outcome::ConversionOutcome;
use crate::parse::RawKlines;
use crate::schema::KlineSchema;

/// Convert one daily archive into the partition at `output`.
///
/// `interval` is the interval directory label; it only drives the continuity
/// diagnostic. Existing outputs are never touched, and a partition is either
/// written completely or not at all.
///
/// # Errors
/// Filesystem, CSV reader and Parquet writer faults. Expected per-file
/// conditions are returned as [`ConversionOutcome`] variants.
pub fn convert_file(
    archive_path: &Path,
    output: &Path,
    interval: &str,
) -> Result<ConversionOutcome, ConvertError> {
    if output.exists() {
        return Ok(ConversionOutcome::OutputExists);
    }

    let payload = match archive::read_payload(archive_path) {
        Ok(payload) => payload,
        Err(archive::ArchiveError::Open(source)) => {
            return Err(ConvertError::io(archive_path, source));
        }
        Err(e) => {
            tracing::warn!(
                "corrupt or non-zip archive, skipped: {} ({e})",
                archive_path.display()
            );
            return Ok(ConversionOutcome::ArchiveCorrupt {
                reason: e.to_string(),
            });
        }
    };

    let mut raw = RawKlines::parse(&payload)?;
    raw.strip_header_row();
    if raw.is_empty() {
        tracing::debug!("no rows in {}", archive_path.display());
        return Ok(ConversionOutcome::EmptyAfterFilter);
    }

    let frame = raw.into_dataframe().map_err(frame_err)?;
    let valid = Normalizer::drop_invalid_timestamps(Normalizer::coerce(frame.lazy()))
        .collect()
        .map_err(frame_err)?;
    if valid.height() == 0 {
        tracing::debug!("no valid timestamps in {}", archive_path.display());
        return Ok(ConversionOutcome::AllTimestampsInvalid);
    }

    let open_times = Normalizer::open_times_ms(&valid).map_err(frame_err)?;
    check_continuity(&open_times, interval);

    let mut klines = Normalizer::project(valid.lazy())
        .collect()
        .map_err(frame_err)?;
    KlineSchema::validate(&klines)?;

    write_parquet_atomic(&mut klines, output)?;
    Ok(ConversionOutcome::Success(klines.height()))
}

fn frame_err(e: PolarsError) -> ConvertError {
    ConvertError::Frame(e.to_string())
}

/// Write to `{output}.tmp`, then rename into place.
fn write_parquet_atomic(df: &mut DataFrame, output: &Path) -> Result<(), ConvertError> {
    let tmp_path = output.with_extension("parquet.tmp");

    let file = fs::File::create(&tmp_path).map_err(|e| ConvertError::io(&tmp_path, e))?;
    if let Err(e) = ParquetWriter::new(file).finish(df) {
        let _ = fs::remove_file(&tmp_path);
        return Err(ConvertError::ParquetError(format!(
            "write {}: {e}",
            output.display()
        )));
    }

    fs::rename(&tmp_path, output).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        ConvertError::io(output, e)
    })
}
