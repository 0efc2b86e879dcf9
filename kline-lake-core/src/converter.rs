//! Batch conversion over a `{symbol}/{interval}/*.zip` tree.

use std::fs;

use crate::config::ConverterConfig;
use crate::convert::convert_file;
use crate::error::ConvertError;
use crate::layout::{self, OutputLayout, UNKNOWN_DATE};
use crate::outcome::RunSummary;
use crate::progress::ConvertProgress;

/// Walks the input tree and converts every archive into its partition.
pub struct DataConverter {
    config: ConverterConfig,
}

impl DataConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Convert all archives under the input root, one at a time.
    ///
    /// Symbols, intervals and archives are visited in name order. Each
    /// interval's output directory is created before its archives are
    /// processed. Archives whose partition already exists are skipped, which
    /// makes a rerun after an interruption pick up where it stopped.
    ///
    /// # Errors
    /// - [`ConvertError::InputRootMissing`] before anything is touched when
    ///   the input root does not exist.
    /// - Filesystem and writer faults, which end the run. Per-archive
    ///   conditions are tallied in the returned [`RunSummary`] instead.
    pub fn run(&self, progress: &dyn ConvertProgress) -> Result<RunSummary, ConvertError> {
        let input = &self.config.input_dir;
        if !input.exists() {
            return Err(ConvertError::InputRootMissing(input.clone()));
        }

        let output = OutputLayout::new(&self.config.output_dir);
        progress.on_run_start(input, output.root());
        fs::create_dir_all(output.root()).map_err(|e| ConvertError::io(output.root(), e))?;

        let symbols = layout::list_subdirs(input).map_err(|e| ConvertError::io(input, e))?;
        let total = symbols.len();
        let mut summary = RunSummary::default();

        for (i, (symbol, symbol_path)) in symbols.iter().enumerate() {
            progress.on_symbol_start(symbol, i, total);
            summary.symbols += 1;

            let intervals =
                layout::list_subdirs(symbol_path).map_err(|e| ConvertError::io(symbol_path, e))?;
            for (interval, interval_path) in &intervals {
                let interval_dir = output.interval_dir(symbol, interval);
                fs::create_dir_all(&interval_dir)
                    .map_err(|e| ConvertError::io(&interval_dir, e))?;
                summary.intervals += 1;

                let archives = layout::list_archives(interval_path)
                    .map_err(|e| ConvertError::io(interval_path, e))?;
                for archive in &archives {
                    let file_name = archive
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let date = layout::extract_date(&file_name);
                    if date == UNKNOWN_DATE {
                        tracing::debug!("no date in archive name: {}", archive.display());
                    }

                    let target = output.partition_path(symbol, interval, date);
                    let outcome = convert_file(archive, &target, interval)?;
                    progress.on_file_complete(archive, &outcome);
                    summary.record(&outcome);
                }
            }
        }

        progress.on_batch_complete(&summary);
        Ok(summary)
    }
}
