//! Progress reporting for batch conversions.

use std::path::Path;

use crate::outcome::{ConversionOutcome, RunSummary};

/// Progress callback for a conversion run.
pub trait ConvertProgress {
    /// Called once the input root has been found.
    fn on_run_start(&self, input: &Path, output: &Path);

    /// Called when starting on a symbol directory.
    fn on_symbol_start(&self, symbol: &str, index: usize, total: usize);

    /// Called after each archive.
    fn on_file_complete(&self, _archive: &Path, _outcome: &ConversionOutcome) {}

    /// Called when the whole tree is done.
    fn on_batch_complete(&self, summary: &RunSummary);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl ConvertProgress for StdoutProgress {
    fn on_run_start(&self, input: &Path, output: &Path) {
        println!("Converting: {}", input.display());
        println!("Output:     {}", output.display());
    }

    fn on_symbol_start(&self, symbol: &str, index: usize, total: usize) {
        println!("[{}/{}] {symbol}", index + 1, total);
    }

    fn on_batch_complete(&self, summary: &RunSummary) {
        println!();
        println!(
            "Done: {} symbol(s), {} archive(s)",
            summary.symbols, summary.archives
        );
        println!(
            "  written {} ({} rows), already present {}",
            summary.written, summary.rows_written, summary.already_present
        );
        if summary.skipped() > 0 {
            println!(
                "  skipped {}: {} corrupt, {} empty, {} without valid timestamps",
                summary.skipped(),
                summary.corrupt,
                summary.empty,
                summary.all_invalid
            );
        }
    }
}
