//! Per-file conversion outcomes and the run tally.

/// What happened to one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// A partition was written with this many rows.
    Success(usize),
    /// The partition already exists; nothing was read or written.
    OutputExists,
    /// The archive could not be opened as a zip or its payload was unreadable.
    ArchiveCorrupt { reason: String },
    /// No rows left once the embedded header row was removed.
    EmptyAfterFilter,
    /// Every row had an unparseable `open_time` or `close_time`.
    AllTimestampsInvalid,
}

impl ConversionOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, ConversionOutcome::Success(_))
    }
}

/// Summary of a batch conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub symbols: usize,
    pub intervals: usize,
    pub archives: usize,
    pub written: usize,
    pub rows_written: usize,
    pub already_present: usize,
    pub corrupt: usize,
    pub empty: usize,
    pub all_invalid: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &ConversionOutcome) {
        self.archives += 1;
        match outcome {
            ConversionOutcome::Success(rows) => {
                self.written += 1;
                self.rows_written += rows;
            }
            ConversionOutcome::OutputExists => self.already_present += 1,
            ConversionOutcome::ArchiveCorrupt { .. } => self.corrupt += 1,
            ConversionOutcome::EmptyAfterFilter => self.empty += 1,
            ConversionOutcome::AllTimestampsInvalid => self.all_invalid += 1,
        }
    }

    /// Archives that produced no partition for a reason other than an
    /// existing output.
    pub fn skipped(&self) -> usize {
        self.corrupt + self.empty + self.all_invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_each_outcome() {
        let mut summary = RunSummary::default();
        summary.record(&ConversionOutcome::Success(24));
        summary.record(&ConversionOutcome::Success(23));
        summary.record(&ConversionOutcome::OutputExists);
        summary.record(&ConversionOutcome::ArchiveCorrupt {
            reason: "bad".into(),
        });
        summary.record(&ConversionOutcome::EmptyAfterFilter);
        summary.record(&ConversionOutcome::AllTimestampsInvalid);

        assert_eq!(summary.archives, 6);
        assert_eq!(summary.written, 2);
        assert_eq!(summary.rows_written, 47);
        assert_eq!(summary.already_present, 1);
        assert_eq!(summary.skipped(), 3);
    }
}
