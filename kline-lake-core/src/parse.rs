use polars::prelude::*;

use crate::schema::{COLUMN_COUNT, KLINE_COLUMNS};

/// One CSV line, cut or padded to the canonical width. Empty cells are `None`.
pub type RawRow = [Option<String>; COLUMN_COUNT];

/// Text rows of a K-line payload, before any typing.
///
/// Rows with fewer than twelve fields are padded with `None`; fields past the
/// twelfth are dropped. Blank lines are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawKlines {
    rows: Vec<RawRow>,
}

impl RawKlines {
    /// Parse a headerless CSV payload.
    pub fn parse(payload: &[u8]) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(payload);

        let mut rows = Vec::new();
        for record in reader.byte_records() {
            let record = record?;
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }
            let mut row: RawRow = Default::default();
            for (cell, field) in row.iter_mut().zip(record.iter()) {
                if !field.is_empty() {
                    *cell = Some(String::from_utf8_lossy(field).into_owned());
                }
            }
            rows.push(row);
        }

        Ok(Self { rows })
    }

    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Whether the first row is a literal copy of the column names.
    pub fn has_header_row(&self) -> bool {
        self.rows.first().is_some_and(|first| {
            first
                .iter()
                .zip(KLINE_COLUMNS)
                .all(|(cell, name)| cell.as_deref() == Some(name))
        })
    }

    /// Drop an embedded header row. Returns whether one was removed.
    pub fn strip_header_row(&mut self) -> bool {
        if self.has_header_row() {
            self.rows.remove(0);
            true
        } else {
            false
        }
    }

    /// All twelve canonical columns as nullable `String` series.
    pub fn into_dataframe(self) -> PolarsResult<DataFrame> {
        let mut values: Vec<Vec<Option<String>>> = (0..COLUMN_COUNT)
            .map(|_| Vec::with_capacity(self.rows.len()))
            .collect();
        for row in self.rows {
            for (column, cell) in values.iter_mut().zip(row) {
                column.push(cell);
            }
        }

        DataFrame::new(
            KLINE_COLUMNS
                .iter()
                .zip(values)
                .map(|(name, column)| Column::new((*name).into(), column))
                .collect(),
        )
    }
}
