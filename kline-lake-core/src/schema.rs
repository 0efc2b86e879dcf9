use polars::prelude::*;

/// Number of fields in a Binance K-line record.
pub const COLUMN_COUNT: usize = 12;

/// Canonical K-line column order, as exported by Binance.
pub const KLINE_COLUMNS: [&str; COLUMN_COUNT] = [
    "open_time",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "close_time",
    "quote_volume",
    "count",
    "taker_buy_volume",
    "taker_buy_quote_volume",
    "ignore",
];

/// Columns holding epoch-millisecond timestamps on input.
pub const TIMESTAMP_COLUMNS: [&str; 2] = ["open_time", "close_time"];

/// Price and volume columns, stored as `Float64`.
pub const DECIMAL_COLUMNS: [&str; 8] = [
    "open",
    "high",
    "low",
    "close",
    "volume",
    "quote_volume",
    "taker_buy_volume",
    "taker_buy_quote_volume",
];

/// Expected schema for persisted K-line partitions
pub struct KlineSchema;

impl KlineSchema {
    /// Timestamp type written for `open_time` / `close_time`.
    pub fn timestamp_dtype() -> DataType {
        DataType::Datetime(TimeUnit::Milliseconds, None)
    }

    /// Get the canonical output schema, in column order.
    pub fn schema() -> Schema {
        Schema::from_iter(KLINE_COLUMNS.iter().map(|name| {
            let dtype = match *name {
                "open_time" | "close_time" => Self::timestamp_dtype(),
                "count" => DataType::Int64,
                "ignore" => DataType::String,
                _ => DataType::Float64,
            };
            Field::new((*name).into(), dtype)
        }))
    }

    /// Validate a projected DataFrame: exact column set, order and types.
    pub fn validate(df: &DataFrame) -> Result<(), SchemaError> {
        let expected = Self::schema();
        let actual = df.schema();

        for field in expected.iter_fields() {
            if !actual.contains(field.name()) {
                return Err(SchemaError::MissingColumn(field.name().to_string()));
            }
        }

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        if names != KLINE_COLUMNS {
            return Err(SchemaError::ColumnOrder {
                actual: names.iter().map(|n| n.to_string()).collect(),
            });
        }

        for field in expected.iter_fields() {
            let actual_dtype = actual
                .get(field.name())
                .ok_or_else(|| SchemaError::MissingColumn(field.name().to_string()))?;
            if actual_dtype != field.dtype() {
                return Err(SchemaError::TypeMismatch {
                    column: field.name().to_string(),
                    expected: field.dtype().clone(),
                    actual: actual_dtype.clone(),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Columns out of canonical order: {actual:?}")]
    ColumnOrder { actual: Vec<String> },

    #[error("Type mismatch in column {column}: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },
}
