use polars::prelude::*;

use crate::schema::{KlineSchema, DECIMAL_COLUMNS, KLINE_COLUMNS, TIMESTAMP_COLUMNS};

/// Latest epoch millisecond accepted as a timestamp (2262-04-11).
///
/// Nanosecond datetimes stop here, so values past it are treated as
/// unparseable rather than persisted.
pub const MAX_TIMESTAMP_MS: i64 = i64::MAX / 1_000_000;

/// Earliest epoch millisecond accepted as a timestamp (1677-09-21).
pub const MIN_TIMESTAMP_MS: i64 = -MAX_TIMESTAMP_MS;

/// Normalizer for raw text K-line frames
pub struct Normalizer;

impl Normalizer {
    /// Coerce text columns to their numeric types.
    ///
    /// Timestamps become epoch milliseconds (`Int64`), accepting integer or
    /// decimal text. `count` goes through `Float64` too, so `"14233.0"` is
    /// kept. Any cell that fails to parse becomes null; `ignore` is left
    /// untouched.
    pub fn coerce(df: LazyFrame) -> LazyFrame {
        let mut exprs: Vec<Expr> = TIMESTAMP_COLUMNS
            .iter()
            .map(|name| {
                col(*name)
                    .cast(DataType::Float64)
                    .cast(DataType::Int64)
            })
            .collect();
        exprs.extend(
            DECIMAL_COLUMNS
                .iter()
                .map(|name| col(*name).cast(DataType::Float64)),
        );
        exprs.push(
            col("count")
                .cast(DataType::Float64)
                .cast(DataType::Int64),
        );

        df.with_columns(exprs)
    }

    /// Drop rows whose `open_time` or `close_time` failed coercion or lies
    /// outside `MIN_TIMESTAMP_MS..=MAX_TIMESTAMP_MS`.
    pub fn drop_invalid_timestamps(df: LazyFrame) -> LazyFrame {
        df.filter(valid_timestamp("open_time").and(valid_timestamp("close_time")))
    }

    /// Turn millisecond timestamps into datetimes and select the canonical
    /// columns in canonical order.
    pub fn project(df: LazyFrame) -> LazyFrame {
        df.with_columns(
            TIMESTAMP_COLUMNS
                .iter()
                .map(|name| col(*name).cast(KlineSchema::timestamp_dtype()))
                .collect::<Vec<_>>(),
        )
        .select(KLINE_COLUMNS.map(col))
    }

    /// Open times in epoch milliseconds, in row order.
    ///
    /// Expects a coerced frame; nulls are skipped.
    pub fn open_times_ms(df: &DataFrame) -> PolarsResult<Vec<i64>> {
        let open_time = df.column("open_time")?.cast(&DataType::Int64)?;
        Ok(open_time.i64()?.into_iter().flatten().collect())
    }
}

fn valid_timestamp(name: &str) -> Expr {
    col(name)
        .is_not_null()
        .and(col(name).gt_eq(lit(MIN_TIMESTAMP_MS)))
        .and(col(name).lt_eq(lit(MAX_TIMESTAMP_MS)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::RawKlines;

    fn frame(payload: &str) -> LazyFrame {
        RawKlines::parse(payload.as_bytes())
            .unwrap()
            .into_dataframe()
            .unwrap()
            .lazy()
    }

    #[test]
    fn coerces_numeric_text() {
        let df = Normalizer::coerce(frame(
            "1710460800000,71000.5,71400,70900.1,71250,812.4,1710464399999.0,5.78e7,14233,401.2,28500000,0\n",
        ))
        .collect()
        .unwrap();

        let open_time = df.column("open_time").unwrap().i64().unwrap().get(0);
        assert_eq!(open_time, Some(1_710_460_800_000));
        let close_time = df.column("close_time").unwrap().i64().unwrap().get(0);
        assert_eq!(close_time, Some(1_710_464_399_999));
        let high = df.column("high").unwrap().f64().unwrap().get(0);
        assert_eq!(high, Some(71_400.0));
        let quote = df.column("quote_volume").unwrap().f64().unwrap().get(0);
        assert_eq!(quote, Some(57_800_000.0));
        let count = df.column("count").unwrap().i64().unwrap().get(0);
        assert_eq!(count, Some(14_233));
        assert_eq!(df.column("ignore").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn unparseable_timestamps_become_null_and_are_dropped() {
        let payload = "\
1710460800000,1,1,1,1,1,1710464399999,1,1,1,1,0
garbage,1,1,1,1,1,1710467999999,1,1,1,1,0
1710468000000,1,1,1,1,1,,1,1,1,1,0
1710471600000,1,1,1,1,1,1710475199999,1,1,1,1,0
";
        let coerced = Normalizer::coerce(frame(payload)).collect().unwrap();
        assert_eq!(coerced.column("open_time").unwrap().null_count(), 1);
        assert_eq!(coerced.column("close_time").unwrap().null_count(), 1);

        let filtered = Normalizer::drop_invalid_timestamps(coerced.lazy())
            .collect()
            .unwrap();
        assert_eq!(filtered.height(), 2);
        assert_eq!(
            Normalizer::open_times_ms(&filtered).unwrap(),
            vec![1_710_460_800_000, 1_710_471_600_000]
        );
    }

    #[test]
    fn bad_prices_stay_as_nulls_without_dropping_rows() {
        let payload = "1710460800000,n/a,1,1,1,1,1710464399999,1,lots,1,1,0\n";
        let df = Normalizer::drop_invalid_timestamps(Normalizer::coerce(frame(payload)))
            .collect()
            .unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("open").unwrap().null_count(), 1);
        assert_eq!(df.column("count").unwrap().null_count(), 1);
    }

    #[test]
    fn out_of_range_timestamps_are_dropped() {
        let payload = "\
1710460800000,1,1,1,1,1,1710464399999,1,1,1,1,0
99999999999999999,1,1,1,1,1,1710467999999,1,1,1,1,0
1710468000000,1,1,1,1,1,-99999999999999999,1,1,1,1,0
9223372036854,1,1,1,1,1,9223372036854,1,1,1,1,0
";
        let df = Normalizer::drop_invalid_timestamps(Normalizer::coerce(frame(payload)))
            .collect()
            .unwrap();
        assert_eq!(
            Normalizer::open_times_ms(&df).unwrap(),
            vec![1_710_460_800_000, MAX_TIMESTAMP_MS]
        );
    }

    #[test]
    fn decimal_count_text_is_kept() {
        let payload = "1710460800000,1,1,1,1,1,1710464399999,1,14233.0,1,1,0\n";
        let df = Normalizer::coerce(frame(payload)).collect().unwrap();
        assert_eq!(df.column("count").unwrap().i64().unwrap().get(0), Some(14_233));
    }

    #[test]
    fn projection_matches_output_schema() {
        let lf = Normalizer::drop_invalid_timestamps(Normalizer::coerce(frame(
            "1710460800000,1,2,0.5,1.5,10,1710464399999,15,3,4,6,0\n",
        )));
        let df = Normalizer::project(lf).collect().unwrap();

        assert!(KlineSchema::validate(&df).is_ok());
        assert_eq!(Normalizer::open_times_ms(&df).unwrap(), vec![1_710_460_800_000]);
    }
}
