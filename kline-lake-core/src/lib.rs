//! kline-lake core — daily Binance K-line archives to Parquet partitions.
//!
//! This crate contains the whole conversion pipeline:
//! - Canonical 12-column K-line schema
//! - Input/output tree layout and archive-name date extraction
//! - Archive reading and tolerant CSV parsing with header repair
//! - Timestamp coercion and invalid-row filtering
//! - Continuity diagnostics against the interval's nominal spacing
//! - Per-archive conversion with atomic Parquet writes
//! - Batch walk over `{symbol}/{interval}/*.zip` with progress reporting

pub mod archive;
pub mod config;
pub mod continuity;
pub mod convert;
pub mod converter;
pub mod error;
pub mod interval;
pub mod layout;
pub mod normalize;
pub mod outcome;
pub mod parse;
pub mod progress;
pub mod schema;

pub use config::ConverterConfig;
pub use convert::convert_file;
pub use converter::DataConverter;
pub use error::ConvertError;
pub use outcome::{ConversionOutcome, RunSummary};
pub use progress::{ConvertProgress, StdoutProgress};
