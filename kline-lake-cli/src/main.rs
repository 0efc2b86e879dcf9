//! kline-lake CLI — convert daily Binance K-line archives into Parquet partitions.
//!
//! Reads `{input}/{symbol}/{interval}/*.zip` and writes
//! `{output}/{symbol}/{interval}/{symbol}-{interval}-{date}.parquet`.
//! Partitions that already exist are left alone, so reruns are safe.

use anyhow::Result;
use clap::Parser;
use kline_lake_core::config::{default_input_dir, default_output_dir};
use kline_lake_core::{ConvertError, ConverterConfig, DataConverter, StdoutProgress};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "kline-lake",
    about = "Convert daily Binance K-line zip archives into Parquet partitions"
)]
struct Cli {
    /// Raw archive root ({symbol}/{interval}/*.zip).
    #[arg(long, default_value_os_t = default_input_dir())]
    input: PathBuf,

    /// Output root for Parquet partitions.
    #[arg(long, default_value_os_t = default_output_dir())]
    output: PathBuf,
}

impl Cli {
    fn into_config(self) -> ConverterConfig {
        ConverterConfig::new(self.input, self.output)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let converter = DataConverter::new(Cli::parse().into_config());

    match converter.run(&StdoutProgress) {
        Ok(_) => Ok(()),
        Err(ConvertError::InputRootMissing(path)) => {
            tracing::error!("input directory does not exist: {}", path.display());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
