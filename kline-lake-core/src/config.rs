//! Converter configuration.

use std::path::PathBuf;

/// Root of the operator's Binance data lake.
pub const DEFAULT_BASE_DIR: &str = "/mnt/unraid/TradingData/crypto/binance_data";

/// Dataset path shared by the raw and processed trees.
pub const DEFAULT_DATASET: &str = "data/futures/um/daily/klines";

/// `{base}/aws_data/{dataset}`
pub fn default_input_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BASE_DIR)
        .join("aws_data")
        .join(DEFAULT_DATASET)
}

/// `{base}/processed/{dataset}`
pub fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BASE_DIR)
        .join("processed")
        .join(DEFAULT_DATASET)
}

/// Where to read archives from and where to write partitions to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Source root: `{input_dir}/{symbol}/{interval}/*.zip`
    pub input_dir: PathBuf,
    /// Destination root, mirrored from the source tree.
    pub output_dir: PathBuf,
}

impl ConverterConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::new(default_input_dir(), default_output_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_follow_lake_convention() {
        let config = ConverterConfig::default();
        assert_eq!(
            config.input_dir,
            PathBuf::from("/mnt/unraid/TradingData/crypto/binance_data/aws_data/data/futures/um/daily/klines")
        );
        assert_eq!(
            config.output_dir,
            PathBuf::from("/mnt/unraid/TradingData/crypto/binance_data/processed/data/futures/um/daily/klines")
        );
    }
}
