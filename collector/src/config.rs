//! Command-line and environment configuration for `yt-collect`.

use crate::error::{Error, Result};
use crate::output;
use crate::youtube_api::DEFAULT_BASE_URL;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_KEY_FILE: &str = "api_key.txt";
pub const DEFAULT_REGION: &str = "GR";
pub const DEFAULT_LANGUAGE: &str = "el";
/// Daily budget a fresh API project starts with is 10 000 units; leave headroom.
pub const DEFAULT_QUOTA_CEILING: u64 = 6000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Collects YouTube search results for one region and video category into a CSV file.
#[derive(Debug, Clone, Parser)]
#[command(name = "yt-collect", version)]
pub struct Config {
    /// File holding the YouTube Data API key on its first line.
    #[arg(long, env = "YT_API_KEY_FILE", default_value = DEFAULT_KEY_FILE)]
    pub key_file: PathBuf,

    /// ISO 3166-1 alpha-2 region code to search in.
    #[arg(long, env = "YT_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// Language the category titles are listed in.
    #[arg(long, env = "YT_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Category id to collect; an empty value means all categories.
    /// Prompted for when not given.
    #[arg(long, env = "YT_CATEGORY")]
    pub category: Option<String>,

    /// Directory for the category and language listings and the default CSV.
    #[arg(long, env = "YT_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// CSV file to append video records to [default: <out-dir>/<REGION>.csv]
    #[arg(long, env = "YT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Stop before a search would take the quota spent by this run past this many units.
    #[arg(long, env = "YT_QUOTA_CEILING", default_value_t = DEFAULT_QUOTA_CEILING)]
    pub quota_ceiling: u64,

    #[arg(long, env = "YT_API_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "YT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Do not fetch and write the i18n language listing.
    #[arg(long)]
    pub skip_languages: bool,
}

impl Config {
    /// Region code as the API expects it (upper case).
    pub fn region(&self) -> String {
        self.region.trim().to_ascii_uppercase()
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => output::default_records_path(&self.out_dir, &self.region()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        let region = self.region();
        if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::Config(format!(
                "region must be a two-letter ISO 3166-1 code, got {:?}",
                self.region
            )));
        }
        if self.quota_ceiling == 0 {
            return Err(Error::Config("quota ceiling must be positive".into()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("yt-collect").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.key_file, PathBuf::from(DEFAULT_KEY_FILE));
        assert_eq!(config.region(), "GR");
        assert_eq!(config.language, "el");
        assert_eq!(config.category, None);
        assert_eq!(config.quota_ceiling, 6000);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output_path(), Path::new(".").join("GR.csv"));
        config.validate().unwrap();
    }

    #[test]
    fn overrides() {
        let config = parse(&[
            "--region",
            "us",
            "--category",
            "",
            "--out-dir",
            "/data",
            "--quota-ceiling",
            "9000",
        ]);
        assert_eq!(config.region(), "US");
        assert_eq!(config.category.as_deref(), Some(""));
        assert_eq!(config.quota_ceiling, 9000);
        assert_eq!(config.output_path(), PathBuf::from("/data/US.csv"));
    }

    #[test]
    fn explicit_output_wins() {
        let config = parse(&["--output", "runs/greece.csv"]);
        assert_eq!(config.output_path(), PathBuf::from("runs/greece.csv"));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        for args in [
            &["--region", "GRC"][..],
            &["--region", "1"][..],
            &["--quota-ceiling", "0"][..],
            &["--timeout-secs", "0"][..],
        ] {
            let err = parse(args).validate().unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{args:?}: {err:?}");
        }
    }
}
