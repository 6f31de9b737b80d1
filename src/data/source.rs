//! Dataset resolution and fetching.
//!
//! Each grouping scheme maps to exactly one CSV resource under a base
//! location. The base is either an HTTP(S) URL or a local directory; for
//! demos and tests a seeded synthetic source stands in for real files.

use std::path::PathBuf;

use reqwest::blocking::Client;

use crate::data::sample;
use crate::domain::GroupingScheme;
use crate::error::AppError;

/// Environment variable naming the base URL or directory of the datasets.
pub const BASE_ENV: &str = "SENTIMENT_DATA_BASE";

#[derive(Debug, Clone)]
pub enum DataSource {
    /// Fetch `<base>/<file>` over HTTP(S).
    Http { base: String },
    /// Read `<dir>/<file>` from the filesystem.
    Dir { path: PathBuf },
    /// Generate a deterministic synthetic dataset in memory.
    Sample { seed: u64 },
}

impl DataSource {
    /// Classify a base string: URLs fetch, anything else is a directory.
    pub fn from_base(base: &str) -> DataSource {
        let trimmed = base.trim().trim_end_matches('/');
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Http {
                base: trimmed.to_string(),
            }
        } else {
            DataSource::Dir {
                path: PathBuf::from(trimmed),
            }
        }
    }

    /// Resolve the base from the environment (`.env` supported).
    pub fn from_env() -> Result<DataSource, AppError> {
        dotenvy::dotenv().ok();
        let base = std::env::var(BASE_ENV).map_err(|_| {
            AppError::config(format!(
                "No data base configured: pass --base or set {BASE_ENV} (or use --sample)."
            ))
        })?;
        Ok(Self::from_base(&base))
    }

    /// Human-readable target of a fetch, for status lines and logs.
    pub fn describe(&self, scheme: GroupingScheme) -> String {
        match self {
            DataSource::Http { base } => format!("{base}/{}", scheme.csv_file()),
            DataSource::Dir { path } => path.join(scheme.csv_file()).display().to_string(),
            DataSource::Sample { seed } => format!("synthetic data (seed {seed})"),
        }
    }

    /// Fetch the raw CSV bytes for one scheme.
    ///
    /// `metric` only matters to the synthetic source, which writes a value
    /// column under that name so the bytes round-trip through normal ingest.
    pub fn fetch(&self, scheme: GroupingScheme, metric: &str) -> Result<Vec<u8>, AppError> {
        match self {
            DataSource::Http { base } => fetch_http(base, scheme),
            DataSource::Dir { path } => {
                let file = path.join(scheme.csv_file());
                std::fs::read(&file).map_err(|e| {
                    AppError::config(format!("Failed to open CSV '{}': {e}", file.display()))
                })
            }
            DataSource::Sample { seed } => sample::sample_csv(scheme, metric, *seed),
        }
    }
}

fn fetch_http(base: &str, scheme: GroupingScheme) -> Result<Vec<u8>, AppError> {
    let url = format!("{base}/{}", scheme.csv_file());
    let client = Client::new();
    let resp = client
        .get(&url)
        .send()
        .map_err(|e| AppError::runtime(format!("Fetch of {url} failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(AppError::runtime(format!(
            "Fetch of {url} failed with status {}.",
            resp.status()
        )));
    }

    resp.bytes()
        .map(|b| b.to_vec())
        .map_err(|e| AppError::runtime(format!("Failed to read body of {url}: {e}")))
}
