use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::graph::centrality::PageRankConfig;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy; command-line flags
/// override the directory settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `<person>_<category>.json` export files
    pub data_dir: PathBuf,
    /// Directory reports and exports are written to
    pub out_dir: PathBuf,
    pub pagerank: PageRankConfig,
    /// How many members terminal listings show before "... and N more"
    pub list_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            out_dir: PathBuf::from("./out"),
            pagerank: PageRankConfig::default(),
            list_limit: 20,
        }
    }
}

/// Read and parse an env var, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: {raw:?}")),
        _ => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default; only malformed numbers are an error.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let pagerank = PageRankConfig {
            damping_factor: parse_var("KINDRED_PAGERANK_DAMPING", defaults.pagerank.damping_factor)?,
            max_iterations: parse_var("KINDRED_PAGERANK_MAX_ITER", defaults.pagerank.max_iterations)?,
            tolerance: parse_var("KINDRED_PAGERANK_TOLERANCE", defaults.pagerank.tolerance)?,
        };

        let config = Self {
            data_dir: env::var("KINDRED_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            out_dir: env::var("KINDRED_OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.out_dir),
            pagerank,
            list_limit: parse_var("KINDRED_LIST_LIMIT", defaults.list_limit)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_dirs(mut self, data_dir: Option<PathBuf>, out_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(dir) = out_dir {
            self.out_dir = dir;
        }
        self
    }

    /// Check that the PageRank settings are usable.
    pub fn validate(&self) -> Result<()> {
        let damping = self.pagerank.damping_factor;
        if !(0.0..=1.0).contains(&damping) {
            anyhow::bail!("KINDRED_PAGERANK_DAMPING must be between 0 and 1, got {damping}");
        }
        if self.pagerank.max_iterations == 0 {
            anyhow::bail!("KINDRED_PAGERANK_MAX_ITER must be at least 1");
        }
        Ok(())
    }

    /// Check that the data directory exists before scanning it.
    pub fn require_data_dir(&self) -> Result<()> {
        if !self.data_dir.is_dir() {
            anyhow::bail!(
                "Data directory {} not found.\n\
                 Put <person>_followers.json, <person>_following.json and <person>_topics.json\n\
                 files there, or point KINDRED_DATA_DIR / --data at the right folder.",
                self.data_dir.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_bad_damping_rejected() {
        let mut config = Config::default();
        config.pagerank.damping_factor = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_dirs(Some(PathBuf::from("/in")), None);
        assert_eq!(config.data_dir, PathBuf::from("/in"));
        assert_eq!(config.out_dir, PathBuf::from("./out"));
    }
}
