use std::path::PathBuf;
use std::time::Duration;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{metadata, youtube};

pub const DEFAULT_LANG: &str = "en";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub default_lang: Option<String>,
    pub timestamps: Option<bool>,
    pub metadata_timeout_secs: Option<u64>,
    pub transcript_timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from ~/.config/ytextract/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    /// Preferred caption language; a CLI value wins over the file
    pub fn lang(&self, cli: Option<&str>) -> String {
        cli.or(self.default_lang.as_deref())
            .unwrap_or(DEFAULT_LANG)
            .to_string()
    }

    /// Whether to emit time markers; `--no-timestamps` wins over the file
    pub fn include_timestamps(&self, no_timestamps_flag: bool) -> bool {
        !no_timestamps_flag && self.timestamps.unwrap_or(true)
    }

    pub fn metadata_timeout(&self) -> Duration {
        self.metadata_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(metadata::DEFAULT_TIMEOUT)
    }

    pub fn transcript_timeout(&self) -> Duration {
        self.transcript_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(youtube::DEFAULT_TIMEOUT)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytextract")
        .join("config.toml")
}
