// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
    pub net: NetConfig,
}

impl AppOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            scrape: ScrapeOptions::new(url),
            export: ExportOptions::default(),
            net: NetConfig::default(),
        }
    }

    /// Reject bad values up front so nothing is fetched for a doomed run.
    pub fn validate(&self) -> Result<()> {
        let url = self.scrape.url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(Error::Config(format!("Page URL must be http(s): {url}")));
        }
        let r = self.export.ratio;
        if !(0.0..=1.0).contains(&r) {
            return Err(Error::Config(format!("Split ratio must be within [0, 1], got {r}")));
        }
        if self.export.character_name.trim().is_empty() {
            return Err(Error::Config(s!("Character name must not be empty")));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Wiki page holding the voice-line table
    pub url: String,
    /// Prefix for manifest keys; empty means bare file names
    pub dataset_root: String,
    /// Extract and write manifests only
    pub skip_download: bool,
}

impl ScrapeOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            dataset_root: s!(DEFAULT_DATASET_ROOT),
            skip_download: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportOptions {
    pub speaker_id: u32,
    pub ratio: f64,
    pub character_name: String,
    pub out_dir: PathBuf,
    /// Fixed shuffle seed; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            speaker_id: DEFAULT_SPEAKER_ID,
            ratio: DEFAULT_RATIO,
            character_name: s!(DEFAULT_CHARACTER),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            seed: None,
        }
    }
}

impl ExportOptions {
    pub fn audio_dir(&self) -> PathBuf {
        self.out_dir.join(AUDIO_DIR)
    }

    pub fn train_path(&self) -> PathBuf {
        manifest_path(&self.out_dir, &self.character_name, TRAIN_SUFFIX)
    }

    pub fn val_path(&self) -> PathBuf {
        manifest_path(&self.out_dir, &self.character_name, VAL_SUFFIX)
    }
}

fn manifest_path(dir: &Path, name: &str, suffix: &str) -> PathBuf {
    dir.join(join!(name, suffix))
}

/// HTTP settings handed to the client instead of living in globals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            user_agent: s!(USER_AGENT),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}
