//! Flat `KEY = VALUE` configuration, layered through the `config` crate.

use crate::classifier::DEFAULT_MAX_TOKENS;
use config::{FileStoredFormat, Format, Map, Value, ValueKind};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub folder_path: String,
    pub output_csv: String,
    pub max_tokens: u32,
    pub exiftool_path: String,
}

impl AppConfig {
    pub fn has_api_key(&self) -> bool {
        !self.openai_api_key.trim().is_empty()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Invalid(#[from] config::ConfigError),
}

/// One `KEY = VALUE` pair per line. Lines without `=` are ignored, keys are
/// case-insensitive and everything after the first `=` is the value.
#[derive(Debug, Clone, Copy)]
pub struct KeyValueFormat;

impl Format for KeyValueFormat {
    fn parse(
        &self,
        uri: Option<&String>,
        text: &str,
    ) -> Result<Map<String, Value>, Box<dyn Error + Send + Sync>> {
        let mut map = Map::new();
        for line in text.lines() {
            if let Some((key, value)) = line.trim().split_once('=') {
                let key = key.trim().to_lowercase();
                if key.is_empty() {
                    continue;
                }
                map.insert(
                    key,
                    Value::new(uri, ValueKind::String(value.trim().to_string())),
                );
            }
        }
        Ok(map)
    }
}

impl FileStoredFormat for KeyValueFormat {
    fn file_extensions(&self) -> &'static [&'static str] {
        &["txt", "env"]
    }
}

pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    from_str(&text)
}

pub fn from_str(text: &str) -> Result<AppConfig, ConfigError> {
    let cfg = config::Config::builder()
        .set_default("openai_api_key", "")?
        .set_default("openai_model", "gpt-3.5-turbo")?
        .set_default("openai_base_url", "https://api.openai.com")?
        .set_default("folder_path", "./")?
        .set_default("output_csv", "output.csv")?
        .set_default("max_tokens", i64::from(DEFAULT_MAX_TOKENS))?
        .set_default("exiftool_path", "exiftool")?
        .add_source(config::File::from_str(text, KeyValueFormat))
        .build()?;
    Ok(cfg.try_deserialize()?)
}
