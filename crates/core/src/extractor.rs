//! Reads title and keywords from media files through an external metadata tool.

use crate::models::{AssetMetadata, NO_KEYWORDS, NO_TITLE};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, error, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to launch metadata tool: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("metadata tool exited with {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },
    #[error("error decoding JSON metadata: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("metadata tool returned no entries")]
    Empty,
}

#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    async fn read_metadata(&self, path: &Path) -> Result<AssetMetadata, ExtractError>;
}

/// Never fails: every error is logged and replaced by [`AssetMetadata::fallback`].
pub async fn extract(source: &dyn MetadataSource, path: &Path) -> AssetMetadata {
    match source.read_metadata(path).await {
        Ok(meta) => meta,
        Err(ExtractError::Empty) => {
            debug!(path = %path.display(), "no metadata entries");
            AssetMetadata::fallback()
        }
        Err(e @ ExtractError::NonZeroExit { .. }) => {
            warn!(path = %path.display(), "error executing metadata tool: {e}");
            AssetMetadata::fallback()
        }
        Err(e) => {
            error!(path = %path.display(), "{e}");
            AssetMetadata::fallback()
        }
    }
}

/// `exiftool -j <file>`
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ExifTool {
    fn default() -> Self {
        Self::new("exiftool")
    }
}

#[async_trait::async_trait]
impl MetadataSource for ExifTool {
    async fn read_metadata(&self, path: &Path) -> Result<AssetMetadata, ExtractError> {
        let output = Command::new(&self.program)
            .arg("-j")
            .arg(path)
            .output()
            .await?;

        if !output.status.success() {
            return Err(ExtractError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_json(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parses the tool's JSON array output, reading the first entry only.
pub fn parse_json(stdout: &str) -> Result<AssetMetadata, ExtractError> {
    let entries: Vec<Value> = serde_json::from_str(stdout)?;
    let first = entries.into_iter().next().ok_or(ExtractError::Empty)?;

    let title = match first.get("Title") {
        None => NO_TITLE.to_string(),
        Some(v) => scalar_to_string(v),
    };
    let keywords = match first.get("Keywords") {
        None => vec![NO_KEYWORDS.to_string()],
        Some(Value::Array(items)) => items.iter().map(scalar_to_string).collect(),
        Some(Value::Null) => Vec::new(),
        Some(v) => vec![scalar_to_string(v)],
    };

    Ok(AssetMetadata { title, keywords })
}

// exiftool emits bare numbers for numeric-looking values.
fn scalar_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
