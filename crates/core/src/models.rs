use serde::{Deserialize, Serialize};

pub const NO_TITLE: &str = "No Title";
pub const NO_KEYWORDS: &str = "No Keywords";

/// Descriptive metadata read from a media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub title: String,
    pub keywords: Vec<String>,
}

impl AssetMetadata {
    /// Placeholder pair substituted whenever extraction fails.
    pub fn fallback() -> Self {
        Self {
            title: NO_TITLE.to_string(),
            keywords: vec![NO_KEYWORDS.to_string()],
        }
    }

    pub fn is_usable(&self) -> bool {
        !self.title.is_empty() && !self.keywords.is_empty()
    }

    pub fn joined_keywords(&self) -> String {
        self.keywords.join(", ")
    }
}

/// A taxonomy entry, or the uncategorized marker (id 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub id: u32,
}

impl Category {
    pub const fn new(name: &'static str, id: u32) -> Self {
        Self { name, id }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.id == 0
    }
}

/// One row of the upload spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Keywords")]
    pub keywords: String,
    #[serde(rename = "Category")]
    pub category: u32,
    #[serde(rename = "Releases")]
    pub releases: String,
}

impl OutputRecord {
    pub fn new(filename: impl Into<String>, meta: &AssetMetadata, category: Category) -> Self {
        Self {
            filename: filename.into(),
            title: meta.title.clone(),
            keywords: meta.joined_keywords(),
            category: category.id,
            releases: String::new(),
        }
    }
}
