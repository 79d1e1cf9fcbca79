//! Document-level types.

use super::{Component, Page};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Title used when a document carries none.
pub const UNTITLED: &str = "Untitled Presentation";

/// A declarative slide deck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Presentation {
    /// Deck metadata (title, author, theme, etc.)
    pub metadata: Metadata,

    /// Descriptive section groupings
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Reusable components referenced by id from pages
    #[serde(default)]
    pub components: Vec<Component>,

    /// Pages in presentation order
    pub pages: Vec<Page>,
}

/// Top-level wrapper: documents are `{ "presentation": { ... } }`.
#[derive(Debug, Deserialize)]
struct Envelope {
    presentation: Presentation,
}

impl Presentation {
    /// Create a new empty presentation.
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }

    /// Parse a presentation from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let envelope: Envelope = serde_json::from_str(json)?;
        Ok(envelope.presentation)
    }

    /// Parse a presentation from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let envelope: Envelope = serde_json::from_reader(reader)?;
        Ok(envelope.presentation)
    }

    /// Parse a presentation from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Serialize back into the `{ "presentation": ... }` envelope.
    pub fn to_json_string(&self) -> Result<String> {
        let value = serde_json::json!({ "presentation": self });
        serde_json::to_string_pretty(&value).map_err(Error::from)
    }

    /// Pull the title out of raw JSON without requiring a valid document.
    ///
    /// Falls back to "Untitled Presentation" on any parse failure.
    pub fn extract_title(json: &str) -> String {
        serde_json::from_str::<serde_json::Value>(json)
            .ok()
            .and_then(|v| {
                v.pointer("/presentation/metadata/title")
                    .and_then(|t| t.as_str())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Check structure the compiler cannot recover from meaningfully.
    ///
    /// Compilation itself never requires this; it backs `check`-style
    /// tooling.
    pub fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(Error::InvalidDocument("document has no pages".into()));
        }
        if let Some(index) = self.components.iter().position(|c| c.id.trim().is_empty()) {
            return Err(Error::InvalidDocument(format!(
                "component {} has an empty id",
                index + 1
            )));
        }
        Ok(())
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the presentation has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages that declare membership in the named section.
    pub fn pages_in_section<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a Page> {
        self.pages
            .iter()
            .filter(move |p| p.section.as_deref() == Some(section))
    }
}

/// Deck metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Deck title
    #[serde(default)]
    pub title: String,

    /// Deck author
    #[serde(default)]
    pub author: String,

    /// Free-form date string (usually `YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Theme name (light, dark, corporate, academic, creative)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Presentation language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Company name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Department name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl Metadata {
    /// Create metadata with title and author.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Default::default()
        }
    }

    /// Set the theme name.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Parse `date` as an ISO calendar date, if possible.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
            .ok()
    }

    /// Title with surrounding whitespace removed, or `None` when blank.
    pub fn display_title(&self) -> Option<&str> {
        let title = self.title.trim();
        (!title.is_empty()).then_some(title)
    }
}

/// A descriptive grouping of pages. Not consumed by layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Section {
    /// Section title
    pub title: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}
