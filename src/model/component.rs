//! Shared component definitions.

use super::{ContentKind, ContentPayload, Style};
use serde::{Deserialize, Serialize};

/// A named, reusable content definition referenced by id from pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique key
    pub id: String,

    /// Content kind (one of the thirteen drawable kinds)
    #[serde(rename = "type")]
    pub kind: ContentKind,

    /// Human readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Type-specific payload
    #[serde(default)]
    pub content: ContentPayload,

    /// Base style, overridden per placement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl Component {
    /// Create a component with an empty payload.
    pub fn new(id: impl Into<String>, kind: impl Into<ContentKind>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            title: None,
            description: None,
            content: ContentPayload::default(),
            style: None,
        }
    }

    /// Set the payload.
    pub fn with_content(mut self, content: ContentPayload) -> Self {
        self.content = content;
        self
    }

    /// Set the base style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}
