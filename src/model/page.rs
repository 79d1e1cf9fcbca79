//! Page-level types.

use super::style::lenient_number;
use super::ContentItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout names that older documents use and that place items in the
/// default content box.
pub const LEGACY_LAYOUTS: [&str; 8] = [
    "title",
    "content",
    "section",
    "comparison",
    "timeline",
    "quote",
    "image-focus",
    "process",
];

/// Page layout mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Layout {
    /// Absolute grid cells addressed by `gridArea`
    #[default]
    Grid,
    /// Named left/center/right slots
    ComponentGrid,
    /// Even items left, odd items right
    TwoColumn,
    /// Items cycle through three columns
    ThreeColumn,
    /// Every item fills the content area
    FullWidth,
    /// Legacy or unrecognized name, placed in the default box
    Other(String),
}

impl Layout {
    /// Get the layout name as written in documents.
    pub fn as_str(&self) -> &str {
        match self {
            Layout::Grid => "grid",
            Layout::ComponentGrid => "component-grid",
            Layout::TwoColumn => "two-column",
            Layout::ThreeColumn => "three-column",
            Layout::FullWidth => "full-width",
            Layout::Other(name) => name,
        }
    }

    /// Check if this is one of the known legacy layout names.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Layout::Other(name) if LEGACY_LAYOUTS.contains(&name.as_str()))
    }
}

impl From<String> for Layout {
    fn from(s: String) -> Self {
        match s.as_str() {
            "grid" => Layout::Grid,
            "component-grid" => Layout::ComponentGrid,
            "two-column" => Layout::TwoColumn,
            "three-column" => Layout::ThreeColumn,
            "full-width" => Layout::FullWidth,
            _ => Layout::Other(s),
        }
    }
}

impl From<&str> for Layout {
    fn from(s: &str) -> Self {
        Layout::from(s.to_string())
    }
}

impl From<Layout> for String {
    fn from(layout: Layout) -> Self {
        layout.as_str().to_string()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid configuration for `grid` pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    /// Number of column tracks (default 12)
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub columns: Option<f64>,

    /// Editor gap in abstract units; the slide canvas uses a fixed inch gap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,

    /// Per-column width weights ("1fr", "2fr", "auto")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_definitions: Vec<ColumnDefinition>,
}

impl GridConfig {
    /// Default column count when none is configured.
    pub const DEFAULT_COLUMNS: u32 = 12;

    /// Create a config with the given column count.
    pub fn with_columns(columns: u32) -> Self {
        Self {
            columns: Some(f64::from(columns)),
            ..Default::default()
        }
    }

    /// Column count, defaulting to 12.
    ///
    /// Negative or fractional counts are unusable and read as 0, which no
    /// grid area can be placed on.
    pub fn columns(&self) -> u32 {
        match self.columns {
            None => Self::DEFAULT_COLUMNS,
            Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) => n as u32,
            Some(n) => {
                log::debug!("Unusable grid column count {}", n);
                0
            }
        }
    }
}

/// Width definition for one grid column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
}

/// Page background.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    /// Image path or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Slide transition hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Transition name (fade, slide, zoom, bounce, none)
    #[serde(rename = "type")]
    pub kind: String,

    /// Duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// A single page of the deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Layout mode (default "grid")
    #[serde(default)]
    pub layout: Layout,

    /// Section name, for grouping only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_config: Option<GridConfig>,

    /// Content items in document order
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

impl Page {
    /// Create an empty page with the given layout.
    pub fn new(layout: impl Into<Layout>) -> Self {
        Self {
            layout: layout.into(),
            ..Default::default()
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Set the grid configuration.
    pub fn with_grid_config(mut self, config: GridConfig) -> Self {
        self.grid_config = Some(config);
        self
    }

    /// Append a content item.
    pub fn add_item(&mut self, item: ContentItem) {
        self.content.push(item);
    }

    /// Builder form of [`Page::add_item`].
    pub fn with_item(mut self, item: ContentItem) -> Self {
        self.content.push(item);
        self
    }

    /// Title if present and not blank.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Subtitle if present and not blank.
    pub fn display_subtitle(&self) -> Option<&str> {
        self.subtitle
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Column count of the grid (12 when unconfigured).
    pub fn grid_columns(&self) -> u32 {
        self.grid_config
            .as_ref()
            .map(GridConfig::columns)
            .unwrap_or(GridConfig::DEFAULT_COLUMNS)
    }

    /// Check if the page has no content items.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
