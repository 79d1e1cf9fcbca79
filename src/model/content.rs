//! Content items and their payloads.

use super::style::lenient_number;
use super::{Dimension, Style};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The kind of a content item.
///
/// Thirteen drawable kinds, a reference to a shared component, and a
/// catch-all for anything else so that unknown strings never fail parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentKind {
    Text,
    Image,
    Table,
    Chart,
    List,
    Quote,
    Code,
    Video,
    Shape,
    Icon,
    Timeline,
    Process,
    Comparison,
    /// Reference to a shared component by id
    Component,
    /// Any unrecognized type name, kept verbatim
    Unknown(String),
}

impl ContentKind {
    /// The thirteen drawable kinds, in schema order.
    pub const DRAWABLE: [ContentKind; 13] = [
        ContentKind::Text,
        ContentKind::Image,
        ContentKind::Table,
        ContentKind::Chart,
        ContentKind::List,
        ContentKind::Quote,
        ContentKind::Code,
        ContentKind::Video,
        ContentKind::Shape,
        ContentKind::Icon,
        ContentKind::Timeline,
        ContentKind::Process,
        ContentKind::Comparison,
    ];

    /// Get the type name as written in documents.
    pub fn as_str(&self) -> &str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Image => "image",
            ContentKind::Table => "table",
            ContentKind::Chart => "chart",
            ContentKind::List => "list",
            ContentKind::Quote => "quote",
            ContentKind::Code => "code",
            ContentKind::Video => "video",
            ContentKind::Shape => "shape",
            ContentKind::Icon => "icon",
            ContentKind::Timeline => "timeline",
            ContentKind::Process => "process",
            ContentKind::Comparison => "comparison",
            ContentKind::Component => "component",
            ContentKind::Unknown(name) => name,
        }
    }

    /// Check if this kind is not one of the known names.
    pub fn is_unknown(&self) -> bool {
        matches!(self, ContentKind::Unknown(_))
    }
}

impl From<String> for ContentKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "text" => ContentKind::Text,
            "image" => ContentKind::Image,
            "table" => ContentKind::Table,
            "chart" => ContentKind::Chart,
            "list" => ContentKind::List,
            "quote" => ContentKind::Quote,
            "code" => ContentKind::Code,
            "video" => ContentKind::Video,
            "shape" => ContentKind::Shape,
            "icon" => ContentKind::Icon,
            "timeline" => ContentKind::Timeline,
            "process" => ContentKind::Process,
            "comparison" => ContentKind::Comparison,
            "component" => ContentKind::Component,
            _ => ContentKind::Unknown(s),
        }
    }
}

impl From<&str> for ContentKind {
    fn from(s: &str) -> Self {
        ContentKind::from(s.to_string())
    }
}

impl From<ContentKind> for String {
    fn from(kind: ContentKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid placement: 1-based, both ends inclusive.
///
/// Coordinates are read leniently so that a sloppy area never rejects the
/// whole document; [`GridArea::validate`] decides whether it can be placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridArea {
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub column_start: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub column_end: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub row_start: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub row_end: Option<f64>,
}

impl GridArea {
    /// Create a fully specified grid area.
    pub fn new(column_start: i32, column_end: i32, row_start: i32, row_end: i32) -> Self {
        Self {
            column_start: Some(f64::from(column_start)),
            column_end: Some(f64::from(column_end)),
            row_start: Some(f64::from(row_start)),
            row_end: Some(f64::from(row_end)),
        }
    }

    /// Describe why the area cannot be placed, if it cannot.
    ///
    /// Every coordinate must be present, a whole number and at least 1,
    /// and each end must not come before its start.
    pub fn validate(&self) -> Result<(), String> {
        let column_start = coordinate("columnStart", self.column_start)?;
        let column_end = coordinate("columnEnd", self.column_end)?;
        let row_start = coordinate("rowStart", self.row_start)?;
        let row_end = coordinate("rowEnd", self.row_end)?;

        if column_end < column_start {
            return Err(format!(
                "columnEnd {} is before columnStart {}",
                column_end, column_start
            ));
        }
        if row_end < row_start {
            return Err(format!(
                "rowEnd {} is before rowStart {}",
                row_end, row_start
            ));
        }
        Ok(())
    }
}

fn coordinate(name: &str, value: Option<f64>) -> Result<f64, String> {
    match value {
        None => Err(format!("{} is missing or not a number", name)),
        Some(n) if !n.is_finite() || n.fract() != 0.0 => {
            Err(format!("{} must be a whole number, got {}", name, n))
        }
        Some(n) if n < 1.0 => Err(format!("grid coordinates are 1-based ({} is {})", name, n)),
        Some(n) => Ok(n),
    }
}

/// Named slot on a component-grid page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NamedPosition {
    Left,
    Center,
    Right,
    /// Unrecognized slot name
    Other(String),
}

impl From<String> for NamedPosition {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => NamedPosition::Left,
            "center" | "centre" => NamedPosition::Center,
            "right" => NamedPosition::Right,
            _ => NamedPosition::Other(s),
        }
    }
}

impl From<NamedPosition> for String {
    fn from(pos: NamedPosition) -> Self {
        match pos {
            NamedPosition::Left => "left".into(),
            NamedPosition::Center => "center".into(),
            NamedPosition::Right => "right".into(),
            NamedPosition::Other(s) => s,
        }
    }
}

/// Alignment hints inside a grid cell. Carried but not used for layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAlignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<String>,
}

/// Explicit placement in inches or canvas percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: Dimension,
    pub y: Dimension,
    pub width: Dimension,
    pub height: Dimension,
}

/// Type-specific payload of a content item or component.
///
/// Every field is optional. Fields whose shape must be checked defensively
/// (tables, charts, lists, events) are kept as raw JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_caption: Option<String>,

    /// Rows of cells; the first row is the header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "header_color")]
    pub header_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<bool>,

    /// `{ type, labels, values }`
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "data")]
    pub chart_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "chart_type")]
    pub chart_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_items: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline_events: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_steps: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_items: Option<Value>,

    // Placement hints, written inside `content` by the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_area: Option<GridArea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<NamedPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<ItemAlignment>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub span: Option<f64>,
}

/// One visual element placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Content kind
    #[serde(rename = "type")]
    pub kind: ContentKind,

    /// Type-specific payload
    #[serde(default)]
    pub content: ContentPayload,

    /// Per-placement style overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,

    /// Item-level grid placement (payload placement takes precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_area: Option<GridArea>,

    /// Item-level named slot (payload slot takes precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<NamedPosition>,

    /// Explicit legacy placement, overrides the layout box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Frame>,
}

impl ContentItem {
    /// Create an item with an empty payload.
    pub fn new(kind: impl Into<ContentKind>) -> Self {
        Self {
            kind: kind.into(),
            content: ContentPayload::default(),
            style: None,
            grid_area: None,
            position: None,
            frame: None,
        }
    }

    /// Create a text item.
    pub fn text(text: impl Into<String>) -> Self {
        let mut item = Self::new(ContentKind::Text);
        item.content.text = Some(text.into());
        item
    }

    /// Create a reference to a shared component.
    pub fn component(id: impl Into<String>) -> Self {
        let mut item = Self::new(ContentKind::Component);
        item.content.component_id = Some(id.into());
        item
    }

    /// Set the grid placement.
    pub fn with_grid_area(mut self, area: GridArea) -> Self {
        self.content.grid_area = Some(area);
        self
    }

    /// Set the named slot.
    pub fn with_position(mut self, position: NamedPosition) -> Self {
        self.content.position = Some(position);
        self
    }

    /// Set the style overrides.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Effective grid placement.
    pub fn grid_area(&self) -> Option<GridArea> {
        self.content.grid_area.or(self.grid_area)
    }

    /// Effective named slot.
    pub fn position(&self) -> Option<&NamedPosition> {
        self.content.position.as_ref().or(self.position.as_ref())
    }

    /// Referenced component id, if any.
    pub fn component_id(&self) -> Option<&str> {
        self.content.component_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_string() {
        assert_eq!(ContentKind::from("chart"), ContentKind::Chart);
        assert_eq!(ContentKind::from("component"), ContentKind::Component);
        assert_eq!(
            ContentKind::from("hologram"),
            ContentKind::Unknown("hologram".into())
        );
        assert_eq!(ContentKind::DRAWABLE.len(), 13);
        assert!(ContentKind::DRAWABLE.iter().all(|k| !k.is_unknown()));
    }

    #[test]
    fn test_item_deserialize_unknown_type() {
        let item: ContentItem =
            serde_json::from_str(r#"{"type": "hologram", "content": {}}"#).unwrap();
        assert_eq!(item.kind.as_str(), "hologram");
        assert!(item.kind.is_unknown());
    }

    #[test]
    fn test_item_deserialize_placement_hints() {
        let item: ContentItem = serde_json::from_str(
            r#"{
                "type": "component",
                "content": {
                    "componentId": "header-text",
                    "gridArea": { "columnStart": 1, "columnEnd": 7, "rowStart": 1, "rowEnd": 2 },
                    "position": "left",
                    "alignment": { "horizontal": "center", "vertical": "center" }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(item.component_id(), Some("header-text"));
        assert_eq!(item.grid_area(), Some(GridArea::new(1, 7, 1, 2)));
        assert_eq!(item.position(), Some(&NamedPosition::Left));
    }

    #[test]
    fn test_table_rows_keep_raw_shape() {
        let item: ContentItem =
            serde_json::from_str(r#"{"type": "table", "content": {"headers": ["a"], "rows": 5}}"#)
                .unwrap();
        assert_eq!(item.content.rows, Some(Value::from(5)));
    }

    #[test]
    fn test_grid_area_validate() {
        assert!(GridArea::new(1, 12, 1, 1).validate().is_ok());
        assert!(GridArea::new(0, 2, 1, 1).validate().is_err());
        assert!(GridArea::new(3, 2, 1, 1).validate().is_err());
        assert!(GridArea::new(1, 2, 2, 1).validate().is_err());
    }

    #[test]
    fn test_partial_grid_area_still_parses() {
        let item: ContentItem = serde_json::from_str(
            r#"{"type": "text", "content": {"text": "x", "gridArea": {"columnStart": 1, "columnEnd": 6}}}"#,
        )
        .unwrap();
        let area = item.grid_area().unwrap();
        assert_eq!(area.column_end, Some(6.0));
        assert_eq!(area.row_start, None);
        assert_eq!(
            area.validate().unwrap_err(),
            "rowStart is missing or not a number"
        );
    }

    #[test]
    fn test_grid_area_number_forms() {
        let area: GridArea = serde_json::from_str(
            r#"{"columnStart": "2", "columnEnd": 6.0, "rowStart": 1, "rowEnd": 1}"#,
        )
        .unwrap();
        assert_eq!(area, GridArea::new(2, 6, 1, 1));
        assert!(area.validate().is_ok());

        let fractional: GridArea = serde_json::from_str(
            r#"{"columnStart": 1.5, "columnEnd": 6, "rowStart": 1, "rowEnd": 1}"#,
        )
        .unwrap();
        assert!(fractional.validate().unwrap_err().contains("whole number"));
    }

    #[test]
    fn test_named_position_other() {
        let pos = NamedPosition::from("top".to_string());
        assert_eq!(pos, NamedPosition::Other("top".into()));
        assert_eq!(String::from(NamedPosition::Right), "right");
    }
}
