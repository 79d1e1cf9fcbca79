//! Drawing primitives.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl HAlign {
    /// Parse a style alignment value; unknown values are `None`.
    pub fn parse(value: &str) -> Option<HAlign> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(HAlign::Left),
            "center" | "centre" | "middle" => Some(HAlign::Center),
            "right" | "end" => Some(HAlign::Right),
            "justify" => Some(HAlign::Justify),
            _ => None,
        }
    }
}

/// Vertical text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Text formatting for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in points
    pub font_size: f64,

    /// Hex color without `#`
    pub color: String,

    #[serde(default)]
    pub bold: bool,

    #[serde(default)]
    pub italic: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_face: Option<String>,

    #[serde(default)]
    pub align: HAlign,

    #[serde(default)]
    pub valign: VAlign,

    /// Line spacing multiple
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,

    /// Space before each paragraph, in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub para_space_before: Option<f64>,

    /// Space after each paragraph, in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub para_space_after: Option<f64>,

    /// Inner margins in points: top, right, bottom, left
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<[f64; 4]>,

    /// Box fill behind the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

impl TextStyle {
    /// Create a style with size and color; everything else default.
    pub fn new(font_size: f64, color: impl Into<String>) -> Self {
        Self {
            font_size,
            color: color.into(),
            bold: false,
            italic: false,
            font_face: None,
            align: HAlign::Left,
            valign: VAlign::Middle,
            line_spacing: None,
            para_space_before: None,
            para_space_after: None,
            margin: None,
            fill: None,
        }
    }

    /// Set bold.
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic.
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set horizontal alignment.
    pub fn align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    /// Set vertical alignment.
    pub fn valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }

    /// Set font face.
    pub fn font_face(mut self, face: impl Into<String>) -> Self {
        self.font_face = Some(face.into());
        self
    }

    /// Set line spacing multiple.
    pub fn line_spacing(mut self, spacing: f64) -> Self {
        self.line_spacing = Some(spacing);
        self
    }

    /// Set paragraph spacing before and after, in points.
    pub fn paragraph_spacing(mut self, before: f64, after: f64) -> Self {
        self.para_space_before = Some(before);
        self.para_space_after = Some(after);
        self
    }

    /// Set inner margins in points.
    pub fn margin(mut self, margin: [f64; 4]) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Set box fill.
    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }
}

/// A block of text at a fixed box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub rect: Rect,
    pub style: TextStyle,
}

impl TextRun {
    /// Create a text run.
    pub fn new(text: impl Into<String>, rect: Rect, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            rect,
            style,
        }
    }
}

/// Outline stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub color: String,
    /// Width in points
    pub width: f64,
}

impl Line {
    /// Create a stroke.
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

/// Preset geometry of a drawable shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Rect,
    Ellipse,
    Triangle,
    RightArrow,
    Star5,
    Cloud,
}

impl ShapeKind {
    /// Map a document shape name; unknown names are `None`.
    pub fn from_name(name: &str) -> Option<ShapeKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Some(ShapeKind::Rect),
            "circle" | "ellipse" => Some(ShapeKind::Ellipse),
            "triangle" => Some(ShapeKind::Triangle),
            "arrow" => Some(ShapeKind::RightArrow),
            "star" => Some(ShapeKind::Star5),
            "cloud" => Some(ShapeKind::Cloud),
            _ => None,
        }
    }
}

/// A filled and/or stroked shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub rect: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    /// Rotation in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
}

impl Shape {
    /// Create an unfilled shape.
    pub fn new(kind: ShapeKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            fill: None,
            line: None,
            rotate: None,
        }
    }

    /// A filled rectangle with an outline, used for panels.
    pub fn panel(rect: Rect, fill: &str, line: Line) -> Self {
        Self::new(ShapeKind::Rect, rect).with_fill(fill).with_line(line)
    }

    /// Set fill color.
    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    /// Set outline.
    pub fn with_line(mut self, line: Line) -> Self {
        self.line = Some(line);
        self
    }

    /// Set rotation.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

/// Where image bytes come from. The encoder does the fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ImageSource {
    Url(String),
    Path(String),
    Data(String),
}

/// How an image fits its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSizing {
    /// Scale to fit inside the box, keeping aspect ratio
    #[default]
    Contain,
}

/// An image fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub source: ImageSource,
    pub rect: Rect,
    pub sizing: ImageSizing,
}

/// A table with one header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub rect: Rect,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Column widths in inches
    pub column_widths: Vec<f64>,
    pub header_fill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Line>,
    pub font_size: f64,
    pub color: String,
}

impl Table {
    /// Number of columns (header width).
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// Chart family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Doughnut,
    Radar,
    Scatter,
    Bubble,
}

impl ChartKind {
    /// Map a document chart name; unknown names fall back to bar.
    pub fn from_name(name: &str) -> ChartKind {
        match name.trim().to_ascii_lowercase().as_str() {
            "line" => ChartKind::Line,
            "pie" => ChartKind::Pie,
            "doughnut" | "donut" => ChartKind::Doughnut,
            "radar" => ChartKind::Radar,
            "scatter" => ChartKind::Scatter,
            "bubble" => ChartKind::Bubble,
            _ => ChartKind::Bar,
        }
    }
}

/// One data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Validated chart input for the encoder to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub rect: Rect,
    pub series: Vec<ChartSeries>,
    pub colors: Vec<String>,
}

/// One drawing command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextRun),
    Shape(Shape),
    Image(Image),
    Table(Table),
    Chart(Chart),
}

impl Element {
    /// Bounding box of the element.
    pub fn rect(&self) -> Rect {
        match self {
            Element::Text(t) => t.rect,
            Element::Shape(s) => s.rect,
            Element::Image(i) => i.rect,
            Element::Table(t) => t.rect,
            Element::Chart(c) => c.rect,
        }
    }

    /// Text content if this is a text run.
    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Get the element type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Element::Text(_) => "text",
            Element::Shape(_) => "shape",
            Element::Image(_) => "image",
            Element::Table(_) => "table",
            Element::Chart(_) => "chart",
        }
    }
}

impl From<TextRun> for Element {
    fn from(run: TextRun) -> Self {
        Element::Text(run)
    }
}

impl From<Shape> for Element {
    fn from(shape: Shape) -> Self {
        Element::Shape(shape)
    }
}
