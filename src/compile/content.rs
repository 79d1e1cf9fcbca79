//! Per-kind content compilation.
//!
//! Each content kind is turned into drawing primitives inside one resolved
//! box. Missing optional data produces a warning and no output; malformed
//! data that makes the item impossible to draw is an [`Error::Content`],
//! which the deck compiler replaces with [`error_element`].

use super::text::{char_len, TextNormalizer};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::model::{ContentKind, ContentPayload, Style};
use crate::plan::{
    Chart, ChartKind, ChartSeries, Element, HAlign, Image, ImageSizing, ImageSource, ItemOutcome,
    Line, Shape, ShapeKind, Table, TextRun, TextStyle, VAlign,
};
use crate::theme::ThemeColors;
use serde_json::{Map, Value};

const PLACEHOLDER_GRAY: &str = "999999";
const ERROR_RED: &str = "FF0000";
const PANEL_FILL: &str = "F5F5F5";
const PANEL_LINE: &str = "DDDDDD";
const DEFAULT_CHART_COLOR: &str = "FF5733";
const DEFAULT_HEADER_FILL: &str = "F1F1F1";

/// Everything needed to compile one item.
#[derive(Debug, Clone, Copy)]
pub struct ContentContext<'a> {
    pub kind: &'a ContentKind,
    pub payload: &'a ContentPayload,
    pub style: &'a Style,
    /// Resolved item box
    pub rect: Rect,
    pub colors: ThemeColors,
    /// Used as the chart series name
    pub page_title: Option<&'a str>,
    pub text: &'a TextNormalizer,
    pub long_text_threshold: usize,
}

impl ContentContext<'_> {
    fn fail(&self, message: impl Into<String>) -> Error {
        Error::content(self.kind.as_str(), message)
    }

    fn font_size(&self, default: f64) -> f64 {
        self.style.font_size_or(default)
    }

    fn alignment(&self) -> HAlign {
        self.style
            .alignment
            .as_deref()
            .and_then(HAlign::parse)
            .unwrap_or_default()
    }
}

/// Drawing primitives for one item plus anything worth reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compiled {
    pub elements: Vec<Element>,
    pub warnings: Vec<String>,
    /// Set when a placeholder was drawn instead of the requested content
    pub recovered: Option<String>,
}

impl Compiled {
    /// No output, with the reason as a warning.
    pub fn nothing(reason: impl Into<String>) -> Self {
        Self {
            warnings: vec![reason.into()],
            ..Default::default()
        }
    }

    fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn recover(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        self.warnings.push(reason.clone());
        self.recovered = Some(reason);
    }

    /// Outcome to report for the item.
    pub fn outcome(&self) -> ItemOutcome {
        if let Some(reason) = &self.recovered {
            ItemOutcome::Recovered {
                reason: reason.clone(),
            }
        } else if self.elements.is_empty() {
            ItemOutcome::Skipped {
                reason: self
                    .warnings
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "nothing to draw".to_string()),
            }
        } else {
            ItemOutcome::Rendered
        }
    }
}

/// Compile one resolved item.
pub fn compile_content(ctx: &ContentContext<'_>) -> Result<Compiled> {
    match ctx.kind {
        ContentKind::Text => compile_text(ctx),
        ContentKind::Image => Ok(compile_image(ctx)),
        ContentKind::Table => compile_table(ctx),
        ContentKind::Chart => compile_chart(ctx),
        ContentKind::List => compile_list(ctx),
        ContentKind::Quote => Ok(compile_quote(ctx)),
        ContentKind::Code => Ok(compile_code(ctx)),
        ContentKind::Video => Ok(compile_video(ctx)),
        ContentKind::Shape => Ok(compile_shape(ctx)),
        ContentKind::Icon => Ok(compile_icon(ctx)),
        ContentKind::Timeline => {
            compile_numbered(ctx, ctx.payload.timeline_events.as_ref(), "date", "event")
        }
        ContentKind::Process => {
            compile_numbered(ctx, ctx.payload.process_steps.as_ref(), "title", "description")
        }
        ContentKind::Comparison => compile_comparison(ctx),
        ContentKind::Component | ContentKind::Unknown(_) => {
            let mut out = Compiled::default();
            out.push(placeholder(
                format!("[Unknown content type: {}]", ctx.kind.as_str()),
                ctx.rect,
            ));
            out.recover(format!("unknown content type '{}'", ctx.kind.as_str()));
            Ok(out)
        }
    }
}

/// Gray centered text used for unknown kinds and missing components.
pub fn placeholder(text: impl Into<String>, rect: Rect) -> Element {
    Element::Text(TextRun::new(
        text,
        rect,
        TextStyle::new(14.0, PLACEHOLDER_GRAY)
            .align(HAlign::Center)
            .valign(VAlign::Middle),
    ))
}

/// Red text replacing an item that failed to compile.
pub fn error_element(kind: &ContentKind, error: &Error, rect: Rect) -> Element {
    let text = match error {
        Error::Content { .. } => error.to_string(),
        other => format!("Error creating {}: {}", kind.as_str(), other),
    };
    Element::Text(TextRun::new(
        text,
        rect,
        TextStyle::new(14.0, ERROR_RED).bold(true),
    ))
}

/// Check an image reference without fetching it.
///
/// Web URLs, data URIs, `file://` URIs and plain paths are accepted. Blank
/// values, script URIs and other schemes are rejected.
pub fn resolve_image_source(raw: &str) -> Option<ImageSource> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(ImageSource::Url(value.to_string()));
    }
    if lower.starts_with("data:") {
        return Some(ImageSource::Data(value.to_string()));
    }
    if lower.starts_with("file://") {
        let path = &value["file://".len()..];
        return (!path.is_empty()).then(|| ImageSource::Path(path.to_string()));
    }

    match lower.split_once(':') {
        // One letter before the colon is a Windows drive.
        Some((scheme, _)) if scheme.len() > 1 && is_scheme(scheme) => None,
        _ => Some(ImageSource::Path(value.to_string())),
    }
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn strip_hash(color: &str) -> String {
    color.trim().trim_start_matches('#').to_string()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn field_text(map: &Map<String, Value>, key: &str) -> String {
    map.get(key).map(cell_text).unwrap_or_default()
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn compile_text(ctx: &ContentContext<'_>) -> Result<Compiled> {
    let Some(raw) = non_blank(ctx.payload.text.as_deref()) else {
        return Ok(Compiled::nothing("text item has no text"));
    };

    let long = char_len(raw) > ctx.long_text_threshold;
    let (valign, spacing) = if long {
        (VAlign::Top, 8.0)
    } else {
        (VAlign::Middle, 5.0)
    };

    let style = TextStyle::new(ctx.font_size(16.0), ctx.colors.text)
        .bold(ctx.style.is_bold())
        .align(ctx.alignment())
        .valign(valign)
        .margin([12.0, 15.0, 12.0, 15.0])
        .line_spacing(1.5)
        .paragraph_spacing(spacing, spacing);

    let mut out = Compiled::default();
    out.push(TextRun::new(ctx.text.normalize(raw), ctx.rect, style));
    Ok(out)
}

fn compile_image(ctx: &ContentContext<'_>) -> Compiled {
    let rect = ctx.rect;
    let mut out = Compiled::default();
    let url = non_blank(ctx.payload.image_url.as_deref());

    match url.and_then(resolve_image_source) {
        Some(source) => out.push(Element::Image(Image {
            source,
            rect,
            sizing: ImageSizing::Contain,
        })),
        None => {
            out.push(Shape::panel(rect, "F0F0F0", Line::new("CCCCCC", 1.0)));
            out.push(placeholder("Image not available", rect));
            match url {
                Some(url) => out.recover(format!("image source '{}' is not usable", url)),
                None => out.recover("image item has no imageUrl"),
            }
        }
    }

    if let Some(caption) = non_blank(ctx.payload.image_caption.as_deref()) {
        out.push(TextRun::new(
            caption,
            Rect::new(rect.x, rect.bottom(), rect.w, 0.4),
            TextStyle::new(12.0, ctx.colors.text)
                .italic(true)
                .align(HAlign::Center),
        ));
    }
    out
}

fn compile_table(ctx: &ContentContext<'_>) -> Result<Compiled> {
    let payload = ctx.payload;
    let mut out = Compiled::default();

    let (header, body): (&Vec<Value>, Vec<&Value>) = if let Some(headers) = &payload.headers {
        let header = headers
            .as_array()
            .ok_or_else(|| ctx.fail("Table headers must be an array"))?;
        let body = match &payload.rows {
            None | Some(Value::Null) => {
                out.warn("table has headers but no rows, drawing the header only");
                Vec::new()
            }
            Some(Value::Array(rows)) => rows.iter().collect(),
            Some(_) => {
                out.warn("table rows are not an array, drawing the header only");
                Vec::new()
            }
        };
        (header, body)
    } else if let Some(data) = &payload.table_data {
        let data = data
            .as_array()
            .ok_or_else(|| ctx.fail("Table data must be an array"))?;
        let (first, rest) = data
            .split_first()
            .ok_or_else(|| ctx.fail("Table has no header"))?;
        let header = first
            .as_array()
            .ok_or_else(|| ctx.fail("Table headers must be an array"))?;
        (header, rest.iter().collect())
    } else {
        return Err(ctx.fail("Table has no header"));
    };

    if header.is_empty() {
        return Err(ctx.fail("Table has no header"));
    }

    let mut rows = Vec::with_capacity(body.len());
    for (index, row) in body.into_iter().enumerate() {
        match row.as_array() {
            Some(cells) => rows.push(cells.iter().map(cell_text).collect()),
            None => out.warn(format!("skipping non-array table row {}", index + 1)),
        }
    }

    let columns = header.len();
    let header_fill = payload
        .header_color
        .as_deref()
        .map(strip_hash)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_HEADER_FILL.to_string());

    out.push(Element::Table(Table {
        rect: ctx.rect,
        header: header.iter().map(cell_text).collect(),
        rows,
        column_widths: vec![ctx.rect.w / columns as f64; columns],
        header_fill,
        border: (payload.border == Some(true)).then(|| Line::new("000000", 1.0)),
        font_size: ctx.font_size(14.0),
        color: ctx.colors.text.to_string(),
    }));
    Ok(out)
}

fn compile_chart(ctx: &ContentContext<'_>) -> Result<Compiled> {
    let payload = ctx.payload;
    let data = payload
        .chart_data
        .as_ref()
        .filter(|v| !v.is_null())
        .ok_or_else(|| ctx.fail("Chart data is missing"))?;
    let labels = data
        .get("labels")
        .and_then(Value::as_array)
        .ok_or_else(|| ctx.fail("Chart labels must be an array"))?;
    let raw_values = data
        .get("values")
        .and_then(Value::as_array)
        .ok_or_else(|| ctx.fail("Chart values must be an array"))?;

    let mut out = Compiled::default();
    if labels.len() != raw_values.len() {
        out.warn(format!(
            "chart has {} labels but {} values",
            labels.len(),
            raw_values.len()
        ));
    }

    let mut values = Vec::with_capacity(raw_values.len());
    for (index, value) in raw_values.iter().enumerate() {
        match coerce_number(value) {
            Some(n) => values.push(n),
            None => {
                out.warn(format!("chart value {} is not a number, using 0", index + 1));
                values.push(0.0);
            }
        }
    }

    let kind = data
        .get("type")
        .and_then(Value::as_str)
        .or(payload.chart_type.as_deref())
        .map(ChartKind::from_name)
        .unwrap_or_default();

    let mut colors: Vec<String> = payload
        .colors
        .as_ref()
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).map(strip_hash).collect())
        .unwrap_or_default();
    if colors.is_empty() {
        colors.push(DEFAULT_CHART_COLOR.to_string());
    }

    out.push(Element::Chart(Chart {
        kind,
        rect: ctx.rect,
        series: vec![ChartSeries {
            name: non_blank(ctx.page_title).unwrap_or("Chart").to_string(),
            labels: labels.iter().map(cell_text).collect(),
            values,
        }],
        colors,
    }));
    Ok(out)
}

fn list_marker(list_type: Option<&str>, index: usize) -> String {
    match list_type {
        Some("numbered") => format!("{}. ", index + 1),
        Some("check") => "✓ ".to_string(),
        _ => "• ".to_string(),
    }
}

fn compile_list(ctx: &ContentContext<'_>) -> Result<Compiled> {
    let Some(items) = &ctx.payload.list_items else {
        return Ok(Compiled::nothing("list item has no listItems"));
    };
    let items = items
        .as_array()
        .ok_or_else(|| ctx.fail("List items must be an array"))?;
    if items.is_empty() {
        return Ok(Compiled::nothing("list has no entries"));
    }

    let rect = ctx.rect;
    let list_type = ctx.payload.list_type.as_deref();
    let style = TextStyle::new(ctx.font_size(16.0), ctx.colors.text)
        .align(ctx.alignment())
        .margin([5.0, 5.0, 5.0, 10.0])
        .line_spacing(1.3)
        .paragraph_spacing(5.0, 5.0);

    let mut out = Compiled::default();
    for (index, item) in items.iter().enumerate() {
        let text = format!(
            "{}{}",
            list_marker(list_type, index),
            ctx.text.normalize(&cell_text(item))
        );
        out.push(TextRun::new(
            text,
            Rect::new(rect.x + 0.2, rect.y + index as f64 * 0.4, rect.w - 0.4, 0.35),
            style.clone(),
        ));
    }
    Ok(out)
}

fn compile_quote(ctx: &ContentContext<'_>) -> Compiled {
    let Some(quote) = non_blank(ctx.payload.quote_text.as_deref()) else {
        return Compiled::nothing("quote item has no quoteText");
    };

    let rect = ctx.rect;
    let author = non_blank(ctx.payload.quote_author.as_deref());
    let band = if author.is_some() { 0.4 } else { 0.0 };

    let mut out = Compiled::default();
    out.push(Shape::panel(rect, PANEL_FILL, Line::new(PANEL_LINE, 1.0)));
    out.push(TextRun::new(
        format!("\"{}\"", ctx.text.normalize(quote)),
        Rect::new(rect.x + 0.08, rect.y + 0.08, rect.w - 0.16, rect.h - 0.16 - band),
        TextStyle::new(ctx.font_size(20.0), "333333")
            .italic(true)
            .align(HAlign::Center)
            .margin([20.0; 4])
            .line_spacing(1.8),
    ));

    if let Some(author) = author {
        out.push(TextRun::new(
            format!("- {}", author),
            Rect::new(rect.x + 0.08, rect.bottom() - band, rect.w - 0.16, band),
            TextStyle::new(16.0, "666666")
                .align(HAlign::Right)
                .margin([0.0, 25.0, 0.0, 0.0]),
        ));
    }
    out
}

fn compile_code(ctx: &ContentContext<'_>) -> Compiled {
    let Some(code) = non_blank(ctx.payload.code.as_deref()) else {
        return Compiled::nothing("code item has no code");
    };

    let mut out = Compiled::default();
    out.push(Shape::panel(ctx.rect, "F8F8F8", Line::new("E0E0E0", 1.0)));
    out.push(TextRun::new(
        ctx.text.literal(code),
        ctx.rect.inset(0.05, 0.05),
        TextStyle::new(ctx.font_size(14.0), "333333")
            .font_face("Courier New")
            .valign(VAlign::Top)
            .margin([12.0; 4])
            .line_spacing(1.4),
    ));
    out
}

fn compile_video(ctx: &ContentContext<'_>) -> Compiled {
    let Some(url) = non_blank(ctx.payload.video_url.as_deref()) else {
        return Compiled::nothing("video item has no videoUrl");
    };

    let rect = ctx.rect;
    let video_type = non_blank(ctx.payload.video_type.as_deref()).unwrap_or("video");

    let mut out = Compiled::default();
    out.push(Shape::panel(rect, "000000", Line::new(PANEL_LINE, 2.0)));
    out.push(
        Shape::new(
            ShapeKind::Triangle,
            Rect::new(
                rect.x + rect.w / 2.0 - 0.1,
                rect.y + rect.h / 2.0 - 0.1,
                0.2,
                0.2,
            ),
        )
        .with_fill("FFFFFF")
        .with_rotation(90.0),
    );
    out.push(TextRun::new(
        format!("[Video: {} - {}]", video_type, url),
        Rect::new(rect.x, rect.bottom() - 0.4, rect.w, 0.4),
        TextStyle::new(ctx.font_size(14.0), "FFFFFF").align(HAlign::Center),
    ));
    out
}

fn compile_shape(ctx: &ContentContext<'_>) -> Compiled {
    let Some(name) = non_blank(ctx.payload.shape.as_deref()) else {
        return Compiled::nothing("shape item has no shape");
    };

    let mut out = Compiled::default();
    let kind = ShapeKind::from_name(name).unwrap_or_else(|| {
        out.warn(format!("unrecognized shape '{}', drawing a rectangle", name));
        ShapeKind::Rect
    });
    out.push(
        Shape::new(kind, ctx.rect)
            .with_fill(ctx.colors.accent)
            .with_line(Line::new("FFFFFF", 1.0)),
    );
    out
}

fn compile_icon(ctx: &ContentContext<'_>) -> Compiled {
    let Some(icon) = non_blank(ctx.payload.icon.as_deref()) else {
        return Compiled::nothing("icon item has no icon");
    };

    let mut out = Compiled::default();
    out.push(Shape::panel(ctx.rect, PANEL_FILL, Line::new(PANEL_LINE, 1.0)));
    out.push(TextRun::new(
        icon,
        ctx.rect,
        TextStyle::new(ctx.font_size(36.0), ctx.colors.accent)
            .bold(true)
            .align(HAlign::Center),
    ));
    out
}

/// Timeline and process entries: `"{n}. {a}: {b}"` separated by blank lines.
fn compile_numbered(
    ctx: &ContentContext<'_>,
    entries: Option<&Value>,
    first: &str,
    second: &str,
) -> Result<Compiled> {
    let kind = ctx.kind.as_str();
    let Some(entries) = entries else {
        return Ok(Compiled::nothing(format!("{} item has no entries", kind)));
    };
    let entries = entries
        .as_array()
        .ok_or_else(|| ctx.fail(format!("{} entries must be an array", kind)))?;
    if entries.is_empty() {
        return Ok(Compiled::nothing(format!("{} has no entries", kind)));
    }

    let text = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(map) => format!(
                "{}. {}: {}",
                index + 1,
                field_text(map, first),
                field_text(map, second)
            ),
            other => format!("{}. {}", index + 1, cell_text(other)),
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut out = Compiled::default();
    out.push(TextRun::new(
        ctx.text.literal(&text),
        ctx.rect,
        TextStyle::new(ctx.font_size(16.0), ctx.colors.text)
            .valign(VAlign::Top)
            .margin([5.0; 4])
            .line_spacing(1.3),
    ));
    Ok(out)
}

fn compile_comparison(ctx: &ContentContext<'_>) -> Result<Compiled> {
    let Some(items) = &ctx.payload.comparison_items else {
        return Ok(Compiled::nothing("comparison item has no comparisonItems"));
    };
    let items = items
        .as_array()
        .ok_or_else(|| ctx.fail("Comparison items must be an array"))?;
    if items.len() < 2 {
        return Ok(Compiled::nothing(format!(
            "comparison needs two items, found {}",
            items.len()
        )));
    }

    let mut out = Compiled::default();
    if items.len() > 2 {
        out.warn(format!(
            "comparison has {} items, only the first two are drawn",
            items.len()
        ));
    }

    let rect = ctx.rect;
    let half = rect.w / 2.0;
    for (column, item) in items.iter().take(2).enumerate() {
        let x = rect.x + column as f64 * half;
        let (title, features) = match item {
            Value::Object(map) => {
                let features = map
                    .get("features")
                    .and_then(Value::as_array)
                    .map(|list| {
                        list.iter()
                            .map(|f| format!("• {}", cell_text(f)))
                            .collect::<Vec<_>>()
                            .join("\n")
                    })
                    .unwrap_or_default();
                (field_text(map, "title"), features)
            }
            other => (cell_text(other), String::new()),
        };

        out.push(TextRun::new(
            title,
            Rect::new(x, rect.y, half, 0.5),
            TextStyle::new(ctx.font_size(18.0), ctx.colors.text)
                .bold(true)
                .align(HAlign::Center),
        ));
        out.push(TextRun::new(
            features,
            Rect::new(x, rect.y + 0.5, half, rect.h - 0.5),
            TextStyle::new(ctx.font_size(16.0), ctx.colors.text)
                .valign(VAlign::Top)
                .margin([5.0; 4])
                .line_spacing(1.2),
        ));
    }
    Ok(out)
}
