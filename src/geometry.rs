//! Geometry resolution on a fixed inch canvas.
//!
//! Every layout algebra a page can use (grid cells, named slots, column
//! splits, legacy percentage frames) is converted here into one absolute
//! [`Rect`] in inches. Nothing past this module sees percentages.
//!
//! Resolution never fails. Degenerate or non-finite boxes are returned as-is
//! and left for the caller to reject.

use crate::model::{ContentKind, Dimension, Frame, GridArea, Layout, NamedPosition, Page};
use serde::{Deserialize, Serialize};

/// An absolute box in inches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Create a box.
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Check that every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    pub fn inset(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w - 2.0 * dx, self.h - 2.0 * dy)
    }

    /// Approximate equality, for tests and diagnostics.
    pub fn approx_eq(&self, other: &Rect, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.w - other.w).abs() <= epsilon
            && (self.h - other.h).abs() <= epsilon
    }
}

/// The slide canvas in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    /// Standard 4:3 slide, 10 × 7.5 in.
    pub const STANDARD: Canvas = Canvas {
        width: 10.0,
        height: 7.5,
    };
}

impl Default for Canvas {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Title box shared by every slide.
pub const TITLE_BOX: Rect = Rect::new(0.5, 0.5, 9.0, 1.0);

/// Side margins of the content area.
const MARGIN: f64 = 0.5;

/// Canvas height not available to content: the heading band plus the
/// bottom margin.
const RESERVED_HEIGHT: f64 = 2.5;

/// Text boxes are never taller than this unless a layout says otherwise.
const TEXT_MAX_HEIGHT: f64 = 3.0;

/// Images get a fixed, horizontally centered box.
const IMAGE_WIDTH: f64 = 6.0;
const IMAGE_HEIGHT: f64 = 4.0;

/// Content area measurements for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Top of the content area
    pub start_y: f64,
    pub content_width: f64,
    pub content_height: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    pub bottom_margin: f64,
    /// Gap between tracks or columns
    pub spacing: f64,
}

impl LayoutConfig {
    /// Measurements for a page with the given layout and headings.
    ///
    /// The content area spans the canvas minus the side margins and the
    /// reserved height; on the standard canvas that is 9 × 5 in.
    pub fn for_layout(canvas: Canvas, layout: &Layout, has_title: bool, has_subtitle: bool) -> Self {
        let start_y = if has_subtitle {
            2.2
        } else if has_title {
            1.6
        } else {
            0.5
        };
        let spacing = match layout {
            Layout::Grid => 0.2,
            Layout::TwoColumn | Layout::ThreeColumn => 0.5,
            _ => 0.3,
        };
        Self {
            start_y,
            content_width: canvas.width - 2.0 * MARGIN,
            content_height: canvas.height - RESERVED_HEIGHT,
            left_margin: MARGIN,
            right_margin: MARGIN,
            bottom_margin: MARGIN,
            spacing,
        }
    }

    /// The box an item gets when nothing more specific applies.
    pub fn default_box(&self) -> Rect {
        Rect::new(
            self.left_margin,
            self.start_y,
            self.content_width,
            self.content_height,
        )
    }
}

/// Placement hints of one content item.
#[derive(Debug, Clone, Copy, Default)]
pub struct Placement<'a> {
    /// 0-based index within the page's content list
    pub ordinal: usize,
    /// Content kind, for the per-kind default box
    pub kind: Option<&'a ContentKind>,
    pub grid_area: Option<GridArea>,
    pub position: Option<&'a NamedPosition>,
    pub frame: Option<&'a Frame>,
}

impl<'a> Placement<'a> {
    /// Placement with only an ordinal.
    pub fn at(ordinal: usize) -> Self {
        Self {
            ordinal,
            ..Default::default()
        }
    }

    /// Set the content kind.
    pub fn with_kind(mut self, kind: &'a ContentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the grid area.
    pub fn with_grid_area(mut self, area: GridArea) -> Self {
        self.grid_area = Some(area);
        self
    }

    /// Set the named slot.
    pub fn with_position(mut self, position: &'a NamedPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the explicit frame.
    pub fn with_frame(mut self, frame: &'a Frame) -> Self {
        self.frame = Some(frame);
        self
    }
}

/// Per-page geometry state: everything needed to place any item on it.
#[derive(Debug, Clone)]
pub struct PageGeometry {
    canvas: Canvas,
    layout: Layout,
    columns: u32,
    item_count: usize,
    config: LayoutConfig,
}

impl PageGeometry {
    /// Build the geometry for a page.
    pub fn for_page(page: &Page, canvas: Canvas) -> Self {
        Self::new(
            canvas,
            page.layout.clone(),
            page.grid_columns(),
            page.content.len(),
            page.display_title().is_some(),
            page.display_subtitle().is_some(),
        )
    }

    /// Build geometry from raw inputs.
    pub fn new(
        canvas: Canvas,
        layout: Layout,
        columns: u32,
        item_count: usize,
        has_title: bool,
        has_subtitle: bool,
    ) -> Self {
        let config = LayoutConfig::for_layout(canvas, &layout, has_title, has_subtitle);
        Self {
            canvas,
            layout,
            columns,
            item_count,
            config,
        }
    }

    /// Content area measurements.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The default content box.
    pub fn default_box(&self) -> Rect {
        self.config.default_box()
    }

    /// The box an item of `kind` gets when its layout has nothing more
    /// specific: text is capped at 3 in tall, images get a centered
    /// 6 × 4 in box, everything else the default box.
    pub fn default_box_for(&self, kind: Option<&ContentKind>) -> Rect {
        let c = &self.config;
        match kind {
            Some(ContentKind::Text) => Rect::new(
                c.left_margin,
                c.start_y,
                c.content_width,
                c.content_height.min(TEXT_MAX_HEIGHT),
            ),
            Some(ContentKind::Image) => Rect::new(
                (self.canvas.width - IMAGE_WIDTH) / 2.0,
                c.start_y,
                IMAGE_WIDTH,
                IMAGE_HEIGHT,
            ),
            _ => self.default_box(),
        }
    }

    /// Number of column tracks on a grid page.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of grid rows: at least four, more when items overflow.
    pub fn grid_rows(&self) -> u32 {
        if self.columns == 0 {
            return 4;
        }
        let needed = self.item_count.div_ceil(self.columns as usize);
        needed.max(4) as u32
    }

    /// Resolve the box for one item.
    pub fn resolve(&self, placement: &Placement<'_>) -> Rect {
        if let Some(frame) = placement.frame {
            match frame_to_rect(frame, self.canvas) {
                Some(rect) => return rect,
                None => log::debug!("Ignoring unparseable frame {:?}", frame),
            }
        }

        let fallback = || self.default_box_for(placement.kind);
        match &self.layout {
            Layout::Grid => placement
                .grid_area
                .map(|area| self.grid_cell(area))
                .unwrap_or_else(fallback),
            Layout::ComponentGrid => placement
                .position
                .and_then(|pos| self.named_slot(pos))
                .unwrap_or_else(fallback),
            Layout::TwoColumn => self.column(placement.ordinal % 2, 2),
            Layout::ThreeColumn => self.column(placement.ordinal % 3, 3),
            Layout::FullWidth | Layout::Other(_) => fallback(),
        }
    }

    /// Union of the tracks covered by a grid area, gaps included.
    ///
    /// Missing coordinates make the box non-finite.
    fn grid_cell(&self, area: GridArea) -> Rect {
        let c = &self.config;
        let columns = f64::from(self.columns);
        let col_gap = c.spacing / columns;
        let col_w = (c.content_width - col_gap * (columns - 1.0)) / columns;

        let rows = f64::from(self.grid_rows());
        let row_gap = c.spacing / 4.0;
        let row_h = (c.content_height - row_gap * (rows - 1.0)) / rows;

        let c0 = area.column_start.unwrap_or(f64::NAN);
        let c1 = area.column_end.unwrap_or(f64::NAN);
        let r0 = area.row_start.unwrap_or(f64::NAN);
        let r1 = area.row_end.unwrap_or(f64::NAN);

        Rect::new(
            c.left_margin + (c0 - 1.0) * (col_w + col_gap),
            c.start_y + (r0 - 1.0) * (row_h + row_gap),
            (c1 - c0 + 1.0) * col_w + (c1 - c0) * col_gap,
            (r1 - r0 + 1.0) * row_h + (r1 - r0) * row_gap,
        )
    }

    fn named_slot(&self, position: &NamedPosition) -> Option<Rect> {
        let c = &self.config;
        let half = (c.content_width - c.spacing) / 2.0;
        match position {
            NamedPosition::Left => Some(Rect::new(
                c.left_margin,
                c.start_y,
                half,
                c.content_height,
            )),
            NamedPosition::Center => Some(Rect::new(
                (self.canvas.width - c.content_width) / 2.0,
                c.start_y,
                c.content_width,
                c.content_height,
            )),
            NamedPosition::Right => Some(Rect::new(
                self.canvas.width - c.right_margin - half,
                c.start_y,
                half,
                c.content_height,
            )),
            NamedPosition::Other(name) => {
                log::debug!("Unknown slot '{}', using default box", name);
                None
            }
        }
    }

    /// Column `index` of `count` equal columns separated by the layout gap.
    fn column(&self, index: usize, count: usize) -> Rect {
        let c = &self.config;
        let n = count as f64;
        let width = (c.content_width - c.spacing * (n - 1.0)) / n;
        Rect::new(
            c.left_margin + index as f64 * (width + c.spacing),
            c.start_y,
            width,
            c.content_height,
        )
    }
}

/// Convert a dimension to inches along an axis of length `axis`.
///
/// `"25%"` is a fraction of the axis; numbers and unit-suffixed strings are
/// taken as inches.
pub fn to_inches(value: &Dimension, axis: f64) -> Option<f64> {
    value
        .percent()
        .map(|fraction| fraction * axis)
        .or_else(|| value.leading_number())
}

/// Convert a legacy frame to an absolute box.
pub fn frame_to_rect(frame: &Frame, canvas: Canvas) -> Option<Rect> {
    Some(Rect::new(
        to_inches(&frame.x, canvas.width)?,
        to_inches(&frame.y, canvas.height)?,
        to_inches(&frame.width, canvas.width)?,
        to_inches(&frame.height, canvas.height)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn grid(columns: u32, items: usize) -> PageGeometry {
        PageGeometry::new(Canvas::STANDARD, Layout::Grid, columns, items, true, false)
    }

    #[test]
    fn test_default_box_start_offsets() {
        let canvas = Canvas::STANDARD;
        let none = LayoutConfig::for_layout(canvas, &Layout::Grid, false, false);
        let title = LayoutConfig::for_layout(canvas, &Layout::Grid, true, false);
        let both = LayoutConfig::for_layout(canvas, &Layout::Grid, true, true);
        assert_eq!(none.default_box(), Rect::new(0.5, 0.5, 9.0, 5.0));
        assert_eq!(title.default_box().y, 1.6);
        assert_eq!(both.default_box().y, 2.2);
    }

    #[test]
    fn test_grid_full_width_single_row() {
        for columns in [1, 2, 6, 12] {
            let geo = grid(columns, 1);
            let rect = geo.resolve(
                &Placement::at(0).with_grid_area(GridArea::new(1, columns as i32, 1, 1)),
            );
            let row_gap = 0.2 / 4.0;
            let row_h = (5.0 - row_gap * 3.0) / 4.0;

            assert!((rect.x - 0.5).abs() < EPS);
            assert!((rect.w - 9.0).abs() < EPS, "columns={columns} w={}", rect.w);
            assert!((rect.y - 1.6).abs() < EPS);
            assert!((rect.h - row_h).abs() < EPS);
        }
    }

    #[test]
    fn test_grid_half_width() {
        let geo = grid(12, 1);
        let rect = geo.resolve(&Placement::at(0).with_grid_area(GridArea::new(1, 6, 1, 1)));
        let col_gap = 0.2 / 12.0;
        let col_w = (9.0 - col_gap * 11.0) / 12.0;
        assert!((rect.w - (6.0 * col_w + 5.0 * col_gap)).abs() < EPS);
        assert!((rect.w - 4.5).abs() < 0.01);
    }

    #[test]
    fn test_grid_rows_grow_with_items() {
        assert_eq!(grid(12, 1).grid_rows(), 4);
        assert_eq!(grid(2, 8).grid_rows(), 4);
        assert_eq!(grid(2, 9).grid_rows(), 5);
        assert_eq!(grid(1, 10).grid_rows(), 10);
    }

    #[test]
    fn test_grid_without_area_gets_default_box() {
        let geo = grid(12, 3);
        assert_eq!(geo.resolve(&Placement::at(2)), geo.default_box());
    }

    #[test]
    fn test_grid_missing_coordinate_is_not_finite() {
        let geo = grid(12, 1);
        let area = GridArea {
            row_end: None,
            ..GridArea::new(1, 6, 1, 1)
        };
        let rect = geo.resolve(&Placement::at(0).with_grid_area(area));
        assert!(!rect.is_finite());
    }

    #[test]
    fn test_grid_zero_columns_is_not_finite() {
        let geo = grid(0, 1);
        let rect = geo.resolve(&Placement::at(0).with_grid_area(GridArea::new(1, 1, 1, 1)));
        assert!(!rect.is_finite());
    }

    #[test]
    fn test_component_grid_slots() {
        let geo = PageGeometry::new(
            Canvas::STANDARD,
            Layout::ComponentGrid,
            12,
            2,
            true,
            false,
        );
        let half = (9.0 - 0.3) / 2.0;

        let left = geo.resolve(&Placement::at(0).with_position(&NamedPosition::Left));
        let center = geo.resolve(&Placement::at(0).with_position(&NamedPosition::Center));
        let right = geo.resolve(&Placement::at(0).with_position(&NamedPosition::Right));

        assert!(left.approx_eq(&Rect::new(0.5, 1.6, half, 5.0), EPS));
        assert!(center.approx_eq(&Rect::new(0.5, 1.6, 9.0, 5.0), EPS));
        assert!(right.approx_eq(&Rect::new(9.5 - half, 1.6, half, 5.0), EPS));
        assert!((right.right() - 9.5).abs() < EPS);

        let other = NamedPosition::Other("top".into());
        assert_eq!(
            geo.resolve(&Placement::at(0).with_position(&other)),
            geo.default_box()
        );
        assert_eq!(geo.resolve(&Placement::at(0)), geo.default_box());
    }

    #[test]
    fn test_two_column_alternates() {
        let geo = PageGeometry::new(Canvas::STANDARD, Layout::TwoColumn, 12, 4, false, false);
        let half = (9.0 - 0.5) / 2.0;
        for ordinal in 0..4 {
            let rect = geo.resolve(&Placement::at(ordinal));
            let expected_x = if ordinal % 2 == 0 { 0.5 } else { 0.5 + half + 0.5 };
            assert!((rect.x - expected_x).abs() < EPS);
            assert!((rect.w - half).abs() < EPS);
        }
    }

    #[test]
    fn test_three_column_cycles() {
        let geo = PageGeometry::new(Canvas::STANDARD, Layout::ThreeColumn, 12, 6, false, false);
        let xs: Vec<f64> = (0..6).map(|i| geo.resolve(&Placement::at(i)).x).collect();
        assert_eq!(xs[0], xs[3]);
        assert_eq!(xs[1], xs[4]);
        assert!(xs[0] < xs[1] && xs[1] < xs[2]);
        let last = geo.resolve(&Placement::at(2));
        assert!((last.right() - 9.5).abs() < EPS);
    }

    #[test]
    fn test_unrecognized_layout_uses_default_box() {
        for layout in ["full-width", "image-focus", "mosaic"] {
            let geo = PageGeometry::new(Canvas::STANDARD, Layout::from(layout), 12, 2, true, true);
            assert_eq!(geo.resolve(&Placement::at(1)), geo.default_box());
        }
    }

    #[test]
    fn test_text_default_box_is_capped() {
        let text = ContentKind::Text;
        for layout in ["full-width", "image-focus"] {
            let geo = PageGeometry::new(Canvas::STANDARD, Layout::from(layout), 12, 1, true, false);
            let rect = geo.resolve(&Placement::at(0).with_kind(&text));
            assert!(rect.approx_eq(&Rect::new(0.5, 1.6, 9.0, 3.0), EPS));
        }

        let geo = grid(12, 1);
        let rect = geo.resolve(&Placement::at(0).with_kind(&text));
        assert!((rect.h - 3.0).abs() < EPS);

        // A grid area still wins over the per-kind box.
        let placed = geo.resolve(
            &Placement::at(0)
                .with_kind(&text)
                .with_grid_area(GridArea::new(1, 12, 1, 4)),
        );
        assert!((placed.h - 5.0).abs() < EPS);
    }

    #[test]
    fn test_image_default_box_is_centered() {
        let image = ContentKind::Image;
        let geo = PageGeometry::new(Canvas::STANDARD, Layout::FullWidth, 12, 1, true, true);
        let rect = geo.resolve(&Placement::at(0).with_kind(&image));
        assert!(rect.approx_eq(&Rect::new(2.0, 2.2, 6.0, 4.0), EPS));

        let slot = PageGeometry::new(Canvas::STANDARD, Layout::ComponentGrid, 12, 1, true, false);
        let other = NamedPosition::Other("top".into());
        let rect = slot.resolve(&Placement::at(0).with_kind(&image).with_position(&other));
        assert!(rect.approx_eq(&Rect::new(2.0, 1.6, 6.0, 4.0), EPS));

        // Column layouts always override.
        let columns = PageGeometry::new(Canvas::STANDARD, Layout::TwoColumn, 12, 2, true, false);
        let rect = columns.resolve(&Placement::at(1).with_kind(&image));
        assert!((rect.w - 4.25).abs() < EPS);
    }

    #[test]
    fn test_content_area_follows_canvas() {
        let wide = Canvas {
            width: 13.333,
            height: 7.5,
        };
        let geo = PageGeometry::new(wide, Layout::FullWidth, 12, 1, false, false);
        assert!(geo
            .default_box()
            .approx_eq(&Rect::new(0.5, 0.5, 12.333, 5.0), EPS));

        let image = ContentKind::Image;
        let rect = geo.resolve(&Placement::at(0).with_kind(&image));
        assert!((rect.x - (13.333 - 6.0) / 2.0).abs() < EPS);

        let slots = PageGeometry::new(wide, Layout::ComponentGrid, 12, 1, false, false);
        let right = slots.resolve(&Placement::at(0).with_position(&NamedPosition::Right));
        assert!((right.right() - (13.333 - 0.5)).abs() < EPS);
        assert!((right.w - (12.333 - 0.3) / 2.0).abs() < EPS);
    }

    #[test]
    fn test_frame_percentages() {
        let frame = Frame {
            x: "10%".into(),
            y: "20%".into(),
            width: "50%".into(),
            height: 2.0.into(),
        };
        let rect = frame_to_rect(&frame, Canvas::STANDARD).unwrap();
        assert!(rect.approx_eq(&Rect::new(1.0, 1.5, 5.0, 2.0), EPS));

        let geo = grid(12, 1);
        let placed = geo.resolve(
            &Placement::at(0)
                .with_frame(&frame)
                .with_grid_area(GridArea::new(1, 2, 1, 1)),
        );
        assert_eq!(placed, rect);
    }

    #[test]
    fn test_bad_frame_falls_through() {
        let frame = Frame {
            x: "left".into(),
            y: 0.0.into(),
            width: 1.0.into(),
            height: 1.0.into(),
        };
        assert!(frame_to_rect(&frame, Canvas::STANDARD).is_none());
        let geo = grid(12, 1);
        assert_eq!(
            geo.resolve(&Placement::at(0).with_frame(&frame)),
            geo.default_box()
        );
    }
}
