//! One compiled slide and the per-item outcome reports.

use super::element::{Element, HAlign, TextRun, TextStyle, VAlign};
use crate::geometry::{Rect, TITLE_BOX};
use crate::theme::ThemeColors;
use serde::{Deserialize, Serialize};

/// Slide background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SlideBackground {
    /// Hex color without `#`
    Color(String),
    /// Image reference, resolved by the encoder
    Image(String),
}

/// Slide transition taken from the page animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub kind: String,
    /// Duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// What happened to one content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ItemOutcome {
    /// Drawn as requested
    Rendered,
    /// Drawn as a placeholder
    Recovered { reason: String },
    /// Nothing drawn
    Skipped { reason: String },
    /// Replaced with an error text
    Failed { error: String },
}

impl ItemOutcome {
    /// Check if the item was drawn as requested.
    pub fn is_rendered(&self) -> bool {
        matches!(self, ItemOutcome::Rendered)
    }

    /// Check if the item failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, ItemOutcome::Failed { .. })
    }

    /// Reason or error message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ItemOutcome::Rendered => None,
            ItemOutcome::Recovered { reason } | ItemOutcome::Skipped { reason } => Some(reason),
            ItemOutcome::Failed { error } => Some(error),
        }
    }
}

/// Per-item record kept alongside the drawing commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReport {
    /// 0-based position in the page's content list
    pub index: usize,
    /// Effective content kind after component resolution
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    pub rect: Rect,
    pub outcome: ItemOutcome,
}

/// Whether a page compiled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PageOutcome {
    #[default]
    Compiled,
    Failed {
        error: String,
    },
}

/// One compiled slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// 1-based slide number
    pub number: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub background: SlideBackground,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    pub elements: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemReport>,
    #[serde(default)]
    pub outcome: PageOutcome,
}

impl Slide {
    /// Create an empty slide with a color background.
    pub fn new(number: usize, background: SlideBackground) -> Self {
        Self {
            number,
            title: None,
            background,
            transition: None,
            elements: Vec::new(),
            items: Vec::new(),
            outcome: PageOutcome::Compiled,
        }
    }

    /// The replacement slide for a page that failed to compile.
    ///
    /// It carries exactly one text element and no item reports.
    pub fn error(number: usize, title: &str, error: impl Into<String>, colors: &ThemeColors) -> Self {
        let mut slide = Slide::new(number, SlideBackground::Color(colors.background.to_string()));
        slide.title = Some(title.to_string());
        slide.elements.push(Element::Text(TextRun::new(
            format!("Error rendering slide: {}", title),
            Rect::new(0.5, 0.5, 9.0, 1.0),
            TextStyle::new(24.0, "FF0000").bold(true),
        )));
        slide.outcome = PageOutcome::Failed {
            error: error.into(),
        };
        slide
    }

    /// Add the page title text.
    pub fn push_title(&mut self, title: &str, colors: &ThemeColors) {
        self.title = Some(title.to_string());
        self.elements.push(Element::Text(TextRun::new(
            title,
            TITLE_BOX,
            TextStyle::new(28.0, colors.text)
                .bold(true)
                .align(HAlign::Center)
                .valign(VAlign::Middle),
        )));
    }

    /// Add the page subtitle text, placed under the title when there is one.
    pub fn push_subtitle(&mut self, subtitle: &str, colors: &ThemeColors) {
        let y = if self.title.is_some() { 1.5 } else { 0.5 };
        self.elements.push(Element::Text(TextRun::new(
            subtitle,
            Rect::new(0.5, y, 9.0, 0.6),
            TextStyle::new(20.0, colors.text)
                .italic(true)
                .align(HAlign::Center),
        )));
    }

    /// Check if the page failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, PageOutcome::Failed { .. })
    }

    /// All text in drawing order, for inspection and tests.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements
            .iter()
            .filter_map(Element::as_text)
            .map(|t| t.text.as_str())
    }

    /// Count items by outcome: (rendered, recovered, skipped, failed).
    pub fn outcome_counts(&self) -> (usize, usize, usize, usize) {
        self.items.iter().fold((0, 0, 0, 0), |mut acc, item| {
            match item.outcome {
                ItemOutcome::Rendered => acc.0 += 1,
                ItemOutcome::Recovered { .. } => acc.1 += 1,
                ItemOutcome::Skipped { .. } => acc.2 += 1,
                ItemOutcome::Failed { .. } => acc.3 += 1,
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn test_error_slide_has_single_text() {
        let slide = Slide::error(3, "Broken", "bad grid", &Theme::Dark.colors());
        assert!(slide.is_failed());
        assert_eq!(slide.elements.len(), 1);
        assert_eq!(
            slide.texts().collect::<Vec<_>>(),
            vec!["Error rendering slide: Broken"]
        );
        assert_eq!(slide.background, SlideBackground::Color("2D2D2D".into()));
    }

    #[test]
    fn test_subtitle_position_depends_on_title() {
        let colors = Theme::Light.colors();
        let mut alone = Slide::new(1, SlideBackground::Color("FFFFFF".into()));
        alone.push_subtitle("Sub", &colors);
        assert_eq!(alone.elements[0].rect().y, 0.5);

        let mut both = Slide::new(1, SlideBackground::Color("FFFFFF".into()));
        both.push_title("Title", &colors);
        both.push_subtitle("Sub", &colors);
        assert_eq!(both.elements[1].rect().y, 1.5);
    }

    #[test]
    fn test_outcome_counts() {
        let mut slide = Slide::new(1, SlideBackground::Color("FFFFFF".into()));
        let outcomes = [
            ItemOutcome::Rendered,
            ItemOutcome::Recovered {
                reason: "placeholder".into(),
            },
            ItemOutcome::Failed {
                error: "boom".into(),
            },
            ItemOutcome::Rendered,
        ];
        for (index, outcome) in outcomes.into_iter().enumerate() {
            slide.items.push(ItemReport {
                index,
                kind: "text".into(),
                component_id: None,
                rect: Rect::default(),
                outcome,
            });
        }
        assert_eq!(slide.outcome_counts(), (2, 1, 0, 1));
    }
}
