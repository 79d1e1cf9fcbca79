//! The compiled deck: slides, deck metadata and diagnostics.
//!
//! A [`Deck`] is what the encoder consumes. It also builds the one-slide
//! error deck used when encoding the real deck fails.

use super::slide::{Slide, SlideBackground};
use super::element::{Element, TextRun, TextStyle};
use crate::geometry::{Canvas, Rect};
use crate::model::Presentation;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};

/// File stem used when a deck has no title.
pub const DEFAULT_FILE_STEM: &str = "Presentation";

/// Deck-level metadata passed to the encoder before any slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckInfo {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub theme: Theme,
    pub canvas: Canvas,
}

impl DeckInfo {
    /// Metadata for a presentation with the given effective theme.
    pub fn from_presentation(presentation: &Presentation, theme: Theme, canvas: Canvas) -> Self {
        let meta = &presentation.metadata;
        Self {
            title: meta.title.clone(),
            author: meta.author.clone(),
            company: meta.company.clone(),
            theme,
            canvas,
        }
    }

    /// Output file name: the title, or `Presentation` when it is empty.
    pub fn file_name(&self, extension: &str) -> String {
        let stem = self.title.trim();
        let stem = if stem.is_empty() {
            DEFAULT_FILE_STEM
        } else {
            stem
        };
        format!("{}.{}", stem, extension)
    }
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A compile-time note about one page or item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    /// 1-based slide number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    /// 0-based item index within the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    /// A warning about one item.
    pub fn item_warning(page: usize, item: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            page: Some(page),
            item: Some(item),
            message: message.into(),
        }
    }

    /// An error about one item.
    pub fn item_error(page: usize, item: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            page: Some(page),
            item: Some(item),
            message: message.into(),
        }
    }

    /// A warning about a whole page.
    pub fn page_warning(page: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            page: Some(page),
            item: None,
            message: message.into(),
        }
    }

    /// An error about a whole page.
    pub fn page_error(page: usize, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            page: Some(page),
            item: None,
            message: message.into(),
        }
    }
}

/// A compiled deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub info: DeckInfo,
    pub slides: Vec<Slide>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
    /// Set when the deck was replaced by a single error slide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatal: Option<String>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new(info: DeckInfo) -> Self {
        Self {
            info,
            slides: Vec::new(),
            diagnostics: Vec::new(),
            fatal: None,
        }
    }

    /// The one-slide deck that replaces a deck whose generation failed.
    pub fn error(info: DeckInfo, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut slide = Slide::new(1, SlideBackground::Color("FFFFFF".to_string()));
        slide.elements.push(Element::Text(TextRun::new(
            format!("Error generating presentation: {}", message),
            Rect::new(1.0, 1.0, 8.0, 1.0),
            TextStyle::new(18.0, "FF0000"),
        )));
        Self {
            info,
            slides: vec![slide],
            diagnostics: Vec::new(),
            fatal: Some(message),
        }
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Output file name with the given extension.
    pub fn file_name(&self, extension: &str) -> String {
        self.info.file_name(extension)
    }

    /// Check if this is the fatal replacement deck.
    pub fn is_error_deck(&self) -> bool {
        self.fatal.is_some()
    }

    /// Slides whose page failed to compile.
    pub fn failed_slides(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter().filter(|s| s.is_failed())
    }

    /// Diagnostics at or above a severity.
    pub fn diagnostics_at_least(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity >= severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(title: &str) -> DeckInfo {
        DeckInfo {
            title: title.to_string(),
            author: String::new(),
            company: None,
            theme: Theme::Light,
            canvas: Canvas::STANDARD,
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(info("Q3 Review").file_name("pptx"), "Q3 Review.pptx");
        assert_eq!(info("").file_name("pptx"), "Presentation.pptx");
        assert_eq!(info("   ").file_name("json"), "Presentation.json");
    }

    #[test]
    fn test_error_deck() {
        let deck = Deck::error(info("Broken"), "writer crashed");
        assert!(deck.is_error_deck());
        assert_eq!(deck.slide_count(), 1);
        let texts: Vec<_> = deck.slides[0].texts().collect();
        assert_eq!(texts, vec!["Error generating presentation: writer crashed"]);
    }

    #[test]
    fn test_diagnostics_filter() {
        let mut deck = Deck::new(info("D"));
        deck.diagnostics.push(Diagnostic::item_warning(1, 0, "missing rows"));
        deck.diagnostics.push(Diagnostic::page_error(2, "bad grid"));
        assert_eq!(deck.diagnostics_at_least(Severity::Warning).count(), 2);
        assert_eq!(deck.diagnostics_at_least(Severity::Error).count(), 1);
    }
}
