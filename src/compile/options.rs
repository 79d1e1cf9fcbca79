//! Compilation options and configuration.

use crate::geometry::Canvas;
use crate::model::Metadata;
use crate::theme::Theme;

/// Default character count above which text is anchored to the top.
pub const LONG_TEXT_THRESHOLD: usize = 500;

/// Options for compiling a presentation into a deck.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Slide size in inches
    pub canvas: Canvas,

    /// Theme to use instead of the one named in the metadata
    pub theme: Option<Theme>,

    /// Text longer than this many characters is top-aligned with wider
    /// paragraph spacing
    pub long_text_threshold: usize,

    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Normalize text to Unicode NFC
    pub normalize_unicode: bool,
}

impl CompileOptions {
    /// Create new compile options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas.
    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    /// Force a theme regardless of document metadata.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Set the long text threshold.
    pub fn with_long_text_threshold(mut self, chars: usize) -> Self {
        self.long_text_threshold = chars;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail the whole compilation on the first failed page.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable or disable NFC normalization of text.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// The theme in effect for a document.
    pub fn effective_theme(&self, metadata: &Metadata) -> Theme {
        self.theme.unwrap_or_else(|| {
            metadata
                .theme
                .as_deref()
                .and_then(Theme::parse)
                .unwrap_or_default()
        })
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas::STANDARD,
            theme: None,
            long_text_threshold: LONG_TEXT_THRESHOLD,
            error_mode: ErrorMode::Lenient,
            normalize_unicode: true,
        }
    }
}

/// Error handling mode during compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Replace failed pages with an error slide and continue
    #[default]
    Lenient,
    /// Stop at the first failed page
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_options_builder() {
        let options = CompileOptions::new()
            .strict()
            .with_theme(Theme::Dark)
            .with_long_text_threshold(200)
            .with_unicode_normalization(false);

        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.theme, Some(Theme::Dark));
        assert_eq!(options.long_text_threshold, 200);
        assert!(!options.normalize_unicode);
    }

    #[test]
    fn test_default_options() {
        let options = CompileOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.canvas, Canvas::STANDARD);
        assert_eq!(options.long_text_threshold, 500);
        assert!(options.normalize_unicode);
    }

    #[test]
    fn test_effective_theme() {
        let meta = Metadata::new("Deck", "Ann").with_theme("corporate");
        assert_eq!(CompileOptions::new().effective_theme(&meta), Theme::Corporate);
        assert_eq!(
            CompileOptions::new()
                .with_theme(Theme::Academic)
                .effective_theme(&meta),
            Theme::Academic
        );
        let unknown = Metadata::new("Deck", "Ann").with_theme("neon");
        assert_eq!(CompileOptions::new().effective_theme(&unknown), Theme::Light);
    }
}
