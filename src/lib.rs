//! # slidegen
//!
//! Layout and compilation engine for declarative slide decks.
//!
//! A JSON document describing metadata, reusable components and pages of
//! positioned content items is compiled into a [`Deck`]: one emission plan
//! per slide with every box resolved to absolute inches on a 10 × 7.5 in
//! canvas. A [`DeckEncoder`] turns that plan into an artifact.
//!
//! ## Quick Start
//!
//! ```no_run
//! use slidegen::{compile_file, to_json, JsonFormat};
//!
//! fn main() -> slidegen::Result<()> {
//!     // Compile a deck description
//!     let deck = compile_file("deck.json")?;
//!
//!     // Inspect the emission plan
//!     println!("{}", to_json(&deck, JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layouts**: grid cells, component-grid slots, two and three columns,
//!   legacy percentage frames
//! - **Content kinds**: text, image, table, chart, list, quote, code, video,
//!   shape, icon, timeline, process, comparison and shared components
//! - **Graceful degradation**: bad items become placeholders, bad pages
//!   become error slides, encoder failures become an error deck
//! - **Themes**: five fixed palettes

pub mod compile;
pub mod component;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod model;
pub mod plan;
pub mod theme;

// Re-export commonly used types
pub use compile::{CompileOptions, DeckCompiler, ErrorMode};
pub use component::{ComponentMap, ComponentMiss, ResolvedItem};
pub use encode::{
    generate, to_json, write_artifact, DeckEncoder, Generated, JsonEncoder, JsonFormat,
};
pub use error::{Error, Result};
pub use geometry::{Canvas, Placement, Rect};
pub use model::{
    Component, ContentItem, ContentKind, ContentPayload, GridArea, Layout, Metadata, Page,
    Presentation, Style,
};
pub use plan::{Deck, DeckInfo, Element, ItemOutcome, PageOutcome, Slide};
pub use theme::{resolve_theme, Theme, ThemeColors};

#[cfg(feature = "async")]
pub use encode::generate_to_file_async;

use std::io::Read;
use std::path::Path;

/// Compile a presentation from a JSON string.
///
/// # Example
///
/// ```
/// let json = r#"{"presentation": {
///     "metadata": {"title": "Demo", "author": "Ann"},
///     "pages": [{"title": "Hello", "layout": "grid", "content": []}]
/// }}"#;
/// let deck = slidegen::compile_str(json).unwrap();
/// assert_eq!(deck.slide_count(), 1);
/// ```
pub fn compile_str(json: &str) -> Result<Deck> {
    let presentation = Presentation::from_json_str(json)?;
    Ok(DeckCompiler::new(&presentation, CompileOptions::default()).compile())
}

/// Compile a presentation from a JSON file.
///
/// # Example
///
/// ```no_run
/// use slidegen::compile_file;
///
/// let deck = compile_file("deck.json").unwrap();
/// println!("Slides: {}", deck.slide_count());
/// ```
pub fn compile_file<P: AsRef<Path>>(path: P) -> Result<Deck> {
    compile_file_with_options(path, CompileOptions::default())
}

/// Compile a presentation file with custom options.
///
/// # Example
///
/// ```no_run
/// use slidegen::{compile_file_with_options, CompileOptions, Theme};
///
/// let options = CompileOptions::new().with_theme(Theme::Dark).strict();
/// let deck = compile_file_with_options("deck.json", options).unwrap();
/// ```
pub fn compile_file_with_options<P: AsRef<Path>>(path: P, options: CompileOptions) -> Result<Deck> {
    let presentation = Presentation::from_path(path)?;
    DeckCompiler::new(&presentation, options).try_compile()
}

/// Compile a presentation from a reader.
pub fn compile_reader<R: Read>(reader: R) -> Result<Deck> {
    let presentation = Presentation::from_reader(reader)?;
    Ok(DeckCompiler::new(&presentation, CompileOptions::default()).compile())
}

/// Builder for loading and compiling slide decks.
///
/// # Example
///
/// ```no_run
/// use slidegen::{Slidegen, Theme, JsonEncoder};
///
/// let mut encoder = JsonEncoder::default();
/// let generated = Slidegen::new()
///     .with_theme(Theme::Corporate)
///     .load("deck.json")?
///     .generate(&mut encoder)?;
/// std::fs::write(&generated.file_name, &generated.bytes)?;
/// # Ok::<(), slidegen::Error>(())
/// ```
pub struct Slidegen {
    options: CompileOptions,
}

impl Slidegen {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: CompileOptions::default(),
        }
    }

    /// Fail on the first page that cannot be compiled.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Force a theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.options = self.options.with_theme(theme);
        self
    }

    /// Set the canvas size.
    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.options = self.options.with_canvas(canvas);
        self
    }

    /// Set the long text threshold in characters.
    pub fn with_long_text_threshold(mut self, chars: usize) -> Self {
        self.options = self.options.with_long_text_threshold(chars);
        self
    }

    /// Enable or disable Unicode normalization of text.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.options = self.options.with_unicode_normalization(enabled);
        self
    }

    /// Load a presentation file.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<SlidegenResult> {
        Ok(SlidegenResult {
            presentation: Presentation::from_path(path)?,
            options: self.options,
        })
    }

    /// Load a presentation from a JSON string.
    pub fn load_str(self, json: &str) -> Result<SlidegenResult> {
        Ok(SlidegenResult {
            presentation: Presentation::from_json_str(json)?,
            options: self.options,
        })
    }
}

impl Default for Slidegen {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded presentation with its compile options.
pub struct SlidegenResult {
    /// The parsed presentation
    pub presentation: Presentation,
    options: CompileOptions,
}

impl SlidegenResult {
    /// Compile into a deck, honoring the error mode.
    pub fn compile(&self) -> Result<Deck> {
        DeckCompiler::new(&self.presentation, self.options.clone()).try_compile()
    }

    /// Compile and encode.
    pub fn generate(&self, encoder: &mut dyn DeckEncoder) -> Result<Generated> {
        generate(&self.presentation, &self.options, encoder)
    }

    /// Compile and render the plan as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(&self.compile()?, format)
    }

    /// Get the presentation.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Get the compile options.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{"presentation": {
        "metadata": {"title": "Demo", "author": "Ann", "theme": "dark"},
        "pages": [
            {"title": "One", "layout": "grid", "content": [
                {"type": "text", "content": {"text": "Hi", "gridArea": {"columnStart": 1, "columnEnd": 12, "rowStart": 1, "rowEnd": 1}}}
            ]}
        ]
    }}"#;

    #[test]
    fn test_slidegen_builder() {
        let loaded = Slidegen::new()
            .strict()
            .with_theme(Theme::Academic)
            .with_long_text_threshold(100)
            .load_str(MINIMAL)
            .unwrap();

        assert_eq!(loaded.options().error_mode, ErrorMode::Strict);
        assert_eq!(loaded.options().long_text_threshold, 100);

        let deck = loaded.compile().unwrap();
        assert_eq!(deck.info.theme, Theme::Academic);
    }

    #[test]
    fn test_compile_str() {
        let deck = compile_str(MINIMAL).unwrap();
        assert_eq!(deck.slide_count(), 1);
        assert_eq!(deck.info.theme, Theme::Dark);
        let texts: Vec<_> = deck.slides[0].texts().collect();
        assert_eq!(texts, vec!["One", "Hi"]);
    }

    #[test]
    fn test_compile_str_invalid_json() {
        assert!(matches!(compile_str("{not json"), Err(Error::Json(_))));
        assert!(matches!(
            compile_str(r#"{"slides": []}"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_compile_reader() {
        let deck = compile_reader(MINIMAL.as_bytes()).unwrap();
        assert_eq!(deck.info.title, "Demo");
    }

    #[test]
    fn test_builder_to_json() {
        let json = Slidegen::new()
            .load_str(MINIMAL)
            .unwrap()
            .to_json(JsonFormat::Compact)
            .unwrap();
        assert!(json.contains("\"slides\""));
        assert!(!json.contains('\n'));
    }
}
