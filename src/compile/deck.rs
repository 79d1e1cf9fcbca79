//! Deck compilation: pages to slides.

use super::content::{
    compile_content, error_element, placeholder, resolve_image_source, ContentContext,
};
use super::options::{CompileOptions, ErrorMode};
use super::text::TextNormalizer;
use crate::component::ComponentMap;
use crate::error::{Error, Result};
use crate::geometry::{PageGeometry, Placement, Rect};
use crate::model::{ContentItem, Layout, Page, Presentation};
use crate::plan::{
    Deck, DeckInfo, Diagnostic, ItemOutcome, ItemReport, Slide, SlideBackground, Transition,
};
use crate::theme::{Theme, ThemeColors};

/// One compiled page plus what was noticed along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub slide: Slide,
    pub diagnostics: Vec<Diagnostic>,
}

/// Compiles a presentation into a deck, one page at a time.
///
/// Failures are contained at the smallest possible scope: a bad item
/// becomes an error text, a bad page becomes an error slide, and nothing
/// short of a strict-mode page failure stops the deck.
pub struct DeckCompiler<'a> {
    presentation: &'a Presentation,
    options: CompileOptions,
    components: ComponentMap<'a>,
    normalizer: TextNormalizer,
    theme: Theme,
    colors: ThemeColors,
}

impl<'a> DeckCompiler<'a> {
    /// Create a compiler for a presentation.
    pub fn new(presentation: &'a Presentation, options: CompileOptions) -> Self {
        let theme = options.effective_theme(&presentation.metadata);
        log::debug!(
            "Compiling '{}' with theme {} ({} pages, {} components)",
            presentation.metadata.title,
            theme,
            presentation.pages.len(),
            presentation.components.len()
        );
        Self {
            presentation,
            components: ComponentMap::new(&presentation.components),
            normalizer: TextNormalizer::new(options.normalize_unicode),
            options,
            theme,
            colors: theme.colors(),
        }
    }

    /// The theme in effect.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Deck metadata for the encoder.
    pub fn info(&self) -> DeckInfo {
        DeckInfo::from_presentation(self.presentation, self.theme, self.options.canvas)
    }

    /// Number of slides the deck will have.
    pub fn page_count(&self) -> usize {
        self.presentation.pages.len()
    }

    /// Compile every page. Failed pages become error slides.
    pub fn compile(&self) -> Deck {
        self.compile_with(|_, _| {})
    }

    /// Like [`DeckCompiler::compile`], calling `on_page` with the 0-based
    /// index and result of each page as soon as it is compiled.
    pub fn compile_with<F>(&self, mut on_page: F) -> Deck
    where
        F: FnMut(usize, &PageResult),
    {
        let mut deck = Deck::new(self.info());
        for index in 0..self.page_count() {
            if let Some(result) = self.compile_page(index) {
                on_page(index, &result);
                deck.slides.push(result.slide);
                deck.diagnostics.extend(result.diagnostics);
            }
        }
        deck
    }

    /// Compile every page, honoring the error mode.
    ///
    /// In strict mode the first failed page is returned as
    /// [`Error::PageFailed`]; in lenient mode this never fails.
    pub fn try_compile(&self) -> Result<Deck> {
        if self.options.error_mode == ErrorMode::Lenient {
            return Ok(self.compile());
        }

        let mut deck = Deck::new(self.info());
        for (index, page) in self.presentation.pages.iter().enumerate() {
            let number = index + 1;
            let result = self.build_page(number, page).map_err(|err| Error::PageFailed {
                page: number,
                title: page_label(page, number),
                message: err.to_string(),
            })?;
            deck.slides.push(result.slide);
            deck.diagnostics.extend(result.diagnostics);
        }
        Ok(deck)
    }

    /// Compile the page at `index` (0-based), replacing it with an error
    /// slide if it fails. Returns `None` past the last page.
    pub fn compile_page(&self, index: usize) -> Option<PageResult> {
        let page = self.presentation.pages.get(index)?;
        let number = index + 1;

        Some(match self.build_page(number, page) {
            Ok(result) => result,
            Err(err) => {
                let label = page_label(page, number);
                log::warn!("Slide {} ({}) failed: {}", number, label, err);
                PageResult {
                    slide: Slide::error(number, &label, err.to_string(), &self.colors),
                    diagnostics: vec![Diagnostic::page_error(number, err.to_string())],
                }
            }
        })
    }

    fn build_page(&self, number: usize, page: &Page) -> Result<PageResult> {
        let mut diagnostics = Vec::new();
        let mut slide = Slide::new(number, self.background(number, page, &mut diagnostics));

        slide.transition = page.animation.as_ref().map(|a| Transition {
            kind: a.kind.clone(),
            duration: a.duration,
        });

        if let Some(title) = page.display_title() {
            slide.push_title(title, &self.colors);
        }
        if let Some(subtitle) = page.display_subtitle() {
            slide.push_subtitle(subtitle, &self.colors);
        }

        let geometry = PageGeometry::for_page(page, self.options.canvas);
        log::debug!(
            "Slide {}: layout {}, {} items, start y {}",
            number,
            page.layout,
            page.content.len(),
            geometry.config().start_y
        );

        for (index, item) in page.content.iter().enumerate() {
            self.compile_item(&geometry, page, index, item, &mut slide, &mut diagnostics)?;
        }

        Ok(PageResult { slide, diagnostics })
    }

    fn background(
        &self,
        number: usize,
        page: &Page,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> SlideBackground {
        let image = page
            .background
            .as_ref()
            .and_then(|bg| bg.image.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match image {
            Some(image) if resolve_image_source(image).is_some() => {
                SlideBackground::Image(image.to_string())
            }
            Some(image) => {
                log::warn!("Slide {}: unusable background image '{}'", number, image);
                diagnostics.push(Diagnostic::page_warning(
                    number,
                    format!("background image '{}' is not usable", image),
                ));
                SlideBackground::Color(self.colors.background.to_string())
            }
            None => SlideBackground::Color(self.colors.background.to_string()),
        }
    }

    fn compile_item(
        &self,
        geometry: &PageGeometry,
        page: &Page,
        index: usize,
        item: &ContentItem,
        slide: &mut Slide,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        let number = slide.number;

        let resolved = match self.components.resolve(item) {
            Ok(resolved) => resolved,
            Err(miss) => {
                let placement = Placement {
                    ordinal: index,
                    kind: Some(&item.kind),
                    grid_area: item.grid_area(),
                    position: item.position(),
                    frame: item.frame.as_ref(),
                };
                let rect = place(geometry, &page.layout, index, &placement)?;
                log::warn!("Slide {}, item {}: {}", number, index + 1, miss);
                slide.elements.push(placeholder(miss.placeholder_text(), rect));
                diagnostics.push(Diagnostic::item_warning(number, index, miss.to_string()));
                slide.items.push(ItemReport {
                    index,
                    kind: item.kind.as_str().to_string(),
                    component_id: Some(miss.id.clone()),
                    rect,
                    outcome: ItemOutcome::Recovered {
                        reason: miss.to_string(),
                    },
                });
                return Ok(());
            }
        };

        let placement = Placement {
            ordinal: index,
            kind: Some(resolved.kind),
            grid_area: resolved.grid_area,
            position: resolved.position,
            frame: resolved.frame,
        };
        let rect = place(geometry, &page.layout, index, &placement)?;

        let ctx = ContentContext {
            kind: resolved.kind,
            payload: resolved.payload,
            style: &resolved.style,
            rect,
            colors: self.colors,
            page_title: page.display_title(),
            text: &self.normalizer,
            long_text_threshold: self.options.long_text_threshold,
        };

        let outcome = match compile_content(&ctx) {
            Ok(compiled) => {
                for warning in &compiled.warnings {
                    log::warn!("Slide {}, item {}: {}", number, index + 1, warning);
                    diagnostics.push(Diagnostic::item_warning(number, index, warning.clone()));
                }
                let outcome = compiled.outcome();
                slide.elements.extend(compiled.elements);
                outcome
            }
            Err(err) => {
                log::warn!("Slide {}, item {}: {}", number, index + 1, err);
                slide.elements.push(error_element(resolved.kind, &err, rect));
                diagnostics.push(Diagnostic::item_error(number, index, err.to_string()));
                ItemOutcome::Failed {
                    error: err.to_string(),
                }
            }
        };

        slide.items.push(ItemReport {
            index,
            kind: resolved.kind.as_str().to_string(),
            component_id: resolved.component_id.map(str::to_string),
            rect,
            outcome,
        });
        Ok(())
    }
}

/// Resolve an item box, rejecting placements that make the page unusable.
///
/// Grid areas are only checked where they are used: on grid pages, for
/// items without an explicit frame.
fn place(
    geometry: &PageGeometry,
    layout: &Layout,
    index: usize,
    placement: &Placement<'_>,
) -> Result<Rect> {
    if *layout == Layout::Grid && placement.frame.is_none() {
        if let Some(area) = placement.grid_area {
            area.validate()
                .map_err(|msg| Error::Geometry(format!("item {}: {}", index + 1, msg)))?;
            if geometry.columns() == 0 {
                return Err(Error::Geometry(format!(
                    "item {}: grid has no usable column count",
                    index + 1
                )));
            }
        }
    }

    let rect = geometry.resolve(placement);
    if !rect.is_finite() {
        return Err(Error::Geometry(format!(
            "item {} has a non-finite box {:?}",
            index + 1,
            rect
        )));
    }
    Ok(rect)
}

/// Title used on error slides and in page errors.
fn page_label(page: &Page, number: usize) -> String {
    page.display_title()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Slide {}", number))
}
