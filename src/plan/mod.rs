//! Emission plans: the fully resolved output handed to an encoder.
//!
//! A [`Deck`] is an ordered list of [`Slide`]s; each slide is a background
//! plus drawing primitives with absolute inch geometry. Plans are plain
//! serializable data so any encoder (binary presentation writer, JSON dump,
//! test double) can consume them.

mod deck;
mod element;
mod slide;

pub use deck::{Deck, DeckInfo, Diagnostic, Severity, DEFAULT_FILE_STEM};
pub use element::{
    Chart, ChartKind, ChartSeries, Element, HAlign, Image, ImageSizing, ImageSource, Line, Shape,
    ShapeKind, Table, TextRun, TextStyle, VAlign,
};
pub use slide::{ItemOutcome, ItemReport, PageOutcome, Slide, SlideBackground, Transition};
