//! Document model types for declarative slide decks.
//!
//! This module defines the input representation consumed by the deck
//! compiler: metadata, shared components and pages of content items. The
//! model is plain data; all layout and emission logic lives elsewhere.

mod component;
mod content;
mod document;
mod page;
mod style;

pub use component::Component;
pub use content::{
    ContentItem, ContentKind, ContentPayload, Frame, GridArea, ItemAlignment, NamedPosition,
};
pub use document::{Metadata, Presentation, Section};
pub use page::{Animation, Background, ColumnDefinition, GridConfig, Layout, Page};
pub use style::{Dimension, Style};
