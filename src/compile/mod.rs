//! Compilation of a presentation into an emission plan.
//!
//! [`DeckCompiler`] walks pages in order; for each item it follows component
//! references, resolves a box and hands the item to the content compiler.

mod content;
mod deck;
mod options;
mod text;

pub use content::{
    compile_content, error_element, placeholder, resolve_image_source, Compiled, ContentContext,
};
pub use deck::{DeckCompiler, PageResult};
pub use options::{CompileOptions, ErrorMode, LONG_TEXT_THRESHOLD};
pub use text::{char_len, TextNormalizer};
