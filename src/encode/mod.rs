//! Encoder boundary.
//!
//! A [`DeckEncoder`] turns compiled slides into output bytes. The binary
//! presentation writer lives outside this crate; [`JsonEncoder`] is the
//! bundled implementation.
//!
//! [`generate`] compiles a presentation and streams it to an encoder. When
//! the encoder rejects the deck, everything it accumulated is discarded and a
//! single-slide error deck is encoded instead, so callers always receive a
//! file unless the encoder cannot even produce that.

mod json;

pub use json::{to_json, JsonEncoder, JsonFormat};

use crate::compile::{CompileOptions, DeckCompiler};
use crate::error::{Error, Result};
use crate::model::Presentation;
use crate::plan::{Deck, DeckInfo, Slide};
use std::fs;
use std::path::{Path, PathBuf};

/// Trait for deck output writers.
///
/// Calls arrive in the order `begin`, `add_slide` for every slide, `finish`.
/// `reset` drops any partial state so the encoder can start over.
pub trait DeckEncoder {
    /// Get the name of this encoder.
    fn name(&self) -> &str;

    /// File extension of the produced artifact, without the dot.
    fn file_extension(&self) -> &str;

    /// Start a new deck.
    fn begin(&mut self, info: &DeckInfo) -> Result<()>;

    /// Append one slide.
    fn add_slide(&mut self, slide: &Slide) -> Result<()>;

    /// Produce the artifact bytes.
    fn finish(&mut self) -> Result<Vec<u8>>;

    /// Discard everything accumulated so far.
    fn reset(&mut self);
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct Generated {
    /// Suggested artifact name, e.g. `Quarterly Review.pptx`
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// The deck that was encoded (the error deck after a fatal failure)
    pub deck: Deck,
    /// Encoder error that forced the error deck
    pub fatal: Option<String>,
}

impl Generated {
    /// Check if the error deck was emitted instead of the real one.
    pub fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }
}

/// Compile a presentation and encode it.
///
/// In strict mode a failed page is returned before anything is encoded.
pub fn generate(
    presentation: &Presentation,
    options: &CompileOptions,
    encoder: &mut dyn DeckEncoder,
) -> Result<Generated> {
    let deck = DeckCompiler::new(presentation, options.clone()).try_compile()?;
    encode_deck(deck, encoder)
}

/// Encode an already compiled deck, falling back to an error deck.
pub fn encode_deck(deck: Deck, encoder: &mut dyn DeckEncoder) -> Result<Generated> {
    let deck = match stream(&deck, encoder) {
        Ok(()) => deck,
        Err(err) => {
            log::warn!(
                "Encoder '{}' failed, emitting error deck: {}",
                encoder.name(),
                err
            );
            encoder.reset();
            let error_deck = Deck::error(deck.info, err.to_string());
            stream(&error_deck, encoder).map_err(encoder_error)?;
            error_deck
        }
    };

    let bytes = encoder.finish().map_err(encoder_error)?;
    log::debug!(
        "Encoded {} slides with '{}' ({} bytes)",
        deck.slide_count(),
        encoder.name(),
        bytes.len()
    );

    Ok(Generated {
        file_name: deck.file_name(encoder.file_extension()),
        fatal: deck.fatal.clone(),
        bytes,
        deck,
    })
}

fn stream(deck: &Deck, encoder: &mut dyn DeckEncoder) -> Result<()> {
    encoder.begin(&deck.info)?;
    for slide in &deck.slides {
        encoder.add_slide(slide)?;
    }
    Ok(())
}

fn encoder_error(err: Error) -> Error {
    match err {
        Error::Encoder(_) => err,
        other => Error::Encoder(other.to_string()),
    }
}

/// Replace characters that are not allowed in file names.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim().trim_matches('.');
    if trimmed.is_empty() {
        "Presentation".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Write an artifact into `dir`, creating the directory if needed.
pub fn write_artifact(dir: impl AsRef<Path>, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(sanitize_file_name(name));
    fs::write(&path, bytes)?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

/// Generate and write the artifact with a single async file write.
#[cfg(feature = "async")]
pub async fn generate_to_file_async(
    presentation: &Presentation,
    options: &CompileOptions,
    encoder: &mut dyn DeckEncoder,
    dir: impl AsRef<Path>,
) -> Result<(Generated, PathBuf)> {
    let generated = generate(presentation, options, encoder)?;
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(sanitize_file_name(&generated.file_name));
    tokio::fs::write(&path, &generated.bytes).await?;
    Ok((generated, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentItem, Metadata, Page};

    fn sample() -> Presentation {
        let mut presentation = Presentation::new(Metadata::new("Quarterly Review", "Ann"));
        presentation.pages = vec![
            Page::new("grid").with_title("One").with_item(ContentItem::text("a")),
            Page::new("grid").with_title("Two"),
        ];
        presentation
    }

    #[test]
    fn test_generate_json() {
        let mut encoder = JsonEncoder::default();
        let generated = generate(&sample(), &CompileOptions::default(), &mut encoder).unwrap();
        assert!(!generated.is_fatal());
        assert_eq!(generated.file_name, "Quarterly Review.json");
        assert_eq!(generated.deck.slide_count(), 2);
        let text = String::from_utf8(generated.bytes).unwrap();
        assert!(text.contains("Quarterly Review"));
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("Q3: Plan/Review.pptx"), "Q3_ Plan_Review.pptx");
        assert_eq!(sanitize_file_name("  ..  "), "Presentation");
        assert_eq!(sanitize_file_name("Deck.json"), "Deck.json");
    }

    #[test]
    fn test_write_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(dir.path().join("out"), "Deck.json", b"{}").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"{}");
        assert_eq!(path.file_name().unwrap(), "Deck.json");
    }
}
