//! JSON encoding of compiled decks.

use super::DeckEncoder;
use crate::error::{Error, Result};
use crate::plan::{Deck, DeckInfo, Slide};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a compiled deck to JSON.
pub fn to_json(deck: &Deck, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(deck),
        JsonFormat::Compact => serde_json::to_string(deck),
    };

    result.map_err(|e| Error::Encoder(format!("JSON serialization error: {}", e)))
}

/// Encoder that writes the emission plan itself as JSON.
///
/// Useful for inspecting layouts and as input to an external binary writer.
#[derive(Debug, Default)]
pub struct JsonEncoder {
    format: JsonFormat,
    deck: Option<Deck>,
}

impl JsonEncoder {
    /// Create an encoder with the given format.
    pub fn new(format: JsonFormat) -> Self {
        Self { format, deck: None }
    }

    /// Compact output.
    pub fn compact() -> Self {
        Self::new(JsonFormat::Compact)
    }

    /// Output format.
    pub fn format(&self) -> JsonFormat {
        self.format
    }
}

impl DeckEncoder for JsonEncoder {
    fn name(&self) -> &str {
        "json"
    }

    fn file_extension(&self) -> &str {
        "json"
    }

    fn begin(&mut self, info: &DeckInfo) -> Result<()> {
        if self.deck.is_some() {
            return Err(Error::Encoder("begin called twice without reset".into()));
        }
        self.deck = Some(Deck::new(info.clone()));
        Ok(())
    }

    fn add_slide(&mut self, slide: &Slide) -> Result<()> {
        let deck = self
            .deck
            .as_mut()
            .ok_or_else(|| Error::Encoder("add_slide called before begin".into()))?;
        deck.slides.push(slide.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        let deck = self
            .deck
            .take()
            .ok_or_else(|| Error::Encoder("finish called before begin".into()))?;
        to_json(&deck, self.format).map(String::into_bytes)
    }

    fn reset(&mut self) {
        self.deck = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Canvas;
    use crate::plan::SlideBackground;
    use crate::theme::Theme;

    fn info() -> DeckInfo {
        DeckInfo {
            title: "Test".to_string(),
            author: "Tester".to_string(),
            company: None,
            theme: Theme::Light,
            canvas: Canvas::STANDARD,
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let deck = Deck::new(info());
        let json = to_json(&deck, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("Test"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let deck = Deck::new(info());
        let json = to_json(&deck, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_encoder_lifecycle() {
        let mut encoder = JsonEncoder::compact();
        encoder.begin(&info()).unwrap();
        encoder
            .add_slide(&Slide::new(1, SlideBackground::Color("FFFFFF".into())))
            .unwrap();
        let bytes = encoder.finish().unwrap();

        let deck: Deck = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(deck.slide_count(), 1);
        assert_eq!(deck.info.title, "Test");
    }

    #[test]
    fn test_encoder_order_errors() {
        let mut encoder = JsonEncoder::default();
        let slide = Slide::new(1, SlideBackground::Color("FFFFFF".into()));
        assert!(matches!(encoder.add_slide(&slide), Err(Error::Encoder(_))));
        assert!(encoder.finish().is_err());

        encoder.begin(&info()).unwrap();
        assert!(encoder.begin(&info()).is_err());
        encoder.reset();
        assert!(encoder.begin(&info()).is_ok());
    }
}
