//! Paragraph normalization for text-bearing content.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Reflows authored text into paragraphs.
///
/// Single line breaks inside a paragraph become spaces; blank lines
/// separate paragraphs and are kept as one empty line. Trailing and leading
/// whitespace of each paragraph is dropped.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    normalize_unicode: bool,
    paragraph_break: Regex,
    line_break: Regex,
    spaces: Regex,
}

impl TextNormalizer {
    /// Create a normalizer; `normalize_unicode` enables NFC composition.
    pub fn new(normalize_unicode: bool) -> Self {
        Self {
            normalize_unicode,
            paragraph_break: Regex::new(r"\n[ \t]*\n\s*").expect("paragraph pattern"),
            line_break: Regex::new(r"[ \t]*\n[ \t]*").expect("line break pattern"),
            spaces: Regex::new(r"[ \t]{2,}").expect("space pattern"),
        }
    }

    /// Normalize one text block.
    pub fn normalize(&self, text: &str) -> String {
        let unified = text.replace("\r\n", "\n").replace('\r', "\n");

        let paragraphs: Vec<String> = self
            .paragraph_break
            .split(unified.trim())
            .map(|para| {
                let joined = self.line_break.replace_all(para.trim(), " ");
                self.spaces.replace_all(&joined, " ").into_owned()
            })
            .filter(|para| !para.is_empty())
            .collect();

        let result = paragraphs.join("\n\n");
        if self.normalize_unicode {
            result.nfc().collect()
        } else {
            result
        }
    }

    /// Apply only Unicode normalization, keeping line structure.
    pub fn literal(&self, text: &str) -> String {
        if self.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        }
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Character count used for the long-text check.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_newlines_become_spaces() {
        let n = TextNormalizer::default();
        assert_eq!(n.normalize("one\ntwo\nthree"), "one two three");
    }

    #[test]
    fn test_blank_lines_keep_paragraphs() {
        let n = TextNormalizer::default();
        assert_eq!(
            n.normalize("first line\ncontinued\n\nsecond para\n \n\n\nthird"),
            "first line continued\n\nsecond para\n\nthird"
        );
    }

    #[test]
    fn test_crlf_and_spacing() {
        let n = TextNormalizer::default();
        assert_eq!(n.normalize("  a  \r\n  b\r\n\r\nc   d "), "a b\n\nc d");
    }

    #[test]
    fn test_nfc_composition() {
        let decomposed = "Cafe\u{0301}";
        assert_eq!(TextNormalizer::new(true).normalize(decomposed), "Caf\u{e9}");
        assert_eq!(TextNormalizer::new(false).normalize(decomposed), decomposed);
    }

    #[test]
    fn test_literal_keeps_newlines() {
        let n = TextNormalizer::default();
        assert_eq!(n.literal("fn main() {\n    run();\n}"), "fn main() {\n    run();\n}");
    }

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(char_len("héllo"), 5);
        assert_eq!(char_len("안녕"), 2);
    }
}
