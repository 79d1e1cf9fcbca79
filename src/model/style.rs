//! Visual style overrides.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A size-like value that may be written as a number or a string.
///
/// Documents mix `16`, `"16"`, `"16px"` and `"50%"`; consumers coerce
/// through [`Dimension::leading_number`] or [`Dimension::percent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    /// Bare number
    Number(f64),
    /// Textual value with optional unit suffix
    Text(String),
}

impl Dimension {
    /// The leading numeric part, ignoring any unit suffix.
    pub fn leading_number(&self) -> Option<f64> {
        match self {
            Dimension::Number(n) => n.is_finite().then_some(*n),
            Dimension::Text(s) => leading_number(s),
        }
    }

    /// The value as a fraction in `0.0..` when written as a percentage.
    pub fn percent(&self) -> Option<f64> {
        match self {
            Dimension::Number(_) => None,
            Dimension::Text(s) => {
                let s = s.trim();
                s.strip_suffix('%')
                    .and_then(|n| n.trim().parse::<f64>().ok())
                    .map(|n| n / 100.0)
            }
        }
    }
}

impl From<f64> for Dimension {
    fn from(n: f64) -> Self {
        Dimension::Number(n)
    }
}

impl From<&str> for Dimension {
    fn from(s: &str) -> Self {
        Dimension::Text(s.to_string())
    }
}

/// Parse the longest numeric prefix of a string ("24px" → 24.0).
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Read an optional number without rejecting the document.
///
/// Numbers and numeric strings (`6`, `6.0`, `"6"`) are kept; any other
/// value reads as absent and is left for the consumer to report.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => leading_number(&s),
        _ => None,
    })
}

/// Optional visual overrides attached to components and content items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Font size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,

    /// Font weight ("bold", "normal", "700")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,

    /// Horizontal text alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,

    /// Inner padding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Dimension>,

    /// Outer margin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Dimension>,

    /// Preferred width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,

    /// Preferred height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,

    /// Position hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Style {
    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merged(&self, overrides: &Style) -> Style {
        Style {
            font_size: overrides.font_size.clone().or_else(|| self.font_size.clone()),
            font_weight: overrides
                .font_weight
                .clone()
                .or_else(|| self.font_weight.clone()),
            alignment: overrides.alignment.clone().or_else(|| self.alignment.clone()),
            padding: overrides.padding.clone().or_else(|| self.padding.clone()),
            margin: overrides.margin.clone().or_else(|| self.margin.clone()),
            width: overrides.width.clone().or_else(|| self.width.clone()),
            height: overrides.height.clone().or_else(|| self.height.clone()),
            position: overrides.position.clone().or_else(|| self.position.clone()),
        }
    }

    /// Font size in points, or `default` when unset or not numeric.
    pub fn font_size_or(&self, default: f64) -> f64 {
        self.font_size
            .as_ref()
            .and_then(Dimension::leading_number)
            .filter(|n| *n > 0.0)
            .unwrap_or(default)
    }

    /// Whether the font weight asks for bold text.
    pub fn is_bold(&self) -> bool {
        match self.font_weight.as_deref().map(str::trim) {
            Some(w) if w.eq_ignore_ascii_case("bold") || w.eq_ignore_ascii_case("bolder") => true,
            Some(w) => w.parse::<u32>().map(|n| n >= 600).unwrap_or(false),
            None => false,
        }
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_number() {
        assert_eq!(Dimension::from("24px").leading_number(), Some(24.0));
        assert_eq!(Dimension::from(" 18 ").leading_number(), Some(18.0));
        assert_eq!(Dimension::from("1.5em").leading_number(), Some(1.5));
        assert_eq!(Dimension::from("large").leading_number(), None);
        assert_eq!(Dimension::from(12.0).leading_number(), Some(12.0));
    }

    #[test]
    fn test_percent() {
        assert_eq!(Dimension::from("50%").percent(), Some(0.5));
        assert_eq!(Dimension::from("50").percent(), None);
        assert_eq!(Dimension::from(50.0).percent(), None);
    }

    #[test]
    fn test_merged_override_wins() {
        let base = Style {
            font_size: Some("16".into()),
            alignment: Some("left".into()),
            ..Default::default()
        };
        let overrides = Style {
            alignment: Some("center".into()),
            font_weight: Some("bold".into()),
            ..Default::default()
        };

        let merged = base.merged(&overrides);
        assert_eq!(merged.alignment.as_deref(), Some("center"));
        assert_eq!(merged.font_weight.as_deref(), Some("bold"));
        assert_eq!(merged.font_size_or(10.0), 16.0);
    }

    #[test]
    fn test_is_bold() {
        let mut style = Style::default();
        assert!(!style.is_bold());
        style.font_weight = Some("bold".into());
        assert!(style.is_bold());
        style.font_weight = Some("700".into());
        assert!(style.is_bold());
        style.font_weight = Some("400".into());
        assert!(!style.is_bold());
    }

    #[test]
    fn test_lenient_number() {
        #[derive(Deserialize)]
        struct Field {
            #[serde(default, deserialize_with = "lenient_number")]
            n: Option<f64>,
        }

        let read = |json: &str| serde_json::from_str::<Field>(json).unwrap().n;
        assert_eq!(read(r#"{"n": 6}"#), Some(6.0));
        assert_eq!(read(r#"{"n": 6.5}"#), Some(6.5));
        assert_eq!(read(r#"{"n": "7"}"#), Some(7.0));
        assert_eq!(read(r#"{"n": true}"#), None);
        assert_eq!(read(r#"{"n": null}"#), None);
        assert_eq!(read(r#"{}"#), None);
    }

    #[test]
    fn test_deserialize_mixed_font_size() {
        let style: Style = serde_json::from_str(r#"{"fontSize": 22}"#).unwrap();
        assert_eq!(style.font_size_or(16.0), 22.0);
        let style: Style = serde_json::from_str(r#"{"fontSize": "22px"}"#).unwrap();
        assert_eq!(style.font_size_or(16.0), 22.0);
        let style: Style = serde_json::from_str(r#"{"fontSize": "huge"}"#).unwrap();
        assert_eq!(style.font_size_or(16.0), 16.0);
    }
}
