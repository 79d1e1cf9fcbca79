//! Fixed theme palette.
//!
//! Five named themes map to a `{background, text, accent}` triple of hex
//! colors without the leading `#`. Lookup is a pure function over an
//! immutable table; unknown and absent names resolve to [`Theme::Light`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Corporate,
    Academic,
    Creative,
}

/// Colors applied to every slide of a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeColors {
    /// Slide background
    pub background: &'static str,
    /// Body and title text
    pub text: &'static str,
    /// Shapes and highlights
    pub accent: &'static str,
}

const PALETTE: [(Theme, ThemeColors); 5] = [
    (
        Theme::Light,
        ThemeColors {
            background: "FFFFFF",
            text: "333333",
            accent: "3F97F6",
        },
    ),
    (
        Theme::Dark,
        ThemeColors {
            background: "2D2D2D",
            text: "F5F5F5",
            accent: "3F97F6",
        },
    ),
    (
        Theme::Corporate,
        ThemeColors {
            background: "F5F7FA",
            text: "2C3E50",
            accent: "3498DB",
        },
    ),
    (
        Theme::Academic,
        ThemeColors {
            background: "FFF9F0",
            text: "34495E",
            accent: "E67E22",
        },
    ),
    (
        Theme::Creative,
        ThemeColors {
            background: "F0F6FF",
            text: "2E4053",
            accent: "9B59B6",
        },
    ),
];

impl Theme {
    /// All themes in palette order.
    pub const ALL: [Theme; 5] = [
        Theme::Light,
        Theme::Dark,
        Theme::Corporate,
        Theme::Academic,
        Theme::Creative,
    ];

    /// Parse a theme name. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Theme> {
        let name = name.trim();
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }

    /// Get the theme name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Corporate => "corporate",
            Theme::Academic => "academic",
            Theme::Creative => "creative",
        }
    }

    /// Get the palette entry for this theme.
    pub fn colors(&self) -> ThemeColors {
        PALETTE
            .iter()
            .find(|(t, _)| t == self)
            .map(|(_, c)| *c)
            .unwrap_or(PALETTE[0].1)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a theme name to its colors, falling back to light.
pub fn resolve_theme(name: Option<&str>) -> ThemeColors {
    name.and_then(Theme::parse).unwrap_or_default().colors()
}
