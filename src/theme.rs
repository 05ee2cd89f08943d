// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Light and dark (black/white) color themes

use serde::{Deserialize, Serialize};

/// Site color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colors handed to the page templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeTokens {
    pub page_bg: &'static str,
    pub panel_bg: &'static str,
    pub card_bg: &'static str,
    pub title_text: &'static str,
    pub text: &'static str,
    pub subtext: &'static str,
    pub border: &'static str,
    pub carousel_bg: &'static str,
    pub empty_bg: &'static str,
}

impl Theme {
    /// Derive the theme from the number of clicks on the theme toggle.
    pub fn from_clicks(clicks: u64) -> Self {
        if clicks % 2 == 1 {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn tokens(self) -> ThemeTokens {
        match self {
            Self::Dark => ThemeTokens {
                page_bg: "#0d0d0d",
                panel_bg: "#141414",
                card_bg: "#1f1f1f",
                title_text: "#f5f5f5",
                text: "#e8e8e8",
                subtext: "#bfbfbf",
                border: "#303030",
                carousel_bg: "#1a1a1a",
                empty_bg: "#222222",
            },
            Self::Light => ThemeTokens {
                page_bg: "#f8f9fa",
                panel_bg: "#ffffff",
                card_bg: "#ffffff",
                title_text: "#262626",
                text: "#595959",
                subtext: "#8c8c8c",
                border: "#f0f0f0",
                carousel_bg: "#364d79",
                empty_bg: "#f5f5f5",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parity() {
        assert_eq!(Theme::from_clicks(0), Theme::Light);
        assert_eq!(Theme::from_clicks(3), Theme::Dark);
        assert!(Theme::from_clicks(1).is_dark());
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Theme::Light.tokens(), Theme::Dark.tokens());
        assert_eq!(Theme::Dark.tokens().page_bg, "#0d0d0d");
    }
}
