// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! UI event dispatch
//!
//! The UI state is the current path plus two click counters. Language and
//! theme are derived from the counters' parity, so every page is a pure
//! function of `(path, theme clicks, language clicks)`.

use serde::{Deserialize, Serialize};

use crate::categories::CategorySet;
use crate::gallery::Gallery;
use crate::i18n::Language;
use crate::route::{PageDescriptor, Route};
use crate::theme::Theme;
use crate::Result;

/// Menu key of the home entry
pub const HOME_MENU_KEY: &str = "home";

/// Something the user did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum UiEvent {
    NavigationChanged(String),
    ThemeToggled,
    LanguageToggled,
    /// A key picked from the category menu
    MenuSelected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub theme_clicks: u64,
    #[serde(default)]
    pub lang_clicks: u64,
}

fn default_path() -> String {
    "/".to_string()
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            path: default_path(),
            theme_clicks: 0,
            lang_clicks: 0,
        }
    }
}

impl UiState {
    pub fn new(path: impl Into<String>, theme_clicks: u64, lang_clicks: u64) -> Self {
        Self {
            path: path.into(),
            theme_clicks,
            lang_clicks,
        }
    }

    pub fn language(&self) -> Language {
        Language::from_clicks(self.lang_clicks)
    }

    pub fn theme(&self) -> Theme {
        Theme::from_clicks(self.theme_clicks)
    }

    /// Next state after `event`.
    pub fn apply(mut self, categories: &CategorySet, event: UiEvent) -> Self {
        match event {
            UiEvent::NavigationChanged(path) => self.path = path,
            UiEvent::ThemeToggled => self.theme_clicks = self.theme_clicks.saturating_add(1),
            UiEvent::LanguageToggled => self.lang_clicks = self.lang_clicks.saturating_add(1),
            UiEvent::MenuSelected(key) => {
                if let Some(path) = menu_route(categories, &key) {
                    self.path = path;
                }
            }
        }
        self
    }

    /// Apply `event` and build the page for the resulting state.
    pub fn handle(self, gallery: &Gallery, event: UiEvent) -> Result<(Self, PageDescriptor)> {
        let next = self.apply(gallery.categories(), event);
        let page = next.page(gallery)?;
        Ok((next, page))
    }

    pub fn page(&self, gallery: &Gallery) -> Result<PageDescriptor> {
        gallery.interpret(&self.path, self.language())
    }
}

/// Route for a menu key; `None` for keys the menu does not know.
pub fn menu_route(categories: &CategorySet, key: &str) -> Option<String> {
    if key.is_empty() || key == HOME_MENU_KEY {
        Some("/".to_string())
    } else if categories.contains(key) {
        Some(Route::category_path(key))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::route::PageContent;
    use crate::scripts::ScriptResolver;
    use std::path::{Path, PathBuf};

    fn gallery() -> Gallery {
        let categories = CategorySet::builtin();
        let paths = ["line1.png", "bar2.png"].iter().map(PathBuf::from).collect();
        let catalog = Catalog::from_paths(&categories, Path::new(""), "/imgs", paths);
        Gallery::new(categories, catalog, ScriptResolver::new("/nonexistent", "md"))
    }

    #[test]
    fn test_toggles_follow_click_parity() {
        let categories = CategorySet::builtin();
        let state = UiState::default();
        assert_eq!(state.language(), Language::Zh);
        assert_eq!(state.theme(), Theme::Light);

        let state = state.apply(&categories, UiEvent::LanguageToggled);
        assert_eq!(state.language(), Language::En);
        assert_eq!(state.theme(), Theme::Light);

        let state = state
            .apply(&categories, UiEvent::ThemeToggled)
            .apply(&categories, UiEvent::LanguageToggled);
        assert_eq!(state.language(), Language::Zh);
        assert_eq!(state.theme(), Theme::Dark);
        assert_eq!((state.theme_clicks, state.lang_clicks), (1, 2));
    }

    #[test]
    fn test_menu_selection() {
        let categories = CategorySet::builtin();
        let state = UiState::new("/chart/bar/0", 0, 0);

        let state = state.apply(&categories, UiEvent::MenuSelected("bar".into()));
        assert_eq!(state.path, "/category/bar");

        let state = state.apply(&categories, UiEvent::MenuSelected("nope".into()));
        assert_eq!(state.path, "/category/bar");

        let state = state.apply(&categories, UiEvent::MenuSelected("home".into()));
        assert_eq!(state.path, "/");
        assert_eq!(menu_route(&categories, ""), Some("/".to_string()));
    }

    #[test]
    fn test_handle_recomputes_page() {
        let gallery = gallery();
        let state = UiState::default();

        let (state, page) = state
            .handle(&gallery, UiEvent::NavigationChanged("/category/bar".into()))
            .unwrap();
        assert_eq!(page.title, "柱形图");

        let (state, page) = state.handle(&gallery, UiEvent::LanguageToggled).unwrap();
        assert_eq!(state.path, "/category/bar");
        assert_eq!(page.title, "Bar Chart");

        // Theme does not change the descriptor
        let (_, themed) = state.clone().handle(&gallery, UiEvent::ThemeToggled).unwrap();
        assert_eq!(themed, page);

        let (_, page) = state
            .handle(&gallery, UiEvent::NavigationChanged("/chart/bar/0".into()))
            .unwrap();
        assert!(matches!(page.content, PageContent::Detail { .. }));
        assert_eq!(page.title, "Bar Chart #1");
    }

    #[test]
    fn test_event_json_shape() {
        let event: UiEvent =
            serde_json::from_str(r#"{"type":"navigation_changed","value":"/home"}"#).unwrap();
        assert_eq!(event, UiEvent::NavigationChanged("/home".into()));

        let event: UiEvent = serde_json::from_str(r#"{"type":"theme_toggled"}"#).unwrap();
        assert_eq!(event, UiEvent::ThemeToggled);

        let state: UiState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, UiState::default());
    }
}
