// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! HTML rendering of page descriptors
//!
//! Templates are compiled into the binary and share one layout holding the
//! collapsible category menu, the theme/language toggles and the footer.

use minijinja::Environment;
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::events::{UiState, HOME_MENU_KEY};
use crate::gallery::Gallery;
use crate::i18n::{self, tr, tr_count, Message};
use crate::route::{PageContent, PageDescriptor, Route};
use crate::theme::ThemeTokens;
use crate::Result;

const TEMPLATES: [(&str, &str); 5] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("category.html", include_str!("../../templates/category.html")),
    ("detail.html", include_str!("../../templates/detail.html")),
    ("not_found.html", include_str!("../../templates/not_found.html")),
];

pub struct Renderer {
    env: Environment<'static>,
}

#[derive(Serialize)]
struct MenuItem<'a> {
    key: &'a str,
    title: &'a str,
    glyph: &'static str,
    href: String,
    count: Option<usize>,
    active: bool,
}

#[derive(Serialize)]
struct PageView<'a> {
    site_title: &'a str,
    title: &'a str,
    lang: &'static str,
    theme: &'static str,
    tokens: ThemeTokens,
    t: BTreeMap<&'static str, &'static str>,
    menu: Vec<MenuItem<'a>>,
    /// Toggle counters to carry along on internal links
    query: String,
    theme_toggle: String,
    lang_toggle: String,
    page: &'a PageContent,
    count_line: Option<String>,
    script_html: Option<String>,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render `page` as a full HTML document for the given UI state.
    pub fn render(
        &self,
        gallery: &Gallery,
        page: &PageDescriptor,
        ui: &UiState,
        site_title: &str,
    ) -> Result<String> {
        let lang = ui.language();
        let theme = ui.theme();

        let count_line = match &page.content {
            PageContent::Home { total, .. } => Some(tr_count(lang, Message::HomeCount, *total)),
            PageContent::Category { count, .. } => {
                Some(tr_count(lang, Message::CategoryCount, *count))
            }
            _ => None,
        };
        let script_html = match &page.content {
            PageContent::Detail { script, .. } => Some(markdown_to_html(script)),
            _ => None,
        };

        let view = PageView {
            site_title,
            title: &page.title,
            lang: lang.code(),
            theme: theme.name(),
            tokens: theme.tokens(),
            t: i18n::table(lang),
            menu: menu_items(gallery, &page.content, lang),
            query: toggle_query(ui.theme_clicks, ui.lang_clicks),
            theme_toggle: format!(
                "{}{}",
                ui.path,
                toggle_query(ui.theme_clicks.saturating_add(1), ui.lang_clicks)
            ),
            lang_toggle: format!(
                "{}{}",
                ui.path,
                toggle_query(ui.theme_clicks, ui.lang_clicks.saturating_add(1))
            ),
            page: &page.content,
            count_line,
            script_html,
        };

        let template = self.env.get_template(template_name(&page.content))?;
        Ok(template.render(&view)?)
    }
}

fn template_name(content: &PageContent) -> &'static str {
    match content {
        PageContent::Home { .. } => "home.html",
        PageContent::Category { .. } => "category.html",
        PageContent::Detail { .. } => "detail.html",
        PageContent::NotFound { .. } => "not_found.html",
    }
}

fn toggle_query(theme_clicks: u64, lang_clicks: u64) -> String {
    format!("?theme_clicks={}&lang_clicks={}", theme_clicks, lang_clicks)
}

fn menu_items<'a>(
    gallery: &'a Gallery,
    content: &PageContent,
    lang: i18n::Language,
) -> Vec<MenuItem<'a>> {
    let active_key = match content {
        PageContent::Home { .. } => Some(HOME_MENU_KEY),
        PageContent::Category { key, .. } | PageContent::Detail { key, .. } => Some(key.as_str()),
        PageContent::NotFound { .. } => None,
    };

    let mut items = vec![MenuItem {
        key: HOME_MENU_KEY,
        title: tr(lang, Message::MenuHome),
        glyph: icon_glyph("antd-home"),
        href: "/".to_string(),
        count: None,
        active: active_key == Some(HOME_MENU_KEY),
    }];

    let catalog = gallery.catalog();
    items.extend(gallery.categories().iter().map(|c| MenuItem {
        key: &c.key,
        title: c.title(lang),
        glyph: icon_glyph(&c.icon),
        href: Route::category_path(&c.key),
        count: Some(catalog.images_in(&c.key).len()),
        active: active_key == Some(c.key.as_str()),
    }));
    items
}

/// Text glyph standing in for a menu icon name.
fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "antd-home" => "⌂",
        "antd-line-chart" => "📈",
        "antd-dot-chart" => "⁘",
        "antd-area-chart" => "◭",
        "antd-bulb" => "✦",
        "antd-bar-chart" => "📊",
        "antd-apartment" => "⋔",
        "antd-app-store" => "▦",
        _ => "▪",
    }
}

/// Render script markdown; override files are local and trusted.
pub fn markdown_to_html(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::categories::{Category, CategorySet};
    use crate::route::interpret;
    use crate::scripts::ScriptResolver;
    use crate::i18n::Language;
    use std::path::{Path, PathBuf};

    fn gallery() -> Gallery {
        let categories = CategorySet::builtin();
        let paths = ["line1.png", "bar2.png", "bar1.png", "misc.png"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let catalog = Catalog::from_paths(&categories, Path::new(""), "/imgs", paths);
        Gallery::new(categories, catalog, ScriptResolver::new("/nonexistent", "md"))
    }

    /// Undo attribute escaping so assertions can use plain URLs.
    fn unescape(html: String) -> String {
        html.replace("&#x2f;", "/").replace("&amp;", "&")
    }

    fn render(path: &str, theme_clicks: u64, lang_clicks: u64) -> String {
        let gallery = gallery();
        let ui = UiState::new(path, theme_clicks, lang_clicks);
        let page = interpret(&gallery, path, ui.language()).unwrap();
        let html = Renderer::new()
            .unwrap()
            .render(&gallery, &page, &ui, "vizgallery")
            .unwrap();
        unescape(html)
    }

    #[test]
    fn test_home_has_menu_and_carousel() {
        let html = render("/", 0, 0);
        assert!(html.contains("<html lang=\"zh\">"));
        assert!(html.contains("欢迎来到"));
        assert!(html.contains("当前共收录 4 张图片"));
        assert!(html.contains("src=\"/imgs/bar1.png\""));
        assert!(html.contains("href=\"/category/bar?theme_clicks=0&lang_clicks=0\""));
    }

    #[test]
    fn test_language_toggle_label() {
        for lang_clicks in [0, 1] {
            let html = render("/", 0, lang_clicks);
            assert!(html.contains(">EN/CH</a>"));
        }
    }

    #[test]
    fn test_menu_links_encode_category_keys() {
        let categories = CategorySet::new(vec![
            Category::new("pie#1", "饼图", "Pie", vec!["pie".to_string()]),
            Category::new("other", "其他", "Other", vec![]),
        ])
        .unwrap();
        let catalog = Catalog::from_paths(&categories, Path::new(""), "/imgs", vec![PathBuf::from("pie3.png")]);
        let gallery = Gallery::new(categories, catalog, ScriptResolver::new("/nonexistent", "md"));

        let ui = UiState::default();
        let page = interpret(&gallery, "/", ui.language()).unwrap();
        let html = unescape(Renderer::new().unwrap().render(&gallery, &page, &ui, "t").unwrap());
        assert!(html.contains("href=\"/category/pie%231?theme_clicks=0&lang_clicks=0\""));

        let page = interpret(&gallery, "/category/pie%231", ui.language()).unwrap();
        assert_eq!(page.title, "饼图");
        let html = unescape(Renderer::new().unwrap().render(&gallery, &page, &ui, "t").unwrap());
        assert!(html.contains("href=\"/chart/pie%231/0?theme_clicks=0&lang_clicks=0\""));
    }

    #[test]
    fn test_toggle_links_increment_counters() {
        let html = render("/category/bar", 1, 0);
        assert!(html.contains("body class=\"theme-dark\""));
        assert!(html.contains("href=\"/category/bar?theme_clicks=2&lang_clicks=0\""));
        assert!(html.contains("href=\"/category/bar?theme_clicks=1&lang_clicks=1\""));
    }

    #[test]
    fn test_category_grid_in_english() {
        let html = render("/category/bar", 0, 1);
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("Bar Chart"));
        assert!(html.contains("/chart/bar/0?theme_clicks=0&lang_clicks=1"));
        assert!(html.contains("#2"));
    }

    #[test]
    fn test_empty_category_message() {
        let html = render("/category/tree", 0, 0);
        assert!(html.contains(tr(Language::Zh, Message::ImageMissing)));
    }

    #[test]
    fn test_detail_renders_fallback_markdown() {
        let html = render("/chart/bar/0", 0, 1);
        assert!(html.contains("<pre><code class=\"language-r\">"));
        assert!(html.contains("library(ggplot2)"));
        assert!(html.contains("href=\"/category/bar?theme_clicks=0&lang_clicks=1\""));
    }

    #[test]
    fn test_not_found_page() {
        let html = render("/nowhere", 0, 0);
        assert!(html.contains(tr(Language::Zh, Message::NotFoundRoute)));
    }

    #[test]
    fn test_markdown_to_html() {
        let html = markdown_to_html("# Title\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<table>"));
    }
}
