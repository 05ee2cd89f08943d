// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Route interpretation
//!
//! Turns a navigation path into a [`PageDescriptor`]. Missing data is never
//! an error here: unknown categories, out-of-range images and unmatched
//! paths all become [`PageContent::NotFound`] with a reason.

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::catalog::{encode_segment, ImageRef};
use crate::gallery::Gallery;
use crate::i18n::{tr, Language, Message};
use crate::Result;

/// A parsed navigation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` or `/home`
    Home,
    /// `/category/{key}`
    Category(String),
    /// `/chart/{key}/{index}`; indexes too large for `usize` saturate
    Chart { key: String, index: usize },
    Unmatched,
}

impl Route {
    /// Parse a URL path; segments are percent-decoded before matching.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() || path == "/" {
            return Self::Home;
        }
        let Some(rest) = path.strip_prefix('/') else {
            return Self::Unmatched;
        };
        let decoded: Option<Vec<String>> = rest
            .split('/')
            .map(|s| percent_decode_str(s).decode_utf8().ok().map(|c| c.into_owned()))
            .collect();
        match decoded {
            Some(segments) => {
                let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
                Self::from_segments(&segments)
            }
            None => Self::Unmatched,
        }
    }

    /// Interpret already-split path segments (without the leading slash).
    pub fn from_segments(segments: &[&str]) -> Self {
        match segments {
            ["home"] => Self::Home,
            ["category", key] if !key.is_empty() => Self::Category(key.to_string()),
            ["chart", key, index] if !key.is_empty() && is_decimal(index) => Self::Chart {
                key: key.to_string(),
                index: index.parse().unwrap_or(usize::MAX),
            },
            _ => Self::Unmatched,
        }
    }

    pub fn category_path(key: &str) -> String {
        format!("/category/{}", encode_segment(key))
    }

    pub fn chart_path(key: &str, index: usize) -> String {
        format!("/chart/{}/{}", encode_segment(key), index)
    }
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Why a page could not be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotFoundReason {
    UnknownCategory,
    ImageNotFound,
    UnmatchedRoute,
}

impl NotFoundReason {
    pub fn message(self) -> Message {
        match self {
            Self::UnknownCategory => Message::NotFoundCategory,
            Self::ImageNotFound => Message::NotFoundImage,
            Self::UnmatchedRoute => Message::NotFoundRoute,
        }
    }
}

/// One tile of a category grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridItem {
    pub index: usize,
    /// 1-based position label, e.g. `#3`
    pub label: String,
    pub image: ImageRef,
    pub link: String,
}

/// What a page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageContent {
    Home {
        total: usize,
        images: Vec<ImageRef>,
    },
    Category {
        key: String,
        title: String,
        description: String,
        count: usize,
        items: Vec<GridItem>,
    },
    Detail {
        key: String,
        index: usize,
        category_title: String,
        image: ImageRef,
        script: String,
        back_link: String,
    },
    NotFound {
        reason: NotFoundReason,
        message: String,
    },
}

/// Result of interpreting a route: a title and the content to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    pub title: String,
    pub content: PageContent,
}

impl PageDescriptor {
    pub fn not_found(reason: NotFoundReason, lang: Language) -> Self {
        Self {
            title: tr(lang, Message::NotFound).to_string(),
            content: PageContent::NotFound {
                reason,
                message: tr(lang, reason.message()).to_string(),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.content, PageContent::NotFound { .. })
    }
}

/// Interpret a path against the gallery.
///
/// Only the detail branch touches the filesystem (script lookup), and only
/// unexpected I/O failures there produce an error.
pub fn interpret(gallery: &Gallery, path: &str, lang: Language) -> Result<PageDescriptor> {
    interpret_route(gallery, &Route::parse(path), lang)
}

pub fn interpret_route(gallery: &Gallery, route: &Route, lang: Language) -> Result<PageDescriptor> {
    let page = match route {
        Route::Home => home(gallery, lang),
        Route::Category(key) => category(gallery, key, lang),
        Route::Chart { key, index } => detail(gallery, key, *index, lang)?,
        Route::Unmatched => PageDescriptor::not_found(NotFoundReason::UnmatchedRoute, lang),
    };
    Ok(page)
}

fn home(gallery: &Gallery, lang: Language) -> PageDescriptor {
    let images: Vec<ImageRef> = gallery.catalog().images().cloned().collect();
    PageDescriptor {
        title: tr(lang, Message::Home).to_string(),
        content: PageContent::Home {
            total: images.len(),
            images,
        },
    }
}

fn category(gallery: &Gallery, key: &str, lang: Language) -> PageDescriptor {
    let Some(category) = gallery.categories().get(key) else {
        return PageDescriptor::not_found(NotFoundReason::UnknownCategory, lang);
    };

    let items: Vec<GridItem> = gallery
        .catalog()
        .images_in(key)
        .iter()
        .enumerate()
        .map(|(index, image)| GridItem {
            index,
            label: format!("#{}", index + 1),
            image: image.clone(),
            link: Route::chart_path(key, index),
        })
        .collect();

    PageDescriptor {
        title: category.title(lang).to_string(),
        content: PageContent::Category {
            key: key.to_string(),
            title: category.title(lang).to_string(),
            description: category.description(lang).to_string(),
            count: items.len(),
            items,
        },
    }
}

fn detail(gallery: &Gallery, key: &str, index: usize, lang: Language) -> Result<PageDescriptor> {
    // Unknown keys have no images, so they land here too
    let (Some(category), Some(image)) = (
        gallery.categories().get(key),
        gallery.catalog().images_in(key).get(index),
    ) else {
        return Ok(PageDescriptor::not_found(NotFoundReason::ImageNotFound, lang));
    };

    let script = gallery.scripts().resolve(category, image, lang)?;
    let category_title = category.title(lang).to_string();

    Ok(PageDescriptor {
        title: format!("{} #{}", category_title, index + 1),
        content: PageContent::Detail {
            key: key.to_string(),
            index,
            category_title,
            image: image.clone(),
            script,
            back_link: Route::category_path(key),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::categories::CategorySet;
    use crate::scripts::ScriptResolver;
    use std::path::{Path, PathBuf};

    fn gallery(names: &[&str]) -> Gallery {
        let categories = CategorySet::builtin();
        let paths = names.iter().map(PathBuf::from).collect();
        let catalog = Catalog::from_paths(&categories, Path::new(""), "/assets/imgs", paths);
        Gallery::new(categories, catalog, ScriptResolver::new("/nonexistent/scripts", "md"))
    }

    fn reason(page: &PageDescriptor) -> Option<NotFoundReason> {
        match page.content {
            PageContent::NotFound { reason, .. } => Some(reason),
            _ => None,
        }
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/home"), Route::Home);
        assert_eq!(Route::parse("/category/bar"), Route::Category("bar".into()));
        assert_eq!(
            Route::parse("/chart/bar/12"),
            Route::Chart { key: "bar".into(), index: 12 }
        );
    }

    #[test]
    fn test_parse_malformed_routes_are_unmatched() {
        for path in [
            "home",
            "/home/",
            "/category",
            "/category/",
            "/category/bar/",
            "/category/bar/extra",
            "/chart/bar",
            "/chart/bar/-1",
            "/chart/bar/1.5",
            "/chart/bar/x",
            "/chart//0",
            "/chart/bar/0/",
            "/unknown",
        ] {
            assert_eq!(Route::parse(path), Route::Unmatched, "{}", path);
        }
    }

    #[test]
    fn test_parse_decodes_segments() {
        assert_eq!(Route::parse("/category/pie%231"), Route::Category("pie#1".into()));
        assert_eq!(
            Route::parse("/chart/%E6%8A%98%E7%BA%BF/0"),
            Route::Chart { key: "折线".into(), index: 0 }
        );
        assert_eq!(Route::parse("/category/%FF"), Route::Unmatched);
        assert_eq!(Route::parse("/chart/bar/%FF"), Route::Unmatched);
    }

    #[test]
    fn test_links_encode_keys() {
        assert_eq!(Route::category_path("bar"), "/category/bar");
        assert_eq!(Route::category_path("pie#1"), "/category/pie%231");
        assert_eq!(Route::chart_path("a b?", 2), "/chart/a%20b%3F/2");
        for key in ["pie#1", "a b?", "50%", "折线"] {
            assert_eq!(Route::parse(&Route::category_path(key)), Route::Category(key.into()));
            assert_eq!(
                Route::parse(&Route::chart_path(key, 3)),
                Route::Chart { key: key.into(), index: 3 }
            );
        }
    }

    #[test]
    fn test_parse_huge_index_saturates() {
        assert_eq!(
            Route::parse("/chart/bar/99999999999999999999999999"),
            Route::Chart { key: "bar".into(), index: usize::MAX }
        );
    }

    #[test]
    fn test_home_lists_everything() {
        let g = gallery(&["line1.png", "scatter_a.png", "weird.png"]);
        let page = g.interpret("/", Language::Zh).unwrap();
        assert_eq!(page.title, "主页");
        match page.content {
            PageContent::Home { total, images } => {
                assert_eq!(total, 3);
                let stems: Vec<&str> = images.iter().map(|i| i.stem.as_str()).collect();
                assert_eq!(stems, ["line1", "scatter_a", "weird"]);
            }
            other => panic!("expected home, got {:?}", other),
        }
        assert_eq!(g.interpret("/home", Language::En).unwrap().title, "Home");
    }

    #[test]
    fn test_category_page() {
        let g = gallery(&["line1.png", "scatter_a.png", "weird.png"]);
        let page = g.interpret("/category/line", Language::En).unwrap();
        assert_eq!(page.title, "Line Chart");
        match page.content {
            PageContent::Category { key, count, items, description, .. } => {
                assert_eq!(key, "line");
                assert_eq!(count, 1);
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].image.stem, "line1");
                assert_eq!(items[0].label, "#1");
                assert_eq!(items[0].link, "/chart/line/0");
                assert!(description.contains("trends"));
            }
            other => panic!("expected category, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_category_is_still_a_category() {
        let g = gallery(&["line1.png"]);
        let page = g.interpret("/category/bar", Language::Zh).unwrap();
        assert_eq!(page.title, "柱形图");
        assert!(matches!(page.content, PageContent::Category { count: 0, .. }));
    }

    #[test]
    fn test_unknown_category() {
        let g = gallery(&["line1.png"]);
        let page = g.interpret("/category/bogus", Language::En).unwrap();
        assert_eq!(reason(&page), Some(NotFoundReason::UnknownCategory));
        assert_eq!(page.title, "Page Not Found");
        match page.content {
            PageContent::NotFound { message, .. } => {
                assert_eq!(message, "The category does not exist.")
            }
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn test_detail_page_uses_fallback_script() {
        let g = gallery(&["bar_chart-01.png", "bar7.png"]);
        let page = g.interpret("/chart/bar/1", Language::En).unwrap();
        assert_eq!(page.title, "Bar Chart #2");
        match page.content {
            PageContent::Detail { key, index, image, script, back_link, category_title } => {
                assert_eq!(key, "bar");
                assert_eq!(index, 1);
                assert_eq!(image.stem, "bar7");
                assert_eq!(category_title, "Bar Chart");
                assert_eq!(back_link, "/category/bar");
                assert!(script.contains("`bar7`"));
                assert!(script.contains("Bar Chart"));
            }
            other => panic!("expected detail, got {:?}", other),
        }
    }

    #[test]
    fn test_detail_out_of_range() {
        let g = gallery(&["line1.png"]);
        for path in ["/chart/bar/0", "/chart/bogus/0", "/chart/line/1", "/chart/line/99999999999999999999999"] {
            let page = g.interpret(path, Language::Zh).unwrap();
            assert_eq!(reason(&page), Some(NotFoundReason::ImageNotFound), "{}", path);
            assert_eq!(page.title, "页面不存在");
        }
    }

    #[test]
    fn test_unmatched_route() {
        let g = gallery(&[]);
        let page = g.interpret("/chart/line/abc", Language::En).unwrap();
        assert_eq!(reason(&page), Some(NotFoundReason::UnmatchedRoute));
        assert!(page.is_not_found());
    }

    #[test]
    fn test_descriptor_json_shape() {
        let g = gallery(&["line1.png"]);
        let page = g.interpret("/chart/nope/0", Language::En).unwrap();
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["content"]["kind"], "not_found");
        assert_eq!(json["content"]["reason"], "image-not-found");

        let page = g.interpret("/", Language::En).unwrap();
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["content"]["kind"], "home");
        assert_eq!(json["content"]["images"][0]["url"], "/assets/imgs/line1.png");
        assert!(json["content"]["images"][0].get("path").is_none());
    }
}
