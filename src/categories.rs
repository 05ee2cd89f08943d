// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Chart categories and their keyword sets

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::classifier::normalize_name;
use crate::i18n::{tr, Language, Message};
use crate::{GalleryError, Result};

/// A predefined classification bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier, also used in routes and override filenames
    pub key: String,
    pub title_zh: String,
    pub title_en: String,
    #[serde(default)]
    pub description_zh: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Matched against normalized filename stems, in order
    #[serde(default)]
    pub keywords: Vec<String>,
}

fn default_icon() -> String {
    "antd-app-store".to_string()
}

impl Category {
    pub fn new(key: &str, title_zh: &str, title_en: &str, keywords: Vec<String>) -> Self {
        Self {
            key: key.to_string(),
            title_zh: title_zh.to_string(),
            title_en: title_en.to_string(),
            description_zh: String::new(),
            description_en: String::new(),
            icon: default_icon(),
            keywords,
        }
    }

    pub fn title(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.title_en,
            Language::Zh => &self.title_zh,
        }
    }

    pub fn description(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.description_en,
            Language::Zh => &self.description_zh,
        }
    }
}

/// The validated, ordered set of categories used for a gallery
///
/// Holds exactly one catch-all category (one without usable keywords).
#[derive(Debug, Clone)]
pub struct CategorySet {
    categories: Vec<Category>,
    /// Normalized, non-empty keywords per category (parallel to `categories`)
    normalized: Vec<Vec<String>>,
    catch_all: usize,
}

impl CategorySet {
    /// Validate and index a list of categories.
    ///
    /// Keywords that normalize to the empty string are dropped, so they can
    /// never match every filename.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let mut seen = HashSet::new();
        for category in &categories {
            if category.key.trim().is_empty() {
                return Err(GalleryError::Config("category key must not be empty".to_string()));
            }
            if category.key.contains('/') {
                return Err(GalleryError::Config(format!(
                    "category key '{}' must not contain '/'",
                    category.key
                )));
            }
            if !seen.insert(category.key.as_str()) {
                return Err(GalleryError::Config(format!(
                    "duplicate category key '{}'",
                    category.key
                )));
            }
        }

        let normalized: Vec<Vec<String>> = categories
            .iter()
            .map(|c| {
                c.keywords
                    .iter()
                    .map(|k| normalize_name(k))
                    .filter(|k| !k.is_empty())
                    .collect()
            })
            .collect();

        let catch_alls: Vec<usize> = normalized
            .iter()
            .enumerate()
            .filter(|(_, keywords)| keywords.is_empty())
            .map(|(i, _)| i)
            .collect();

        let catch_all = match catch_alls.as_slice() {
            [index] => *index,
            [] => {
                return Err(GalleryError::Config(
                    "exactly one catch-all category (without keywords) is required, found none"
                        .to_string(),
                ))
            }
            many => {
                let keys: Vec<&str> = many.iter().map(|i| categories[*i].key.as_str()).collect();
                return Err(GalleryError::Config(format!(
                    "exactly one catch-all category (without keywords) is required, found {:?}",
                    keys
                )));
            }
        };

        Ok(Self {
            categories,
            normalized,
            catch_all,
        })
    }

    /// The built-in chart categories
    pub fn builtin() -> Self {
        let categories = builtin_categories();
        let normalized = categories
            .iter()
            .map(|c| c.keywords.iter().map(|k| normalize_name(k)).collect())
            .collect();
        let catch_all = categories.len() - 1;
        Self {
            categories,
            normalized,
            catch_all,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn catch_all(&self) -> &Category {
        &self.categories[self.catch_all]
    }

    /// Categories in declared order
    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Non-catch-all categories with their normalized keywords, in declared order
    pub(crate) fn matchers(&self) -> impl Iterator<Item = (&Category, &[String])> {
        self.categories
            .iter()
            .zip(self.normalized.iter())
            .enumerate()
            .filter(move |(i, _)| *i != self.catch_all)
            .map(|(_, (category, keywords))| (category, keywords.as_slice()))
    }

    /// Localized title for a key; unknown keys get the generic category label.
    pub fn title(&self, key: &str, lang: Language) -> &str {
        match self.get(key) {
            Some(category) => category.title(lang),
            None => tr(lang, Message::CategoryPage),
        }
    }

    pub fn as_slice(&self) -> &[Category] {
        &self.categories
    }
}

impl<'a> IntoIterator for &'a CategorySet {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn category(
    key: &str,
    title_zh: &str,
    title_en: &str,
    icon: &str,
    description_zh: &str,
    description_en: &str,
    keywords: &[&str],
) -> Category {
    Category {
        key: key.to_string(),
        title_zh: title_zh.to_string(),
        title_en: title_en.to_string(),
        description_zh: description_zh.to_string(),
        description_en: description_en.to_string(),
        icon: icon.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// Built-in categories in classification order; `other` is the catch-all and comes last.
pub fn builtin_categories() -> Vec<Category> {
    vec![
        category(
            "line",
            "折线图",
            "Line Chart",
            "antd-line-chart",
            "适合展示趋势变化，支持多序列对比和时间维度分析。",
            "Good for trends over time and multi-series comparison.",
            &["line", "trend", "timeseries", "折线", "曲线", "趋势"],
        ),
        category(
            "scatter",
            "散点图",
            "Scatter Plot",
            "antd-dot-chart",
            "适合观察变量相关性、离群点与聚类分布。",
            "Great for correlation, outliers, and cluster distribution.",
            &["scatter", "dot", "point", "散点", "点图"],
        ),
        category(
            "heatmap",
            "热力图",
            "Heatmap",
            "antd-area-chart",
            "适合展示二维矩阵强度、空间热点和密度变化。",
            "Useful for matrix intensity, hotspots, and density shifts.",
            &["heatmap", "heat", "matrix", "热点", "热力", "矩阵"],
        ),
        category(
            "bubble",
            "气泡图",
            "Bubble Chart",
            "antd-bulb",
            "适合展示三维信息：横轴、纵轴与气泡大小。",
            "Shows three dimensions: x, y, and bubble size.",
            &["bubble", "气泡", "气泡图"],
        ),
        category(
            "bar",
            "柱形图",
            "Bar Chart",
            "antd-bar-chart",
            "适合展示类别间数值比较，例如分组对比和排序。",
            "Best for category comparison, grouping, and ranking.",
            &["bar", "column", "hist", "柱", "条形", "柱形", "柱状"],
        ),
        category(
            "tree",
            "进化树",
            "Phylogenetic Tree",
            "antd-apartment",
            "适合展示系统发育关系、层级结构和分支演化。",
            "Ideal for phylogeny, hierarchy, and branch evolution.",
            &["tree", "phylo", "clade", "dendro", "进化树", "系统发育", "树图"],
        ),
        category(
            "other",
            "其他图表",
            "Other Charts",
            "antd-app-store",
            "未命中关键词的图片会自动归入此分类。",
            "Images unmatched by keywords are grouped here.",
            &[],
        ),
    ]
}
