// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Filename classifier
//!
//! Maps an image to a category by normalized keyword containment. The first
//! category (in declared order) with a matching keyword wins; anything left
//! over goes to the catch-all category.

use std::path::Path;

use crate::categories::{Category, CategorySet};

/// Strip `_`, `-` and whitespace, then lowercase.
///
/// `Bar_Chart-01` and `barchart01` normalize to the same string.
pub fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// File name without directory and extension
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Classify an image by the stem of its path.
pub fn classify<'a>(categories: &'a CategorySet, image: &Path) -> &'a Category {
    classify_stem(categories, &file_stem(image))
}

/// Classify a bare stem.
pub fn classify_stem<'a>(categories: &'a CategorySet, stem: &str) -> &'a Category {
    let normalized = normalize_name(stem);
    if normalized.is_empty() {
        return categories.catch_all();
    }

    categories
        .matchers()
        .find(|(_, keywords)| keywords.iter().any(|k| normalized.contains(k.as_str())))
        .map(|(category, _)| category)
        .unwrap_or_else(|| categories.catch_all())
}
