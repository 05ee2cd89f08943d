// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Image catalog: scans the images directory, orders the files by the number
//! in their names and buckets them by category.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::categories::CategorySet;
use crate::classifier::{classify, file_stem};
use crate::Result;

/// A reference to one image asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    /// File name without directory and extension
    pub stem: String,
    /// Location on disk
    #[serde(skip)]
    pub path: PathBuf,
    /// Addressable URL path, e.g. `/assets/imgs/line1.png`
    pub url: String,
}

impl ImageRef {
    /// Build a reference for `path`, which must live under `root`.
    pub fn new(root: &Path, path: PathBuf, url_prefix: &str) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path.as_path());
        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(encode_segment(&s.to_string_lossy())),
                _ => None,
            })
            .collect();

        Self {
            stem: file_stem(&path),
            url: format!("{}/{}", url_prefix.trim_end_matches('/'), segments.join("/")),
            path,
        }
    }
}

/// Everything except RFC 3986 unreserved characters
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode one URL path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// An image with the category it was classified into
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub image: ImageRef,
    pub category: String,
}

/// All images, in display order, grouped by category
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_category: HashMap<String, Vec<ImageRef>>,
}

impl Catalog {
    /// Scan `root` recursively and build the catalog.
    ///
    /// A missing root yields an empty catalog; any other I/O failure is returned.
    pub fn load(categories: &CategorySet, root: &Path, url_prefix: &str) -> Result<Self> {
        let files = enumerate_images(root)?;
        let catalog = Self::from_paths(categories, root, url_prefix, files);
        info!(
            "Catalog loaded from {:?}: {} images in {} categories",
            root,
            catalog.len(),
            categories.len()
        );
        Ok(catalog)
    }

    /// Build a catalog from already-enumerated paths (in enumeration order).
    pub fn from_paths(
        categories: &CategorySet,
        root: &Path,
        url_prefix: &str,
        mut paths: Vec<PathBuf>,
    ) -> Self {
        // Stable: equal keys keep enumeration order
        paths.sort_by_key(|p| sort_key(&file_stem(p)));

        let mut by_category: HashMap<String, Vec<ImageRef>> = categories
            .iter()
            .map(|c| (c.key.clone(), Vec::new()))
            .collect();

        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            let category = classify(categories, &path).key.clone();
            let image = ImageRef::new(root, path, url_prefix);
            debug!("Classified {:?} as {}", image.stem, category);

            by_category
                .entry(category.clone())
                .or_default()
                .push(image.clone());
            entries.push(CatalogEntry { image, category });
        }

        Self { entries, by_category }
    }

    /// Every image with its category, in display order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Every image in display order
    pub fn images(&self) -> impl Iterator<Item = &ImageRef> {
        self.entries.iter().map(|e| &e.image)
    }

    /// Images of one category; unknown keys yield an empty slice.
    pub fn images_in(&self, key: &str) -> &[ImageRef] {
        self.by_category.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Image count per category, in declared category order
    pub fn counts<'a>(&self, categories: &'a CategorySet) -> Vec<(&'a str, usize)> {
        categories
            .iter()
            .map(|c| (c.key.as_str(), self.images_in(&c.key).len()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Value of the first run of decimal digits in `stem`, if any.
///
/// ASCII and fullwidth digits count; values beyond `u64` saturate.
pub fn numeric_token(stem: &str) -> Option<u64> {
    let start = stem.find(|c: char| digit_value(c).is_some())?;
    let value = stem[start..]
        .chars()
        .map_while(digit_value)
        .fold(0u64, |acc, d| {
            acc.checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(d)))
                .unwrap_or(u64::MAX)
        });
    Some(value)
}

fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        '\u{FF10}'..='\u{FF19}' => Some(c as u32 - 0xFF10),
        _ => None,
    }
}

/// Numbered stems first (ascending), unnumbered ones after
fn sort_key(stem: &str) -> (bool, u64) {
    match numeric_token(stem) {
        Some(n) => (false, n),
        None => (true, 0),
    }
}

/// Recursively list files whose name contains a `.` under `root`, sorted by
/// name within each directory.
fn enumerate_images(root: &Path) -> Result<Vec<PathBuf>> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            warn!("Images path {:?} is not a directory, catalog is empty", root);
            return Ok(Vec::new());
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Images directory {:?} not found, catalog is empty", root);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().contains('.') {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
