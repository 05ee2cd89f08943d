// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! vizgallery: a bilingual gallery of chart images
//!
//! Images found under a directory are sorted into categories by file-name
//! keywords and served as a home carousel, per-category grids and detail
//! pages with the script that produced each chart.

pub mod catalog;
pub mod categories;
pub mod classifier;
pub mod config;
pub mod error;
pub mod events;
pub mod gallery;
pub mod i18n;
pub mod route;
pub mod scripts;
pub mod theme;
pub mod web;

pub use config::AppConfig;
pub use error::{GalleryError, Result};
pub use gallery::Gallery;
