// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! The read-only gallery handed to every request: categories, the catalog
//! built from them, and the script resolver.

use std::path::Path;
use tracing::info;

use crate::catalog::Catalog;
use crate::categories::CategorySet;
use crate::config::AppConfig;
use crate::i18n::Language;
use crate::route::{self, PageDescriptor};
use crate::scripts::ScriptResolver;
use crate::Result;

#[derive(Debug, Clone)]
pub struct Gallery {
    categories: CategorySet,
    catalog: Catalog,
    scripts: ScriptResolver,
}

impl Gallery {
    pub fn new(categories: CategorySet, catalog: Catalog, scripts: ScriptResolver) -> Self {
        Self {
            categories,
            catalog,
            scripts,
        }
    }

    /// Validate the configured categories and scan the images directory.
    pub fn load(config: &AppConfig) -> Result<Self> {
        let categories = config.category_set()?;
        let catalog = Catalog::load(
            &categories,
            Path::new(&config.gallery.images_dir),
            &config.gallery.images_url_prefix,
        )?;
        let scripts = ScriptResolver::new(&config.gallery.scripts_dir, &config.gallery.script_extension);
        info!("Script overrides read from {:?}", scripts.root());

        Ok(Self::new(categories, catalog, scripts))
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scripts(&self) -> &ScriptResolver {
        &self.scripts
    }

    /// Interpret a navigation path into a page descriptor.
    pub fn interpret(&self, path: &str, lang: Language) -> Result<PageDescriptor> {
        route::interpret(self, path, lang)
    }
}
