// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for vizgallery

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::categories::{builtin_categories, Category, CategorySet};

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Where images and script overrides live
    #[serde(default)]
    pub gallery: GalleryConfig,

    /// Web server settings
    #[serde(default)]
    pub web: WebConfig,

    /// Categories in classification order
    #[serde(default = "builtin_categories")]
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GalleryConfig {
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
    /// URL path the images directory is served under
    #[serde(default = "default_images_url_prefix")]
    pub images_url_prefix: String,
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: String,
    #[serde(default = "default_script_extension")]
    pub script_extension: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebConfig {
    #[serde(default = "default_web_host")]
    pub host: String,
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// Site name shown in the browser tab
    #[serde(default = "default_web_title")]
    pub title: String,
}

/// First path segments owned by page and API routes
const RESERVED_PREFIXES: [&str; 5] = ["home", "category", "chart", "api", "health"];

// Default value functions
fn default_images_dir() -> String { "./assets/imgs".to_string() }
fn default_images_url_prefix() -> String { "/assets/imgs".to_string() }
fn default_scripts_dir() -> String { "./public/r_scripts".to_string() }
fn default_script_extension() -> String { "md".to_string() }
fn default_web_host() -> String { "127.0.0.1".to_string() }
fn default_web_port() -> u16 { 8050 }
fn default_web_title() -> String { "vizgallery".to_string() }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gallery: GalleryConfig::default(),
            web: WebConfig::default(),
            categories: builtin_categories(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            images_dir: default_images_dir(),
            images_url_prefix: default_images_url_prefix(),
            scripts_dir: default_scripts_dir(),
            script_extension: default_script_extension(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            title: default_web_title(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::GalleryError::Config(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validated category set built from `categories`
    pub fn category_set(&self) -> crate::Result<CategorySet> {
        CategorySet::new(self.categories.clone())
    }

    /// Check everything that can be checked without touching the filesystem.
    pub fn validate(&self) -> crate::Result<()> {
        self.category_set()?;

        let prefix = &self.gallery.images_url_prefix;
        if !prefix.starts_with('/') || prefix.trim_end_matches('/').is_empty() {
            return Err(crate::GalleryError::Config(format!(
                "images_url_prefix must start with '/' and not be the site root, got {:?}",
                prefix
            )));
        }
        if prefix.contains([':', '*', '{', '}', '?', '#']) {
            return Err(crate::GalleryError::Config(format!(
                "images_url_prefix {:?} contains a reserved character",
                prefix
            )));
        }
        let first_segment = prefix.trim_start_matches('/').split('/').next().unwrap_or("");
        if RESERVED_PREFIXES.contains(&first_segment) {
            return Err(crate::GalleryError::Config(format!(
                "images_url_prefix {:?} collides with the /{} routes",
                prefix, first_segment
            )));
        }

        let extension = self.gallery.script_extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(crate::GalleryError::Config(format!(
                "invalid script_extension {:?}",
                self.gallery.script_extension
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.gallery.images_dir, "./assets/imgs");
        assert_eq!(config.gallery.scripts_dir, "./public/r_scripts");
        assert_eq!(config.web.port, 8050);
        assert_eq!(config.categories.len(), 7);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"web": {"port": 9000}}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.gallery.script_extension, "md");
        assert_eq!(config.categories[0].key, "line");
    }

    #[test]
    fn test_saved_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut config = AppConfig::default();
        config.gallery.images_dir = "photos".to_string();
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.gallery.images_dir, "photos");
        assert_eq!(loaded.categories, config.categories);
    }

    #[test]
    fn test_invalid_categories_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"categories": [{"key": "line", "title_zh": "折线", "title_en": "Line", "keywords": ["line"]}]}"#,
        )
        .unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, crate::GalleryError::Config(_)));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_validate_url_prefix_and_extension() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.gallery.images_url_prefix = "/".to_string();
        assert!(config.validate().is_err());
        config.gallery.images_url_prefix = "assets".to_string();
        assert!(config.validate().is_err());
        config.gallery.images_url_prefix = "/static/".to_string();
        assert!(config.validate().is_ok());

        for prefix in ["/home", "/category", "/chart/", "/api/imgs", "/health", "/:imgs", "/imgs/*rest"] {
            config.gallery.images_url_prefix = prefix.to_string();
            assert!(config.validate().is_err(), "{}", prefix);
        }
        config.gallery.images_url_prefix = "/homepage-images".to_string();
        assert!(config.validate().is_ok());

        config.gallery.script_extension = ".".to_string();
        assert!(config.validate().is_err());
        config.gallery.script_extension = ".Rmd".to_string();
        assert!(config.validate().is_ok());
    }
}
