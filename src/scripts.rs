// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Script snippets shown on detail pages
//!
//! A snippet comes from the first of:
//! 1. `{scripts_dir}/{image stem}.{ext}`
//! 2. `{scripts_dir}/{category key}.{ext}`
//! 3. a generated template that names the two override files above
//!
//! Override files are returned verbatim whatever the display language.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::ImageRef;
use crate::categories::Category;
use crate::i18n::Language;
use crate::Result;

const EXAMPLE_SCRIPT_BODY: &str = r##"library(ggplot2)

df <- data.frame(
  x = 1:10,
  y = c(2, 5, 3, 8, 6, 7, 4, 9, 10, 11)
)

ggplot(df, aes(x, y)) +
  geom_line(color = "#2ca9e1", linewidth = 1.2) +
  theme_minimal(base_size = 14)
"##;

/// Resolves the script text for an image
#[derive(Debug, Clone)]
pub struct ScriptResolver {
    root: PathBuf,
    extension: String,
}

impl ScriptResolver {
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Override file names, highest priority first
    pub fn override_names(&self, category_key: &str, stem: &str) -> [String; 2] {
        [
            format!("{}.{}", stem, self.extension),
            format!("{}.{}", category_key, self.extension),
        ]
    }

    /// Resolve the script for `image` in `category`.
    ///
    /// Absent overrides are expected and fall through to the template; only
    /// unexpected I/O failures (permissions, invalid UTF-8) are errors.
    pub fn resolve(&self, category: &Category, image: &ImageRef, lang: Language) -> Result<String> {
        for name in self.override_names(&category.key, &image.stem) {
            let path = self.root.join(&name);
            if let Some(text) = read_override(&path)? {
                debug!("Script for {:?} from override {:?}", image.stem, path);
                return Ok(text);
            }
        }

        debug!("No script override for {:?}, using template", image.stem);
        Ok(self.fallback(category, &image.stem, lang))
    }

    /// The generated template used when no override exists
    pub fn fallback(&self, category: &Category, stem: &str, lang: Language) -> String {
        let title = category.title(lang);
        let dir = self.display_dir();
        let [image_file, category_file] = self.override_names(&category.key, stem);

        match lang {
            Language::En => format!(
                "# {title} - R Script Example\n\
                 \n\
                 Current image: `{stem}`\n\
                 \n\
                 Create files under `{dir}/` to override this template:\n\
                 \n\
                 - `{image_file}` (highest priority)\n\
                 - `{category_file}`\n\
                 \n\
                 ```r\n\
                 # Example: replace with your actual R script\n\
                 {body}```\n",
                body = EXAMPLE_SCRIPT_BODY,
            ),
            Language::Zh => format!(
                "# {title} - R 脚本示例\n\
                 \n\
                 当前图片：`{stem}`\n\
                 \n\
                 你可以在 `{dir}/` 下创建以下文件来覆盖此模板：\n\
                 \n\
                 - `{image_file}`（优先级最高）\n\
                 - `{category_file}`\n\
                 \n\
                 ```r\n\
                 # 示例：请替换为你的真实 R 脚本\n\
                 {body}```\n",
                body = EXAMPLE_SCRIPT_BODY,
            ),
        }
    }

    /// Scripts directory as shown to users, without `./` or a trailing slash
    fn display_dir(&self) -> String {
        let dir = self.root.to_string_lossy().replace('\\', "/");
        let dir = dir.strip_prefix("./").unwrap_or(&dir);
        dir.trim_end_matches('/').to_string()
    }
}

/// Read an override file; a missing file or a non-file entry is `None`.
fn read_override(path: &Path) -> Result<Option<String>> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(Some(std::fs::read_to_string(path)?)),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
