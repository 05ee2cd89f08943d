// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! UI string table for the two supported languages
//!
//! Chinese is the primary language; English is reached by toggling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Display language of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Chinese (primary)
    #[default]
    Zh,
    /// English (secondary)
    En,
}

impl Language {
    /// Derive the language from the number of clicks on the language toggle.
    pub fn from_clicks(clicks: u64) -> Self {
        if clicks % 2 == 1 {
            Self::En
        } else {
            Self::Zh
        }
    }

    /// Short language code used in URLs and the `lang` attribute
    pub fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    /// The other language
    pub fn toggled(self) -> Self {
        match self {
            Self::Zh => Self::En,
            Self::En => Self::Zh,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    /// Accepts `zh`/`en` and region-tagged forms such as `zh-CN` or `en_US`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_ascii_lowercase();
        match lower.split(['-', '_']).next().unwrap_or("") {
            "zh" | "cn" => Ok(Self::Zh),
            "en" => Ok(Self::En),
            _ => Err(format!("unsupported language '{}' (expected zh or en)", value)),
        }
    }
}

/// Every translatable UI string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    Home,
    WelcomeTitle,
    WelcomeDesc,
    HomeCount,
    CategoryPage,
    CategoryCount,
    ModuleNoteTitle,
    ModuleNoteDesc,
    ImageMissing,
    NotFound,
    NotFoundCategory,
    NotFoundRoute,
    NotFoundImage,
    Detail,
    BackToCategory,
    ScriptMarkdown,
    MenuHome,
    BwMode,
    Language,
    LangZh,
    LangEn,
    EmptyImages,
}

impl Message {
    pub const ALL: [Message; 22] = [
        Message::Home,
        Message::WelcomeTitle,
        Message::WelcomeDesc,
        Message::HomeCount,
        Message::CategoryPage,
        Message::CategoryCount,
        Message::ModuleNoteTitle,
        Message::ModuleNoteDesc,
        Message::ImageMissing,
        Message::NotFound,
        Message::NotFoundCategory,
        Message::NotFoundRoute,
        Message::NotFoundImage,
        Message::Detail,
        Message::BackToCategory,
        Message::ScriptMarkdown,
        Message::MenuHome,
        Message::BwMode,
        Message::Language,
        Message::LangZh,
        Message::LangEn,
        Message::EmptyImages,
    ];

    /// Stable key, used by templates
    pub fn key(self) -> &'static str {
        match self {
            Message::Home => "home",
            Message::WelcomeTitle => "welcome_title",
            Message::WelcomeDesc => "welcome_desc",
            Message::HomeCount => "home_count",
            Message::CategoryPage => "category_page",
            Message::CategoryCount => "category_count",
            Message::ModuleNoteTitle => "module_note_title",
            Message::ModuleNoteDesc => "module_note_desc",
            Message::ImageMissing => "image_missing",
            Message::NotFound => "not_found",
            Message::NotFoundCategory => "not_found_category",
            Message::NotFoundRoute => "not_found_route",
            Message::NotFoundImage => "not_found_image",
            Message::Detail => "detail",
            Message::BackToCategory => "back_to_category",
            Message::ScriptMarkdown => "r_markdown",
            Message::MenuHome => "menu_home",
            Message::BwMode => "bw_mode",
            Message::Language => "language",
            Message::LangZh => "lang_zh",
            Message::LangEn => "lang_en",
            Message::EmptyImages => "empty_images",
        }
    }
}

/// Look up a UI string.
pub fn tr(lang: Language, message: Message) -> &'static str {
    match lang {
        Language::Zh => zh(message),
        Language::En => en(message),
    }
}

/// Look up a UI string and substitute its `{count}` placeholder.
pub fn tr_count(lang: Language, message: Message, count: usize) -> String {
    tr(lang, message).replace("{count}", &count.to_string())
}

/// All strings of one language keyed by [`Message::key`]
pub fn table(lang: Language) -> BTreeMap<&'static str, &'static str> {
    Message::ALL
        .iter()
        .map(|m| (m.key(), tr(lang, *m)))
        .collect()
}

fn zh(message: Message) -> &'static str {
    match message {
        Message::Home => "主页",
        Message::WelcomeTitle => "欢迎来到《在模仿中精进数据可视化》系列推文",
        Message::WelcomeDesc => "这里展示项目精选图片与可视化分类导航，你可以从左侧栏进入不同图表模块。",
        Message::HomeCount => "当前共收录 {count} 张图片，已按文件名进行自动分类。",
        Message::CategoryPage => "分类页面",
        Message::CategoryCount => "当前分类匹配到 {count} 张图片（依据文件名关键词自动识别）。",
        Message::ModuleNoteTitle => "模块说明",
        Message::ModuleNoteDesc => "该页面展示此类型的图片 box，点击任意图片可进入独立详情页查看脚本。",
        Message::ImageMissing => "该分类暂时没有图片，请调整文件名关键词后重试。",
        Message::NotFound => "页面不存在",
        Message::NotFoundCategory => "该分类不存在。",
        Message::NotFoundRoute => "未匹配到路由，请从左侧菜单重新选择。",
        Message::NotFoundImage => "未找到对应图片，请返回分类页重新选择。",
        Message::Detail => "详情",
        Message::BackToCategory => "← 返回该分类",
        Message::ScriptMarkdown => "R 脚本（Markdown）",
        Message::MenuHome => "主页",
        Message::BwMode => "黑白模式",
        Message::Language => "语言",
        Message::LangZh => "中文",
        Message::LangEn => "English",
        Message::EmptyImages => "当前分类没有匹配图片，请检查文件名关键词或补充图片。",
    }
}

fn en(message: Message) -> &'static str {
    match message {
        Message::Home => "Home",
        Message::WelcomeTitle => "Welcome to Improve Data Visualization Through Imitation",
        Message::WelcomeDesc => "Browse selected figures and enter modules from the left navigation.",
        Message::HomeCount => "A total of {count} images are currently collected and auto-categorized.",
        Message::CategoryPage => "Category",
        Message::CategoryCount => {
            "{count} images matched in this category (auto detected by filename keywords)."
        }
        Message::ModuleNoteTitle => "Module Note",
        Message::ModuleNoteDesc => {
            "This page shows image boxes. Click any image to open an individual detail page."
        }
        Message::ImageMissing => {
            "No images found in this category. Please adjust filename keywords and retry."
        }
        Message::NotFound => "Page Not Found",
        Message::NotFoundCategory => "The category does not exist.",
        Message::NotFoundRoute => "Route not found. Please reselect from the left menu.",
        Message::NotFoundImage => "Target image was not found. Please go back and select again.",
        Message::Detail => "Detail",
        Message::BackToCategory => "<- Back to category",
        Message::ScriptMarkdown => "R Script (Markdown)",
        Message::MenuHome => "Home",
        Message::BwMode => "B/W Mode",
        Message::Language => "Language",
        Message::LangZh => "中文",
        Message::LangEn => "English",
        Message::EmptyImages => {
            "No images matched in this category. Please add files or adjust naming keywords."
        }
    }
}
