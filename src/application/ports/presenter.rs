//! Page Presenter Port - 阅读页展示策略
//!
//! 分页器与状态机与展示方式无关；展示方式由配置 / 用户偏好选择:
//! - Host:   每次翻页都是一次完整往返，重新规范化、分页并渲染
//! - Client: 一次性下发整章分页，由页面内的展示单元本地翻页；跨章仍需往返

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::novel::{ChapterSummary, ContentSource, Novel};
use crate::domain::paginator::DEFAULT_WORDS_PER_PAGE;
use crate::domain::{NavAvailability, Pagination, ReaderPosition};

/// 无法识别的偏好取值
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown option: {0}")]
pub struct UnknownOption(pub String);

/// 展示模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// 宿主同步：每次翻页完整往返
    Host,
    /// 客户端本地翻页
    #[default]
    Client,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Host => "host",
            RenderMode::Client => "client",
        }
    }
}

impl FromStr for RenderMode {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(RenderMode::Host),
            "client" => Ok(RenderMode::Client),
            _ => Err(UnknownOption(s.to_string())),
        }
    }
}

/// 背景主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    /// 纸张（默认）
    #[default]
    Sepia,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Sepia => "sepia",
            Theme::Dark => "dark",
        }
    }

    /// (背景色, 文字色)
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            Theme::Light => ("#ffffff", "#212121"),
            Theme::Sepia => ("#fdf6e3", "#333333"),
            Theme::Dark => ("#1a1a1a", "#cccccc"),
        }
    }
}

impl FromStr for Theme {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "sepia" => Ok(Theme::Sepia),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownOption(s.to_string())),
        }
    }
}

/// 字体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Serif,
    Sans,
}

impl FontFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontFamily::Serif => "serif",
            FontFamily::Sans => "sans",
        }
    }

    pub fn css_stack(&self) -> &'static str {
        match self {
            FontFamily::Serif => "'Merriweather', 'Times New Roman', serif",
            FontFamily::Sans => "'Helvetica', 'Arial', sans-serif",
        }
    }
}

impl FromStr for FontFamily {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serif" => Ok(FontFamily::Serif),
            "sans" => Ok(FontFamily::Sans),
            _ => Err(UnknownOption(s.to_string())),
        }
    }
}

/// 字号范围（px）
pub const MIN_FONT_SIZE: u8 = 14;
pub const MAX_FONT_SIZE: u8 = 30;
pub const DEFAULT_FONT_SIZE: u8 = 20;

/// 用户展示偏好（保存在会话中）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderPreferences {
    pub mode: RenderMode,
    pub words_per_page: usize,
    pub theme: Theme,
    pub font: FontFamily,
    pub font_size: u8,
}

impl Default for ReaderPreferences {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            words_per_page: DEFAULT_WORDS_PER_PAGE,
            theme: Theme::default(),
            font: FontFamily::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl ReaderPreferences {
    pub fn with_font_size(self, size: u8) -> Self {
        Self {
            font_size: size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            ..self
        }
    }
}

/// 阅读页视图（展示策略的输入）
///
/// 页数与页码总是由当前章节、当前分页预算重新计算得到。
#[derive(Debug, Clone)]
pub struct ReaderView {
    /// 小说目录（用于切换小说）
    pub novels: Vec<Novel>,
    pub novel: Novel,
    pub chapters: Vec<ChapterSummary>,
    /// 当前章节，小说没有章节时为 None
    pub chapter: Option<ChapterSummary>,
    pub pagination: Pagination,
    pub position: ReaderPosition,
    pub availability: NavAvailability,
    /// 显示章末提示而不是正文
    pub show_chapter_end: bool,
    pub source: ContentSource,
}

impl ReaderView {
    pub fn page_number(&self) -> usize {
        self.position.page_index + 1
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    /// 浏览器标签标题
    pub fn tab_title(&self) -> &str {
        self.chapter
            .as_ref()
            .map(|c| c.title.as_str())
            .unwrap_or_else(|| self.novel.title())
    }
}

/// Page Presenter Port
pub trait PagePresenterPort: Send + Sync {
    fn mode(&self) -> RenderMode;

    /// 渲染阅读面板（页码头、当前页内容、翻页控件、章末提示）的 HTML
    fn present(&self, view: &ReaderView, preferences: &ReaderPreferences) -> String;
}
