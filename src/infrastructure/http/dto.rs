//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::{FontFamily, ReaderPreferences, RenderMode, Theme};
use crate::config::ReaderConfig;
use crate::domain::novel::{ChapterSummary, Novel};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// 阅读地址参数
// ============================================================================

/// 阅读页 / 导航的地址参数
///
/// 全部按字符串接收：缺失或无效的值回退到会话或默认值，而不是拒绝请求。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReaderParams {
    pub novel: Option<String>,
    pub chapter: Option<String>,
    pub page: Option<String>,
    pub end: Option<String>,
    pub mode: Option<String>,
    pub wpp: Option<String>,
    pub theme: Option<String>,
    pub font: Option<String>,
    pub size: Option<String>,
    /// 导航动作
    pub action: Option<String>,
    /// 导航目标（章节序号或小说 slug）
    pub target: Option<String>,
}

fn parse_number<T: std::str::FromStr>(value: &Option<String>) -> Option<T> {
    value.as_deref().and_then(|v| v.trim().parse().ok())
}

impl ReaderParams {
    pub fn novel(&self) -> Option<String> {
        self.novel
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub fn chapter(&self) -> Option<u32> {
        parse_number(&self.chapter)
    }

    pub fn page(&self) -> Option<usize> {
        parse_number(&self.page)
    }

    pub fn show_end(&self) -> bool {
        matches!(self.end.as_deref(), Some("1") | Some("true"))
    }

    pub fn target_chapter(&self) -> Option<u32> {
        parse_number(&self.target)
    }

    /// 用地址中的偏好参数覆盖会话中的偏好
    pub fn apply_preferences(&self, current: ReaderPreferences, config: &ReaderConfig) -> ReaderPreferences {
        let mut prefs = current;
        if let Some(mode) = self.mode.as_deref().and_then(|s| s.parse::<RenderMode>().ok()) {
            prefs.mode = mode;
        }
        if let Some(theme) = self.theme.as_deref().and_then(|s| s.parse::<Theme>().ok()) {
            prefs.theme = theme;
        }
        if let Some(font) = self.font.as_deref().and_then(|s| s.parse::<FontFamily>().ok()) {
            prefs.font = font;
        }
        if let Some(size) = parse_number::<u8>(&self.size) {
            prefs = prefs.with_font_size(size);
        }
        if let Some(wpp) = parse_number::<usize>(&self.wpp) {
            prefs.words_per_page = wpp;
        }
        prefs.words_per_page = config.clamp_words_per_page(Some(prefs.words_per_page));
        prefs
    }
}

// ============================================================================
// 编辑表单
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SaveEditForm {
    pub novel: String,
    pub chapter: u32,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RewriteForm {
    pub novel: String,
    pub chapter: u32,
}

// ============================================================================
// Catalog DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct NovelResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

impl From<&Novel> for NovelResponse {
    fn from(novel: &Novel) -> Self {
        Self {
            id: *novel.id().as_uuid(),
            title: novel.title().to_string(),
            slug: novel.slug().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChapterResponse {
    pub id: Uuid,
    pub index: u32,
    pub title: String,
}

impl From<&ChapterSummary> for ChapterResponse {
    fn from(chapter: &ChapterSummary) -> Self {
        Self {
            id: *chapter.id.as_uuid(),
            index: chapter.index,
            title: chapter.title.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListChaptersRequest {
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct ChaptersResponse {
    pub novel: NovelResponse,
    pub chapters: Vec<ChapterResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ChapterPagesRequest {
    pub slug: String,
    pub chapter_index: u32,
    #[serde(default)]
    pub words_per_page: Option<usize>,
}

/// 整章分页（客户端展示单元的数据源）
#[derive(Debug, Serialize)]
pub struct ChapterPagesResponse {
    pub novel: NovelResponse,
    pub chapter: ChapterResponse,
    /// raw | edited
    pub source: String,
    pub words_per_page: usize,
    pub page_count: usize,
    /// 每页的 HTML 片段
    pub pages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_params_ignored() {
        let params = ReaderParams {
            chapter: Some("abc".to_string()),
            page: Some("-1".to_string()),
            novel: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(params.chapter(), None);
        assert_eq!(params.page(), None);
        assert_eq!(params.novel(), None);
        assert!(!params.show_end());
    }

    #[test]
    fn test_apply_preferences() {
        let config = ReaderConfig::default();
        let params = ReaderParams {
            mode: Some("host".to_string()),
            theme: Some("dark".to_string()),
            font: Some("comic".to_string()),
            size: Some("40".to_string()),
            wpp: Some("5".to_string()),
            ..Default::default()
        };
        let prefs = params.apply_preferences(ReaderPreferences::default(), &config);
        assert_eq!(prefs.mode, RenderMode::Host);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.font, FontFamily::Serif);
        assert_eq!(prefs.font_size, 30);
        assert_eq!(prefs.words_per_page, config.min_words_per_page);
    }
}
