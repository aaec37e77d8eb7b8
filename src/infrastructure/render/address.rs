//! 阅读地址
//!
//! 地址栏承载当前小说 slug、章节序号、页码以及展示偏好，
//! 每次导航后都重定向到规范地址，使地址与内部状态保持同步。

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::application::ports::{ReaderPreferences, ReaderView};

/// 查询参数中保留原样的字符之外全部编码
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// 规范阅读地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderAddress {
    pub novel: String,
    pub chapter: u32,
    pub page: usize,
    pub end: bool,
    pub preferences: ReaderPreferences,
}

impl ReaderAddress {
    pub fn new(novel: impl Into<String>, chapter: u32, page: usize, preferences: ReaderPreferences) -> Self {
        Self {
            novel: novel.into(),
            chapter,
            page,
            end: false,
            preferences,
        }
    }

    pub fn from_view(view: &ReaderView, preferences: &ReaderPreferences) -> Self {
        Self {
            novel: view.novel.slug().to_string(),
            chapter: view.position.chapter_index,
            page: view.position.page_index,
            end: view.show_chapter_end,
            preferences: *preferences,
        }
    }

    pub fn with_end(self, end: bool) -> Self {
        Self { end, ..self }
    }

    /// 地址参数（顺序固定）
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let prefs = &self.preferences;
        let mut pairs = vec![
            ("novel", self.novel.clone()),
            ("chapter", self.chapter.to_string()),
            ("page", self.page.to_string()),
        ];
        if self.end {
            pairs.push(("end", "1".to_string()));
        }
        pairs.extend([
            ("mode", prefs.mode.as_str().to_string()),
            ("wpp", prefs.words_per_page.to_string()),
            ("theme", prefs.theme.as_str().to_string()),
            ("font", prefs.font.as_str().to_string()),
            ("size", prefs.font_size.to_string()),
        ]);
        pairs
    }

    pub fn query_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// 阅读页地址
    pub fn reader_href(&self) -> String {
        format!("/?{}", self.query_string())
    }

    /// 导航动作地址（章末标记由导航结果重新决定）
    pub fn nav_href(&self, action: &str) -> String {
        format!(
            "/read/nav?action={}&{}",
            action,
            self.clone().with_end(false).query_string()
        )
    }

    /// 切换章节地址
    pub fn select_chapter_href(&self, chapter: u32) -> String {
        format!(
            "/read/nav?action=select_chapter&target={}&{}",
            chapter,
            self.clone().with_end(false).query_string()
        )
    }

    /// 编辑页地址
    pub fn edit_href(&self) -> String {
        format!(
            "/edit?novel={}&chapter={}",
            encode_component(&self.novel),
            self.chapter
        )
    }

    /// 表单中携带当前地址的隐藏字段，`skip` 中的参数由表单自己提供
    pub fn hidden_inputs(&self, skip: &[&str]) -> String {
        self.pairs()
            .iter()
            .filter(|(key, _)| *key != "end" && !skip.contains(key))
            .map(|(key, value)| {
                format!(
                    r#"<input type="hidden" name="{}" value="{}">"#,
                    key,
                    crate::domain::paginator::escape_html(value)
                )
            })
            .collect()
    }
}
