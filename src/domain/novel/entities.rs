//! Novel Context - Entities

use serde::{Deserialize, Serialize};

use super::{ChapterId, NovelId};

/// 展示内容来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// 上游生成的原文
    Raw,
    /// 人工 / AI 修订稿
    Edited,
}

impl ContentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSource::Raw => "raw",
            ContentSource::Edited => "edited",
        }
    }
}

/// 章节
///
/// 不变量:
/// - 任意时刻 raw / edited 中恰有一份是展示权威（见 `authoritative_source`）
/// - 本系统从不删除章节
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub id: ChapterId,
    pub novel_id: NovelId,
    /// 小说内的排序键，单调递增，允许间隔
    pub index: u32,
    pub title: String,
    pub content: Option<String>,
    pub content_edit: Option<String>,
}

impl Chapter {
    /// 选择展示权威文本的来源
    ///
    /// 编辑稿存在且字符数不少于 `min_edit_chars` 时以编辑稿为准，否则使用原文。
    pub fn authoritative_source(&self, min_edit_chars: usize) -> ContentSource {
        match self.content_edit.as_deref() {
            Some(edit) if edit.chars().count() >= min_edit_chars => ContentSource::Edited,
            _ => ContentSource::Raw,
        }
    }

    /// 展示权威文本（未规范化）
    pub fn authoritative_text(&self, min_edit_chars: usize) -> Option<&str> {
        match self.authoritative_source(min_edit_chars) {
            ContentSource::Edited => self.content_edit.as_deref(),
            ContentSource::Raw => self.content.as_deref(),
        }
    }

    pub fn summary(&self) -> ChapterSummary {
        ChapterSummary {
            id: self.id,
            index: self.index,
            title: self.title.clone(),
        }
    }
}

/// 章节目录项（不含正文）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub id: ChapterId,
    pub index: u32,
    pub title: String,
}
