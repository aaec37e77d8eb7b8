//! 内容规范化
//!
//! 从章节的存储形态中恢复可分页的纯文本。存储内容可能是:
//! - 纯文本（最常见）
//! - JSON 信封，正文位于某个字段中
//! - 带首尾哨兵标记的上游生成输出（标记外是模型的开场白 / 结束语）
//!
//! 规范化由一组有序的提取步骤组成，每一步要么返回提取结果，要么原样放行。
//! 任何一步都不会失败。

use serde_json::Value;

use super::novel::{Chapter, ContentSource};

/// 默认编辑稿最小字符数
pub const DEFAULT_MIN_EDIT_CHARS: usize = 50;

/// 默认哨兵标记
pub const DEFAULT_SENTINEL_START: &str = "<<<CONTENT_START>>>";
pub const DEFAULT_SENTINEL_END: &str = "<<<CONTENT_END>>>";

/// JSON 信封嵌套字段的最大解析深度
const MAX_ENVELOPE_DEPTH: usize = 3;

/// 规范化配置
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// 编辑稿被视为权威所需的最小字符数
    pub min_edit_chars: usize,
    /// JSON 信封中承载正文的字段（按优先级）
    pub json_body_fields: Vec<String>,
    pub sentinel_start: String,
    pub sentinel_end: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_edit_chars: DEFAULT_MIN_EDIT_CHARS,
            json_body_fields: vec!["content".to_string(), "text".to_string(), "body".to_string()],
            sentinel_start: DEFAULT_SENTINEL_START.to_string(),
            sentinel_end: DEFAULT_SENTINEL_END.to_string(),
        }
    }
}

/// 单个提取步骤
///
/// 返回 `None` 表示"未匹配，原样放行"。
pub trait Extraction: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract(&self, text: &str) -> Option<String>;
}

/// JSON 信封解包
pub struct JsonEnvelope {
    fields: Vec<String>,
}

impl JsonEnvelope {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    fn unwrap_value(&self, value: &Value, depth: usize) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) if depth < MAX_ENVELOPE_DEPTH => self
                .fields
                .iter()
                .filter_map(|field| map.get(field))
                .find_map(|inner| self.unwrap_value(inner, depth + 1)),
            _ => None,
        }
    }
}

impl Extraction for JsonEnvelope {
    fn name(&self) -> &'static str {
        "json_envelope"
    }

    fn extract(&self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        // 只有对象才算信封；纯文本不尝试解析
        if !trimmed.starts_with('{') {
            return None;
        }
        let value: Value = serde_json::from_str(trimmed).ok()?;
        self.unwrap_value(&value, 0)
    }
}

/// 哨兵标记裁剪
pub struct SentinelPair {
    start: String,
    end: String,
}

impl SentinelPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl Extraction for SentinelPair {
    fn name(&self) -> &'static str {
        "sentinel_pair"
    }

    fn extract(&self, text: &str) -> Option<String> {
        if self.start.is_empty() || self.end.is_empty() {
            return None;
        }
        let begin = text.find(&self.start)? + self.start.len();
        let len = text[begin..].find(&self.end)?;
        Some(text[begin..begin + len].trim().to_string())
    }
}

/// 换行规范化：字面量 `\n` 转义序列与 CRLF 统一为 `\n`
pub struct EscapedNewlines;

impl Extraction for EscapedNewlines {
    fn name(&self) -> &'static str {
        "escaped_newlines"
    }

    fn extract(&self, text: &str) -> Option<String> {
        if !(text.contains("\\n") || text.contains('\r')) {
            return None;
        }
        Some(
            text.replace("\\r\\n", "\n")
                .replace("\\n", "\n")
                .replace("\r\n", "\n")
                .replace('\r', "\n"),
        )
    }
}

/// 规范化结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContent {
    /// 用于展示 / 分页的文本
    pub display: String,
    /// 只读参考文本（规范化后的原文）
    pub reference: String,
    pub source: ContentSource,
}

/// 内容规范化器
pub struct ContentNormalizer {
    min_edit_chars: usize,
    steps: Vec<Box<dyn Extraction>>,
}

impl ContentNormalizer {
    pub fn new(config: &NormalizerConfig) -> Self {
        // 哨兵内部也可能是 JSON 信封，裁剪后再解一次
        let steps: Vec<Box<dyn Extraction>> = vec![
            Box::new(JsonEnvelope::new(config.json_body_fields.clone())),
            Box::new(SentinelPair::new(
                config.sentinel_start.clone(),
                config.sentinel_end.clone(),
            )),
            Box::new(JsonEnvelope::new(config.json_body_fields.clone())),
            Box::new(EscapedNewlines),
        ];
        Self {
            min_edit_chars: config.min_edit_chars,
            steps,
        }
    }

    pub fn min_edit_chars(&self) -> usize {
        self.min_edit_chars
    }

    /// 依次执行所有提取步骤
    pub fn normalize_text(&self, text: &str) -> String {
        self.steps.iter().fold(text.to_string(), |acc, step| {
            match step.extract(&acc) {
                Some(extracted) => {
                    tracing::trace!(step = step.name(), "Normalization step matched");
                    extracted
                }
                None => acc,
            }
        })
    }

    /// 规范化章节：选择权威文本并提取展示 / 参考两份纯文本
    pub fn normalize_chapter(&self, chapter: &Chapter) -> NormalizedContent {
        let source = chapter.authoritative_source(self.min_edit_chars);
        let reference = self.normalize_text(chapter.content.as_deref().unwrap_or_default());
        let display = match source {
            ContentSource::Edited => self.normalize_text(
                chapter
                    .authoritative_text(self.min_edit_chars)
                    .unwrap_or_default(),
            ),
            ContentSource::Raw => reference.clone(),
        };

        NormalizedContent {
            display,
            reference,
            source,
        }
    }
}

impl Default for ContentNormalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::{ChapterId, NovelId};

    fn chapter(content: Option<&str>, edit: Option<&str>) -> Chapter {
        Chapter {
            id: ChapterId::new(),
            novel_id: NovelId::new(),
            index: 1,
            title: "Chương 1".to_string(),
            content: content.map(str::to_string),
            content_edit: edit.map(str::to_string),
        }
    }

    #[test]
    fn test_plain_text_unchanged() {
        let normalizer = ContentNormalizer::default();
        let text = "Dòng thứ nhất.\n\nDòng thứ hai, có {ngoặc} và \"trích dẫn\".";
        assert_eq!(normalizer.normalize_text(text), text);
    }

    #[test]
    fn test_plain_text_only_newlines_normalized() {
        let normalizer = ContentNormalizer::default();
        assert_eq!(normalizer.normalize_text("a\\nb\r\nc"), "a\nb\nc");
    }

    #[test]
    fn test_json_envelope_unwrapped() {
        let normalizer = ContentNormalizer::default();
        let text = r#"{"title": "x", "content": "Đoạn một.\nĐoạn hai."}"#;
        assert_eq!(normalizer.normalize_text(text), "Đoạn một.\nĐoạn hai.");
    }

    #[test]
    fn test_json_field_priority() {
        let normalizer = ContentNormalizer::default();
        let text = r#"{"body": "body wins?", "text": "text wins"}"#;
        assert_eq!(normalizer.normalize_text(text), "text wins");
    }

    #[test]
    fn test_nested_json_envelope() {
        let normalizer = ContentNormalizer::default();
        let text = r#"{"content": {"text": "inner"}}"#;
        assert_eq!(normalizer.normalize_text(text), "inner");
    }

    #[test]
    fn test_json_envelope_inside_sentinels() {
        let normalizer = ContentNormalizer::default();
        let text = "Sure:\n<<<CONTENT_START>>>{\"content\": \"Body one.\\nBody two.\"}<<<CONTENT_END>>>";
        assert_eq!(normalizer.normalize_text(text), "Body one.\nBody two.");
    }

    #[test]
    fn test_json_without_body_field_passes_through() {
        let normalizer = ContentNormalizer::default();
        let text = r#"{"title": "only a title"}"#;
        assert_eq!(normalizer.normalize_text(text), text);
    }

    #[test]
    fn test_malformed_json_passes_through() {
        let normalizer = ContentNormalizer::default();
        let text = "{ not json at all";
        assert_eq!(normalizer.normalize_text(text), text);
    }

    #[test]
    fn test_sentinels_strip_chatter() {
        let normalizer = ContentNormalizer::default();
        let text = "Sure! Here is the chapter:\n<<<CONTENT_START>>>\n  Nội dung chính.  \n<<<CONTENT_END>>>\nHope this helps.";
        assert_eq!(normalizer.normalize_text(text), "Nội dung chính.");
    }

    #[test]
    fn test_unpaired_sentinel_ignored() {
        let normalizer = ContentNormalizer::default();
        let text = "<<<CONTENT_START>>> nothing closes this";
        assert_eq!(normalizer.normalize_text(text), text);
    }

    #[test]
    fn test_json_then_sentinel_then_newlines() {
        let normalizer = ContentNormalizer::default();
        let text = r#"{"content": "chatter <<<CONTENT_START>>>A\\nB<<<CONTENT_END>>> tail"}"#;
        assert_eq!(normalizer.normalize_text(text), "A\nB");
    }

    #[test]
    fn test_normalize_chapter_selects_edit() {
        let normalizer = ContentNormalizer::default();
        let edit = format!("{}\\n{}", "x".repeat(40), "y".repeat(40));
        let ch = chapter(Some("raw text under 50 chars"), Some(&edit));
        let normalized = normalizer.normalize_chapter(&ch);
        assert_eq!(normalized.source, ContentSource::Edited);
        assert_eq!(normalized.display, format!("{}\n{}", "x".repeat(40), "y".repeat(40)));
        assert_eq!(normalized.reference, "raw text under 50 chars");
    }

    #[test]
    fn test_normalize_chapter_missing_content() {
        let normalizer = ContentNormalizer::default();
        let normalized = normalizer.normalize_chapter(&chapter(None, None));
        assert_eq!(normalized.source, ContentSource::Raw);
        assert!(normalized.display.is_empty());
    }

    #[test]
    fn test_configurable_threshold() {
        let config = NormalizerConfig {
            min_edit_chars: 5,
            ..Default::default()
        };
        let normalizer = ContentNormalizer::new(&config);
        let normalized = normalizer.normalize_chapter(&chapter(Some("raw"), Some("short")));
        assert_eq!(normalized.display, "short");
    }
}
