//! 编辑视图
//!
//! 左侧为可编辑的当前展示文本，右侧为只读的规范化原文。

use super::address::encode_component;
use super::layout::document;
use crate::application::ports::ReaderPreferences;
use crate::application::EditorView;
use crate::domain::paginator::escape_html;

/// 操作结果提示（就地显示）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    fn html(&self) -> String {
        let (class, message) = match self {
            Notice::Success(msg) => ("notice-success", msg),
            Notice::Error(msg) => ("notice-error", msg),
        };
        format!(
            r#"<div class="notice {}" role="status">{}</div>"#,
            class,
            escape_html(message)
        )
    }
}

/// 渲染编辑页
///
/// `draft` 为保存失败时保留的用户输入，否则显示当前文本。
pub fn editor_page(
    view: &EditorView,
    prefs: &ReaderPreferences,
    notice: Option<&Notice>,
    draft: Option<&str>,
) -> String {
    let slug = view.novel.slug().as_str();
    let back = format!(
        "/?novel={}&chapter={}",
        encode_component(slug),
        view.chapter.index
    );
    let hidden = format!(
        r#"<input type="hidden" name="novel" value="{}"><input type="hidden" name="chapter" value="{}">"#,
        escape_html(slug),
        view.chapter.index
    );

    let rewrite = if view.rewrite_available {
        format!(
            r#"<form method="post" action="/edit/rewrite">{}<button type="submit">Rewrite with AI</button></form>"#,
            hidden
        )
    } else {
        r#"<p class="rewrite-disabled">AI rewrite is disabled: no API key configured.</p>"#.to_string()
    };

    let body = format!(
        r#"<p><a href="{back}">&larr; Back to reading</a></p><h2 class="chapter-title">{novel} &middot; {chapter}</h2>{notice}<p>Showing <strong>{source}</strong> text.</p><form method="post" action="/edit/save">{hidden}<label for="edit-text">Edited text</label><textarea id="edit-text" name="text">{text}</textarea><button type="submit">Save</button></form>{rewrite}<h3>Original</h3><textarea readonly>{reference}</textarea>"#,
        back = escape_html(&back),
        novel = escape_html(view.novel.title()),
        chapter = escape_html(&view.chapter.title),
        notice = notice.map(Notice::html).unwrap_or_default(),
        source = view.source.as_str(),
        hidden = hidden,
        text = escape_html(draft.unwrap_or(view.display.as_str())),
        rewrite = rewrite,
        reference = escape_html(&view.reference),
    );

    document(&view.chapter.title, prefs, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::{ChapterId, ChapterSummary, ContentSource, Novel, NovelId, Slug};

    fn editor_view(rewrite_available: bool) -> EditorView {
        let chapter_id = ChapterId::new();
        EditorView {
            novel: Novel::new(NovelId::new(), "Demo", Slug::new("demo").unwrap()).unwrap(),
            chapter: ChapterSummary {
                id: chapter_id,
                index: 4,
                title: "Chapter Four".to_string(),
            },
            chapter_id,
            display: "Edited <b>body</b>".to_string(),
            reference: "Raw body".to_string(),
            source: ContentSource::Edited,
            rewrite_available,
        }
    }

    #[test]
    fn test_editor_fields() {
        let html = editor_page(&editor_view(true), &ReaderPreferences::default(), None, None);
        assert!(html.contains("Edited &lt;b&gt;body&lt;/b&gt;</textarea>"));
        assert!(html.contains("<textarea readonly>Raw body</textarea>"));
        assert!(html.contains(r#"action="/edit/rewrite""#));
        assert!(html.contains(r#"href="/?novel=demo&amp;chapter=4""#));
        assert!(html.contains("<strong>edited</strong>"));
    }

    #[test]
    fn test_rewrite_disabled_and_notice() {
        let notice = Notice::Error("Rewrite failed".to_string());
        let html = editor_page(
            &editor_view(false),
            &ReaderPreferences::default(),
            Some(&notice),
            Some("my draft"),
        );
        assert!(!html.contains(r#"action="/edit/rewrite""#));
        assert!(html.contains("AI rewrite is disabled"));
        assert!(html.contains(r#"<div class="notice notice-error" role="status">Rewrite failed</div>"#));
        assert!(html.contains(">my draft</textarea>"));
    }
}
