//! 页面骨架

use super::address::ReaderAddress;
use crate::application::ports::{ReaderPreferences, ReaderView, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::domain::paginator::escape_html;

/// 完整 HTML 文档
pub(crate) fn document(title: &str, prefs: &ReaderPreferences, body: &str) -> String {
    let (bg, text) = prefs.theme.colors();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
:root {{ --bg-color: {bg}; --text-color: {text}; --font-size: {size}px; }}
body {{ max-width: 760px; margin: 0 auto; padding: 1rem; background: #f0f0f0; color: #222; font-family: 'Helvetica', 'Arial', sans-serif; }}
.toolbar {{ display: flex; flex-wrap: wrap; gap: .5rem; margin-bottom: 1rem; }}
.toolbar form {{ display: flex; gap: .25rem; align-items: center; }}
.chapter-title {{ text-align: center; margin-bottom: 20px; }}
.chapter-nav {{ display: flex; justify-content: space-between; margin: .5rem 0; }}
.nav-disabled {{ visibility: hidden; }}
.paper-container {{ background-color: var(--bg-color); color: var(--text-color); padding: 30px; border-radius: 8px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); border: 1px solid rgba(0,0,0,0.05); margin-bottom: 20px; }}
.page-header {{ text-align: center; opacity: .7; margin-bottom: 1rem; }}
.page-content p {{ font-family: {font}; font-size: var(--font-size); line-height: 1.6; text-align: justify; margin-bottom: 1em; text-indent: 2em; }}
.page-controls {{ display: flex; justify-content: space-between; margin-top: 1rem; }}
.chapter-end {{ text-align: center; padding: 2rem 0; }}
.notice {{ padding: .75rem 1rem; border-radius: 6px; margin-bottom: 1rem; }}
.notice-success {{ background: #e6f4ea; color: #1e4620; }}
.notice-error {{ background: #fdecea; color: #611a15; }}
textarea {{ width: 100%; min-height: 18rem; font-family: {font}; font-size: 16px; box-sizing: border-box; }}
</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        bg = bg,
        text = text,
        size = prefs.font_size,
        font = prefs.font.css_stack(),
        body = body,
    )
}

/// 终止本次渲染的提示页（未配置存储、目录为空、存储不可用等）
pub fn message_page(title: &str, message: &str, prefs: &ReaderPreferences) -> String {
    let body = format!(
        r#"<div class="paper-container"><h2 class="chapter-title">{}</h2><p class="message">{}</p></div>"#,
        escape_html(title),
        escape_html(message)
    );
    document(title, prefs, &body)
}

fn link_or_placeholder(enabled: bool, href: &str, label: &str) -> String {
    if enabled {
        format!(r#"<a class="button" href="{}">{}</a>"#, escape_html(href), label)
    } else {
        format!(r#"<span class="nav-disabled">{}</span>"#, label)
    }
}

/// 上 / 下章节导航，到达首章或末章时隐藏对应方向
fn chapter_nav(view: &ReaderView, addr: &ReaderAddress, long_labels: bool) -> String {
    let (prev_label, next_label) = if long_labels {
        ("&larr; Previous chapter", "Next chapter &rarr;")
    } else {
        ("&larr;", "&rarr;")
    };
    format!(
        r#"<nav class="chapter-nav">{}{}</nav>"#,
        link_or_placeholder(
            view.availability.prev_chapter,
            &addr.nav_href("prev_chapter"),
            prev_label
        ),
        link_or_placeholder(
            view.availability.next_chapter,
            &addr.nav_href("next_chapter"),
            next_label
        ),
    )
}

/// 章末提示：下一页已无效，提示进入下一章
pub(crate) fn chapter_end_panel(view: &ReaderView, addr: &ReaderAddress) -> String {
    let next = if view.availability.next_chapter {
        format!(
            r#"<a class="button" id="next-chapter" href="{}">Next chapter &rarr;</a>"#,
            escape_html(&addr.nav_href("next_chapter"))
        )
    } else {
        r#"<p>You have reached the last chapter.</p>"#.to_string()
    };
    format!(
        r#"<p class="chapter-end-title">End of chapter</p>{}"#,
        next
    )
}

fn novel_selector(view: &ReaderView, addr: &ReaderAddress) -> String {
    let options: String = view
        .novels
        .iter()
        .map(|novel| {
            let selected = if novel.id() == view.novel.id() { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape_html(novel.slug().as_str()),
                selected,
                escape_html(novel.title())
            )
        })
        .collect();
    format!(
        r#"<form method="get" action="/read/nav"><input type="hidden" name="action" value="select_novel">{}<select name="target" onchange="this.form.submit()">{}</select><noscript><button type="submit">Open</button></noscript></form>"#,
        addr.hidden_inputs(&[]),
        options
    )
}

fn chapter_selector(view: &ReaderView, addr: &ReaderAddress) -> String {
    let options: String = view
        .chapters
        .iter()
        .map(|chapter| {
            let selected = if chapter.index == view.position.chapter_index {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                chapter.index,
                selected,
                escape_html(&chapter.title)
            )
        })
        .collect();

    let (min, max) = match (view.chapters.first(), view.chapters.last()) {
        (Some(first), Some(last)) => (first.index, last.index),
        _ => (0, 0),
    };

    format!(
        r#"<form method="get" action="/read/nav"><input type="hidden" name="action" value="select_chapter">{hidden}<label>Jump to <input type="number" name="target" min="{min}" max="{max}" value="{current}"></label><button type="submit">Go</button></form><form method="get" action="/read/nav"><input type="hidden" name="action" value="select_chapter">{hidden}<select name="target" onchange="this.form.submit()">{options}</select><noscript><button type="submit">Open</button></noscript></form>"#,
        hidden = addr.hidden_inputs(&[]),
        min = min,
        max = max,
        current = view.position.chapter_index,
        options = options,
    )
}

fn preferences_form(addr: &ReaderAddress) -> String {
    let prefs = &addr.preferences;
    let option = |value: &str, label: &str, selected: bool| {
        format!(
            r#"<option value="{}"{}>{}</option>"#,
            value,
            if selected { " selected" } else { "" },
            label
        )
    };
    let themes: String = [("light", "Light"), ("sepia", "Paper"), ("dark", "Night")]
        .iter()
        .map(|(value, label)| option(value, label, prefs.theme.as_str() == *value))
        .collect();
    let fonts: String = [("serif", "Serif"), ("sans", "Sans")]
        .iter()
        .map(|(value, label)| option(value, label, prefs.font.as_str() == *value))
        .collect();
    let modes: String = [("client", "Instant pages"), ("host", "Reload per page")]
        .iter()
        .map(|(value, label)| option(value, label, prefs.mode.as_str() == *value))
        .collect();

    format!(
        r#"<form method="get" action="/" class="preferences">{hidden}<select name="theme">{themes}</select><select name="font">{fonts}</select><input type="number" name="size" min="{min}" max="{max}" value="{size}"><select name="mode">{modes}</select><input type="number" name="wpp" value="{wpp}"><button type="submit">Apply</button></form>"#,
        hidden = addr.hidden_inputs(&["theme", "font", "size", "mode", "wpp", "page", "end"]),
        themes = themes,
        fonts = fonts,
        min = MIN_FONT_SIZE,
        max = MAX_FONT_SIZE,
        size = prefs.font_size,
        modes = modes,
        wpp = prefs.words_per_page,
    )
}

/// 阅读页：选择器、章节标题、上下章节导航与展示面板
pub fn reader_page(view: &ReaderView, prefs: &ReaderPreferences, panel: &str) -> String {
    let addr = ReaderAddress::from_view(view, prefs);

    let content = if view.chapters.is_empty() {
        r#"<div class="paper-container"><p class="message">This novel has no chapters yet.</p></div>"#
            .to_string()
    } else {
        format!(
            r#"<h2 class="chapter-title">{title}</h2>{top}<div class="paper-container">{panel}</div>{bottom}<p><a href="{edit}">Edit this chapter</a></p>"#,
            title = escape_html(view.tab_title()),
            top = chapter_nav(view, &addr, false),
            panel = panel,
            bottom = chapter_nav(view, &addr, true),
            edit = escape_html(&addr.edit_href()),
        )
    };

    let body = format!(
        r#"<header class="toolbar">{}{}</header><details><summary>Reading settings</summary>{}</details>{}"#,
        novel_selector(view, &addr),
        if view.chapters.is_empty() {
            String::new()
        } else {
            chapter_selector(view, &addr)
        },
        preferences_form(&addr),
        content
    );

    document(view.tab_title(), prefs, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::render::test_views::view;

    #[test]
    fn test_message_page_escapes() {
        let html = message_page("Oops", "<script>", &ReaderPreferences::default());
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<title>Oops</title>"));
    }

    #[test]
    fn test_reader_page_title_and_theme() {
        let html = reader_page(&view("a b c", 2, 0, false), &ReaderPreferences::default(), "PANEL");
        assert!(html.contains("<title>Chapter 2</title>"));
        assert!(html.contains("--bg-color: #fdf6e3"));
        assert!(html.contains("PANEL"));
        assert!(html.contains(r#"<option value="2" selected>Chapter 2</option>"#));
        assert!(html.contains("Demo &lt;Novel&gt;"));
    }

    #[test]
    fn test_chapter_nav_hidden_at_bounds() {
        let first = reader_page(&view("a", 1, 0, false), &ReaderPreferences::default(), "");
        assert!(first.contains(r#"<span class="nav-disabled">&larr; Previous chapter</span>"#));
        assert!(first.contains("action=next_chapter"));

        let last = reader_page(&view("a", 3, 0, false), &ReaderPreferences::default(), "");
        assert!(last.contains(r#"<span class="nav-disabled">Next chapter &rarr;</span>"#));
        assert!(last.contains("action=prev_chapter"));
    }

    #[test]
    fn test_chapter_end_panel() {
        let middle = view("a", 2, 0, true);
        let addr = ReaderAddress::from_view(&middle, &ReaderPreferences::default());
        assert!(chapter_end_panel(&middle, &addr).contains("id=\"next-chapter\""));

        let last = view("a", 3, 0, true);
        let addr = ReaderAddress::from_view(&last, &ReaderPreferences::default());
        assert!(chapter_end_panel(&last, &addr).contains("last chapter"));
    }
}
