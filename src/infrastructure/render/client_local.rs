//! Client-local Presenter
//!
//! 整章分页一次性下发给页面内的展示单元，翻页在本地完成，
//! 并用 `history.replaceState` 同步地址栏中的页码与章末标记。
//! 跨章导航仍然走 `/read/nav` 往返。

use super::address::ReaderAddress;
use super::layout::chapter_end_panel;
use crate::application::ports::{PagePresenterPort, ReaderPreferences, ReaderView, RenderMode};

const SCRIPT: &str = r#"(function () {
  var root = document.getElementById('reader');
  var pages = JSON.parse(document.getElementById('reader-pages').textContent);
  var index = parseInt(root.getAttribute('data-page'), 10) || 0;
  var atEnd = root.getAttribute('data-end') === '1';
  var content = document.getElementById('page-content');
  var endPanel = document.getElementById('chapter-end');
  var number = document.getElementById('page-number');
  var prev = document.getElementById('prev-page');
  var next = document.getElementById('next-page');
  if (index > pages.length - 1) { index = pages.length - 1; }

  function render() {
    content.innerHTML = pages[index];
    number.textContent = index + 1;
    content.hidden = atEnd;
    endPanel.hidden = !atEnd;
    prev.disabled = index === 0 && !atEnd;
    next.disabled = atEnd;
    var url = new URL(window.location.href);
    url.searchParams.set('page', index);
    if (atEnd) { url.searchParams.set('end', '1'); } else { url.searchParams.delete('end'); }
    window.history.replaceState(null, '', url.toString());
  }

  function forward() {
    if (atEnd) { return; }
    if (index + 1 < pages.length) { index += 1; } else { atEnd = true; }
    render();
  }

  function back() {
    if (atEnd) { atEnd = false; } else if (index > 0) { index -= 1; }
    render();
  }

  prev.addEventListener('click', back);
  next.addEventListener('click', forward);
  document.addEventListener('keydown', function (e) {
    if (e.key === 'ArrowRight') { forward(); }
    if (e.key === 'ArrowLeft') { back(); }
  });

  var startX = null;
  root.addEventListener('touchstart', function (e) { startX = e.touches[0].clientX; }, { passive: true });
  root.addEventListener('touchend', function (e) {
    if (startX === null) { return; }
    var dx = e.changedTouches[0].clientX - startX;
    startX = null;
    if (Math.abs(dx) > 40) { if (dx < 0) { forward(); } else { back(); } }
  });

  render();
})();"#;

/// 把整章分页编码为可安全嵌入 `<script>` 的 JSON
fn pages_json(view: &ReaderView) -> String {
    serde_json::to_string(&view.pagination.fragments())
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/")
}

pub struct ClientLocalPresenter;

impl PagePresenterPort for ClientLocalPresenter {
    fn mode(&self) -> RenderMode {
        RenderMode::Client
    }

    fn present(&self, view: &ReaderView, preferences: &ReaderPreferences) -> String {
        let addr = ReaderAddress::from_view(view, preferences);
        let current = view.pagination.page(view.position.page_index).html();
        let (content_hidden, end_hidden) = if view.show_chapter_end {
            (" hidden", "")
        } else {
            ("", " hidden")
        };

        format!(
            r#"<div id="reader" data-page="{page}" data-end="{end}"><div class="page-header">Page <span id="page-number">{number}</span> / <span id="page-count">{count}</span></div><div class="page-content" id="page-content"{content_hidden}>{current}</div><div class="chapter-end" id="chapter-end"{end_hidden}>{panel}</div><div class="page-controls"><button type="button" id="prev-page">&larr; Previous</button><button type="button" id="next-page">Next &rarr;</button></div></div><script type="application/json" id="reader-pages">{pages}</script><script>{script}</script>"#,
            page = view.position.page_index,
            end = if view.show_chapter_end { "1" } else { "0" },
            number = view.page_number(),
            count = view.page_count(),
            content_hidden = content_hidden,
            current = current,
            end_hidden = end_hidden,
            panel = chapter_end_panel(view, &addr),
            pages = pages_json(view),
            script = SCRIPT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::render::test_views::view;

    const TEXT: &str = "one two three\nfour five six\nseven eight";

    #[test]
    fn test_whole_chapter_embedded() {
        let html = ClientLocalPresenter.present(&view(TEXT, 2, 1, false), &ReaderPreferences::default());
        assert!(html.contains(r#"data-page="1""#));
        assert!(html.contains(r#"<span id="page-count">3</span>"#));
        assert!(html.contains(r#"<span id="page-number">2</span>"#));
        assert!(html.contains(r#"["<p>one two three<\/p>","<p>four five six<\/p>","<p>seven eight<\/p>"]"#));
        assert!(html.contains(r#"id="page-content"><p>four five six</p>"#));
    }

    #[test]
    fn test_script_breakout_escaped() {
        let html = ClientLocalPresenter.present(
            &view("</script><script>alert(1)", 1, 0, false),
            &ReaderPreferences::default(),
        );
        let data_start = html.find(r#"id="reader-pages">"#).unwrap();
        let data_end = html[data_start..].find("</script>").unwrap();
        let data = &html[data_start..data_start + data_end];
        assert!(!data.contains("<script>"));
    }

    #[test]
    fn test_initial_chapter_end_state() {
        let html = ClientLocalPresenter.present(&view(TEXT, 3, 2, true), &ReaderPreferences::default());
        assert!(html.contains(r#"data-end="1""#));
        assert!(html.contains(r#"id="page-content" hidden>"#));
        assert!(html.contains(r#"id="chapter-end">"#));
        assert!(html.contains("You have reached the last chapter."));
    }

    #[test]
    fn test_mode() {
        assert_eq!(ClientLocalPresenter.mode(), RenderMode::Client);
    }
}
