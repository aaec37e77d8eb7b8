//! Host-synchronized Presenter
//!
//! 每次翻页都是一次完整往返：`/read/nav` 在服务端执行状态迁移，
//! 重新规范化、分页后重定向回规范地址。

use super::address::ReaderAddress;
use super::layout::chapter_end_panel;
use crate::application::ports::{PagePresenterPort, ReaderPreferences, ReaderView, RenderMode};
use crate::domain::paginator::escape_html;

pub struct HostSyncPresenter;

impl PagePresenterPort for HostSyncPresenter {
    fn mode(&self) -> RenderMode {
        RenderMode::Host
    }

    fn present(&self, view: &ReaderView, preferences: &ReaderPreferences) -> String {
        let addr = ReaderAddress::from_view(view, preferences);
        let header = format!(
            r#"<div class="page-header">Page {} / {}</div>"#,
            view.page_number(),
            view.page_count()
        );

        if view.show_chapter_end {
            let back = addr.clone().with_end(false).reader_href();
            return format!(
                r#"{header}<div class="chapter-end">{panel}</div><div class="page-controls"><a class="button" href="{back}">&larr; Back</a><span class="nav-disabled">Next &rarr;</span></div>"#,
                header = header,
                panel = chapter_end_panel(view, &addr),
                back = escape_html(&back),
            );
        }

        let prev = if view.availability.prev_page {
            format!(
                r#"<a class="button" href="{}">&larr; Previous</a>"#,
                escape_html(&addr.nav_href("prev_page"))
            )
        } else {
            r#"<span class="nav-disabled">&larr; Previous</span>"#.to_string()
        };
        // 最后一页的"下一页"仍然可点，服务端会把它变成章末提示
        let next = format!(
            r#"<a class="button" href="{}">Next &rarr;</a>"#,
            escape_html(&addr.nav_href("next_page"))
        );

        format!(
            r#"{header}<div class="page-content">{content}</div><div class="page-controls">{prev}{next}</div>"#,
            header = header,
            content = view.pagination.page(view.position.page_index).html(),
            prev = prev,
            next = next,
        )
    }
}
