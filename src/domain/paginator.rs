//! 分页器
//!
//! 把规范化后的章节文本切分成按词数预算近似约束的页面，每页是若干完整段落。
//!
//! 分页规则:
//! 1. 按换行切分段落，丢弃空白段落
//! 2. 贪心累积段落；若加入下一段会超出预算且当前页非空，则先收页
//! 3. 单个段落超出预算时独占一页，绝不在段落内部截断
//! 4. 空输入返回一个"无内容"占位页，保证页数 >= 1

use serde::Serialize;

/// 默认每页词数
pub const DEFAULT_WORDS_PER_PAGE: usize = 150;

/// 空章节的占位片段
pub const NO_CONTENT_PLACEHOLDER: &str =
    r#"<p class="no-content">This chapter has no content yet.</p>"#;

/// 分页结果中的一页
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    paragraphs: Vec<String>,
    word_count: usize,
}

impl Page {
    fn placeholder() -> Self {
        Self {
            paragraphs: Vec::new(),
            word_count: 0,
        }
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// 占位页不包含任何源段落
    pub fn is_placeholder(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// 渲染为 HTML 片段：每段一个 `<p>`，段落之间无额外分隔
    pub fn html(&self) -> String {
        if self.is_placeholder() {
            return NO_CONTENT_PLACEHOLDER.to_string();
        }
        self.paragraphs
            .iter()
            .map(|p| format!("<p>{}</p>", escape_html(p)))
            .collect()
    }
}

/// 一个章节的完整分页
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pages: Vec<Page>,
    words_per_page: usize,
}

impl Pagination {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn words_per_page(&self) -> usize {
        self.words_per_page
    }

    /// 总页数，至少为 1
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn last_index(&self) -> usize {
        self.pages.len() - 1
    }

    /// 越界的页码被钳制到最后一页
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.last_index())
    }

    pub fn page(&self, index: usize) -> &Page {
        &self.pages[self.clamp_index(index)]
    }

    pub fn is_empty_chapter(&self) -> bool {
        self.pages.len() == 1 && self.pages[0].is_placeholder()
    }

    /// 全部页面的 HTML 片段
    pub fn fragments(&self) -> Vec<String> {
        self.pages.iter().map(Page::html).collect()
    }
}

/// 空白分隔的词数
pub fn word_count(paragraph: &str) -> usize {
    paragraph.split_whitespace().count()
}

/// 按换行切分段落（去除首尾空白，丢弃空段落）
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// 对文本进行分页
pub fn paginate(text: &str, words_per_page: usize) -> Pagination {
    let mut pages: Vec<Page> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut running = 0usize;

    for paragraph in split_paragraphs(text) {
        let words = word_count(paragraph);

        if !current.is_empty() && running + words > words_per_page {
            pages.push(Page {
                paragraphs: std::mem::take(&mut current),
                word_count: running,
            });
            running = 0;
        }

        current.push(paragraph.to_string());
        running += words;
    }

    if !current.is_empty() {
        pages.push(Page {
            paragraphs: current,
            word_count: running,
        });
    }

    if pages.is_empty() {
        pages.push(Page::placeholder());
    }

    Pagination {
        pages,
        words_per_page,
    }
}

/// 便捷方法：直接返回每页的 HTML 片段
pub fn paginate_html(text: &str, words_per_page: usize) -> Vec<String> {
    paginate(text, words_per_page).fragments()
}

/// HTML 文本转义
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize, tag: &str) -> String {
        (0..n).map(|i| format!("{}{}", tag, i)).collect::<Vec<_>>().join(" ")
    }

    /// 确定性的伪随机文本（LCG），覆盖空行、空白行、超长段落
    fn sample_texts() -> Vec<String> {
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as usize
        };

        let mut texts = vec![String::new(), "   \n\t\n".to_string(), "một".to_string()];
        for case in 0..40 {
            let paragraphs = next() % 12;
            let mut lines = Vec::new();
            for p in 0..paragraphs {
                match next() % 5 {
                    0 => lines.push(String::new()),
                    1 => lines.push("   ".to_string()),
                    _ => lines.push(words(1 + next() % 220, &format!("c{}p{}w", case, p))),
                }
            }
            let sep = if case % 3 == 0 { "\r\n" } else { "\n" };
            texts.push(lines.join(sep));
        }
        texts
    }

    #[test]
    fn test_spec_example_five_paragraphs() {
        let text = (0..5).map(|i| words(40, &format!("p{}w", i))).collect::<Vec<_>>().join("\n");
        let pagination = paginate(&text, 150);

        assert_eq!(pagination.page_count(), 2);
        assert_eq!(pagination.pages()[0].paragraphs().len(), 3);
        assert_eq!(pagination.pages()[0].word_count(), 120);
        assert_eq!(pagination.pages()[1].paragraphs().len(), 2);
        assert_eq!(pagination.pages()[1].word_count(), 80);
    }

    #[test]
    fn test_empty_input_yields_placeholder() {
        for text in ["", "\n\n", "  \t \n  "] {
            let pagination = paginate(text, 150);
            assert_eq!(pagination.page_count(), 1);
            assert!(pagination.is_empty_chapter());
            assert_eq!(pagination.fragments(), vec![NO_CONTENT_PLACEHOLDER.to_string()]);
        }
    }

    #[test]
    fn test_oversized_paragraph_gets_own_page() {
        let text = format!("{}\n{}\n{}", words(10, "a"), words(500, "b"), words(10, "c"));
        let pagination = paginate(&text, 150);

        assert_eq!(pagination.page_count(), 3);
        assert_eq!(pagination.pages()[1].word_count(), 500);
        assert_eq!(pagination.pages()[1].paragraphs().len(), 1);
    }

    #[test]
    fn test_exact_budget_fits_on_one_page() {
        let text = format!("{}\n{}", words(75, "a"), words(75, "b"));
        assert_eq!(paginate(&text, 150).page_count(), 1);
    }

    #[test]
    fn test_paragraph_html() {
        let fragments = paginate_html("Xin chào\n\n  <b>A & B</b>  ", 150);
        assert_eq!(fragments, vec!["<p>Xin chào</p><p>&lt;b&gt;A &amp; B&lt;/b&gt;</p>".to_string()]);
    }

    #[test]
    fn test_zero_budget_one_paragraph_per_page() {
        let pagination = paginate("a\nb\nc", 0);
        assert_eq!(pagination.page_count(), 3);
    }

    #[test]
    fn test_clamp_index() {
        let pagination = paginate("a\nb", 1);
        assert_eq!(pagination.clamp_index(0), 0);
        assert_eq!(pagination.clamp_index(7), 1);
        assert_eq!(pagination.page(99).paragraphs(), &["b".to_string()]);
    }

    #[test]
    fn test_coverage_property() {
        for text in sample_texts() {
            for budget in [1, 50, 150, 400] {
                let pagination = paginate(&text, budget);
                let recovered: Vec<&str> = pagination
                    .pages()
                    .iter()
                    .flat_map(|p| p.paragraphs().iter().map(String::as_str))
                    .collect();
                assert_eq!(recovered, split_paragraphs(&text));
            }
        }
    }

    #[test]
    fn test_non_emptiness_property() {
        for text in sample_texts() {
            assert!(paginate(&text, 150).page_count() >= 1);
        }
    }

    #[test]
    fn test_budget_property() {
        for text in sample_texts() {
            for budget in [1, 50, 150, 400] {
                for page in paginate(&text, budget).pages() {
                    let total: usize = page.paragraphs().iter().map(|p| word_count(p)).sum();
                    assert_eq!(total, page.word_count());
                    if page.paragraphs().len() > 1 {
                        assert!(page.word_count() <= budget);
                    }
                }
            }
        }
    }

    #[test]
    fn test_no_paragraph_split_property() {
        for text in sample_texts() {
            let sources = split_paragraphs(&text);
            for page in paginate(&text, 50).pages() {
                for paragraph in page.paragraphs() {
                    assert!(sources.contains(&paragraph.as_str()));
                }
            }
        }
    }
}
