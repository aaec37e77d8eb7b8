//! 测试用的数据库与种子数据

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::{ConnectionManager, DatabaseConfig, DbPool, SqliteNovelRepository};
use crate::application::ports::{NovelRepositoryPort, RepositoryError};
use crate::domain::novel::{Chapter, ChapterId, ChapterSummary, Novel, NovelId, Slug};

/// 种子章节
pub struct ChapterSeed<'a> {
    pub index: u32,
    pub title: &'a str,
    pub content: Option<&'a str>,
    pub content_edit: Option<&'a str>,
}

/// 内存数据库 + 仓储
pub async fn memory_repository() -> (Arc<ConnectionManager>, Arc<dyn NovelRepositoryPort>) {
    let db = Arc::new(ConnectionManager::new(Some(DatabaseConfig::in_memory())));
    let repo: Arc<dyn NovelRepositoryPort> = Arc::new(SqliteNovelRepository::new(db.clone()));
    (db, repo)
}

/// 插入一本小说及其章节，返回小说 ID
pub async fn seed_novel(pool: &DbPool, title: &str, slug: &str, chapters: &[ChapterSeed<'_>]) -> Uuid {
    let novel_id = Uuid::new_v4();
    sqlx::query("INSERT INTO novels (id, title, slug) VALUES (?, ?, ?)")
        .bind(novel_id.to_string())
        .bind(title)
        .bind(slug)
        .execute(pool)
        .await
        .unwrap();

    for chapter in chapters {
        sqlx::query(
            "INSERT INTO chapters (id, novel_id, chapter_index, title, content, content_edit) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(novel_id.to_string())
        .bind(chapter.index as i64)
        .bind(chapter.title)
        .bind(chapter.content)
        .bind(chapter.content_edit)
        .execute(pool)
        .await
        .unwrap();
    }

    novel_id
}

/// `n` 个词组成的段落
pub fn paragraph(n: usize, tag: &str) -> String {
    (0..n).map(|i| format!("{}{}", tag, i)).collect::<Vec<_>>().join(" ")
}

/// 演示数据
///
/// - "Demo Novel" (demo)：第 1 章 5 段 x 40 词（每页 150 词时 2 页），
///   第 2 章短文本，第 3 章有超过阈值的编辑稿
/// - "Another Tale" (another)：只有第 1 章
pub async fn seed_demo(pool: &DbPool) {
    let long = (0..5)
        .map(|p| paragraph(40, &format!("p{}w", p)))
        .collect::<Vec<_>>()
        .join("\n");

    seed_novel(
        pool,
        "Demo Novel",
        "demo",
        &[
            ChapterSeed {
                index: 1,
                title: "Chapter One",
                content: Some(&long),
                content_edit: None,
            },
            ChapterSeed {
                index: 2,
                title: "Chapter Two",
                content: Some("A quiet morning.\nThe road was empty."),
                content_edit: None,
            },
            ChapterSeed {
                index: 3,
                title: "Chapter Three",
                content: Some("Short raw text."),
                content_edit: Some(
                    "Edited text for chapter three.\nIt is long enough to replace the raw body.",
                ),
            },
        ],
    )
    .await;

    seed_novel(
        pool,
        "Another Tale",
        "another",
        &[ChapterSeed {
            index: 1,
            title: "Prologue",
            content: Some("Once upon a time."),
            content_edit: None,
        }],
    )
    .await;
}

/// `list_novels` 前 `failures` 次返回连接断开，其余操作委托给内部仓储
pub struct FlakyRepository {
    inner: Arc<dyn NovelRepositoryPort>,
    failures: AtomicUsize,
    calls: AtomicUsize,
}

impl FlakyRepository {
    pub fn new(inner: Arc<dyn NovelRepositoryPort>, failures: usize) -> Self {
        Self {
            inner,
            failures: AtomicUsize::new(failures),
            calls: AtomicUsize::new(0),
        }
    }

    /// `list_novels` 被调用的次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NovelRepositoryPort for FlakyRepository {
    async fn list_novels(&self) -> Result<Vec<Novel>, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(RepositoryError::ConnectionLost("connection reset".to_string()));
        }
        self.inner.list_novels().await
    }

    async fn find_novel_by_slug(&self, slug: &Slug) -> Result<Option<Novel>, RepositoryError> {
        self.inner.find_novel_by_slug(slug).await
    }

    async fn list_chapters(&self, novel_id: NovelId) -> Result<Vec<ChapterSummary>, RepositoryError> {
        self.inner.list_chapters(novel_id).await
    }

    async fn find_chapter(
        &self,
        novel_id: NovelId,
        chapter_index: u32,
    ) -> Result<Option<Chapter>, RepositoryError> {
        self.inner.find_chapter(novel_id, chapter_index).await
    }

    async fn get_chapter(&self, id: ChapterId) -> Result<Option<Chapter>, RepositoryError> {
        self.inner.get_chapter(id).await
    }

    async fn update_chapter_edit(&self, id: ChapterId, text: &str) -> Result<(), RepositoryError> {
        self.inner.update_chapter_edit(id, text).await
    }
}
