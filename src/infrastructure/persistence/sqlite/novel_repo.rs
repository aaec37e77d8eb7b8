//! SQLite Novel Repository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;
use uuid::Uuid;

use super::{map_sqlx_error, ConnectionManager};
use crate::application::ports::{NovelRepositoryPort, RepositoryError};
use crate::domain::novel::{Chapter, ChapterId, ChapterSummary, Novel, NovelId, Slug};

/// SQLite Novel Repository
///
/// 每次调用都通过 `ConnectionManager` 取得连接池，连接断开后自动重建。
pub struct SqliteNovelRepository {
    db: Arc<ConnectionManager>,
}

impl SqliteNovelRepository {
    pub fn new(db: Arc<ConnectionManager>) -> Self {
        Self { db }
    }
}

fn parse_uuid(value: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(value).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

fn chapter_index(value: i64) -> Result<u32, RepositoryError> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::SerializationError(format!("invalid chapter_index: {}", value)))
}

#[derive(FromRow)]
struct NovelRow {
    id: String,
    title: String,
    slug: String,
}

impl TryFrom<NovelRow> for Novel {
    type Error = RepositoryError;

    fn try_from(row: NovelRow) -> Result<Self, Self::Error> {
        let slug =
            Slug::new(row.slug).map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        Novel::new(NovelId::from_uuid(parse_uuid(&row.id)?), row.title, slug)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))
    }
}

#[derive(FromRow)]
struct ChapterSummaryRow {
    id: String,
    chapter_index: i64,
    title: String,
}

impl TryFrom<ChapterSummaryRow> for ChapterSummary {
    type Error = RepositoryError;

    fn try_from(row: ChapterSummaryRow) -> Result<Self, Self::Error> {
        Ok(ChapterSummary {
            id: ChapterId::from_uuid(parse_uuid(&row.id)?),
            index: chapter_index(row.chapter_index)?,
            title: row.title,
        })
    }
}

#[derive(FromRow)]
struct ChapterRow {
    id: String,
    novel_id: String,
    chapter_index: i64,
    title: String,
    content: Option<String>,
    content_edit: Option<String>,
}

impl TryFrom<ChapterRow> for Chapter {
    type Error = RepositoryError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        Ok(Chapter {
            id: ChapterId::from_uuid(parse_uuid(&row.id)?),
            novel_id: NovelId::from_uuid(parse_uuid(&row.novel_id)?),
            index: chapter_index(row.chapter_index)?,
            title: row.title,
            content: row.content,
            content_edit: row.content_edit,
        })
    }
}

const CHAPTER_COLUMNS: &str = "id, novel_id, chapter_index, title, content, content_edit";

#[async_trait]
impl NovelRepositoryPort for SqliteNovelRepository {
    async fn list_novels(&self) -> Result<Vec<Novel>, RepositoryError> {
        let pool = self.db.pool().await?;
        let rows: Vec<NovelRow> =
            sqlx::query_as("SELECT id, title, slug FROM novels ORDER BY title ASC")
                .fetch_all(&pool)
                .await
                .map_err(map_sqlx_error)?;

        rows.into_iter().map(Novel::try_from).collect()
    }

    async fn find_novel_by_slug(&self, slug: &Slug) -> Result<Option<Novel>, RepositoryError> {
        let pool = self.db.pool().await?;
        let row: Option<NovelRow> = sqlx::query_as("SELECT id, title, slug FROM novels WHERE slug = ?")
            .bind(slug.as_str())
            .fetch_optional(&pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(Novel::try_from).transpose()
    }

    async fn list_chapters(&self, novel_id: NovelId) -> Result<Vec<ChapterSummary>, RepositoryError> {
        let pool = self.db.pool().await?;
        let rows: Vec<ChapterSummaryRow> = sqlx::query_as(
            "SELECT id, chapter_index, title FROM chapters WHERE novel_id = ? ORDER BY chapter_index ASC",
        )
        .bind(novel_id.to_string())
        .fetch_all(&pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(ChapterSummary::try_from).collect()
    }

    async fn find_chapter(
        &self,
        novel_id: NovelId,
        chapter_index: u32,
    ) -> Result<Option<Chapter>, RepositoryError> {
        let pool = self.db.pool().await?;
        let row: Option<ChapterRow> = sqlx::query_as(&format!(
            "SELECT {} FROM chapters WHERE novel_id = ? AND chapter_index = ?",
            CHAPTER_COLUMNS
        ))
        .bind(novel_id.to_string())
        .bind(chapter_index as i64)
        .fetch_optional(&pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Chapter::try_from).transpose()
    }

    async fn get_chapter(&self, id: ChapterId) -> Result<Option<Chapter>, RepositoryError> {
        let pool = self.db.pool().await?;
        let row: Option<ChapterRow> = sqlx::query_as(&format!(
            "SELECT {} FROM chapters WHERE id = ?",
            CHAPTER_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Chapter::try_from).transpose()
    }

    async fn update_chapter_edit(&self, id: ChapterId, text: &str) -> Result<(), RepositoryError> {
        let pool = self.db.pool().await?;
        let result = sqlx::query("UPDATE chapters SET content_edit = ?, updated_at = ? WHERE id = ?")
            .bind(text)
            .bind(Utc::now().to_rfc3339())
            .bind(id.to_string())
            .execute(&pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("chapter {}", id)));
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.db.health_check().await
    }
}
