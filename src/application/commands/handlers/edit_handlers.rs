//! Edit Command Handlers

use std::sync::Arc;

use crate::application::commands::{RewriteChapter, SaveChapterEdit};
use crate::application::error::ApplicationError;
use crate::application::ports::{NovelRepositoryPort, RewriteEnginePort};
use crate::application::reading::resolve_novel;
use crate::domain::novel::{Chapter, ContentSource};
use crate::domain::ContentNormalizer;

/// 编辑结果
#[derive(Debug, Clone)]
pub struct EditResponse {
    pub slug: String,
    pub chapter_index: u32,
    /// 保存后的文本字符数
    pub char_count: usize,
    /// 保存后该章节生效的文本来源
    pub source: ContentSource,
}

async fn load_chapter(
    repo: &dyn NovelRepositoryPort,
    slug: &str,
    chapter_index: u32,
) -> Result<Chapter, ApplicationError> {
    let novel = resolve_novel(repo, slug).await?;
    repo.find_chapter(novel.id(), chapter_index)
        .await?
        .ok_or_else(|| ApplicationError::not_found("Chapter", format!("{}#{}", slug, chapter_index)))
}

/// SaveChapterEdit Handler
pub struct SaveChapterEditHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    min_edit_chars: usize,
}

impl SaveChapterEditHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>, min_edit_chars: usize) -> Self {
        Self {
            novel_repo,
            min_edit_chars,
        }
    }

    pub async fn handle(&self, command: SaveChapterEdit) -> Result<EditResponse, ApplicationError> {
        let mut chapter =
            load_chapter(self.novel_repo.as_ref(), &command.slug, command.chapter_index).await?;

        self.novel_repo
            .update_chapter_edit(chapter.id, &command.text)
            .await?;

        let char_count = command.text.chars().count();
        chapter.content_edit = Some(command.text);

        tracing::info!(
            chapter_id = %chapter.id,
            chars = char_count,
            "Chapter edit saved"
        );

        Ok(EditResponse {
            slug: command.slug,
            chapter_index: command.chapter_index,
            char_count,
            source: chapter.authoritative_source(self.min_edit_chars),
        })
    }
}

/// RewriteChapter Handler
pub struct RewriteChapterHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    rewrite_engine: Arc<dyn RewriteEnginePort>,
    normalizer: Arc<ContentNormalizer>,
}

impl RewriteChapterHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        rewrite_engine: Arc<dyn RewriteEnginePort>,
        normalizer: Arc<ContentNormalizer>,
    ) -> Self {
        Self {
            novel_repo,
            rewrite_engine,
            normalizer,
        }
    }

    pub async fn handle(&self, command: RewriteChapter) -> Result<EditResponse, ApplicationError> {
        if !self.rewrite_engine.is_available() {
            return Err(ApplicationError::FeatureDisabled(
                "AI rewrite is not configured".to_string(),
            ));
        }

        let mut chapter =
            load_chapter(self.novel_repo.as_ref(), &command.slug, command.chapter_index).await?;
        let content = self.normalizer.normalize_chapter(&chapter);
        if content.display.trim().is_empty() {
            return Err(ApplicationError::validation("Chapter has no text to rewrite"));
        }

        let revised = self.rewrite_engine.rewrite(&content.display).await?;
        let revised = self.normalizer.normalize_text(&revised);
        if revised.trim().is_empty() {
            return Err(ApplicationError::ExternalServiceError(
                "Rewrite service returned empty text".to_string(),
            ));
        }

        self.novel_repo.update_chapter_edit(chapter.id, &revised).await?;

        let char_count = revised.chars().count();
        chapter.content_edit = Some(revised);

        tracing::info!(
            chapter_id = %chapter.id,
            input_chars = content.display.chars().count(),
            output_chars = char_count,
            "Chapter rewritten"
        );

        Ok(EditResponse {
            slug: command.slug,
            chapter_index: command.chapter_index,
            char_count,
            source: chapter.authoritative_source(self.normalizer.min_edit_chars()),
        })
    }
}
