//! Novel Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::NovelError;

/// 小说唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NovelId(Uuid);

impl NovelId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NovelId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NovelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 章节唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChapterId(Uuid);

impl ChapterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChapterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 小说 slug（地址栏中的可读标识）
///
/// 不变量:
/// - 非空，长度不超过 120
/// - 仅包含 ASCII 字母、数字、`-` 与 `_`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slug(String);

impl Slug {
    pub fn new(slug: impl Into<String>) -> Result<Self, NovelError> {
        let slug = slug.into();
        if slug.is_empty() || slug.len() > 120 {
            return Err(NovelError::InvalidSlug(slug));
        }
        let url_safe = slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !url_safe {
            return Err(NovelError::InvalidSlug(slug));
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_accepts_url_safe() {
        assert_eq!(Slug::new("demo").unwrap().as_str(), "demo");
        assert!(Slug::new("dau-pha-thuong-khung_2").is_ok());
    }

    #[test]
    fn test_slug_rejects_unsafe() {
        assert!(Slug::new("").is_err());
        assert!(Slug::new("đấu-phá").is_err());
        assert!(Slug::new("a b").is_err());
        assert!(Slug::new("a/b").is_err());
    }
}
