//! Repository traits describing the post backing store.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::posts::Post;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("backing store unavailable: {0}")]
    Unavailable(String),
    #[error("backing store timeout")]
    Timeout,
}

impl RepoError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Read-only access to the post collection.
///
/// Implementations return posts in stored order. `search_posts` receives a
/// needle that has already been trimmed and lowercased.
#[async_trait]
pub trait PostsRepo: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    async fn search_posts(&self, needle: &str) -> Result<Vec<Post>, RepoError>;
}
