//! In-memory post store backed by the compiled-in collection.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::repos::{PostsRepo, RepoError};
use crate::domain::error::DomainError;
use crate::domain::posts::{POSTS, Post, filter_matching, validate_collection};

#[derive(Clone)]
pub struct InMemoryRepositories {
    posts: Arc<[Post]>,
}

impl InMemoryRepositories {
    /// Wrap `posts`, rejecting collections with duplicate ids or slugs.
    pub fn new(posts: Vec<Post>) -> Result<Self, DomainError> {
        validate_collection(&posts)?;
        Ok(Self {
            posts: posts.into(),
        })
    }

    pub fn seeded() -> Result<Self, DomainError> {
        Self::new(POSTS.clone())
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[async_trait]
impl PostsRepo for InMemoryRepositories {
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.to_vec())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.iter().find(|post| post.slug == slug).cloned())
    }

    async fn search_posts(&self, needle: &str) -> Result<Vec<Post>, RepoError> {
        Ok(filter_matching(self.posts.iter(), needle))
    }
}
