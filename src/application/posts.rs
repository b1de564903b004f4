//! Read-only facade over the post collection.
//!
//! Every query returns a [`Fetched`] value that is always safe to render. A
//! backing failure degrades the value (empty list, not found) and carries a
//! [`DataUnavailable`] alongside it instead of propagating, so list and page
//! rendering never crash on store outages while callers that must tell
//! "nothing matched" apart from "failed to load" still can.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::error::DataUnavailable;
use crate::application::repos::{PostsRepo, RepoError};
use crate::cache::QueryCache;
use crate::domain::posts::{Post, normalize_query};

/// A query outcome that always carries a usable value.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    value: T,
    failure: Option<DataUnavailable>,
}

impl<T> Fetched<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            failure: None,
        }
    }

    pub fn degraded(value: T, failure: DataUnavailable) -> Self {
        Self {
            value,
            failure: Some(failure),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn failure(&self) -> Option<&DataUnavailable> {
        self.failure.as_ref()
    }

    pub fn is_degraded(&self) -> bool {
        self.failure.is_some()
    }

    pub fn into_result(self) -> Result<T, DataUnavailable> {
        match self.failure {
            Some(failure) => Err(failure),
            None => Ok(self.value),
        }
    }
}

/// Outcome of a slug lookup. A miss is an expected result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PostLookup {
    Found(Post),
    NotFound,
}

impl PostLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, PostLookup::Found(_))
    }
}

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostsRepo>,
    cache: Option<Arc<QueryCache>>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostsRepo>) -> Self {
        Self { posts, cache: None }
    }

    pub fn with_cache(self, cache: Arc<QueryCache>) -> Self {
        Self {
            cache: Some(cache),
            ..self
        }
    }

    pub fn with_cache_opt(self, cache: Option<Arc<QueryCache>>) -> Self {
        Self { cache, ..self }
    }

    /// Every post, in stored order.
    pub async fn get_all_posts(&self) -> Fetched<Vec<Post>> {
        match self.posts.list_posts().await {
            Ok(posts) => Fetched::ok(posts),
            Err(err) => degrade("get_all_posts", err, Vec::new()),
        }
    }

    /// Exact, case-sensitive slug lookup.
    pub async fn get_post_by_slug(&self, slug: &str) -> Fetched<PostLookup> {
        match self.posts.find_by_slug(slug).await {
            Ok(Some(post)) => Fetched::ok(PostLookup::Found(post)),
            Ok(None) => {
                debug!(
                    target = "beyond_blog::application::posts",
                    slug,
                    "post not found"
                );
                Fetched::ok(PostLookup::NotFound)
            }
            Err(err) => degrade("get_post_by_slug", err, PostLookup::NotFound),
        }
    }

    /// Posts whose title, description or category contain `query`,
    /// compared after trimming and lowercasing. An empty query matches all.
    pub async fn search_posts(&self, query: &str) -> Fetched<Vec<Post>> {
        let needle = normalize_query(query);

        if let Some(cache) = &self.cache {
            if let Some(posts) = cache.get(&needle) {
                return Fetched::ok(posts);
            }
        }

        match self.posts.search_posts(&needle).await {
            Ok(posts) => {
                if let Some(cache) = &self.cache {
                    cache.put(needle, posts.clone());
                }
                Fetched::ok(posts)
            }
            Err(err) => degrade("search_posts", err, Vec::new()),
        }
    }
}

fn degrade<T>(op: &'static str, err: RepoError, fallback: T) -> Fetched<T> {
    warn!(
        target = "beyond_blog::application::posts",
        op,
        error = %err,
        "post store unavailable; returning degraded result"
    );
    Fetched::degraded(fallback, DataUnavailable::from(err))
}
