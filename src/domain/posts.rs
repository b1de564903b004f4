//! The post record, its seed collection and the matching rules search uses.

mod data;

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use time::{Date, format_description::FormatItem, macros::format_description};

use super::{error::DomainError, slug};

pub use data::SEED;

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
pub const SHORT_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[day padding:zero]/[month padding:zero]/[year]");
pub const ISO_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month padding:zero]-[day padding:zero]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// The process-wide post collection, built once from [`SEED`].
pub static POSTS: Lazy<Vec<Post>> = Lazy::new(|| SEED.iter().map(Post::from).collect());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub author: Author,
    pub read_time: String,
    pub image: String,
    #[serde(with = "iso_date")]
    pub published_at: Date,
    pub slug: String,
}

/// Compile-time shape of a seeded post.
pub struct SeedPost {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub content: &'static str,
    pub category: &'static str,
    pub author_name: &'static str,
    pub author_avatar: &'static str,
    pub read_time: &'static str,
    pub image: &'static str,
    pub published_at: Date,
    pub slug: &'static str,
}

impl From<&SeedPost> for Post {
    fn from(seed: &SeedPost) -> Self {
        Self {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            content: seed.content.to_string(),
            category: seed.category.to_string(),
            author: Author {
                name: seed.author_name.to_string(),
                avatar: seed.author_avatar.to_string(),
            },
            read_time: seed.read_time.to_string(),
            image: seed.image.to_string(),
            published_at: seed.published_at,
            slug: seed.slug.to_string(),
        }
    }
}

impl Post {
    /// Whether the post's title, description or category contains `needle`.
    ///
    /// `needle` must already be normalized with [`normalize_query`].
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }

    pub fn iso_date(&self) -> String {
        format_date(self.published_at, ISO_DATE_FORMAT)
    }
}

/// Trim and lowercase a raw query so that equivalent inputs share one form.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Filter `posts` by a normalized needle, preserving stored order.
pub fn filter_matching<'a, I>(posts: I, needle: &str) -> Vec<Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    posts
        .into_iter()
        .filter(|post| post.matches(needle))
        .cloned()
        .collect()
}

/// Check the collection invariants: unique ids, unique URL-safe slugs.
pub fn validate_collection(posts: &[Post]) -> Result<(), DomainError> {
    let mut ids = HashSet::with_capacity(posts.len());
    let mut slugs = HashSet::with_capacity(posts.len());

    for post in posts {
        if !ids.insert(post.id.as_str()) {
            return Err(DomainError::invariant(format!(
                "duplicate post id `{}`",
                post.id
            )));
        }
        if !slug::is_url_safe(&post.slug) {
            return Err(DomainError::invariant(format!(
                "post slug `{}` is not URL-safe",
                post.slug
            )));
        }
        if !slugs.insert(post.slug.as_str()) {
            return Err(DomainError::invariant(format!(
                "duplicate post slug `{}`",
                post.slug
            )));
        }
    }

    Ok(())
}

pub fn format_human_date(date: Date) -> String {
    format_date(date, HUMAN_DATE_FORMAT)
}

pub fn format_short_date(date: Date) -> String {
    format_date(date, SHORT_DATE_FORMAT)
}

fn format_date(date: Date, format: &[FormatItem<'_>]) -> String {
    // Calendar-only formats cannot fail for a valid `Date`.
    date.format(format).unwrap_or_default()
}
