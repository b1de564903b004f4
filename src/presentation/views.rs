//! View models and askama templates for the public pages, plus the shared
//! render helpers that turn them into responses.

use crate::application::error::{ErrorReport, HttpError};
use crate::application::metadata::{PageMetadata, not_found_metadata, site_metadata};
use crate::config::SiteSettings;
use crate::domain::posts::{Post, format_human_date, format_short_date};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Number of posts shown in the "recent posts" sidebar.
pub const RECENT_POST_COUNT: usize = 3;
/// Posts after the hero that fill the "other featured" grid.
pub const FEATURED_POST_COUNT: usize = 5;
pub const UNAVAILABLE_MESSAGE: &str = "Error loading posts. Please try again.";

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(site: &SiteSettings) -> Response {
    let view = LayoutContext::new(site, not_found_metadata(site), ErrorPageView::not_found());
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Post not found",
    )
    .attach(&mut response);
    response
}

/// 503 page shown when the post store cannot answer.
pub fn render_unavailable_response(site: &SiteSettings, report: ErrorReport) -> Response {
    let view = LayoutContext::new(site, site_metadata(site), ErrorPageView::unavailable());
    let mut response =
        render_template_response(ErrorTemplate { view }, StatusCode::SERVICE_UNAVAILABLE);
    report.attach(&mut response);
    response
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub site_name: String,
    pub meta: PageMetadata,
    /// Current search box value; empty outside search results.
    pub search_query: String,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(site: &SiteSettings, meta: PageMetadata, content: T) -> Self {
        Self {
            site_name: site.name.clone(),
            meta,
            search_query: String::new(),
            content,
        }
    }

    pub fn with_search_query(self, query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            ..self
        }
    }
}

#[derive(Clone)]
pub struct PostCard {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub author_name: String,
    pub author_avatar: String,
    pub read_time: String,
    pub image: String,
    pub image_alt: String,
    pub published: String,
    pub short_date: String,
    pub iso_date: String,
}

impl From<&Post> for PostCard {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            slug: post.slug.clone(),
            title: post.title.clone(),
            description: post.description.clone(),
            category: post.category.clone(),
            author_name: post.author.name.clone(),
            author_avatar: post.author.avatar.clone(),
            read_time: post.read_time.clone(),
            image: post.image.clone(),
            image_alt: format!("Featured image for {}", post.title),
            published: format_human_date(post.published_at),
            short_date: format_short_date(post.published_at),
            iso_date: post.iso_date(),
        }
    }
}

pub fn post_cards<'a, I>(posts: I) -> Vec<PostCard>
where
    I: IntoIterator<Item = &'a Post>,
{
    posts.into_iter().map(PostCard::from).collect()
}

pub struct HomeContext {
    pub hero: Option<PostCard>,
    pub featured: Vec<PostCard>,
    pub recent: Vec<PostCard>,
}

impl HomeContext {
    /// Hero is the first post, featured the next five, recent the first three.
    pub fn from_posts(posts: &[Post]) -> Self {
        Self {
            hero: posts.first().map(PostCard::from),
            featured: post_cards(posts.iter().skip(1).take(FEATURED_POST_COUNT)),
            recent: post_cards(posts.iter().take(RECENT_POST_COUNT)),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<HomeContext>,
}

pub struct SearchContext {
    pub query: String,
    pub summary: String,
    pub posts: Vec<PostCard>,
    pub has_results: bool,
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub view: LayoutContext<SearchContext>,
}

pub struct PostDetailContext {
    pub post: PostCard,
    pub content: String,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailContext>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Post Not Found".to_string(),
            message: "The requested blog post could not be found. It may have been moved or the link may be out of date.".to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            title: "Something went wrong".to_string(),
            message: UNAVAILABLE_MESSAGE.to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Back to Blog".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}
