use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    application::{
        error::{ErrorReport, HttpError},
        metadata::{post_metadata, search_metadata, site_metadata},
        posts::PostLookup,
        search::SearchResults,
    },
    domain::posts::Post,
    presentation::views::{
        HomeContext, IndexTemplate, LayoutContext, PostCard, PostDetailContext, PostTemplate,
        SearchContext, SearchTemplate, post_cards, render_not_found_response,
        render_template_response, render_unavailable_response,
    },
};

use super::HttpState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    /// The trimmed query, or `None` when absent or blank.
    pub fn active(&self) -> Option<&str> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
    }
}

pub(super) async fn index(
    State(state): State<HttpState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    match query.active() {
        Some(active) => search_page(&state, active).await,
        None => home_page(&state).await,
    }
}

async fn home_page(state: &HttpState) -> Response {
    let fetched = state.posts.get_all_posts().await;
    if let Some(failure) = fetched.failure() {
        let report = ErrorReport::from_error(
            "infra::http::public::index",
            StatusCode::SERVICE_UNAVAILABLE,
            failure,
        );
        return render_unavailable_response(&state.site, report);
    }

    let posts = fetched.into_value();
    let view = LayoutContext::new(
        &state.site,
        site_metadata(&state.site),
        HomeContext::from_posts(&posts),
    );
    render_template_response(IndexTemplate { view }, StatusCode::OK)
}

async fn search_page(state: &HttpState, query: &str) -> Response {
    let posts = match state.posts.search_posts(query).await.into_result() {
        Ok(posts) => posts,
        Err(err) => {
            let report = ErrorReport::from_error(
                "infra::http::public::search",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            );
            return render_unavailable_response(&state.site, report);
        }
    };

    let content = search_context(query, posts);
    let view = LayoutContext::new(&state.site, search_metadata(&state.site, query), content)
        .with_search_query(query);
    render_template_response(SearchTemplate { view }, StatusCode::OK)
}

fn search_context(query: &str, posts: Vec<Post>) -> SearchContext {
    let results = if posts.is_empty() {
        SearchResults::NoResults {
            query: query.to_string(),
        }
    } else {
        SearchResults::Matches {
            query: query.to_string(),
            posts,
        }
    };

    SearchContext {
        query: query.to_string(),
        summary: results.summary(),
        has_results: !results.posts().is_empty(),
        posts: post_cards(results.posts()),
    }
}

pub(super) async fn post_detail(
    State(state): State<HttpState>,
    Path(slug): Path<String>,
) -> Response {
    let fetched = state.posts.get_post_by_slug(&slug).await;
    if let Some(failure) = fetched.failure() {
        let report = ErrorReport::from_error(
            "infra::http::public::post_detail",
            StatusCode::SERVICE_UNAVAILABLE,
            failure,
        );
        return render_unavailable_response(&state.site, report);
    }

    match fetched.into_value() {
        PostLookup::Found(post) => {
            let meta = post_metadata(&state.site, &post);
            let content = PostDetailContext {
                post: PostCard::from(&post),
                content: post.content.clone(),
            };
            let view = LayoutContext::new(&state.site, meta, content);
            render_template_response(PostTemplate { view }, StatusCode::OK)
        }
        PostLookup::NotFound => render_not_found_response(&state.site),
    }
}

pub(super) async fn sitemap(State(state): State<HttpState>) -> Response {
    match state.sitemap.sitemap_xml().await {
        Ok(body) => text_response(body, "application/xml"),
        Err(err) => HttpError::from_error(
            "infra::http::public::sitemap",
            StatusCode::SERVICE_UNAVAILABLE,
            "Failed to generate sitemap",
            &err,
        )
        .into_response(),
    }
}

pub(super) async fn robots_txt(State(state): State<HttpState>) -> Response {
    text_response(state.sitemap.robots_txt(), "text/plain; charset=utf-8")
}

pub(super) async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub(super) async fn fallback(State(state): State<HttpState>) -> Response {
    render_not_found_response(&state.site)
}

fn text_response(body: String, content_type: &str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
