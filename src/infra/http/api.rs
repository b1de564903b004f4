//! Read-only JSON endpoints over the post facade.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    application::{
        error::{DataUnavailable, ErrorReport},
        posts::PostLookup,
    },
    domain::posts::Post,
};

use super::{HttpState, public::SearchQuery};

pub mod codes {
    pub const NOT_FOUND: &str = "not_found";
    pub const UNAVAILABLE: &str = "unavailable";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: &'static str,
    pub code: &'static str,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    detail: Option<String>,
}

impl ApiError {
    pub fn not_found(message: &'static str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: codes::NOT_FOUND,
            message,
            detail: None,
        }
    }
}

impl From<DataUnavailable> for ApiError {
    fn from(err: DataUnavailable) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            code: codes::UNAVAILABLE,
            message: "posts are temporarily unavailable",
            detail: Some(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.message,
            code: self.code,
        };
        let mut response = (self.status, Json(body)).into_response();
        ErrorReport::from_message(
            "infra::http::api",
            self.status,
            format!(
                "{}: {}",
                self.code,
                self.detail.as_deref().unwrap_or(self.message)
            ),
        )
        .attach(&mut response);
        response
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub posts: Vec<Post>,
}

pub(super) async fn list_posts(State(state): State<HttpState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = state.posts.get_all_posts().await.into_result()?;
    Ok(Json(posts))
}

pub(super) async fn get_post(
    State(state): State<HttpState>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, ApiError> {
    match state.posts.get_post_by_slug(&slug).await.into_result()? {
        PostLookup::Found(post) => Ok(Json(post)),
        PostLookup::NotFound => Err(ApiError::not_found("post not found")),
    }
}

pub(super) async fn search(
    State(state): State<HttpState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let raw = query.q.unwrap_or_default();
    let posts = state.posts.search_posts(&raw).await.into_result()?;
    Ok(Json(SearchResponse {
        query: raw.trim().to_string(),
        total: posts.len(),
        posts,
    }))
}
