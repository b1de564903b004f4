mod api;
mod middleware;
mod public;

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware, routing::get};

use crate::{
    application::{posts::PostService, sitemap::SitemapService},
    config::SiteSettings,
};

pub use api::{ApiError, SearchResponse};
pub use middleware::{REQUEST_ID_HEADER, RequestContext};

#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<PostService>,
    pub sitemap: Arc<SitemapService>,
    pub site: Arc<SiteSettings>,
}

impl HttpState {
    pub fn new(posts: Arc<PostService>, site: SiteSettings) -> Self {
        let sitemap = Arc::new(SitemapService::new(posts.clone(), site.clone()));
        Self {
            posts,
            sitemap,
            site: Arc::new(site),
        }
    }
}

pub fn build_router(state: HttpState) -> Router {
    let pages = Router::new()
        .route("/", get(public::index))
        .route("/blog/{slug}", get(public::post_detail))
        .route("/sitemap.xml", get(public::sitemap))
        .route("/robots.txt", get(public::robots_txt))
        .route("/_health", get(public::health));

    let api = Router::new()
        .route("/api/posts", get(api::list_posts))
        .route("/api/posts/{slug}", get(api::get_post))
        .route("/api/search", get(api::search));

    pages
        .merge(api)
        .fallback(public::fallback)
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::log_responses))
        .layer(axum_middleware::from_fn(middleware::set_request_context))
}
