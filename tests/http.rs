use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use beyond_blog::application::posts::PostService;
use beyond_blog::application::repos::{PostsRepo, RepoError};
use beyond_blog::config::Settings;
use beyond_blog::domain::posts::Post;
use beyond_blog::infra::http::{HttpState, REQUEST_ID_HEADER, build_router};
use beyond_blog::infra::memory::InMemoryRepositories;

struct DownRepo;

#[async_trait]
impl PostsRepo for DownRepo {
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        Err(RepoError::Timeout)
    }

    async fn find_by_slug(&self, _slug: &str) -> Result<Option<Post>, RepoError> {
        Err(RepoError::Timeout)
    }

    async fn search_posts(&self, _needle: &str) -> Result<Vec<Post>, RepoError> {
        Err(RepoError::unavailable("connection refused"))
    }
}

fn router_with(repo: Arc<dyn PostsRepo>) -> Router {
    let settings = Settings::defaults().expect("defaults are valid");
    let posts = Arc::new(PostService::new(repo));
    build_router(HttpState::new(posts, settings.site))
}

fn seeded_router() -> Router {
    router_with(Arc::new(
        InMemoryRepositories::seeded().expect("seed is valid"),
    ))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    (
        status,
        String::from_utf8(bytes.to_vec()).expect("body is utf-8"),
    )
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    (
        status,
        serde_json::from_str(&body).expect("body should be json"),
    )
}

#[tokio::test]
async fn home_page_lists_the_collection() {
    let app = seeded_router();
    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Unlocking Business Efficiency with SaaS Solutions"));
    assert!(body.contains("Sustainable Technology: Green Solutions for the Future"));
    assert!(body.contains("<title>Beyond UI - Modern Blog Platform</title>"));
}

#[tokio::test]
async fn search_page_reports_matches() {
    let app = seeded_router();
    let (status, body) = get(&app, "/?q=saas").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("2 results for"));
    assert!(body.contains("Revolutionizing industries through SaaS implementation"));
    assert!(!body.contains("Digital Transformation in Healthcare"));
}

#[tokio::test]
async fn search_page_reports_empty_results() {
    let app = seeded_router();
    let (status, body) = get(&app, "/?q=zzz").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No posts found for"));
    assert!(body.contains("zzz"));
}

#[tokio::test]
async fn blank_query_renders_home() {
    let app = seeded_router();
    let (status, body) = get(&app, "/?q=%20%20").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("No posts found for"));
    assert!(body.contains("Digital Transformation in Healthcare"));
}

#[tokio::test]
async fn post_page_carries_structured_data() {
    let app = seeded_router();
    let (status, body) = get(&app, "/blog/digital-transformation-in-healthcare").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("application/ld+json"));
    assert!(body.contains("BlogPosting"));
    assert!(body.contains("Digital Transformation in Healthcare | Beyond UI Blog"));
    assert!(body.contains("https://beyond-ui-blog.vercel.app/blog/digital-transformation-in-healthcare"));
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let app = seeded_router();
    let (status, body) = get(&app, "/blog/no-such-post").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Post Not Found"));
}

#[tokio::test]
async fn unknown_route_falls_back_to_not_found() {
    let app = seeded_router();
    let (status, _) = get(&app, "/about/team").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_is_no_content() {
    let app = seeded_router();
    let (status, body) = get(&app, "/_health").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn api_lists_posts_in_stored_order() {
    let app = seeded_router();
    let (status, json) = get_json(&app, "/api/posts").await;

    assert_eq!(status, StatusCode::OK);
    let posts = json.as_array().expect("array of posts");
    assert_eq!(posts.len(), 6);
    assert_eq!(posts[0]["id"], "1");
    assert_eq!(posts[5]["id"], "6");
    assert_eq!(posts[0]["readTime"], "5 min read");
    assert!(posts[0].get("publishedAt").is_some());
}

#[tokio::test]
async fn api_fetches_single_post() {
    let app = seeded_router();
    let (status, json) =
        get_json(&app, "/api/posts/mastering-ui-elements-a-practical-guide-for-designers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "3");
    assert_eq!(json["category"], "Design");
}

#[tokio::test]
async fn api_missing_post_is_json_404() {
    let app = seeded_router();
    let (status, json) = get_json(&app, "/api/posts/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "post not found");
    assert_eq!(json["code"], "not_found");
}

#[tokio::test]
async fn api_search_trims_and_matches_case_insensitively() {
    let app = seeded_router();
    let (status, json) = get_json(&app, "/api/search?q=%20DESIGN%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["query"], "DESIGN");
    assert_eq!(json["total"], 1);
    assert_eq!(json["posts"][0]["id"], "3");
}

#[tokio::test]
async fn api_search_without_query_returns_everything() {
    let app = seeded_router();
    let (_, json) = get_json(&app, "/api/search").await;

    assert_eq!(json["query"], "");
    assert_eq!(json["total"], 6);
}

#[tokio::test]
async fn failing_store_renders_unavailable_page() {
    let app = router_with(Arc::new(DownRepo));

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("Error loading posts. Please try again."));

    let (status, body) = get(&app, "/?q=saas").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("Error loading posts. Please try again."));

    let (status, _) = get(&app, "/blog/digital-transformation-in-healthcare").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn failing_store_is_json_503_on_the_api() {
    let app = router_with(Arc::new(DownRepo));
    let (status, json) = get_json(&app, "/api/search?q=saas").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "unavailable");

    let (status, _) = get(&app, "/sitemap.xml").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = seeded_router();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/_health")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    let id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .expect("request id header")
        .to_str()
        .expect("ascii header");
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn robots_points_at_the_sitemap() {
    let app = seeded_router();
    let (status, body) = get(&app, "/robots.txt").await;

    assert_eq!(status, StatusCode::OK);
    insta::assert_snapshot!(body, @r"
User-agent: *
Allow: /
Sitemap: https://beyond-ui-blog.vercel.app/sitemap.xml
");
}

#[tokio::test]
async fn sitemap_lists_static_routes_then_posts() {
    let app = seeded_router();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/sitemap.xml")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");
    assert_eq!(
        response.headers().get(CONTENT_TYPE).map(|v| v.as_bytes()),
        Some(&b"application/xml"[..])
    );

    let (status, body) = get(&app, "/sitemap.xml").await;
    assert_eq!(status, StatusCode::OK);
    insta::assert_snapshot!(body, @r#"
<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://beyond-ui-blog.vercel.app</loc><changefreq>daily</changefreq><priority>1.0</priority></url>
  <url><loc>https://beyond-ui-blog.vercel.app/blog</loc><changefreq>daily</changefreq><priority>0.9</priority></url>
  <url><loc>https://beyond-ui-blog.vercel.app/about</loc><changefreq>monthly</changefreq><priority>0.6</priority></url>
  <url><loc>https://beyond-ui-blog.vercel.app/features</loc><changefreq>monthly</changefreq><priority>0.6</priority></url>
  <url><loc>https://beyond-ui-blog.vercel.app/contact</loc><changefreq>monthly</changefreq><priority>0.5</priority></url>
  <url><loc>https://beyond-ui-blog.vercel.app/blog/unlocking-business-efficiency-with-saas-solutions</loc><lastmod>2024-01-15</lastmod><changefreq>weekly</changefreq><priority>0.8</priority></url>
  <url><loc>https://beyond-ui-blog.vercel.app/blog/revolutionizing-industries-through-saas-implementation</loc><lastmod>2024-01-14</lastmod><changefreq>weekly</changefreq><priority>0.8</priority></url>
  <url><loc>https://beyond-ui-blog.vercel.app/blog/mastering-ui-elements-a-practical-guide-for-designers</loc><lastmod>2024-01-13</lastmod><changefreq>weekly</changefreq><priority>0.8</priority></url>
  <url><loc>https://beyond-ui-blog.vercel.app/blog/the-future-of-remote-work-tools-and-strategies</loc><lastmod>2024-01-12</lastmod><changefreq>weekly</changefreq><priority>0.8</priority></url>
  <url><loc>https://beyond-ui-blog.vercel.app/blog/digital-transformation-in-healthcare</loc><lastmod>2024-01-11</lastmod><changefreq>weekly</changefreq><priority>0.8</priority></url>
  <url><loc>https://beyond-ui-blog.vercel.app/blog/sustainable-technology-green-solutions-for-the-future</loc><lastmod>2024-01-10</lastmod><changefreq>weekly</changefreq><priority>0.8</priority></url>
</urlset>
"#);
}
