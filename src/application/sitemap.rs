//! Sitemap service for sitemap.xml and robots.txt generation.
//!
//! Keeps the HTTP layer and the CLI focused on delivery; both render the same
//! documents from here.

use std::sync::Arc;

use thiserror::Error;

use crate::application::error::DataUnavailable;
use crate::application::posts::PostService;
use crate::config::SiteSettings;

/// Static routes listed ahead of the posts: path, change frequency, priority.
const STATIC_ROUTES: [(&str, ChangeFrequency, &str); 5] = [
    ("/", ChangeFrequency::Daily, "1.0"),
    ("/blog", ChangeFrequency::Daily, "0.9"),
    ("/about", ChangeFrequency::Monthly, "0.6"),
    ("/features", ChangeFrequency::Monthly, "0.6"),
    ("/contact", ChangeFrequency::Monthly, "0.5"),
];
const POST_PRIORITY: &str = "0.8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("failed to list posts: {0}")]
    Posts(#[from] DataUnavailable),
}

#[derive(Clone)]
pub struct SitemapService {
    posts: Arc<PostService>,
    site: SiteSettings,
}

impl SitemapService {
    pub fn new(posts: Arc<PostService>, site: SiteSettings) -> Self {
        Self { posts, site }
    }

    /// Generate sitemap.xml content.
    ///
    /// A store failure is an error rather than a sitemap missing every post.
    pub async fn sitemap_xml(&self) -> Result<String, SitemapError> {
        let posts = self.posts.get_all_posts().await.into_result()?;

        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for (path, frequency, priority) in STATIC_ROUTES {
            xml.push_str(&self.entry(path, None, frequency, priority));
        }
        for post in &posts {
            xml.push_str(&self.entry(
                &format!("/blog/{}", post.slug),
                Some(&post.iso_date()),
                ChangeFrequency::Weekly,
                POST_PRIORITY,
            ));
        }
        xml.push_str("</urlset>\n");
        Ok(xml)
    }

    pub fn robots_txt(&self) -> String {
        let sitemap_url = self.site.absolute("/sitemap.xml");
        format!("User-agent: *\nAllow: /\nSitemap: {sitemap_url}\n")
    }

    fn entry(
        &self,
        path: &str,
        lastmod: Option<&str>,
        frequency: ChangeFrequency,
        priority: &str,
    ) -> String {
        let loc = xml_escape(&self.site.absolute(path));
        let lastmod = lastmod
            .map(|value| format!("<lastmod>{value}</lastmod>"))
            .unwrap_or_default();
        format!(
            "  <url><loc>{loc}</loc>{lastmod}<changefreq>{}</changefreq><priority>{priority}</priority></url>\n",
            frequency.as_str()
        )
    }
}

fn xml_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
