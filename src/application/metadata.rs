//! Page metadata: `<title>`, description, Open Graph, Twitter card and
//! JSON-LD for the rendered pages.

use serde_json::json;

use crate::config::SiteSettings;
use crate::domain::posts::Post;

pub const PUBLISHER_NAME: &str = "Beyond UI";
pub const PUBLISHER_LOGO_URL: &str = "https://cdn.dribbble.com/users/18489024/avatars/normal/4194f06fe3b975903f66b0f31adf47ce.png?1702911795";
pub const SITE_KEYWORDS: [&str; 8] = [
    "blog",
    "rust",
    "ui",
    "design",
    "technology",
    "web development",
    "accessibility",
    "business",
];
const POST_KEYWORDS: [&str; 4] = ["blog", "article", "technology", "design"];
const OG_LOCALE: &str = "en_US";
const OG_IMAGE_WIDTH: u32 = 1200;
const OG_IMAGE_HEIGHT: u32 = 630;
const NOT_FOUND_TITLE: &str = "Post Not Found";
const NOT_FOUND_DESCRIPTION: &str = "The requested blog post could not be found.";

#[derive(Debug, Clone, PartialEq)]
pub struct PageMetadata {
    /// Final document title with the site template applied.
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub author: Option<String>,
    pub canonical: String,
    pub robots: &'static str,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    /// Serialized JSON-LD, safe to embed in a `<script>` element.
    pub json_ld: Option<String>,
}

impl PageMetadata {
    pub fn keywords_joined(&self) -> String {
        self.keywords.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenGraph {
    pub kind: &'static str,
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: &'static str,
    pub image: Option<OgImage>,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

/// Apply the site title template (`%s | <site name>`).
pub fn templated_title(site: &SiteSettings, title: &str) -> String {
    format!("{title} | {}", site.name)
}

/// Defaults for the home page and any page without its own metadata.
pub fn site_metadata(site: &SiteSettings) -> PageMetadata {
    let canonical = site.absolute("/");
    PageMetadata {
        title: site.title.clone(),
        description: site.description.clone(),
        keywords: SITE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        author: None,
        canonical: canonical.clone(),
        robots: "index, follow",
        open_graph: OpenGraph {
            kind: "website",
            title: site.title.clone(),
            description: site.description.clone(),
            url: canonical,
            site_name: site.name.clone(),
            locale: OG_LOCALE,
            image: Some(OgImage {
                url: PUBLISHER_LOGO_URL.to_string(),
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
                alt: site.name.clone(),
            }),
            published_time: None,
            modified_time: None,
        },
        twitter: TwitterCard {
            card: "summary_large_image",
            title: site.title.clone(),
            description: site.description.clone(),
            image: Some(PUBLISHER_LOGO_URL.to_string()),
        },
        json_ld: None,
    }
}

/// Search results page: site defaults under a query-specific title.
pub fn search_metadata(site: &SiteSettings, query: &str) -> PageMetadata {
    let title = templated_title(site, &format!("Search: {query}"));
    let mut meta = site_metadata(site);
    meta.title = title.clone();
    meta.robots = "noindex, follow";
    meta.open_graph.title = title.clone();
    meta.twitter.title = title;
    meta
}

pub fn post_metadata(site: &SiteSettings, post: &Post) -> PageMetadata {
    let canonical = site.absolute(&format!("/blog/{}", post.slug));
    let published = post.iso_date();
    let image_alt = format!("Featured image for {}", post.title);

    let mut keywords = Vec::with_capacity(POST_KEYWORDS.len() + 1);
    keywords.push(post.category.clone());
    keywords.extend(POST_KEYWORDS.iter().map(|k| k.to_string()));

    PageMetadata {
        title: templated_title(site, &post.title),
        description: post.description.clone(),
        keywords,
        author: Some(post.author.name.clone()),
        canonical: canonical.clone(),
        robots: "index, follow",
        open_graph: OpenGraph {
            kind: "article",
            title: post.title.clone(),
            description: post.description.clone(),
            url: canonical.clone(),
            site_name: site.name.clone(),
            locale: OG_LOCALE,
            image: Some(OgImage {
                url: post.image.clone(),
                width: OG_IMAGE_WIDTH,
                height: OG_IMAGE_HEIGHT,
                alt: image_alt,
            }),
            published_time: Some(published.clone()),
            modified_time: Some(published),
        },
        twitter: TwitterCard {
            card: "summary_large_image",
            title: post.title.clone(),
            description: post.description.clone(),
            image: Some(post.image.clone()),
        },
        json_ld: Some(post_json_ld(post, &canonical)),
    }
}

pub fn not_found_metadata(site: &SiteSettings) -> PageMetadata {
    let mut meta = site_metadata(site);
    meta.title = templated_title(site, NOT_FOUND_TITLE);
    meta.description = NOT_FOUND_DESCRIPTION.to_string();
    meta.robots = "noindex, follow";
    meta.open_graph.title = NOT_FOUND_TITLE.to_string();
    meta.open_graph.description = NOT_FOUND_DESCRIPTION.to_string();
    meta.twitter.title = NOT_FOUND_TITLE.to_string();
    meta.twitter.description = NOT_FOUND_DESCRIPTION.to_string();
    meta
}

fn post_json_ld(post: &Post, canonical: &str) -> String {
    let published = post.iso_date();
    let value = json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.description,
        "image": post.image,
        "author": {
            "@type": "Person",
            "name": post.author.name,
            "image": post.author.avatar,
        },
        "publisher": {
            "@type": "Organization",
            "name": PUBLISHER_NAME,
            "logo": {
                "@type": "ImageObject",
                "url": PUBLISHER_LOGO_URL,
            },
        },
        "datePublished": published,
        "dateModified": published,
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": canonical,
        },
    });
    // `</` would close the surrounding script element.
    value.to_string().replace("</", "<\\/")
}
