//! Slug checks for the compiled-in post collection.
//!
//! Lookups treat slugs as opaque strings and never normalize them. The only
//! place slug shape matters is seeding: every stored slug must already be in
//! the canonical form produced by the `slug` crate, so that routing and
//! sitemap URLs need no escaping.

use slug::slugify;

/// Whether `value` is non-empty and identical to its own slugified form.
pub fn is_url_safe(value: &str) -> bool {
    !value.is_empty() && slugify(value) == value
}

/// Derive the canonical slug for a title.
pub fn slug_for_title(title: &str) -> String {
    slugify(title)
}
