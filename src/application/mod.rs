pub mod error;
pub mod metadata;
pub mod posts;
pub mod repos;
pub mod search;
pub mod sitemap;
