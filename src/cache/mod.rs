//! Optional memoization in front of the post facade.

mod config;
mod store;

pub use config::CacheConfig;
pub use store::QueryCache;
