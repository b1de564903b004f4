//! Beyond UI blog: a read-only post facade, a debounced search controller
//! and the HTTP surface that renders them.

pub mod application;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
mod util;
