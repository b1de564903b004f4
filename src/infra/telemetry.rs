use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install the global tracing subscriber. Fails if one is already installed.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

/// Register metric descriptions with the installed recorder, once per process.
pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "blog_search_cache_hit_total",
            Unit::Count,
            "Search queries answered from the query cache."
        );
        describe_counter!(
            "blog_search_cache_miss_total",
            Unit::Count,
            "Search queries not found in the query cache or expired."
        );
        describe_counter!(
            "blog_search_cache_evict_total",
            Unit::Count,
            "Query cache entries evicted due to capacity."
        );
        describe_counter!(
            "blog_search_dispatch_total",
            Unit::Count,
            "Searches dispatched by the search controller."
        );
        describe_counter!(
            "blog_search_stale_discard_total",
            Unit::Count,
            "Search responses discarded because a newer dispatch superseded them."
        );
        describe_counter!(
            "blog_http_requests_total",
            Unit::Count,
            "HTTP requests served, labelled by status class."
        );
        describe_histogram!(
            "blog_http_request_duration_ms",
            Unit::Milliseconds,
            "HTTP request latency in milliseconds."
        );
    });
}
