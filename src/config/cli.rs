use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the beyond-blog binary.
#[derive(Debug, Parser)]
#[command(name = "beyond-blog", version, about = "Beyond UI blog server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "BEYOND_BLOG_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Serve the blog over HTTP (default).
    Serve(Box<ServeArgs>),
    /// Run queries through the debounced search controller.
    Search(SearchArgs),
    /// Print sitemap.xml to stdout.
    Sitemap(SitemapArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SearchOverrides {
    /// Override the search debounce window in milliseconds.
    #[arg(long = "search-debounce-ms", value_name = "MILLIS")]
    pub search_debounce_ms: Option<u64>,

    /// Toggle the search result cache.
    #[arg(
        long = "cache-enabled",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub cache_enabled: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SiteOverride {
    /// Override the public base URL used for canonical links and the sitemap.
    #[arg(long = "site-public-url", value_name = "URL")]
    pub site_public_url: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub search: SearchOverrides,

    #[command(flatten)]
    pub site: SiteOverride,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub overrides: SearchOverrides,

    /// Query to run once; reads queries from stdin line by line when omitted.
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Print results as JSON.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,
}

#[derive(Debug, Args, Default, Clone)]
pub struct SitemapArgs {
    #[command(flatten)]
    pub site: SiteOverride,
}
