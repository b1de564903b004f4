use std::{process, sync::Arc};

use beyond_blog::{
    application::{
        error::AppError,
        posts::PostService,
        search::{SearchConfig, SearchController},
        sitemap::{SitemapError, SitemapService},
    },
    cache::{CacheConfig, QueryCache},
    cli, config,
    infra::{
        error::InfraError,
        http::{self, HttpState},
        memory::InMemoryRepositories,
        telemetry,
    },
};
use tokio::io::BufReader;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let posts = build_post_service(&settings)?;

    match command {
        config::Command::Serve(_) => run_serve(settings, posts).await,
        config::Command::Search(args) => run_search(settings, posts, args).await,
        config::Command::Sitemap(_) => run_sitemap(settings, posts).await,
    }
}

fn build_post_service(settings: &config::Settings) -> Result<Arc<PostService>, AppError> {
    let repo = InMemoryRepositories::seeded()?;
    info!(
        target = "beyond_blog::bootstrap",
        posts = repo.len(),
        "post collection loaded"
    );

    let cache_config = CacheConfig::from(&settings.cache);
    let cache = cache_config
        .enabled
        .then(|| Arc::new(QueryCache::new(&cache_config)));

    Ok(Arc::new(
        PostService::new(Arc::new(repo)).with_cache_opt(cache),
    ))
}

async fn run_serve(settings: config::Settings, posts: Arc<PostService>) -> Result<(), AppError> {
    let state = HttpState::new(posts, settings.site.clone());
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(
        target = "beyond_blog::bootstrap",
        addr = %settings.server.addr,
        public_url = %settings.site.public_url,
        "listening"
    );

    let grace = settings.server.graceful_shutdown;
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            let _ = stop_rx.await;
        });
    let mut server = std::pin::pin!(server.into_future());

    tokio::select! {
        result = &mut server => {
            return result.map_err(|err| AppError::from(InfraError::from(err)));
        }
        signal = tokio::signal::ctrl_c() => {
            signal.map_err(|err| AppError::from(InfraError::from(err)))?;
        }
    }

    info!(
        target = "beyond_blog::bootstrap",
        grace_seconds = grace.as_secs(),
        "shutdown requested; draining connections"
    );
    let _ = stop_tx.send(());

    match tokio::time::timeout(grace, &mut server).await {
        Ok(result) => result.map_err(|err| AppError::from(InfraError::from(err))),
        Err(_) => {
            warn!(
                target = "beyond_blog::bootstrap",
                "graceful shutdown timed out; closing remaining connections"
            );
            Ok(())
        }
    }
}

async fn run_search(
    settings: config::Settings,
    posts: Arc<PostService>,
    args: config::SearchArgs,
) -> Result<(), AppError> {
    let controller = SearchController::start(posts, SearchConfig::from(&settings.search)).await;
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    cli::run_search(&controller, args.query, args.json, stdin, &mut stdout)
        .await
        .map_err(AppError::from)
}

async fn run_sitemap(settings: config::Settings, posts: Arc<PostService>) -> Result<(), AppError> {
    let sitemap = SitemapService::new(posts, settings.site);
    let xml = sitemap
        .sitemap_xml()
        .await
        .map_err(|SitemapError::Posts(err)| AppError::from(err))?;

    let mut stdout = tokio::io::stdout();
    cli::write_sitemap(&mut stdout, &xml)
        .await
        .map_err(AppError::from)
}
