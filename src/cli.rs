//! Terminal front end for the search controller and sitemap.

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::application::search::{SearchController, SearchResults, SearchSnapshot, SearchState};
use crate::domain::posts::{Post, format_short_date};
use crate::infra::error::InfraError;

#[derive(Debug, Serialize)]
struct SearchOutput<'a> {
    query: Option<&'a str>,
    state: &'static str,
    total: usize,
    posts: &'a [Post],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run a single query, or one query per input line when `query` is `None`.
///
/// Each line is typed and submitted; an empty line clears the search.
pub async fn run_search<R, W>(
    controller: &SearchController,
    query: Option<String>,
    json: bool,
    input: R,
    out: &mut W,
) -> Result<(), InfraError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Some(query) = query {
        let snapshot = submit(controller, &query).await;
        write_snapshot(out, &snapshot, json).await?;
        return out.flush().await.map_err(InfraError::from);
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let snapshot = submit(controller, &line).await;
        write_snapshot(out, &snapshot, json).await?;
        out.flush().await?;
    }
    Ok(())
}

pub async fn write_sitemap<W>(out: &mut W, xml: &str) -> Result<(), InfraError>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(xml.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

async fn submit(controller: &SearchController, text: &str) -> SearchSnapshot {
    controller.on_input_changed(text);
    controller.on_submit();

    let mut rx = controller.subscribe();
    match rx
        .wait_for(|snapshot| !matches!(snapshot.results, SearchResults::Loading { .. }))
        .await
    {
        Ok(snapshot) => snapshot.clone(),
        Err(_) => {
            debug!(
                target = "beyond_blog::cli",
                "search controller dropped before completing"
            );
            controller.snapshot()
        }
    }
}

async fn write_snapshot<W>(out: &mut W, snapshot: &SearchSnapshot, json: bool) -> Result<(), InfraError>
where
    W: AsyncWrite + Unpin,
{
    let rendered = if json {
        render_json(snapshot)?
    } else {
        render_text(&snapshot.results)
    };
    out.write_all(rendered.as_bytes()).await?;
    Ok(())
}

fn render_json(snapshot: &SearchSnapshot) -> Result<String, InfraError> {
    let results = &snapshot.results;
    let output = SearchOutput {
        query: results.query(),
        state: match snapshot.state {
            SearchState::Idle => "idle",
            SearchState::Pending { .. } => "pending",
            SearchState::Dispatched { .. } => "dispatched",
        },
        total: results.posts().len(),
        posts: results.posts(),
        error: results.is_unavailable().then(|| results.summary()),
    };
    let mut line = serde_json::to_string(&output).map_err(std::io::Error::other)?;
    line.push('\n');
    Ok(line)
}

fn render_text(results: &SearchResults) -> String {
    let mut text = results.summary();
    text.push('\n');
    for post in results.posts() {
        text.push_str(&format!(
            "  {}  {}  [{}]  /blog/{}\n",
            format_short_date(post.published_at),
            post.title,
            post.category,
            post.slug
        ));
    }
    text
}
