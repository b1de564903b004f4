//! Debounced search over the post facade.
//!
//! Keystrokes restart a timer; only input that stays stable for the debounce
//! window is dispatched. Every dispatch gets a sequence number and a
//! completion is applied only while it is still the latest dispatch, so
//! late responses never overwrite a newer query or a cleared search.
//!
//! Subscribers observe [`SearchSnapshot`] values through a `watch` channel.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use metrics::counter;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::posts::{Fetched, PostService};
use crate::domain::posts::Post;
use crate::util::lock::mutex_lock;

const DEFAULT_DEBOUNCE_MS: u64 = 300;
const SOURCE: &str = "application::search";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl From<&crate::config::SearchSettings> for SearchConfig {
    fn from(settings: &crate::config::SearchSettings) -> Self {
        Self {
            debounce: settings.debounce,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    /// Input typed but the debounce window has not elapsed.
    Pending { input: String },
    /// A query was sent to the facade; its result may still be loading.
    Dispatched { query: String },
}

/// What the view should display.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    /// No active query: the full collection.
    All(Vec<Post>),
    Loading { query: String },
    Matches { query: String, posts: Vec<Post> },
    NoResults { query: String },
    /// The facade failed. `query` is `None` when the collection itself
    /// could not be loaded.
    Unavailable { query: Option<String> },
}

impl SearchResults {
    pub fn posts(&self) -> &[Post] {
        match self {
            SearchResults::All(posts) | SearchResults::Matches { posts, .. } => posts,
            _ => &[],
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            SearchResults::All(_) => None,
            SearchResults::Loading { query }
            | SearchResults::Matches { query, .. }
            | SearchResults::NoResults { query } => Some(query),
            SearchResults::Unavailable { query } => query.as_deref(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, SearchResults::Unavailable { .. })
    }

    /// One-line description used by the CLI and the results header.
    pub fn summary(&self) -> String {
        match self {
            SearchResults::All(posts) => format!("{} posts", posts.len()),
            SearchResults::Loading { query } => format!("Searching for \"{query}\"..."),
            SearchResults::Matches { query, posts } => {
                let noun = if posts.len() == 1 { "result" } else { "results" };
                format!("{} {noun} for \"{query}\"", posts.len())
            }
            SearchResults::NoResults { query } => format!("No posts found for \"{query}\""),
            SearchResults::Unavailable { .. } => "Error loading posts. Please try again.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub state: SearchState,
    pub results: SearchResults,
}

struct Control {
    input: String,
    /// Results shown while `Idle`; reloaded on reset while unavailable.
    idle: SearchResults,
    input_seq: u64,
    dispatch_seq: u64,
    timer: Option<JoinHandle<()>>,
}

struct Inner {
    posts: Arc<PostService>,
    config: SearchConfig,
    control: Mutex<Control>,
    snapshot: watch::Sender<SearchSnapshot>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        let control = self
            .control
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(timer) = control.timer.take() {
            timer.abort();
        }
    }
}

/// Search state machine shared by every view of one search box.
///
/// Event methods spawn Tokio tasks and must be called from within a runtime.
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<Inner>,
}

impl SearchController {
    /// Load the full collection for the idle view and start in `Idle`.
    pub async fn start(posts: Arc<PostService>, config: SearchConfig) -> Self {
        let idle = match posts.get_all_posts().await.into_result() {
            Ok(all) => SearchResults::All(all),
            Err(err) => {
                warn!(
                    target = "beyond_blog::application::search",
                    error = %err,
                    "collection unavailable; idle view will report the failure"
                );
                SearchResults::Unavailable { query: None }
            }
        };

        let (snapshot, _) = watch::channel(SearchSnapshot {
            state: SearchState::Idle,
            results: idle.clone(),
        });

        Self {
            inner: Arc::new(Inner {
                posts,
                config,
                control: Mutex::new(Control {
                    input: String::new(),
                    idle,
                    input_seq: 0,
                    dispatch_seq: 0,
                    timer: None,
                }),
                snapshot,
            }),
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.inner.config
    }

    /// Record new input. Blank input returns to `Idle` immediately; anything
    /// else (re)starts the debounce timer.
    pub fn on_input_changed(&self, text: impl Into<String>) {
        let mut control = mutex_lock(&self.inner.control, SOURCE, "on_input_changed");
        control.input = text.into();
        control.input_seq += 1;
        cancel_timer(&mut control);

        if control.input.trim().is_empty() {
            self.reset(&mut control);
            return;
        }

        let seq = control.input_seq;
        let delay = self.inner.config.debounce;
        let weak = Arc::downgrade(&self.inner);
        control.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = Weak::upgrade(&weak) {
                SearchController { inner }.fire(seq);
            }
        }));

        let input = control.input.clone();
        self.inner
            .snapshot
            .send_modify(|snapshot| snapshot.state = SearchState::Pending { input });
    }

    /// Dispatch the current input now, skipping the debounce window.
    pub fn on_submit(&self) {
        let mut control = mutex_lock(&self.inner.control, SOURCE, "on_submit");
        control.input_seq += 1;
        cancel_timer(&mut control);

        let query = control.input.trim().to_string();
        if query.is_empty() {
            self.reset(&mut control);
        } else {
            self.dispatch(&mut control, query);
        }
    }

    pub fn on_clear(&self) {
        let mut control = mutex_lock(&self.inner.control, SOURCE, "on_clear");
        control.input.clear();
        control.input_seq += 1;
        cancel_timer(&mut control);
        self.reset(&mut control);
    }

    pub fn current_state(&self) -> SearchState {
        self.inner.snapshot.borrow().state.clone()
    }

    pub fn current_results(&self) -> SearchResults {
        self.inner.snapshot.borrow().results.clone()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.inner.snapshot.subscribe()
    }

    fn fire(&self, seq: u64) {
        let mut control = mutex_lock(&self.inner.control, SOURCE, "fire");
        // A keystroke may have landed between the timer waking and this lock.
        if control.input_seq != seq {
            return;
        }
        control.timer = None;
        let query = control.input.trim().to_string();
        self.dispatch(&mut control, query);
    }

    fn dispatch(&self, control: &mut Control, query: String) {
        control.dispatch_seq += 1;
        let id = control.dispatch_seq;
        counter!("blog_search_dispatch_total").increment(1);
        debug!(
            target = "beyond_blog::application::search",
            query = %query,
            dispatch = id,
            "dispatching search"
        );

        self.inner.snapshot.send_replace(SearchSnapshot {
            state: SearchState::Dispatched {
                query: query.clone(),
            },
            results: SearchResults::Loading {
                query: query.clone(),
            },
        });

        let posts = Arc::clone(&self.inner.posts);
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            let fetched = posts.search_posts(&query).await;
            if let Some(inner) = Weak::upgrade(&weak) {
                SearchController { inner }.complete(id, query, fetched);
            }
        });
    }

    fn complete(&self, id: u64, query: String, fetched: Fetched<Vec<Post>>) {
        let control = mutex_lock(&self.inner.control, SOURCE, "complete");
        if control.dispatch_seq != id {
            counter!("blog_search_stale_discard_total").increment(1);
            debug!(
                target = "beyond_blog::application::search",
                query = %query,
                dispatch = id,
                latest = control.dispatch_seq,
                "discarding stale search response"
            );
            return;
        }

        let results = match fetched.into_result() {
            Ok(posts) if posts.is_empty() => SearchResults::NoResults { query },
            Ok(posts) => SearchResults::Matches { query, posts },
            Err(err) => {
                warn!(
                    target = "beyond_blog::application::search",
                    query = %query,
                    error = %err,
                    "search failed"
                );
                SearchResults::Unavailable { query: Some(query) }
            }
        };

        self.inner
            .snapshot
            .send_modify(|snapshot| snapshot.results = results);
    }

    fn reset(&self, control: &mut Control) {
        // Invalidates any in-flight dispatch.
        control.dispatch_seq += 1;
        self.inner.snapshot.send_replace(SearchSnapshot {
            state: SearchState::Idle,
            results: control.idle.clone(),
        });

        if control.idle.is_unavailable() {
            self.reload_idle(control.dispatch_seq);
        }
    }

    fn reload_idle(&self, id: u64) {
        let posts = Arc::clone(&self.inner.posts);
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            let fetched = posts.get_all_posts().await;
            if let Some(inner) = Weak::upgrade(&weak) {
                SearchController { inner }.complete_idle(id, fetched);
            }
        });
    }

    fn complete_idle(&self, id: u64, fetched: Fetched<Vec<Post>>) {
        let mut control = mutex_lock(&self.inner.control, SOURCE, "complete_idle");
        let all = match fetched.into_result() {
            Ok(all) => SearchResults::All(all),
            Err(err) => {
                warn!(
                    target = "beyond_blog::application::search",
                    error = %err,
                    "collection still unavailable"
                );
                return;
            }
        };
        control.idle = all.clone();

        // The collection is kept either way; it is only shown while still idle.
        if control.dispatch_seq != id {
            return;
        }
        self.inner.snapshot.send_replace(SearchSnapshot {
            state: SearchState::Idle,
            results: all,
        });
    }
}

fn cancel_timer(control: &mut Control) {
    if let Some(timer) = control.timer.take() {
        timer.abort();
    }
}
