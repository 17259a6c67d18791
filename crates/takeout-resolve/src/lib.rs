use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;

use takeout_model::Bookmark;

pub mod title;

pub use title::find_title;

/// Total time allowed for one fetch: connect, redirects, and body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause between starting successive fetches.
pub const DEFAULT_LAUNCH_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("failed to read response body from {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub timeout: Duration,
    pub launch_delay: Duration,
    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            launch_delay: DEFAULT_LAUNCH_DELAY,
            user_agent: concat!("take-out-pocket-csv/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Outcome counts for one [`TitleResolver::resolve_all`] run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolveSummary {
    pub attempted: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

/// Fetches pages for placeholder bookmarks and fills in their titles.
#[derive(Debug, Clone)]
pub struct TitleResolver {
    client: reqwest::Client,
    launch_delay: Duration,
}

impl TitleResolver {
    pub fn new(config: ResolverConfig) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(ResolveError::Client)?;

        Ok(Self {
            client,
            launch_delay: config.launch_delay,
        })
    }

    /// Resolve titles for every placeholder bookmark.
    ///
    /// Each placeholder gets its own task, started `launch_delay` after the
    /// previous one whether or not earlier fetches have finished. Returns once
    /// every task has completed. A task owns only its record's index and URL;
    /// titles are written back here, after the join, so no record is shared.
    /// Failures are logged and leave the placeholder in place.
    pub async fn resolve_all(&self, bookmarks: &mut [Bookmark]) -> ResolveSummary {
        let mut tasks = JoinSet::new();
        let mut summary = ResolveSummary::default();

        let placeholders = bookmarks
            .iter()
            .enumerate()
            .filter(|(_, bookmark)| bookmark.title_is_placeholder());

        for (index, bookmark) in placeholders {
            if summary.attempted > 0 {
                tokio::time::sleep(self.launch_delay).await;
            }
            summary.attempted += 1;

            let resolver = self.clone();
            let url = bookmark.url.clone();
            tasks.spawn(async move {
                let title = resolver.resolve_one(index, &url).await;
                (index, title)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Some(title))) => {
                    if bookmarks[index].apply_resolved_title(title) {
                        summary.resolved += 1;
                    }
                }
                Ok((_, None)) => {}
                Err(e) => tracing::warn!(error = %e, "Title task did not complete"),
            }
        }

        summary.unresolved = summary.attempted - summary.resolved;
        summary
    }

    /// Fetch `url` and return its page title, if it has a non-empty one.
    ///
    /// Any response with a body is searched, whatever its status code.
    pub async fn fetch_title(&self, url: &str) -> Result<Option<String>, ResolveError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ResolveError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = %status, "Non-success status, searching body anyway");
        }

        let body = response.text().await.map_err(|source| ResolveError::Body {
            url: url.to_string(),
            source,
        })?;
        tracing::debug!(url = %url, bytes = body.len(), "Received HTML");

        Ok(title::title_from_body(&body))
    }

    async fn resolve_one(&self, index: usize, url: &str) -> Option<String> {
        tracing::info!(index, url = %url, "Request URL");

        match self.fetch_title(url).await {
            Ok(Some(title)) => {
                tracing::debug!(index, title = %title, "Resolved title");
                Some(title)
            }
            Ok(None) => {
                tracing::debug!(index, url = %url, "No title found, keeping URL");
                None
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "Title fetch failed, keeping URL");
                None
            }
        }
    }
}
