use std::sync::Arc;

use super::fallback::fallback_trends;
use super::model::Trend;
use super::remote::{FetchError, RemoteSource};

/// What a refresh did to the snapshot.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// Snapshot replaced with this many trends.
    Replaced(usize),
    /// The source answered with zero trends; snapshot kept.
    Empty,
    /// The fetch failed; snapshot kept.
    Failed(FetchError),
}

/// Owner of the current trend snapshot.
///
/// Starts with the bundled fallback list and is only ever replaced
/// wholesale, never merged, and never by an empty list. The snapshot sits
/// behind an `Arc` so views can hold it across a replacement.
pub struct ContentStore {
    trends: Arc<Vec<Trend>>,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore {
    pub fn new() -> Self {
        Self {
            trends: Arc::new(fallback_trends()),
        }
    }

    /// The current snapshot. Never empty.
    pub fn current_trends(&self) -> Arc<Vec<Trend>> {
        Arc::clone(&self.trends)
    }

    /// Borrow the snapshot for filtering and rendering.
    pub fn trends(&self) -> &[Trend] {
        &self.trends
    }

    /// Apply a completed fetch. Only a non-empty success replaces the snapshot.
    pub fn apply_fetch(&mut self, result: Result<Vec<Trend>, FetchError>) -> RefreshOutcome {
        match result {
            Ok(trends) if trends.is_empty() => {
                tracing::info!("Remote source returned no trends, keeping current snapshot");
                RefreshOutcome::Empty
            }
            Ok(trends) => {
                let count = trends.len();
                self.trends = Arc::new(trends);
                tracing::info!(count, "Trend snapshot replaced");
                RefreshOutcome::Replaced(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Trend refresh failed, keeping current snapshot");
                RefreshOutcome::Failed(e)
            }
        }
    }

    /// Fetch from `source` and apply the result in one step.
    pub async fn refresh(&mut self, source: &RemoteSource) -> RefreshOutcome {
        let result = source.fetch().await;
        self.apply_fetch(result)
    }
}
