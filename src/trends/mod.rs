//! Trend content: the record model, the bundled fallback list, the remote
//! listing fetcher, and the snapshot store that ties them together.
//!
//! # Architecture
//!
//! - `model` - `Trend`, `Category`, `Source`
//! - `fallback` - the three bundled trends shown before any fetch
//! - `remote` - HTTP retrieval with retry and listing-to-trend mapping
//! - `store` - the current snapshot and its replace-only-if-non-empty rule
//! - `filter` / `favorites` - pure views over a snapshot
//!
//! ```ignore
//! let mut store = ContentStore::new();
//! match store.refresh(&source).await {
//!     RefreshOutcome::Replaced(n) => tracing::info!(n, "refreshed"),
//!     _ => {} // fallback stays visible
//! }
//! ```

mod fallback;
mod favorites;
mod filter;
mod model;
mod remote;
mod store;

pub use fallback::fallback_trends;
pub use favorites::{favorite_trends, is_favorite, toggle_favorite};
pub use filter::filter;
pub use model::{Category, Source, Trend};
pub use remote::{build_http_client, parse_listing, FetchError, RemoteSource, DEFAULT_SOURCE_URL};
pub use store::{ContentStore, RefreshOutcome};
