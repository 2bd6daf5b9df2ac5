//! Ordered persistence for the favorites list.
//!
//! Toggles persist from independent background tasks, and the pool can run
//! two of them at once. Every write takes a ticket when it is issued; the
//! writer lets writes through one at a time and drops any whose ticket is
//! older than one already on disk, so the stored list is always the newest
//! one that was successfully written.

use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::schema::Database;

/// Outcome of a single favorites write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoritesWrite {
    Written,
    /// A newer list was already stored.
    Superseded,
}

#[derive(Clone)]
pub struct FavoritesWriter {
    db: Database,
    issued: Arc<AtomicU64>,
    /// Ticket of the last list written to disk.
    written: Arc<Mutex<u64>>,
}

impl FavoritesWriter {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            issued: Arc::new(AtomicU64::new(0)),
            written: Arc::new(Mutex::new(0)),
        }
    }

    /// Reserve the next position in write order. Call this on the UI task,
    /// at the moment the in-memory list changes.
    pub fn ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Store `favorites` unless a list with a newer ticket is already stored.
    pub async fn write(&self, ticket: u64, favorites: &[String]) -> Result<FavoritesWrite> {
        let mut written = self.written.lock().await;
        if ticket <= *written {
            tracing::debug!(ticket, newest = *written, "Skipping superseded favorites write");
            return Ok(FavoritesWrite::Superseded);
        }
        self.db.set_favorites(favorites).await?;
        *written = ticket;
        Ok(FavoritesWrite::Written)
    }
}
