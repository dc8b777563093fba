//! Storage abstractions for counter persistence.
//!
//! Three files make up the state, each rewritten whole on every update:
//!
//! ```text
//! .github/
//! ├── profile-views.json            # Snapshot: {"views", "likes"?, "date"}
//! ├── profile-views-history.json    # History: [{"date", "views"}, ...]
//! ├── profile-views.svg             # Badge as fetched
//! └── profile-views-badge.svg       # Badge as rendered locally
//! ```
//!
//! Read-modify-write is unguarded: concurrent runs race and the last
//! writer wins.

pub mod local;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Count, History, Snapshot};

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for counter storage backends.
///
/// Loading never sees a half-written file; how a corrupt file is handled
/// depends on the backend's recovery policy.
#[async_trait]
pub trait CounterStorage: Send + Sync {
    /// Load the snapshot, `None` if absent.
    async fn load_snapshot(&self) -> Result<Option<Snapshot>>;

    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()>;

    /// Load the history, empty if absent.
    async fn load_history(&self) -> Result<History>;

    async fn save_history(&self, history: &History) -> Result<()>;

    /// Write a text artifact (badge markup) at `key`.
    async fn save_artifact(&self, key: &str, contents: &str) -> Result<()>;

    /// Merge `(date, views)` into the snapshot, keeping likes and unknown fields.
    async fn update_snapshot(&self, date: NaiveDate, views: Count) -> Result<Snapshot> {
        let snapshot = Snapshot::observe(self.load_snapshot().await?, views, date);
        self.save_snapshot(&snapshot).await?;
        Ok(snapshot)
    }

    /// Record `(date, views)` in the history, keeping at most `max_entries`.
    async fn update_history(
        &self,
        date: NaiveDate,
        views: Count,
        max_entries: usize,
    ) -> Result<History> {
        let mut history = self.load_history().await?;
        history.record(date, views, max_entries);
        self.save_history(&history).await?;
        Ok(history)
    }

    /// Apply one observation to both snapshot and history.
    ///
    /// Both files are loaded before either is written, so a fail-fast
    /// recovery error leaves everything untouched.
    async fn record_observation(
        &self,
        date: NaiveDate,
        views: Count,
        max_entries: usize,
    ) -> Result<(Snapshot, History)> {
        let previous = self.load_snapshot().await?;
        let mut history = self.load_history().await?;

        history.record(date, views.clone(), max_entries);
        let snapshot = Snapshot::observe(previous, views, date);

        self.save_snapshot(&snapshot).await?;
        self.save_history(&history).await?;
        Ok((snapshot, history))
    }

    /// Add one like to the snapshot.
    async fn increment_likes(&self, date: NaiveDate) -> Result<Snapshot> {
        let snapshot = Snapshot::like(self.load_snapshot().await?, date);
        self.save_snapshot(&snapshot).await?;
        Ok(snapshot)
    }
}
