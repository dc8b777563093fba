//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! └── .github/
//!     ├── profile-views.json           # Snapshot
//!     ├── profile-views-history.json   # History
//!     ├── profile-views.svg            # Raw badge
//!     └── profile-views-badge.svg      # Rendered badge
//! ```
//!
//! Paths come from `[paths]` in the config and are joined onto the root, so
//! absolute paths there are used as-is.
//!
//! ## Recovery
//!
//! A state file that exists but cannot be read or parsed is either treated
//! as absent (`self-heal`) or reported as [`AppError::MalformedState`]
//! (`fail-fast`), per [`RecoveryPolicy`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{History, PathsConfig, RecoveryPolicy, Snapshot};
use crate::storage::CounterStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    paths: PathsConfig,
    recovery: RecoveryPolicy,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, paths: &PathsConfig) -> Self {
        Self::with_recovery(root_dir, paths, RecoveryPolicy::default())
    }

    /// Create a LocalStorage with an explicit recovery policy.
    pub fn with_recovery(
        root_dir: impl Into<PathBuf>,
        paths: &PathsConfig,
        recovery: RecoveryPolicy,
    ) -> Self {
        Self {
            root_dir: root_dir.into(),
            paths: paths.clone(),
            recovery,
        }
    }

    pub fn paths(&self) -> &PathsConfig {
        &self.paths
    }

    /// Get the full path for a relative key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let mut bytes = serde_json::to_vec_pretty(value)?;
        bytes.push(b'\n');
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read persisted state, applying the recovery policy to bad files.
    async fn read_state<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let bytes = match self.read_bytes(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Ok(None),
            Err(e) => return self.recover(key, e),
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => self.recover(key, e),
        }
    }

    fn recover<T>(&self, key: &str, error: impl std::fmt::Display) -> Result<Option<T>> {
        let path = self.path(key);
        match self.recovery {
            RecoveryPolicy::SelfHeal => {
                log::warn!(
                    "Ignoring unreadable state in {}: {}. Starting fresh.",
                    path.display(),
                    error
                );
                Ok(None)
            }
            RecoveryPolicy::FailFast => Err(AppError::malformed(&path, error)),
        }
    }
}

#[async_trait]
impl CounterStorage for LocalStorage {
    async fn load_snapshot(&self) -> Result<Option<Snapshot>> {
        self.read_state(&self.paths.snapshot).await
    }

    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        self.write_json(&self.paths.snapshot, snapshot).await
    }

    async fn load_history(&self) -> Result<History> {
        Ok(self
            .read_state(&self.paths.history)
            .await?
            .unwrap_or_default())
    }

    async fn save_history(&self, history: &History) -> Result<()> {
        self.write_json(&self.paths.history, history).await
    }

    async fn save_artifact(&self, key: &str, contents: &str) -> Result<()> {
        self.write_bytes(key, contents.as_bytes()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Count;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn count(n: u64) -> Count {
        Count::from(n)
    }

    fn storage(tmp: &TempDir) -> LocalStorage {
        LocalStorage::new(tmp.path(), &PathsConfig::default())
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        storage.write_bytes("test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
        assert!(!storage.path("test.txt.tmp").exists());
    }

    #[tokio::test]
    async fn test_missing_state_is_empty() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        assert!(storage.load_snapshot().await.unwrap().is_none());
        assert!(storage.load_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_snapshot_preserves_likes() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        storage
            .write_bytes(
                ".github/profile-views.json",
                br#"{"views":5,"likes":3,"date":"2024-01-01"}"#,
            )
            .await
            .unwrap();

        storage.update_snapshot(day("2024-01-02"), count(9)).await.unwrap();

        let raw = std::fs::read_to_string(storage.path(".github/profile-views.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"views": 9, "likes": 3, "date": "2024-01-02"})
        );
    }

    #[tokio::test]
    async fn test_update_history_same_day_then_next_day() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        storage.update_history(day("2024-01-01"), count(5), 3650).await.unwrap();
        storage.update_history(day("2024-01-01"), count(7), 3650).await.unwrap();
        let history = storage.update_history(day("2024-01-02"), count(8), 3650).await.unwrap();

        assert_eq!(history.len(), 2);
        let reloaded = storage.load_history().await.unwrap();
        assert_eq!(reloaded, history);

        let raw =
            std::fs::read_to_string(storage.path(".github/profile-views-history.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"date": "2024-01-01", "views": 7},
                {"date": "2024-01-02", "views": 8}
            ])
        );
    }

    #[tokio::test]
    async fn test_malformed_history_self_heals() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        storage
            .write_bytes(
                ".github/profile-views-history.json",
                br#"{"date":"2024-01-01","views":5}"#,
            )
            .await
            .unwrap();

        let history = storage.update_history(day("2024-01-05"), count(11), 3650).await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().views, count(11));
    }

    #[tokio::test]
    async fn test_malformed_history_fail_fast() {
        let tmp = TempDir::new().unwrap();
        let storage =
            LocalStorage::with_recovery(tmp.path(), &PathsConfig::default(), RecoveryPolicy::FailFast);
        let key = ".github/profile-views-history.json";
        storage.write_bytes(key, b"not json").await.unwrap();

        let err = storage
            .update_history(day("2024-01-05"), count(11), 3650)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MalformedState { .. }));
        // Nothing was overwritten.
        assert_eq!(storage.read_bytes(key).await.unwrap(), Some(b"not json".to_vec()));
    }

    #[tokio::test]
    async fn test_malformed_snapshot_self_heals() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        storage
            .write_bytes(".github/profile-views.json", b"[1, 2, 3]")
            .await
            .unwrap();

        let snapshot = storage.update_snapshot(day("2024-01-02"), count(4)).await.unwrap();
        assert_eq!(snapshot, Snapshot::new(count(4), day("2024-01-02")));
    }

    #[tokio::test]
    async fn test_increment_likes_persists() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        storage.update_snapshot(day("2024-01-01"), count(20)).await.unwrap();

        storage.increment_likes(day("2024-01-09")).await.unwrap();
        let snapshot = storage.increment_likes(day("2024-01-09")).await.unwrap();

        assert_eq!(snapshot.likes, Some(count(2)));
        let reloaded = storage.load_snapshot().await.unwrap().unwrap();
        assert_eq!(reloaded.views, count(20));
        assert_eq!(reloaded.likes, Some(count(2)));
        assert_eq!(reloaded.date, day("2024-01-01"));
    }

    #[tokio::test]
    async fn test_huge_count_persists_as_plain_number() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);
        let views: Count = "18446744073709551616".parse().unwrap();

        storage
            .record_observation(day("2024-01-01"), views.clone(), 3650)
            .await
            .unwrap();

        let snapshot = std::fs::read_to_string(storage.path(".github/profile-views.json")).unwrap();
        assert!(snapshot.contains(r#""views": 18446744073709551616"#));
        let history =
            std::fs::read_to_string(storage.path(".github/profile-views-history.json")).unwrap();
        assert!(history.contains(r#""views": 18446744073709551616"#));

        assert_eq!(storage.load_snapshot().await.unwrap().unwrap().views, views);
        assert_eq!(storage.load_history().await.unwrap().last().unwrap().views, views);
    }

    #[tokio::test]
    async fn test_save_artifact_creates_dirs() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        storage.save_artifact("nested/dir/badge.svg", "<svg/>").await.unwrap();

        let written = std::fs::read_to_string(storage.path("nested/dir/badge.svg")).unwrap();
        assert_eq!(written, "<svg/>");
    }
}
