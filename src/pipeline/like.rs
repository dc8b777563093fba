// src/pipeline/like.rs

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Config, Snapshot};
use crate::services::render_badge;
use crate::storage::CounterStorage;

/// Add one like and refresh the local badge.
pub async fn run_like(
    config: &Config,
    storage: &dyn CounterStorage,
    date: NaiveDate,
) -> Result<Snapshot> {
    config.validate()?;

    let snapshot = storage.increment_likes(date).await?;
    log::info!(
        "Likes: {} (views: {})",
        snapshot.likes.clone().unwrap_or_default(),
        snapshot.views
    );

    let badge = render_badge(&snapshot.views, snapshot.likes.as_ref(), &config.badge);
    storage.save_artifact(&config.paths.badge, &badge).await?;
    log::info!("Badge saved to {}", config.paths.badge);

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::Count;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_like_twice() {
        let tmp = TempDir::new().unwrap();
        let config = Config::default();
        let storage = LocalStorage::new(tmp.path(), &config.paths);
        let date: NaiveDate = "2024-05-01".parse().unwrap();

        run_like(&config, &storage, date).await.unwrap();
        let snapshot = run_like(&config, &storage, date).await.unwrap();

        assert_eq!(snapshot.likes, Some(Count::from(2u64)));
        let badge = std::fs::read_to_string(storage.path(&config.paths.badge)).unwrap();
        assert!(badge.contains(">2 likes<"));
    }

    #[tokio::test]
    async fn test_like_rejects_invalid_config() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.badge = String::new();
        let storage = LocalStorage::new(tmp.path(), &config.paths);

        let err = run_like(&config, &storage, "2024-05-01".parse().unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(!storage.path(&config.paths.snapshot).exists());
    }
}
