// src/pipeline/render.rs

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::services::render_badge;
use crate::storage::CounterStorage;

/// Re-render the local badge from the stored snapshot.
pub async fn run_render(config: &Config, storage: &dyn CounterStorage) -> Result<()> {
    config.validate()?;

    let snapshot = storage
        .load_snapshot()
        .await?
        .ok_or_else(|| AppError::config("No snapshot found. Run 'update' first."))?;

    let badge = render_badge(&snapshot.views, snapshot.likes.as_ref(), &config.badge);
    storage.save_artifact(&config.paths.badge, &badge).await?;
    log::info!(
        "Badge rendered to {} (views: {}, likes: {})",
        config.paths.badge,
        snapshot.views,
        snapshot.likes.unwrap_or_default()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_render_requires_snapshot() {
        let tmp = TempDir::new().unwrap();
        let config = Config::default();
        let storage = LocalStorage::new(tmp.path(), &config.paths);

        let err = run_render(&config, &storage).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_render_from_snapshot() {
        let tmp = TempDir::new().unwrap();
        let config = Config::default();
        let storage = LocalStorage::new(tmp.path(), &config.paths);
        storage
            .update_snapshot("2024-01-01".parse().unwrap(), 4321u64.into())
            .await
            .unwrap();

        run_render(&config, &storage).await.unwrap();

        let badge = std::fs::read_to_string(storage.path(&config.paths.badge)).unwrap();
        assert!(badge.contains("4,321"));
    }
}
