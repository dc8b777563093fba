// src/pipeline/show.rs

use crate::error::Result;
use crate::storage::CounterStorage;

/// Number of trailing history entries to print.
const RECENT_ENTRIES: usize = 7;

/// Log the stored snapshot and the tail of the history.
pub async fn run_show(storage: &dyn CounterStorage) -> Result<()> {
    match storage.load_snapshot().await? {
        Some(snapshot) => {
            log::info!("Snapshot date: {}", snapshot.date);
            log::info!("Views: {}", snapshot.views);
            if let Some(likes) = snapshot.likes {
                log::info!("Likes: {}", likes);
            }
        }
        None => log::info!("No snapshot found yet."),
    }

    let history = storage.load_history().await?;
    log::info!("History entries: {}", history.len());

    let entries = history.entries();
    let recent = &entries[entries.len().saturating_sub(RECENT_ENTRIES)..];
    for entry in recent {
        log::info!("    {}: {}", entry.date, entry.views);
    }

    Ok(())
}
