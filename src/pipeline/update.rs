// src/pipeline/update.rs

//! Fetch, extract, persist.

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Config, Count};
use crate::services::extract::{ExtractSource, extract};
use crate::services::{MarkupSource, render_badge, sanitize_svg};
use crate::storage::CounterStorage;

/// What one update run stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    pub username: String,
    pub views: Count,
    pub likes: Option<Count>,
    pub date: NaiveDate,
    pub history_len: usize,
    pub source: ExtractSource,
}

/// Run one update for `username` dated `date`.
///
/// An invalid config, a fetch failure or an extraction failure returns
/// before anything is written. The fetched markup is sanitized before it is
/// saved.
pub async fn run_update(
    config: &Config,
    storage: &dyn CounterStorage,
    source: &dyn MarkupSource,
    username: &str,
    date: NaiveDate,
) -> Result<UpdateSummary> {
    config.validate()?;
    log::info!("Updating profile views for {} ({})", username, date);

    let markup = source.fetch_markup(username).await?;
    let extraction = extract(&markup)?;
    log::info!(
        "Extracted {} views from '{}' ({:?})",
        extraction.count,
        extraction.token,
        extraction.source
    );

    let (snapshot, history) = storage
        .record_observation(date, extraction.count.clone(), config.history.max_entries)
        .await?;
    log::info!("Snapshot saved to {}", config.paths.snapshot);
    log::info!(
        "History saved to {} ({} entries)",
        config.paths.history,
        history.len()
    );

    storage
        .save_artifact(&config.paths.raw_svg, &sanitize_svg(&markup))
        .await?;
    let badge = render_badge(&snapshot.views, snapshot.likes.as_ref(), &config.badge);
    storage.save_artifact(&config.paths.badge, &badge).await?;
    log::info!(
        "Badges saved to {} and {}",
        config.paths.raw_svg,
        config.paths.badge
    );

    Ok(UpdateSummary {
        username: username.to_string(),
        views: snapshot.views,
        likes: snapshot.likes,
        date: snapshot.date,
        history_len: history.len(),
        source: extraction.source,
    })
}
