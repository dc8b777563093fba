// src/pipeline/extract.rs

use std::path::Path;

use crate::error::Result;
use crate::services::Extraction;
use crate::services::extract::{extract, visible_text_segments};

/// Extract the count from a saved badge file, logging what was seen.
pub async fn run_extract(path: &Path) -> Result<Extraction> {
    let markup = tokio::fs::read_to_string(path).await?;

    let segments = visible_text_segments(&markup);
    log::info!("{} visible text segment(s) in {}", segments.len(), path.display());
    for segment in &segments {
        log::debug!("    {:?}", segment);
    }

    let extraction = extract(&markup)?;
    log::info!(
        "Count: {} (token '{}', {:?})",
        extraction.count,
        extraction.token,
        extraction.source
    );
    Ok(extraction)
}
