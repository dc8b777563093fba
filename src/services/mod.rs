//! Service layer for the profile-views tool.
//!
//! This module contains the business logic for:
//! - Counter extraction from badge markup (`extract`)
//! - Badge fetching with retries (`BadgeFetcher`)
//! - Local badge rendering (`render_badge`)
//! - Sanitizing fetched markup before it is saved (`sanitize_svg`)

pub mod badge;
pub mod extract;
mod fetch;
pub mod sanitize;

pub use badge::render_badge;
pub use extract::{ExtractSource, Extraction, extract_count};
pub use fetch::{BadgeFetcher, MarkupSource};
pub use sanitize::sanitize_svg;
