// src/services/extract.rs

//! Badge counter extraction.
//!
//! A badge embeds its count among plenty of other numbers (widths,
//! coordinates, ids). The count is recovered with an ordered fallback chain:
//!
//! 1. Visible text segments (`>text<`) that are a plain or comma-grouped
//!    integer; the last one in document order wins, since badges put the
//!    value after the label.
//! 2. Otherwise the longest run of two or more digits anywhere in the
//!    markup, attributes included (first one on ties).
//! 3. Otherwise [`AppError::NoNumericValueFound`].
//!
//! Counts have no upper bound; a token of any length parses exactly.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::Count;

/// Text between a `>` and the next `<`.
static TEXT_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">([^<>]+)<").expect("valid text segment regex"));

/// A whole segment that is `1234` or `1,234,567`.
static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]{1,3}(?:,[0-9]{3})*|[0-9]+)$").expect("valid numeric token regex")
});

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{2,}").expect("valid digit run regex"));

/// Which step of the chain produced the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractSource {
    VisibleText,
    DigitRun,
}

/// A recovered count and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub count: Count,
    pub token: String,
    pub source: ExtractSource,
}

/// Recover the counter from badge markup.
pub fn extract_count(markup: &str) -> Result<Count> {
    extract(markup).map(|e| e.count)
}

/// Run the fallback chain, reporting which step matched.
pub fn extract(markup: &str) -> Result<Extraction> {
    if let Some(token) = last_numeric_segment(markup) {
        return Ok(Extraction {
            count: parse_count(token)?,
            token: token.to_string(),
            source: ExtractSource::VisibleText,
        });
    }

    if let Some(token) = longest_digit_run(markup) {
        log::debug!("No numeric text segment, falling back to digit run '{token}'");
        return Ok(Extraction {
            count: parse_count(token)?,
            token: token.to_string(),
            source: ExtractSource::DigitRun,
        });
    }

    Err(AppError::NoNumericValueFound)
}

/// Trimmed, non-empty visible text segments in document order.
pub fn visible_text_segments(markup: &str) -> Vec<&str> {
    TEXT_SEGMENT
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect()
}

fn last_numeric_segment(markup: &str) -> Option<&str> {
    visible_text_segments(markup)
        .into_iter()
        .rev()
        .find(|s| NUMERIC_TOKEN.is_match(s))
}

fn longest_digit_run(markup: &str) -> Option<&str> {
    DIGIT_RUN
        .find_iter(markup)
        .map(|m| m.as_str())
        .reduce(|best, run| if run.len() > best.len() { run } else { best })
}

/// Strip grouping commas and parse.
fn parse_count(token: &str) -> Result<Count> {
    let digits: String = token.chars().filter(|c| *c != ',').collect();
    digits.parse().map_err(|_| AppError::NoNumericValueFound)
}
