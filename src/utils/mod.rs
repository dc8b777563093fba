//! Utility functions and helpers.

pub mod http;

use chrono::{Local, NaiveDate};

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
