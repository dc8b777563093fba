// src/utils/http.rs

//! HTTP client utilities.

use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::FetchConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &FetchConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout())
        .build()?;
    Ok(client)
}

/// GET a URL and return the body, treating non-2xx statuses as errors.
pub async fn get_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let text = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(text)
}

/// Run `op` up to `attempts` times with a fixed `delay` between attempts.
///
/// The closure receives the 1-based attempt number. When every attempt
/// fails, the last error is wrapped in [`AppError::Fetch`].
pub async fn with_retries<T, F, Fut>(attempts: u32, delay: Duration, mut op: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                log::warn!(
                    "Attempt {}/{} failed: {}. Retrying in {}ms",
                    attempt,
                    attempts,
                    e,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(AppError::fetch(attempts, e)),
        }
    }
}
