// src/services/fetch.rs

//! Badge markup fetcher.
//!
//! Requests the counter badge for a user from the badge service, retrying
//! the whole request with a fixed delay.

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::models::FetchConfig;
use crate::utils::http;

/// Anything that can hand back badge markup for a user.
#[async_trait]
pub trait MarkupSource: Send + Sync {
    async fn fetch_markup(&self, username: &str) -> Result<String>;
}

/// Fetches badges over HTTP.
pub struct BadgeFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl BadgeFetcher {
    /// Create a fetcher with its own configured client.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self::with_client(http::create_client(config)?, config))
    }

    pub fn with_client(client: reqwest::Client, config: &FetchConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    /// Badge URL for `username`, e.g.
    /// `https://komarev.com/ghpvc/?username=octocat&label=Profile+views&color=0e75b6&style=flat`.
    pub fn badge_url(&self, username: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)?;
        url.query_pairs_mut()
            .append_pair("username", username)
            .append_pair("label", &self.config.label)
            .append_pair("color", &self.config.color)
            .append_pair("style", &self.config.style);
        Ok(url)
    }
}

#[async_trait]
impl MarkupSource for BadgeFetcher {
    async fn fetch_markup(&self, username: &str) -> Result<String> {
        let url = self.badge_url(username)?;
        log::info!("Fetching badge from {}", url);

        let markup = http::with_retries(self.config.retries, self.config.retry_delay(), |attempt| {
            log::debug!("GET {} (attempt {})", url, attempt);
            http::get_text(&self.client, url.as_str())
        })
        .await?;

        log::debug!("Fetched {} bytes of badge markup", markup.len());
        Ok(markup)
    }
}
