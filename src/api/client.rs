use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::api::traits::ListingProvider;
use crate::extract::extract_id;
use crate::models::RawListing;

const DEFAULT_BASE_URL: &str = "https://api.leboncoin.fr";

/// Leboncoin API client
pub struct LbcClient {
    client: Client,
    base_url: String,
}

impl LbcClient {
    /// Create a client against the production API
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ListingProvider for LbcClient {
    async fn fetch_listing(&self, url_or_id: &str) -> Result<RawListing> {
        let ad_id = extract_id(url_or_id);
        let url = format!("{}/finder/classified/{}", self.base_url, ad_id);

        debug!("Fetching listing: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach the listing API")?;

        if !response.status().is_success() {
            warn!("Listing API returned status: {}", response.status());
            anyhow::bail!("Failed to fetch listing {}: {}", ad_id, response.status());
        }

        let listing = response
            .json::<RawListing>()
            .await
            .context("Failed to decode listing payload")?;

        Ok(listing)
    }

    fn provider_name(&self) -> &'static str {
        "Leboncoin"
    }
}
