use crate::models::RawListing;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for listing sources.
/// The extractor only depends on the `RawListing` shape, so any client
/// exposing it is substitutable (tests use an in-memory one).
#[async_trait]
pub trait ListingProvider: Send + Sync {
    /// Fetch one listing by pasted URL or bare ad identifier.
    async fn fetch_listing(&self, url_or_id: &str) -> Result<RawListing>;

    /// Get the name of the listing source
    fn provider_name(&self) -> &'static str;
}
