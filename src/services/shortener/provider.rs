use async_trait::async_trait;

use crate::errors::Result;

/// Contract of the external shortening service.
///
/// The service is the single source of truth for "is this id taken";
/// nothing is memoized locally between calls.
#[async_trait]
pub trait ShortenerClient: Send + Sync {
    /// Whether a short link derived from `base_url` and `candidate` already
    /// exists at the service.
    async fn is_bitlink(&self, base_url: &str, candidate: i64) -> Result<bool>;

    /// Materialize the short link for that identifier and return it.
    /// Idempotent for a given id.
    async fn shorten_link(&self, base_url: &str, candidate: i64) -> Result<String>;

    /// Current click count for a short link; 0 for a link with no clicks.
    async fn count_clicks(&self, short_url: &str) -> Result<u64>;
}
