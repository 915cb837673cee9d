//! Short-link allocation service
//!
//! Issues click-tracked short links with numeric identifiers unique across
//! everything issued before, probing the external service for collisions.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, trace};

use crate::config::ShortenerConfig;
use crate::errors::Result;
use crate::repository::{LinkRepository, TrackedLink};
use crate::services::shortener::ShortenerClient;

pub struct LinkService {
    repo: Arc<dyn LinkRepository>,
    shortener: Arc<dyn ShortenerClient>,
    /// Bot deep link the issued short links resolve to
    bot_link: String,
}

impl LinkService {
    pub fn new(
        repo: Arc<dyn LinkRepository>,
        shortener: Arc<dyn ShortenerClient>,
        config: &ShortenerConfig,
    ) -> Self {
        Self {
            repo,
            shortener,
            bot_link: config.bot_link.clone(),
        }
    }

    /// Allocate a short link unique among all previously issued ones.
    ///
    /// Probing starts above the highest identifier ever issued, so gaps left
    /// by deleted links are never reused. The unique column on the stored
    /// identifier is what serializes two racing allocations: the loser gets
    /// a `Conflict` and decides whether to retry.
    pub async fn create_new_bitlink(&self, place_of_use: &str) -> Result<TrackedLink> {
        let max_id = self.repo.max_external_id().await?;

        let mut candidate = max_id + 1;
        while self.shortener.is_bitlink(&self.bot_link, candidate).await? {
            trace!("Shortener id {} already taken, probing next", candidate);
            candidate += 1;
        }

        let short_url = self
            .shortener
            .shorten_link(&self.bot_link, candidate)
            .await?;

        let link = self
            .repo
            .insert_link(candidate, &short_url, place_of_use, Utc::now())
            .await?;

        info!(
            "Allocated short link {} (id {}) for \"{}\"",
            link.short_url, link.external_id, link.place_of_use
        );
        Ok(link)
    }

    /// Current click count for an issued link; 0 when nothing was recorded.
    pub async fn clicks(&self, link: &TrackedLink) -> Result<u64> {
        self.shortener.count_clicks(&link.short_url).await
    }
}
