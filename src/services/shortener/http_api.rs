//! HTTP implementation of the shortener contract.
//!
//! Synchronous `ureq` calls with a bounded global timeout, executed on the
//! blocking thread pool. Any transport failure or timeout surfaces as
//! `ServiceUnavailable`; retrying is the caller's decision.

use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;
use ureq::Agent;

use super::provider::ShortenerClient;
use crate::config::ShortenerConfig;
use crate::errors::{BakeCakeError, Result};

pub struct HttpShortenerClient {
    agent: Agent,
    api_base: String,
    token: String,
}

impl HttpShortenerClient {
    pub fn new(config: &ShortenerConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();

        Self {
            agent,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// Long URL a short link with this identifier resolves to (bot deep link).
    pub fn deep_link(base_url: &str, candidate: i64) -> String {
        format!("{}?start={}", base_url, candidate)
    }

    fn probe_sync(agent: Agent, token: String, url: String) -> Result<bool> {
        let mut req = agent.get(&url);
        if !token.is_empty() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        match req.call() {
            Ok(_) => Ok(true),
            Err(ureq::Error::StatusCode(404)) => Ok(false),
            Err(e) => Err(BakeCakeError::service_unavailable(format!(
                "shortener probe failed: {}",
                e
            ))),
        }
    }

    fn shorten_sync(agent: Agent, token: String, url: String, body: serde_json::Value) -> Result<String> {
        let mut req = agent.post(&url);
        if !token.is_empty() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let resp = req.send_json(body).map_err(|e| {
            BakeCakeError::service_unavailable(format!("shortener request failed: {}", e))
        })?;

        let json: serde_json::Value = resp.into_body().read_json().map_err(|e| {
            BakeCakeError::service_unavailable(format!("shortener response parse failed: {}", e))
        })?;

        json["short_url"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| BakeCakeError::service_unavailable("shortener response has no short_url"))
    }

    fn clicks_sync(agent: Agent, token: String, url: String, short_url: String) -> Result<u64> {
        let mut req = agent.get(&url).query("short_url", &short_url);
        if !token.is_empty() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let resp = req.call().map_err(|e| {
            BakeCakeError::service_unavailable(format!("click count request failed: {}", e))
        })?;

        let json: serde_json::Value = resp.into_body().read_json().map_err(|e| {
            BakeCakeError::service_unavailable(format!("click count parse failed: {}", e))
        })?;

        // Absent field means the service has recorded nothing yet
        Ok(json["clicks"].as_u64().unwrap_or(0))
    }
}

#[async_trait]
impl ShortenerClient for HttpShortenerClient {
    async fn is_bitlink(&self, base_url: &str, candidate: i64) -> Result<bool> {
        let agent = self.agent.clone();
        let token = self.token.clone();
        let url = format!("{}/links/{}", self.api_base, candidate);
        trace!("Probing shortener for id {} ({})", candidate, base_url);

        tokio::task::spawn_blocking(move || Self::probe_sync(agent, token, url))
            .await
            .map_err(|e| BakeCakeError::service_unavailable(format!("probe task failed: {}", e)))?
    }

    async fn shorten_link(&self, base_url: &str, candidate: i64) -> Result<String> {
        let agent = self.agent.clone();
        let token = self.token.clone();
        let url = format!("{}/links", self.api_base);
        let body = serde_json::json!({
            "link_id": candidate,
            "long_url": Self::deep_link(base_url, candidate),
        });

        tokio::task::spawn_blocking(move || Self::shorten_sync(agent, token, url, body))
            .await
            .map_err(|e| BakeCakeError::service_unavailable(format!("shorten task failed: {}", e)))?
    }

    async fn count_clicks(&self, short_url: &str) -> Result<u64> {
        let agent = self.agent.clone();
        let token = self.token.clone();
        let url = format!("{}/clicks", self.api_base);
        let short_url = short_url.to_string();

        tokio::task::spawn_blocking(move || Self::clicks_sync(agent, token, url, short_url))
            .await
            .map_err(|e| BakeCakeError::service_unavailable(format!("clicks task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_link_format() {
        assert_eq!(
            HttpShortenerClient::deep_link("https://t.me/bakecake_bot", 7),
            "https://t.me/bakecake_bot?start=7"
        );
    }

    /// Depends on external network, may fail in CI
    #[test]
    #[ignore]
    fn test_probe_unroutable_times_out() {
        let config = ShortenerConfig {
            api_base: "http://192.0.2.1".to_string(), // TEST-NET, unroutable
            timeout_secs: 2,
            ..Default::default()
        };
        let client = HttpShortenerClient::new(&config);

        let result = HttpShortenerClient::probe_sync(
            client.agent.clone(),
            String::new(),
            format!("{}/links/1", client.api_base),
        );

        assert!(matches!(result, Err(BakeCakeError::ServiceUnavailable(_))));
    }
}
