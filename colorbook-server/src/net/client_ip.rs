use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use anyhow::anyhow;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Value returned when neither echo service could be reached.
pub const UNKNOWN_IP: &str = "unknown";

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Best-effort discovery of this process's public IP address, attached to
/// outbound requests as `X-Client-IP` / `X-Forwarded-For` so upstream
/// services can rate-limit per caller.
///
/// The first resolution tries the primary echo endpoint, then the fallback,
/// then gives up and yields [`UNKNOWN_IP`]. Whatever comes out is cached for
/// the resolver's lifetime; [`reset`](Self::reset) clears the cache. Callers
/// always get a string back, never an error.
pub struct ClientIpResolver {
    http: reqwest::Client,
    primary: String,
    fallback: String,
    cached: RwLock<Option<String>>,
}

impl ClientIpResolver {
    pub fn new(
        http: reqwest::Client,
        primary: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            http,
            primary: primary.into(),
            fallback: fallback.into(),
            cached: RwLock::new(None),
        }
    }

    pub async fn resolve(&self) -> String {
        if let Some(ip) = self.cached.read().await.clone() {
            return ip;
        }

        let resolved = self
            .lookup()
            .await
            .unwrap_or_else(|| UNKNOWN_IP.to_string());
        *self.cached.write().await = Some(resolved.clone());
        resolved
    }

    pub async fn reset(&self) {
        *self.cached.write().await = None;
    }

    async fn lookup(&self) -> Option<String> {
        for endpoint in [&self.primary, &self.fallback] {
            match self.fetch_ip(endpoint).await {
                Ok(ip) => {
                    debug!(%ip, endpoint, "resolved public IP");
                    return Some(ip);
                }
                Err(err) => {
                    warn!(endpoint, error = %err, "IP echo lookup failed");
                }
            }
        }
        None
    }

    async fn fetch_ip(&self, endpoint: &str) -> anyhow::Result<String> {
        let body = self
            .http
            .get(endpoint)
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let candidate = body.trim();
        candidate
            .parse::<IpAddr>()
            .map_err(|_| anyhow!("echo response is not an IP address: {candidate:?}"))?;
        Ok(candidate.to_string())
    }
}

impl fmt::Debug for ClientIpResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIpResolver")
            .field("primary", &self.primary)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}
