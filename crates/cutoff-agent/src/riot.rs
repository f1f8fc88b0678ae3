//! League-V4 HTTP client.
//!
//! One `GET` per page, no retry. The credential travels in the
//! `X-Riot-Token` header so it never appears in URLs or error messages.

use std::time::Duration;

use async_trait::async_trait;
use ladder::{Credential, FetchError, LeagueSource, Queue, Tier};
use serde::Deserialize;
use tracing::debug;

use crate::config::DEFAULT_API_HOST;

const TOKEN_HEADER: &str = "X-Riot-Token";

/// Longest body excerpt carried in a decode error.
const BODY_EXCERPT_LEN: usize = 200;

/// A league list page. Only the LP of each entry is used.
#[derive(Debug, Deserialize)]
struct LeagueList {
    entries: Vec<LeagueItem>,
}

#[derive(Debug, Deserialize)]
struct LeagueItem {
    #[serde(rename = "leaguePoints")]
    league_points: i64,
}

/// Where page requests are sent.
#[derive(Debug, Clone)]
enum Endpoint {
    /// `https://{region}.{host}/lol/league/v4/...`
    Regional { host: String },
    /// `{base}/{region}/lol/league/v4/...`, for a proxy or local stub that
    /// fronts every platform.
    Gateway { base: String },
}

/// Ranked API client implementing [`LeagueSource`].
#[derive(Debug, Clone)]
pub struct RiotClient {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl RiotClient {
    /// Build a client for `https://{region}.{api_host}` with a per-request deadline.
    pub fn new(api_host: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: build_http(timeout)?,
            endpoint: Endpoint::Regional {
                host: api_host.into(),
            },
        })
    }

    pub fn with_defaults(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::new(DEFAULT_API_HOST, timeout)
    }

    /// Build a client that sends every region's requests to one base URL,
    /// with the region as the first path segment.
    pub fn with_gateway(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let base: String = base_url.into();
        Ok(Self {
            http: build_http(timeout)?,
            endpoint: Endpoint::Gateway {
                base: base.trim_end_matches('/').to_string(),
            },
        })
    }

    /// URL of one league page.
    pub fn page_url(&self, region: &str, tier: Tier, queue: Queue) -> String {
        let region = region.to_lowercase();
        let path = format!(
            "lol/league/v4/{}/by-queue/{}",
            tier.league_path(),
            queue.as_str()
        );
        match &self.endpoint {
            Endpoint::Regional { host } => format!("https://{region}.{host}/{path}"),
            Endpoint::Gateway { base } => format!("{base}/{region}/{path}"),
        }
    }
}

fn build_http(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("cutoff-agent/", env!("CARGO_PKG_VERSION")))
        .build()
}

#[async_trait]
impl LeagueSource for RiotClient {
    async fn fetch_page(
        &self,
        region: &str,
        tier: Tier,
        queue: Queue,
        credential: &Credential,
    ) -> Result<Vec<i64>, FetchError> {
        let url = self.page_url(region, tier, queue);

        let resp = self
            .http
            .get(&url)
            .header(TOKEN_HEADER, credential.expose())
            .send()
            .await
            .map_err(|e| FetchError::transport(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::transport(&url, e))?;

        let entries = parse_league_page(&body).map_err(|e| FetchError::decode(&url, e))?;
        debug!(url = %url, entries = entries.len(), "league page decoded");
        Ok(entries)
    }
}

/// Extract the LP of every entry from a league list body.
///
/// Error text includes a short excerpt of the body for diagnosis.
pub fn parse_league_page(body: &[u8]) -> Result<Vec<i64>, String> {
    match serde_json::from_slice::<LeagueList>(body) {
        Ok(list) => Ok(list.entries.into_iter().map(|e| e.league_points).collect()),
        Err(e) => {
            let text = String::from_utf8_lossy(body);
            let excerpt: String = text.chars().take(BODY_EXCERPT_LEN).collect();
            Err(format!("{e} - body: {excerpt}"))
        }
    }
}
