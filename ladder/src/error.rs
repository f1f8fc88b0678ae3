//! Error taxonomy for page fetches and region processing.
//!
//! | Error          | Raised by                 | Effect                          |
//! |----------------|---------------------------|---------------------------------|
//! | `FetchError`   | `LeagueSource` impls      | Fails the (tier, queue) page    |
//! | `PageFailure`  | Region Processor          | One failed page, tagged         |
//! | `RegionError`  | Region Processor          | Whole region omitted this run   |

use std::fmt;

use thiserror::Error;

use crate::types::{Queue, Tier};

/// Failure to retrieve one league page.
///
/// Transport and status failures are kept apart from decode failures for
/// diagnostics; the region processor treats them all alike.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Request never produced a response (connect, timeout, body read).
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// Response arrived with a non-success status.
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Body could not be read as a league page.
    #[error("malformed league payload from {url}: {message}")]
    Decode { url: String, message: String },

    /// Fetch task ended without reporting (panic or runtime shutdown).
    #[error("fetch task aborted: {0}")]
    Aborted(String),
}

impl FetchError {
    pub fn transport(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub fn decode(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// `true` for payload problems, `false` for transport/status problems.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// A single failed page within a region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{tier} {queue}: {cause}")]
pub struct PageFailure {
    pub tier: Tier,
    pub queue: Queue,
    #[source]
    pub cause: FetchError,
}

/// All page failures for a region that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionError {
    pub region: String,
    pub failures: Vec<PageFailure>,
}

impl RegionError {
    pub fn new(region: impl Into<String>, mut failures: Vec<PageFailure>) -> Self {
        failures.sort_by_key(|f| (f.queue, f.tier));
        Self {
            region: region.into(),
            failures,
        }
    }

    /// Region whose processing task ended without a result: no page of it
    /// can be trusted.
    pub fn aborted(region: impl Into<String>, message: impl fmt::Display) -> Self {
        let message = message.to_string();
        let failures = Queue::ALL
            .into_iter()
            .flat_map(|queue| Tier::ALL.into_iter().map(move |tier| (tier, queue)))
            .map(|(tier, queue)| PageFailure {
                tier,
                queue,
                cause: FetchError::Aborted(message.clone()),
            })
            .collect();
        Self::new(region, failures)
    }

    /// `true` if the given page is among the failures.
    pub fn failed(&self, tier: Tier, queue: Queue) -> bool {
        self.failures
            .iter()
            .any(|f| f.tier == tier && f.queue == queue)
    }
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of 6 league pages failed for region {}:",
            self.failures.len(),
            self.region
        )?;
        for failure in &self.failures {
            write!(f, "\n  {failure}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RegionError {}
