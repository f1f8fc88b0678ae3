//! The page-fetch seam between the ladder pipeline and the ranked API.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::{Queue, Tier};

/// API credential attached to every page request.
///
/// Cheap to clone and share across fetch tasks. `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(Arc<str>);

impl Credential {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Source of apex league pages.
///
/// One call fetches one page for a (region, tier, queue) and returns the LP
/// of every entry on it. Implementations make a single attempt; no retry.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    async fn fetch_page(
        &self,
        region: &str,
        tier: Tier,
        queue: Queue,
        credential: &Credential,
    ) -> Result<Vec<i64>, FetchError>;
}
