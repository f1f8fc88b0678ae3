//! Domain types shared by the ladder pipeline.
//!
//! | Type           | Meaning                                                  |
//! |----------------|----------------------------------------------------------|
//! | `Queue`        | Ranked queue a ladder is built for                       |
//! | `Tier`         | Apex league page that feeds the ladder                   |
//! | `TierSizes`    | Player counts admitted to Challenger / Grandmaster       |
//! | `QueueSizes`   | `TierSizes` for both queues of one region                |
//! | `CutoffFloors` | Minimum LP a cutoff may fall to                          |
//! | `CutoffPair`   | Derived LP thresholds for one queue                      |
//! | `RegionCutoffs`| `CutoffPair` for both queues of one region               |
//! | `Snapshot`     | Region id → `RegionCutoffs` for one run                  |

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest LP the Challenger cutoff is ever reported at.
pub const DEFAULT_CHALLENGER_FLOOR: i64 = 500;
/// Lowest LP the Grandmaster cutoff is ever reported at.
pub const DEFAULT_GRANDMASTER_FLOOR: i64 = 200;

// ── Queue / Tier ─────────────────────────────────────────────────────────────

/// Ranked queue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Queue {
    #[serde(rename = "RANKED_SOLO_5x5")]
    RankedSolo5x5,
    #[serde(rename = "RANKED_FLEX_SR")]
    RankedFlexSr,
}

impl Queue {
    pub const ALL: [Queue; 2] = [Queue::RankedSolo5x5, Queue::RankedFlexSr];

    /// Queue identifier as used in API paths and published snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RankedSolo5x5 => "RANKED_SOLO_5x5",
            Self::RankedFlexSr => "RANKED_FLEX_SR",
        }
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Apex league whose page contributes to a queue's ladder.
///
/// Ordered from the top of the ladder down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Challenger,
    Grandmaster,
    Master,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Challenger, Tier::Grandmaster, Tier::Master];

    /// League-V4 path segment for this tier's page.
    pub fn league_path(&self) -> &'static str {
        match self {
            Self::Challenger => "challengerleagues",
            Self::Grandmaster => "grandmasterleagues",
            Self::Master => "masterleagues",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Challenger => write!(f, "challenger"),
            Self::Grandmaster => write!(f, "grandmaster"),
            Self::Master => write!(f, "master"),
        }
    }
}

// ── Configuration values ─────────────────────────────────────────────────────

/// Number of players admitted to each apex tier for one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierSizes {
    pub challenger: usize,
    pub grandmaster: usize,
}

impl TierSizes {
    pub fn new(challenger: usize, grandmaster: usize) -> Self {
        Self {
            challenger,
            grandmaster,
        }
    }
}

/// Tier sizes for both queues of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueueSizes {
    pub solo_duo: TierSizes,
    pub flex: TierSizes,
}

impl QueueSizes {
    pub fn for_queue(&self, queue: Queue) -> TierSizes {
        match queue {
            Queue::RankedSolo5x5 => self.solo_duo,
            Queue::RankedFlexSr => self.flex,
        }
    }
}

/// Minimum reported LP for each cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutoffFloors {
    pub challenger: i64,
    pub grandmaster: i64,
}

impl Default for CutoffFloors {
    fn default() -> Self {
        Self {
            challenger: DEFAULT_CHALLENGER_FLOOR,
            grandmaster: DEFAULT_GRANDMASTER_FLOOR,
        }
    }
}

// ── Results ──────────────────────────────────────────────────────────────────

/// LP thresholds for one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffPair {
    pub challenger: i64,
    pub grandmaster: i64,
}

/// Cutoffs for both queues of one region, in published form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCutoffs {
    #[serde(rename = "RANKED_SOLO_5x5")]
    pub solo_duo: CutoffPair,
    #[serde(rename = "RANKED_FLEX_SR")]
    pub flex: CutoffPair,
}

impl RegionCutoffs {
    pub fn for_queue(&self, queue: Queue) -> CutoffPair {
        match queue {
            Queue::RankedSolo5x5 => self.solo_duo,
            Queue::RankedFlexSr => self.flex,
        }
    }
}

/// Region id → cutoffs for every region that succeeded in a run.
///
/// Serializes as a JSON object keyed by region id. A region absent from the
/// map had no data this run; it never means a zero cutoff.
pub type Snapshot = BTreeMap<String, RegionCutoffs>;
