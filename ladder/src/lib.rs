//! Ranked Ladder Cutoff Library
//!
//! Turns apex league pages (Challenger, Grandmaster, Master) into the LP
//! cutoffs that admit players to Challenger and Grandmaster.
//!
//! # Pipeline
//!
//! ```text
//! run_once
//!   └─ process_region × regions            (concurrent)
//!        ├─ LeagueSource::fetch_page × 6    (concurrent)
//!        ├─ build_ladder       per queue
//!        └─ calculate_cutoffs  per queue
//! ```
//!
//! Fetching is behind the [`LeagueSource`] trait; this crate performs no I/O
//! of its own.

pub mod cutoff;
pub mod error;
pub mod ladder;
pub mod region;
pub mod run;
pub mod source;
pub mod types;

pub use cutoff::calculate_cutoffs;
pub use error::{FetchError, PageFailure, RegionError};
pub use ladder::build_ladder;
pub use region::{process_region, SharedSource, PAGES_PER_REGION};
pub use run::{run_once, RegionConfig, RunReport};
pub use source::{Credential, LeagueSource};
pub use types::{
    CutoffFloors, CutoffPair, Queue, QueueSizes, RegionCutoffs, Snapshot, Tier, TierSizes,
    DEFAULT_CHALLENGER_FLOOR, DEFAULT_GRANDMASTER_FLOOR,
};
