//! Ranked LP cutoff tracker.
//!
//! Wires the `ladder` pipeline to the Riot League-V4 API and a static JSON
//! file tree:
//!
//! | Module    | Purpose                                              |
//! |-----------|------------------------------------------------------|
//! | `config`  | Region table, credential, env/CLI knobs              |
//! | `riot`    | `LeagueSource` over HTTP                             |
//! | `publish` | Current + dated JSON snapshots                       |
//! | `tracker` | Tick loop: `run_once` → log → publish                |

pub mod config;
pub mod publish;
pub mod riot;
pub mod tracker;

pub use config::{ConfigError, TrackerConfig};
pub use publish::{PublishError, SnapshotPublisher};
pub use riot::RiotClient;
pub use tracker::{TickSummary, Tracker};
