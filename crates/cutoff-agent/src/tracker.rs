//! Tick scheduler: run the cutoff pipeline on a fixed cadence and publish.
//!
//! Each tick is independent. Nothing carries over between ticks except the
//! files the publisher leaves on disk.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use ladder::{run_once, Credential, RegionCutoffs, SharedSource};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::{ConfigError, TrackerConfig};
use crate::publish::SnapshotPublisher;

/// What one tick did.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// 1-based tick counter.
    pub tick: u64,
    /// Regions present in the published snapshot.
    pub succeeded: Vec<String>,
    /// Regions left out of the snapshot.
    pub failed: Vec<String>,
    /// Files written; empty if publication failed.
    pub published: Vec<PathBuf>,
    pub elapsed: Duration,
}

/// Drives `run_once` and publication.
pub struct Tracker {
    source: SharedSource,
    config: TrackerConfig,
    credential: Credential,
    publisher: SnapshotPublisher,
    ticks: u64,
}

impl Tracker {
    /// Validates `config` first; a zero interval or an empty region table
    /// is rejected here rather than at the first tick.
    pub fn new(
        source: SharedSource,
        config: TrackerConfig,
        credential: Credential,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let publisher = SnapshotPublisher::new(config.output_dir.clone());
        Ok(Self {
            source,
            config,
            credential,
            publisher,
            ticks: 0,
        })
    }

    /// Number of ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run the pipeline once for every configured region and publish the
    /// regions that succeeded.
    ///
    /// Region and publication failures are logged, never returned.
    pub async fn tick(&mut self) -> TickSummary {
        let start = Instant::now();
        self.ticks += 1;

        let report = run_once(
            self.source.clone(),
            &self.config.regions,
            &self.credential,
            self.config.floors,
        )
        .await;

        for (region, cutoffs) in &report.snapshot {
            log_region_cutoffs(region, cutoffs);
        }
        for failure in &report.failures {
            error!(region = %failure.region, error = %failure, "region omitted from snapshot");
        }

        let published = match self.publisher.publish(&report.snapshot) {
            Ok(paths) => paths,
            Err(e) => {
                error!(error = %e, "failed to publish snapshot; next tick will retry");
                Vec::new()
            }
        };

        TickSummary {
            tick: self.ticks,
            succeeded: report.snapshot.keys().cloned().collect(),
            failed: report.failures.iter().map(|f| f.region.clone()).collect(),
            published,
            elapsed: start.elapsed(),
        }
    }

    /// Tick immediately, then once per interval until `cancel` fires.
    ///
    /// A tick in progress always completes before shutdown.
    pub async fn run(&mut self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            regions = self.config.regions.len(),
            interval_secs = self.config.interval.as_secs(),
            output = %self.publisher.root().display(),
            "cutoff tracker started"
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let summary = self.tick().await;
                    info!(
                        tick = summary.tick,
                        succeeded = summary.succeeded.len(),
                        failed = summary.failed.len(),
                        elapsed_ms = summary.elapsed.as_millis() as u64,
                        "tick finished"
                    );
                }
            }
        }

        info!(ticks = self.ticks, "cutoff tracker stopped");
    }
}

fn log_region_cutoffs(region: &str, cutoffs: &RegionCutoffs) {
    info!(
        region,
        solo_challenger = cutoffs.solo_duo.challenger,
        solo_grandmaster = cutoffs.solo_duo.grandmaster,
        flex_challenger = cutoffs.flex.challenger,
        flex_grandmaster = cutoffs.flex.grandmaster,
        "region cutoffs"
    );
}
