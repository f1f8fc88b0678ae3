//! Run Orchestrator: one Region Processor per configured region.
//!
//! Regions run concurrently and independently; a failed region is reported
//! in `RunReport::failures` and left out of the snapshot. The snapshot is
//! assembled only after every region task has finished.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::error::RegionError;
use crate::region::{process_region, SharedSource};
use crate::source::Credential;
use crate::types::{CutoffFloors, QueueSizes, RegionCutoffs, Snapshot};

/// Region id → tier sizes for both queues.
pub type RegionConfig = BTreeMap<String, QueueSizes>;

/// Outcome of one run across all configured regions.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Cutoffs of every region that succeeded.
    pub snapshot: Snapshot,
    /// Regions that failed, sorted by region id.
    pub failures: Vec<RegionError>,
}

impl RunReport {
    /// `true` when every configured region produced cutoffs.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Process every region in `regions` concurrently and collect the results.
pub async fn run_once(
    source: SharedSource,
    regions: &RegionConfig,
    credential: &Credential,
    floors: CutoffFloors,
) -> RunReport {
    let start = Instant::now();
    let mut join_set: JoinSet<(String, Result<RegionCutoffs, RegionError>)> = JoinSet::new();

    for (region, sizes) in regions {
        let source = source.clone();
        let region = region.clone();
        let sizes = *sizes;
        let credential = credential.clone();

        join_set.spawn(async move {
            let result = process_region(source, &region, sizes, &credential, floors).await;
            (region, result)
        });
    }

    let mut report = RunReport::default();
    let mut pending: BTreeSet<&str> = regions.keys().map(String::as_str).collect();
    let mut task_errors = Vec::new();

    while let Some(res) = join_set.join_next().await {
        match res {
            Ok((region, outcome)) => {
                pending.remove(region.as_str());
                match outcome {
                    Ok(cutoffs) => {
                        debug!(region = %region, "region processed");
                        report.snapshot.insert(region, cutoffs);
                    }
                    Err(e) => report.failures.push(e),
                }
            }
            Err(e) => task_errors.push(e.to_string()),
        }
    }

    if !task_errors.is_empty() {
        let message = task_errors.join("; ");
        for region in pending {
            report.failures.push(RegionError::aborted(region, &message));
        }
    }

    report.failures.sort_by(|a, b| a.region.cmp(&b.region));

    info!(
        regions = regions.len(),
        succeeded = report.snapshot.len(),
        failed = report.failures.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "cutoff run complete"
    );

    report
}
