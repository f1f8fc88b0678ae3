//! Region Processor: six-page fan-out/fan-in for one region.
//!
//! ```text
//! Fan-out
//!   JoinSet::spawn(fetch_page(tier, queue)) × {challenger, grandmaster, master}
//!                                           × {RANKED_SOLO_5x5, RANKED_FLEX_SR}
//!
//! Barrier
//!   join_next() until all six tasks have reported
//!
//! Fan-in
//!   any failure   → RegionError listing every failed page
//!   all succeeded → build_ladder + calculate_cutoffs per queue
//! ```
//!
//! ## Failure policy
//!
//! All-or-nothing. A region never reports cutoffs for one queue while the
//! other queue's pages failed, and sibling fetches are never cancelled early.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::cutoff::calculate_cutoffs;
use crate::error::{FetchError, PageFailure, RegionError};
use crate::ladder::build_ladder;
use crate::source::{Credential, LeagueSource};
use crate::types::{CutoffFloors, CutoffPair, Queue, QueueSizes, RegionCutoffs, Tier};

/// League source shared by every fetch task of a run.
pub type SharedSource = Arc<dyn LeagueSource>;

/// Pages fetched per region: every tier for every queue.
pub const PAGES_PER_REGION: usize = Tier::ALL.len() * Queue::ALL.len();

/// Result of one spawned page fetch, tagged with what it fetched.
struct PageOutcome {
    tier: Tier,
    queue: Queue,
    result: Result<Vec<i64>, FetchError>,
}

/// Fetch all six league pages of `region` concurrently and derive its cutoffs.
pub async fn process_region(
    source: SharedSource,
    region: &str,
    sizes: QueueSizes,
    credential: &Credential,
    floors: CutoffFloors,
) -> Result<RegionCutoffs, RegionError> {
    let mut join_set: JoinSet<PageOutcome> = JoinSet::new();

    for queue in Queue::ALL {
        for tier in Tier::ALL {
            let source = source.clone();
            let region = region.to_string();
            let credential = credential.clone();

            join_set.spawn(async move {
                let result = source.fetch_page(&region, tier, queue, &credential).await;
                PageOutcome {
                    tier,
                    queue,
                    result,
                }
            });
        }
    }

    let mut pages: HashMap<(Tier, Queue), Vec<i64>> = HashMap::with_capacity(PAGES_PER_REGION);
    let mut failures = Vec::new();
    let mut task_errors = Vec::new();

    while let Some(res) = join_set.join_next().await {
        match res {
            Ok(PageOutcome {
                tier,
                queue,
                result: Ok(entries),
            }) => {
                debug!(region, %tier, %queue, entries = entries.len(), "league page fetched");
                pages.insert((tier, queue), entries);
            }
            Ok(PageOutcome {
                tier,
                queue,
                result: Err(cause),
            }) => {
                warn!(region, %tier, %queue, error = %cause, "league page fetch failed");
                failures.push(PageFailure { tier, queue, cause });
            }
            Err(e) => {
                warn!(region, error = %e, "league page task did not complete");
                task_errors.push(e.to_string());
            }
        }
    }

    // A task that panicked reported nothing; attribute it to every page left
    // without an outcome.
    if !task_errors.is_empty() {
        let message = task_errors.join("; ");
        for queue in Queue::ALL {
            for tier in Tier::ALL {
                let reported = pages.contains_key(&(tier, queue))
                    || failures.iter().any(|f| f.tier == tier && f.queue == queue);
                if !reported {
                    failures.push(PageFailure {
                        tier,
                        queue,
                        cause: FetchError::Aborted(message.clone()),
                    });
                }
            }
        }
    }

    if !failures.is_empty() {
        return Err(RegionError::new(region, failures));
    }

    let mut cutoffs_for = |queue: Queue| -> CutoffPair {
        let mut take = |tier: Tier| pages.remove(&(tier, queue)).unwrap_or_default();
        let challenger = take(Tier::Challenger);
        let grandmaster = take(Tier::Grandmaster);
        let master = take(Tier::Master);

        let ladder = build_ladder(&challenger, &grandmaster, &master);
        let pair = calculate_cutoffs(&ladder, sizes.for_queue(queue), floors);
        if pair.challenger < pair.grandmaster {
            debug!(
                region,
                %queue,
                challenger = pair.challenger,
                grandmaster = pair.grandmaster,
                "challenger cutoff below grandmaster cutoff"
            );
        }
        pair
    };

    Ok(RegionCutoffs {
        solo_duo: cutoffs_for(Queue::RankedSolo5x5),
        flex: cutoffs_for(Queue::RankedFlexSr),
    })
}
