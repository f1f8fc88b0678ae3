//! Ladder construction: merge the three apex league pages of a queue.

/// Merge Challenger, Grandmaster and Master pages into one ladder sorted by
/// LP, highest first.
///
/// Entries are not deduplicated. The sort is stable, so players with equal
/// LP keep page order (Challenger before Grandmaster before Master) and their
/// order within a page. Rank lookups at a tied boundary are therefore
/// reproducible for identical API responses.
pub fn build_ladder(challenger: &[i64], grandmaster: &[i64], master: &[i64]) -> Vec<i64> {
    let mut ladder = Vec::with_capacity(challenger.len() + grandmaster.len() + master.len());
    ladder.extend_from_slice(challenger);
    ladder.extend_from_slice(grandmaster);
    ladder.extend_from_slice(master);
    ladder.sort_by(|a, b| b.cmp(a));
    ladder
}
