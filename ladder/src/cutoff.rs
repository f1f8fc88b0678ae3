//! Rank → LP threshold derivation.

use crate::types::{CutoffFloors, CutoffPair, TierSizes};

/// Derive the Challenger and Grandmaster LP cutoffs from a descending ladder.
///
/// The Challenger cutoff is the LP of the last player admitted to
/// Challenger (rank `sizes.challenger`, 1-indexed); the Grandmaster cutoff is
/// the LP at rank `sizes.challenger + sizes.grandmaster`. A tier whose
/// boundary rank lies past the end of the ladder is not full and reports its
/// floor, as does a rank too large to represent. Neither cutoff is ever reported below its floor.
///
/// The two cutoffs are not clamped against each other.
pub fn calculate_cutoffs(ladder: &[i64], sizes: TierSizes, floors: CutoffFloors) -> CutoffPair {
    let challenger = lp_at_rank(ladder, sizes.challenger)
        .map_or(floors.challenger, |lp| lp.max(floors.challenger));

    let grandmaster = sizes
        .challenger
        .checked_add(sizes.grandmaster)
        .and_then(|rank| lp_at_rank(ladder, rank))
        .map_or(floors.grandmaster, |lp| lp.max(floors.grandmaster));

    CutoffPair {
        challenger,
        grandmaster,
    }
}

/// LP at a 1-indexed rank. Rank 0 has no player.
fn lp_at_rank(ladder: &[i64], rank: usize) -> Option<i64> {
    rank.checked_sub(1).and_then(|idx| ladder.get(idx)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floors() -> CutoffFloors {
        CutoffFloors {
            challenger: 500,
            grandmaster: 200,
        }
    }

    #[test]
    fn single_seat_tiers() {
        let cutoffs = calculate_cutoffs(&[800, 650, 400], TierSizes::new(1, 1), floors());
        assert_eq!(cutoffs.challenger, 800);
        assert_eq!(cutoffs.grandmaster, 650);
    }

    #[test]
    fn short_ladder_falls_back_to_floors() {
        let cutoffs = calculate_cutoffs(&[1500, 1400, 1300], TierSizes::new(5, 5), floors());
        assert_eq!(cutoffs.challenger, 500);
        assert_eq!(cutoffs.grandmaster, 200);
    }

    #[test]
    fn boundary_ranks_are_one_indexed() {
        let ladder = [900, 850, 700, 600, 550, 500];
        let cutoffs = calculate_cutoffs(&ladder, TierSizes::new(2, 3), floors());
        assert_eq!(cutoffs.challenger, 850);
        assert_eq!(cutoffs.grandmaster, 550);
    }

    #[test]
    fn low_lp_is_raised_to_floor() {
        let ladder = [480, 300, 150, 120];
        let cutoffs = calculate_cutoffs(&ladder, TierSizes::new(1, 2), floors());
        assert_eq!(cutoffs.challenger, 500);
        assert_eq!(cutoffs.grandmaster, 200);
    }

    #[test]
    fn challenger_full_grandmaster_not_full() {
        let ladder = [1000, 900, 800];
        let cutoffs = calculate_cutoffs(&ladder, TierSizes::new(3, 1), floors());
        assert_eq!(cutoffs.challenger, 800);
        assert_eq!(cutoffs.grandmaster, 200);
    }

    #[test]
    fn exact_length_counts_as_full() {
        let ladder = [1000, 900, 800, 700];
        let cutoffs = calculate_cutoffs(&ladder, TierSizes::new(2, 2), floors());
        assert_eq!(cutoffs.challenger, 900);
        assert_eq!(cutoffs.grandmaster, 700);
    }

    #[test]
    fn zero_sizes_report_floors() {
        let ladder = [1000, 900];
        let cutoffs = calculate_cutoffs(&ladder, TierSizes::new(0, 0), floors());
        assert_eq!(cutoffs.challenger, 500);
        assert_eq!(cutoffs.grandmaster, 200);
    }

    #[test]
    fn unrepresentable_rank_reports_floor() {
        let ladder = [900, 800];
        let cutoffs = calculate_cutoffs(&ladder, TierSizes::new(usize::MAX, 1), floors());
        assert_eq!(cutoffs.challenger, 500);
        assert_eq!(cutoffs.grandmaster, 200);

        let cutoffs = calculate_cutoffs(&ladder, TierSizes::new(1, usize::MAX), floors());
        assert_eq!(cutoffs.challenger, 900);
        assert_eq!(cutoffs.grandmaster, 200);
    }

    #[test]
    fn inverted_floors_are_not_clamped() {
        let inverted = CutoffFloors {
            challenger: 100,
            grandmaster: 300,
        };
        let cutoffs = calculate_cutoffs(&[], TierSizes::new(1, 1), inverted);
        assert_eq!(cutoffs.challenger, 100);
        assert_eq!(cutoffs.grandmaster, 300);
    }
}
