//! Score calculation
//!
//! Pure function of the run metrics; leaderboards rank by this value alone.

use crate::consts::*;

/// Compute a run's score, never below zero
pub fn compute(
    printed_count: usize,
    time_limit_s: u32,
    elapsed_s: i64,
    filament_limit: u32,
    filament_used: u32,
    errors: u32,
) -> u64 {
    let base = printed_count as i64 * SCORE_PER_PRINTED_CELL;
    let time_bonus = (time_limit_s as i64 - elapsed_s).max(0) * SCORE_PER_SECOND_LEFT;
    let filament_bonus =
        (filament_limit as i64 - filament_used as i64).max(0) * SCORE_PER_FILAMENT_LEFT;
    let penalty = errors as i64 * SCORE_PENALTY_PER_ERROR;

    (base + time_bonus + filament_bonus - penalty).max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_left_scores_zero() {
        assert_eq!(compute(0, 45, 45, 60, 60, 0), 0);
    }

    #[test]
    fn test_all_terms() {
        // 10*100 + 5*20 + 20*5 - 2*50
        assert_eq!(compute(10, 45, 40, 60, 40, 2), 1000 + 100 + 100 - 100);
    }

    #[test]
    fn test_overruns_do_not_go_negative() {
        // Over time and over filament contribute nothing rather than subtracting
        assert_eq!(compute(3, 20, 90, 10, 25, 0), 300);
    }

    #[test]
    fn test_clamped_at_zero() {
        assert_eq!(compute(1, 10, 10, 10, 10, 100), 0);
    }

    #[test]
    fn test_fewer_errors_rank_higher() {
        let clean = compute(20, 45, 30, 60, 30, 0);
        let sloppy = compute(20, 45, 30, 60, 30, 3);
        assert!(clean > sloppy);
    }
}
