//! Extrusion along a committed path
//!
//! Turns a finished gesture into filament use, errors, and printed cells.

use std::collections::HashSet;

use super::level::{Cell, LevelSpec};
use super::state::{Path, PrintedState, RunState};
use crate::GridPos;
use crate::consts::OBSTACLE_ERROR;

/// Commit a path: extrude along every step after the anchor, apply the
/// stringing penalty, then truncate the path to its last point.
///
/// Returns the cooling time (seconds) added by this commit alone.
pub fn commit(
    path: &mut Path,
    level: &LevelSpec,
    printed: &mut PrintedState,
    run: &mut RunState,
) -> f64 {
    let points = path.points();
    let mut extra_time_s = 0.0;

    for (i, &pos) in points.iter().enumerate().skip(1) {
        let cell = level.cell(pos).unwrap_or(Cell::Obstacle);
        if cell == Cell::Obstacle {
            run.errors += OBSTACLE_ERROR;
            continue;
        }

        run.filament_used += 1;
        if cell == Cell::CoolingZone {
            extra_time_s += level.cooling_penalty_s;
        }
        printed.mark(pos);

        // Unreachable through the tracer; a hit here means a bad path slipped in
        if i >= 2 {
            let prev = points[i - 1];
            if prev.x != pos.x && prev.y != pos.y {
                log::warn!("Non-adjacent step {:?} -> {:?} in committed path", prev, pos);
                run.errors += 1;
            }
        }
    }

    let crossings = count_crossings(points);
    if crossings > 0 {
        let stringing = (crossings as f64 * level.stringing_penalty).round() as u32;
        run.errors += stringing;
    }

    log::debug!(
        "Committed {} steps: filament={}, errors={}, crossings={}, cooling={}s",
        points.len().saturating_sub(1),
        run.filament_used,
        run.errors,
        crossings,
        extra_time_s
    );

    path.reset_to_last();
    extra_time_s
}

/// Number of points that repeat an earlier point of the same path
pub fn count_crossings(points: &[GridPos]) -> usize {
    let mut seen = HashSet::with_capacity(points.len());
    points.iter().filter(|p| !seen.insert(**p)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::level_by_id;

    fn p(x: i32, y: i32) -> GridPos {
        GridPos::new(x, y)
    }

    fn setup() -> (LevelSpec, PrintedState, RunState) {
        let level = level_by_id(1);
        let printed = PrintedState::new(&level);
        (level, printed, RunState::new(0.0))
    }

    fn path_of(points: &[GridPos]) -> Path {
        let mut path = Path::new(points[0]);
        for &pt in &points[1..] {
            assert!(path.push_adjacent(pt));
        }
        path
    }

    #[test]
    fn test_straight_mid_row() {
        let (level, mut printed, mut run) = setup();
        let row: Vec<GridPos> = (1..7).map(|x| p(x, 4)).collect();
        let mut path = path_of(&row);

        let extra = commit(&mut path, &level, &mut printed, &mut run);

        assert_eq!(run.errors, 0);
        assert_eq!(run.filament_used, 5);
        assert_eq!(extra, 0.0);
        // Anchor is not printed by a commit
        assert!(!printed.is_printed(p(1, 4)));
        for x in 2..7 {
            assert!(printed.is_printed(p(x, 4)));
        }
        assert_eq!(path.points(), &[p(6, 4)]);
    }

    #[test]
    fn test_obstacle_costs_errors_not_filament() {
        let (level, mut printed, mut run) = setup();
        // (2, 2) is an obstacle
        let mut path = path_of(&[p(1, 2), p(2, 2), p(3, 2)]);

        commit(&mut path, &level, &mut printed, &mut run);

        assert_eq!(run.errors, 2);
        assert_eq!(run.filament_used, 1);
        assert_eq!(path.points(), &[p(3, 2)]);
    }

    #[test]
    fn test_cooling_zone_adds_time() {
        let (level, mut printed, mut run) = setup();
        // (1, 1) is the cooling zone on level 1
        let mut path = path_of(&[p(0, 1), p(1, 1), p(1, 0)]);

        let extra = commit(&mut path, &level, &mut printed, &mut run);

        assert_eq!(extra, level.cooling_penalty_s);
        assert_eq!(run.filament_used, 2);
    }

    #[test]
    fn test_cooling_time_is_per_commit() {
        let (level, mut printed, mut run) = setup();
        let mut path = path_of(&[p(0, 1), p(1, 1)]);
        assert_eq!(commit(&mut path, &level, &mut printed, &mut run), 2.0);

        let mut path = path_of(&[p(1, 1), p(1, 0)]);
        assert_eq!(commit(&mut path, &level, &mut printed, &mut run), 0.0);
    }

    #[test]
    fn test_revisit_adds_stringing() {
        let (level, mut printed, mut run) = setup();
        // Out and back: (2,4) is visited twice and so is (1,4)
        let mut path = path_of(&[p(1, 4), p(2, 4), p(1, 4), p(2, 4)]);

        commit(&mut path, &level, &mut printed, &mut run);

        // Two crossings, penalty 5 each; the straight back-and-forth has no corners
        assert_eq!(run.errors, 2 * 5);
        // Re-traversed cells still cost filament
        assert_eq!(run.filament_used, 3);
    }

    #[test]
    fn test_diagonal_jump_is_penalized() {
        let (level, mut printed, mut run) = setup();
        let mut path = Path::from_points_unchecked(vec![p(4, 0), p(4, 1), p(5, 2)]);

        commit(&mut path, &level, &mut printed, &mut run);

        assert_eq!(run.errors, 1);
        assert_eq!(run.filament_used, 2);
    }

    #[test]
    fn test_anchor_only_path_is_noop() {
        let (level, mut printed, mut run) = setup();
        let before = printed.clone();
        let mut path = Path::new(level.start);

        let extra = commit(&mut path, &level, &mut printed, &mut run);

        assert_eq!(extra, 0.0);
        assert_eq!(run, RunState::new(0.0));
        assert_eq!(printed, before);
        assert_eq!(path.points(), &[level.start]);
    }

    #[test]
    fn test_count_crossings() {
        assert_eq!(count_crossings(&[p(0, 0), p(1, 0), p(2, 0)]), 0);
        assert_eq!(count_crossings(&[p(0, 0), p(1, 0), p(0, 0), p(1, 0), p(0, 0)]), 3);
    }
}
