//! End-of-run detection
//!
//! Runs once per commit. A run completes exactly once, on the first commit
//! that clears every target or exhausts time or filament.

use serde::{Deserialize, Serialize};

use super::level::LevelSpec;
use super::score;
use super::state::{PrintedState, RunState};

/// Result of a finished run, handed to submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub score: u64,
    pub duration_s: i64,
    pub errors: u32,
    pub win: bool,
}

/// Check whether the run has ended.
///
/// `extra_time_s` is the cooling time produced by the commit that triggered
/// this check; cooling from earlier commits is not carried over.
pub fn evaluate(
    level: &LevelSpec,
    printed: &PrintedState,
    run: &mut RunState,
    now_ms: f64,
    extra_time_s: f64,
) -> Option<Outcome> {
    if run.completed {
        return None;
    }

    let clock_s = ((now_ms - run.start_time_ms) / 1000.0).floor() as i64;
    let elapsed_s = clock_s + extra_time_s.floor() as i64;
    let time_left = (level.time_limit_s as i64 - elapsed_s).max(0);
    let filament_left = level.filament_limit.saturating_sub(run.filament_used);
    let remaining_targets = printed.remaining();

    if remaining_targets > 0 && time_left > 0 && filament_left > 0 {
        return None;
    }

    run.completed = true;
    let win = remaining_targets == 0;
    let score = score::compute(
        printed.printed_count(),
        level.time_limit_s,
        elapsed_s,
        level.filament_limit,
        run.filament_used,
        run.errors,
    );

    log::info!(
        "Level {} {}: score={}, elapsed={}s, filament={}/{}, errors={}",
        level.id,
        if win { "cleared" } else { "failed" },
        score,
        elapsed_s,
        run.filament_used,
        level.filament_limit,
        run.errors
    );

    Some(Outcome {
        score,
        duration_s: elapsed_s,
        errors: run.errors,
        win,
    })
}
