//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through event timestamps
//! - Seeded RNG only
//! - No global state; every run is an explicit `Session`
//! - No rendering or platform dependencies

pub mod catalog;
pub mod completion;
pub mod extrude;
pub mod level;
pub mod rng;
pub mod score;
pub mod session;
pub mod state;
pub mod tracer;

pub use catalog::{daily_seed, generate_daily_level, level_by_id, levels};
pub use completion::{Outcome, evaluate};
pub use extrude::commit;
pub use level::{Cell, LevelSpec, build_template};
pub use rng::{PcgRandomSource, SeededRandomSource};
pub use session::{FrameView, InputEvent, Session};
pub use state::{Path, PrintedState, Run, RunState};
pub use tracer::{PathTracer, TracerPhase};

#[cfg(test)]
mod proptests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::manhattan;

    const TILE: f32 = 28.0;

    fn tile_center((x, y): (i32, i32)) -> Vec2 {
        Vec2::new((x as f32 + 0.5) * TILE, (y as f32 + 0.5) * TILE)
    }

    fn gesture() -> impl Strategy<Value = Vec<(i32, i32)>> {
        prop::collection::vec((-1i32..10, -1i32..10), 1..40)
    }

    proptest! {
        #[test]
        fn traced_paths_stay_adjacent_and_clear_of_obstacles(
            level_id in 1u32..=12,
            tiles in gesture(),
        ) {
            let mut run = Run::new(level_by_id(level_id), 0.0);
            let mut tracer = PathTracer::new(run.level.start, TILE);

            tracer.pointer_down(&mut run, tile_center(tiles[0]));
            for &t in &tiles[1..] {
                tracer.pointer_move(&mut run, tile_center(t));
            }

            let points = tracer.path().points();
            for pair in points.windows(2) {
                prop_assert_eq!(manhattan(pair[0], pair[1]), 1);
                prop_assert!(!run.level.is_blocked(pair[1]));
            }
        }

        #[test]
        fn commits_account_filament_and_keep_printed_monotonic(
            gestures in prop::collection::vec(gesture(), 1..6),
        ) {
            let mut run = Run::new(level_by_id(4), 0.0);
            let mut tracer = PathTracer::new(run.level.start, TILE);

            for tiles in gestures {
                tracer.pointer_down(&mut run, tile_center(tiles[0]));
                for &t in &tiles[1..] {
                    tracer.pointer_move(&mut run, tile_center(t));
                }

                let steps = tracer.path().len() as u32 - 1;
                let filament_before = run.state.filament_used;
                let printed_before = run.printed.as_slice().to_vec();
                let was_completed = run.state.completed;

                tracer.pointer_up(&mut run, 1_000.0);

                prop_assert_eq!(tracer.path().len(), 1);
                if !was_completed {
                    prop_assert_eq!(run.state.filament_used, filament_before + steps);
                }
                for (before, after) in printed_before.iter().zip(run.printed.as_slice()) {
                    prop_assert!(!*before || *after);
                }
            }
        }

        #[test]
        fn daily_level_is_deterministic(days in 0i64..3650) {
            let date = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
                + chrono::Duration::days(days);
            let a = generate_daily_level(date);
            let b = generate_daily_level(date);
            prop_assert_eq!(&a.grid, &b.grid);
            prop_assert_eq!(a.grid.len(), (a.width * a.height) as usize);
            prop_assert!(a.cell(a.start) != Some(Cell::Obstacle));
        }
    }
}
