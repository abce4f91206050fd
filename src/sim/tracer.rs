//! Path tracing from pointer input
//!
//! Idle -> Tracing on pointer down, back to Idle on pointer up (which
//! commits the path). Invalid moves are dropped silently.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::completion::{self, Outcome};
use super::extrude;
use super::state::{Path, Run};
use crate::GridPos;
use crate::consts::DEFAULT_TILE_SIZE;

/// Tracer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TracerPhase {
    /// Path holds only its anchor point
    #[default]
    Idle,
    /// Pointer held, cells are being appended
    Tracing,
}

/// Turns pointer positions into a validated path
#[derive(Debug, Clone)]
pub struct PathTracer {
    path: Path,
    phase: TracerPhase,
    tile_size: f32,
}

impl PathTracer {
    pub fn new(anchor: GridPos, tile_size: f32) -> Self {
        Self {
            path: Path::new(anchor),
            phase: TracerPhase::Idle,
            tile_size: if tile_size > 0.0 { tile_size } else { DEFAULT_TILE_SIZE },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn phase(&self) -> TracerPhase {
        self.phase
    }

    /// Screen position to grid tile, `None` outside the level
    pub fn pointer_to_tile(&self, run: &Run, pointer: Vec2) -> Option<GridPos> {
        let tile = (pointer / self.tile_size).floor();
        let pos = GridPos::new(tile.x as i32, tile.y as i32);
        run.level.in_bounds(pos).then_some(pos)
    }

    pub fn pointer_down(&mut self, run: &mut Run, pointer: Vec2) {
        if run.state.completed {
            return;
        }
        self.phase = TracerPhase::Tracing;
        self.extend(run, pointer);
    }

    pub fn pointer_move(&mut self, run: &mut Run, pointer: Vec2) {
        if run.state.completed || self.phase != TracerPhase::Tracing {
            return;
        }
        self.extend(run, pointer);
    }

    /// Commit the traced path and check for the end of the run
    pub fn pointer_up(&mut self, run: &mut Run, now_ms: f64) -> Option<Outcome> {
        self.phase = TracerPhase::Idle;
        if run.state.completed {
            return None;
        }

        let extra_time_s = extrude::commit(&mut self.path, &run.level, &mut run.printed, &mut run.state);
        completion::evaluate(&run.level, &run.printed, &mut run.state, now_ms, extra_time_s)
    }

    /// Try to append the tile under the pointer, counting a corner as an error
    fn extend(&mut self, run: &mut Run, pointer: Vec2) {
        let Some(tile) = self.pointer_to_tile(run, pointer) else {
            log::trace!("Pointer {:?} outside grid", pointer);
            return;
        };
        if run.level.is_blocked(tile) {
            log::trace!("Tile {:?} is blocked", tile);
            return;
        }

        let last = self.path.last();
        let before_last = self.path.before_last();
        if !self.path.push_adjacent(tile) {
            return;
        }

        if let Some(before_last) = before_last {
            let d1 = last - before_last;
            let d2 = tile - last;
            if (d1.x != 0 && d2.y != 0) || (d1.y != 0 && d2.x != 0) {
                run.state.errors += 1;
            }
        }
    }
}
