//! Run state and core simulation types
//!
//! Everything a single attempt at a level owns lives here. A new `Run` is
//! created per level start or retry; nothing is shared between runs.

use serde::{Deserialize, Serialize};

use super::level::{Cell, LevelSpec};
use crate::{GridPos, idx, manhattan};

/// A traced path of orthogonally adjacent grid cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    points: Vec<GridPos>,
}

impl Path {
    /// A path holding a single anchor point
    pub fn new(anchor: GridPos) -> Self {
        Self {
            points: vec![anchor],
        }
    }

    pub fn points(&self) -> &[GridPos] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last point of the path (the anchor for the next step)
    pub fn last(&self) -> GridPos {
        // Never empty: created with an anchor, truncation keeps one point
        self.points[self.points.len() - 1]
    }

    /// Second-to-last point, if the path has at least one step
    pub fn before_last(&self) -> Option<GridPos> {
        self.points.len().checked_sub(2).map(|i| self.points[i])
    }

    /// Append a point one step away from the last one.
    ///
    /// Returns false (and leaves the path untouched) for any other distance.
    pub fn push_adjacent(&mut self, pos: GridPos) -> bool {
        if manhattan(self.last(), pos) != 1 {
            return false;
        }
        self.points.push(pos);
        true
    }

    /// Keep only the last point
    pub fn reset_to_last(&mut self) {
        let last = self.last();
        self.points.clear();
        self.points.push(last);
    }

    #[cfg(test)]
    pub(crate) fn from_points_unchecked(points: Vec<GridPos>) -> Self {
        Self { points }
    }
}

/// Which cells have been printed. Only targets start unprinted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintedState {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl PrintedState {
    pub fn new(level: &LevelSpec) -> Self {
        Self {
            width: level.width,
            height: level.height,
            cells: level.grid.iter().map(|c| *c != Cell::Target).collect(),
        }
    }

    /// Flat index of an on-grid cell, None for anything outside the grid
    fn index(&self, pos: GridPos) -> Option<usize> {
        let on_grid = pos.x >= 0
            && pos.y >= 0
            && (pos.x as u32) < self.width
            && (pos.y as u32) < self.height;
        on_grid.then(|| idx(pos, self.width))
    }

    /// Mark a cell printed. Never reverts; off-grid cells are ignored.
    pub fn mark(&mut self, pos: GridPos) {
        if let Some(cell) = self.index(pos).and_then(|i| self.cells.get_mut(i)) {
            *cell = true;
        }
    }

    pub fn is_printed(&self, pos: GridPos) -> bool {
        self.index(pos)
            .and_then(|i| self.cells.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// Cells still waiting to be printed
    pub fn remaining(&self) -> usize {
        self.cells.iter().filter(|p| !**p).count()
    }

    /// Cells marked printed, including cells that never needed printing
    pub fn printed_count(&self) -> usize {
        self.cells.iter().filter(|p| **p).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }
}

/// Counters for a single run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub filament_used: u32,
    pub errors: u32,
    /// Timestamp (ms) when the run was created
    pub start_time_ms: f64,
    /// Set exactly once, when the run ends
    pub completed: bool,
}

impl RunState {
    pub fn new(start_time_ms: f64) -> Self {
        Self {
            filament_used: 0,
            errors: 0,
            start_time_ms,
            completed: false,
        }
    }
}

/// Everything one attempt at a level owns
#[derive(Debug, Clone)]
pub struct Run {
    pub level: LevelSpec,
    pub printed: PrintedState,
    pub state: RunState,
}

impl Run {
    pub fn new(level: LevelSpec, start_time_ms: f64) -> Self {
        log::info!(
            "Starting level {} \"{}\" ({}x{}, {} targets)",
            level.id,
            level.name,
            level.width,
            level.height,
            level.target_count()
        );
        Self {
            printed: PrintedState::new(&level),
            state: RunState::new(start_time_ms),
            level,
        }
    }
}
