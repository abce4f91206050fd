//! Level grid and template construction

use serde::{Deserialize, Serialize};

use crate::consts::CELLS_PER_COOLING_ZONE;
use crate::{GridPos, idx};

/// Contents of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    #[default]
    Empty,
    /// Must be printed to clear the level
    Target,
    /// Support/wall, cannot be traced onto
    Obstacle,
    /// Printable, but costs extra time to cool
    CoolingZone,
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        match cell {
            Cell::Empty => 0,
            Cell::Target => 1,
            Cell::Obstacle => 2,
            Cell::CoolingZone => 3,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Target),
            2 => Ok(Cell::Obstacle),
            3 => Ok(Cell::CoolingZone),
            other => Err(format!("invalid cell code {other}")),
        }
    }
}

/// An immutable level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub id: u32,
    pub width: u32,
    pub height: u32,
    /// Row-major, `width * height` cells
    pub grid: Vec<Cell>,
    pub start: GridPos,
    pub filament_limit: u32,
    pub time_limit_s: u32,
    /// Seconds added per cooling-zone step
    pub cooling_penalty_s: f64,
    /// Errors added per revisited cell within one commit
    pub stringing_penalty: f64,
    pub name: String,
}

impl LevelSpec {
    /// Whether a coordinate lies inside the grid
    #[inline]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Cell at a coordinate, `None` when out of bounds
    pub fn cell(&self, pos: GridPos) -> Option<Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.grid.get(idx(pos, self.width)).copied()
    }

    pub fn is_blocked(&self, pos: GridPos) -> bool {
        self.cell(pos) == Some(Cell::Obstacle)
    }

    pub fn target_count(&self) -> usize {
        self.grid.iter().filter(|c| **c == Cell::Target).count()
    }
}

/// Build a level template: a cross of targets, scattered supports, and a
/// fixed pattern of cooling zones.
#[allow(clippy::too_many_arguments)]
pub fn build_template(
    id: u32,
    width: u32,
    height: u32,
    filament_limit: u32,
    time_limit_s: u32,
    cooling_penalty_s: f64,
    stringing_penalty: f64,
    name: &str,
) -> LevelSpec {
    let (w, h) = (width as i32, height as i32);
    let mut grid = vec![Cell::Empty; (width * height) as usize];
    let mut set = |x: i32, y: i32, cell: Cell| {
        if x >= 0 && y >= 0 && x < w && y < h {
            grid[idx(GridPos::new(x, y), width)] = cell;
        }
    };

    // Target cross, borders excluded
    for x in 1..w - 1 {
        set(x, h / 2, Cell::Target);
    }
    for y in 1..h - 1 {
        set(w / 2, y, Cell::Target);
    }

    // Supports along a column and a row
    for y in (2..h - 2).step_by(3) {
        set(2, y, Cell::Obstacle);
    }
    for x in (3..w - 3).step_by(4) {
        set(x, 3, Cell::Obstacle);
    }

    // Cooling zones
    let cooling = (width * height / CELLS_PER_COOLING_ZONE) as i32;
    if w > 2 && h > 2 {
        for i in 0..cooling {
            let x = 1 + (i * 3) % (w - 2);
            let y = 1 + (i * 5) % (h - 2);
            set(x, y, Cell::CoolingZone);
        }
    }

    let start = pick_start(&grid, width);

    LevelSpec {
        id,
        width,
        height,
        grid,
        start,
        filament_limit,
        time_limit_s,
        cooling_penalty_s,
        stringing_penalty,
        name: name.to_string(),
    }
}

/// (1, 1) unless that is blocked or missing, then the first open cell.
fn pick_start(grid: &[Cell], width: u32) -> GridPos {
    let preferred = GridPos::new(1, 1);
    if width > 1 && grid.get(idx(preferred, width)).is_some_and(|c| *c != Cell::Obstacle) {
        return preferred;
    }
    grid.iter()
        .position(|c| *c != Cell::Obstacle)
        .map(|i| GridPos::new((i as u32 % width) as i32, (i as u32 / width) as i32))
        .unwrap_or(GridPos::ZERO)
}
