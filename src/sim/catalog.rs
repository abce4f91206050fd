//! Level catalog and the date-seeded daily level

use chrono::{Datelike, NaiveDate};

use super::level::{Cell, LevelSpec, build_template};
use super::rng::{PcgRandomSource, SeededRandomSource};
use crate::consts::*;

/// The fixed, hand-tuned levels (ids 1-12), easiest first
pub fn levels() -> Vec<LevelSpec> {
    vec![
        build_template(1, 8, 8, 60, 45, 2.0, 5.0, "First Layer"),
        build_template(2, 10, 10, 70, 45, 2.0, 5.0, "Zig-Zag Test"),
        build_template(3, 10, 10, 68, 40, 3.0, 8.0, "Short Bridges"),
        build_template(4, 12, 12, 80, 40, 3.0, 10.0, "Active Supports"),
        build_template(5, 12, 12, 78, 35, 4.0, 12.0, "Barrier Mesh"),
        build_template(6, 14, 12, 88, 35, 4.0, 14.0, "Double Return"),
        build_template(7, 14, 14, 95, 30, 5.0, 16.0, "Warm Chamber"),
        build_template(8, 14, 14, 90, 28, 6.0, 18.0, "Overhang Test"),
        build_template(9, 16, 14, 105, 26, 6.0, 20.0, "Fine Density"),
        build_template(10, 16, 16, 110, 24, 7.0, 22.0, "Vibrations"),
        build_template(11, 16, 16, 115, 22, 7.0, 24.0, "Long Strokes"),
        build_template(12, 18, 16, 125, 20, 8.0, 26.0, "Layer Close"),
    ]
}

/// Catalog level by id, falling back to the first level
pub fn level_by_id(id: u32) -> LevelSpec {
    let mut all = levels();
    match all.iter().position(|l| l.id == id) {
        Some(i) => all.swap_remove(i),
        None => {
            log::warn!("Unknown level {}, falling back to level 1", id);
            all.swap_remove(0)
        }
    }
}

/// `year-month-day` without zero padding, e.g. `2025-3-7`
pub fn date_key(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

/// Seed string shared by every player on a given UTC day
pub fn daily_seed(date: NaiveDate) -> String {
    format!("daily-{}", date_key(date))
}

/// Generate the daily level for a UTC calendar date
pub fn generate_daily_level(date: NaiveDate) -> LevelSpec {
    let mut rng = PcgRandomSource::from_seed_str(&daily_seed(date));
    generate_daily_level_with(date, &mut rng)
}

/// Daily level generation against an arbitrary random source
pub fn generate_daily_level_with(date: NaiveDate, rng: &mut impl SeededRandomSource) -> LevelSpec {
    let mut catalog = levels();
    let pool = catalog.len().min(DAILY_BASE_POOL);
    let pick = ((rng.next_f64() * pool as f64).floor() as usize).min(pool - 1);
    let mut level = catalog.swap_remove(pick);

    // The second draw only happens when the first mutation did not fire
    for cell in level.grid.iter_mut() {
        if rng.next_f64() < DAILY_TARGET_CHANCE && *cell == Cell::Empty {
            *cell = Cell::Target;
        } else if rng.next_f64() < DAILY_COOLING_CHANCE && *cell == Cell::Target {
            *cell = Cell::CoolingZone;
        }
    }

    let key = date_key(date);
    log::info!("Daily level {} based on level {}", key, level.id);

    level.id = DAILY_LEVEL_ID;
    level.name = format!("Daily {}", key);
    level
}
