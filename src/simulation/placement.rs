//! Randomized placement: free cells, food categories and obstacle layouts.

use super::types::{Cell, FoodCategory};
use crate::core::constants::*;
use crate::core::error::PlacementError;
use rand::Rng;
use std::collections::HashSet;

/// Pick a uniformly random cell that is not in `occupied`.
///
/// Each attempt is an independent draw over the whole board. Gives up after
/// `FOOD_PLACEMENT_ATTEMPTS` draws.
pub fn random_free_cell<R: Rng>(
    occupied: &HashSet<Cell>,
    rng: &mut R,
) -> Result<Cell, PlacementError> {
    for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
        let cell = Cell::new(rng.gen_range(0..GRID_SIZE), rng.gen_range(0..GRID_SIZE));
        if !occupied.contains(&cell) {
            return Ok(cell);
        }
    }
    Err(PlacementError::Exhausted {
        attempts: FOOD_PLACEMENT_ATTEMPTS,
    })
}

/// Map a draw in `[0, 1)` to a food category by walking the probability table.
///
/// Float accumulation of the table stops just short of 1.0, so a draw at or
/// above the accumulated total falls back to `Normal`.
pub fn select_food_category(draw: f64) -> FoodCategory {
    let mut cumulative = 0.0;
    for category in FoodCategory::ALL {
        cumulative += category.probability();
        if draw < cumulative {
            return category;
        }
    }
    FoodCategory::Normal
}

pub fn random_food_category<R: Rng>(rng: &mut R) -> FoodCategory {
    select_food_category(rng.gen::<f64>())
}

/// Generate the obstacle layout for one run.
///
/// Targets 12..=15 obstacles on the board interior, each at least
/// `OBSTACLE_SPAWN_CLEARANCE` away from the spawn cell. A slot that cannot be
/// filled within `OBSTACLE_PLACEMENT_ATTEMPTS` draws is skipped.
pub fn generate_obstacles<R: Rng>(rng: &mut R) -> Vec<Cell> {
    let target = rng.gen_range(OBSTACLE_MIN_COUNT..=OBSTACLE_MAX_COUNT);
    let spawn = Cell::spawn();
    let mut obstacles: Vec<Cell> = Vec::with_capacity(target);

    for _ in 0..target {
        for _ in 0..OBSTACLE_PLACEMENT_ATTEMPTS {
            let candidate = Cell::new(
                rng.gen_range(1..GRID_SIZE - 1),
                rng.gen_range(1..GRID_SIZE - 1),
            );
            if candidate.manhattan_distance(spawn) < OBSTACLE_SPAWN_CLEARANCE {
                continue;
            }
            if !obstacles.contains(&candidate) {
                obstacles.push(candidate);
                break;
            }
        }
    }

    obstacles
}
