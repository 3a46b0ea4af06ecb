//! The snake board simulation: types, random placement and the step rules.

pub mod logic;
pub mod placement;
pub mod types;

pub use logic::{BoardSnapshot, SimulationEngine, StepResult};
pub use placement::{generate_obstacles, random_food_category, random_free_cell, select_food_category};
pub use types::{ActiveEffect, Cell, Collision, Difficulty, Direction, FoodCategory, FoodItem};
