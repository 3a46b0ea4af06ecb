//! Snake board data structures.
//!
//! Everything here is plain data: cells, directions, food categories and the
//! difficulty table. The per-tick rules live in `logic.rs`.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// A cell on the square board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The spawn cell, also the reference point for obstacle clearance.
    pub const fn spawn() -> Self {
        Self::new(SPAWN_X, SPAWN_Y)
    }

    /// The neighbouring cell one step in `direction`. May lie off the board.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan_distance(self, other: Cell) -> i16 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

/// Cardinal direction for snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the (dx, dy) delta for this direction. Up is towards y = 0.
    pub fn delta(self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Kind of food on the board. Table order is the selection walk order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodCategory {
    Normal,
    Speed,
    Slow,
    Bonus,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 4] = [
        FoodCategory::Normal,
        FoodCategory::Speed,
        FoodCategory::Slow,
        FoodCategory::Bonus,
    ];

    pub fn score(self) -> u32 {
        match self {
            Self::Normal => 10,
            Self::Speed => 20,
            Self::Slow => 15,
            Self::Bonus => 50,
        }
    }

    /// Probability of this category being picked for a new food item.
    pub fn probability(self) -> f64 {
        match self {
            Self::Normal => 0.7,
            Self::Speed | Self::Slow | Self::Bonus => 0.1,
        }
    }

    /// How long the timed effect of this category lasts, if it has one.
    pub fn effect_duration_ms(self) -> Option<u64> {
        match self {
            Self::Normal => None,
            Self::Speed => Some(SPEED_EFFECT_MS),
            Self::Slow => Some(SLOW_EFFECT_MS),
            Self::Bonus => Some(BONUS_BANNER_MS),
        }
    }

    /// Tick interval while this category's effect is active.
    pub fn effective_interval_ms(self, base_ms: u64) -> u64 {
        match self {
            Self::Speed => (base_ms as f64 * SPEED_MULTIPLIER).floor() as u64,
            Self::Slow => (base_ms as f64 * SLOW_MULTIPLIER).floor() as u64,
            Self::Normal | Self::Bonus => base_ms,
        }
    }

    /// Banner shown while the effect is active.
    pub fn banner(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Speed => Some("Speed up"),
            Self::Slow => Some("Slow down"),
            Self::Bonus => Some("+50"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Speed => "Speed",
            Self::Slow => "Slow",
            Self::Bonus => "Bonus",
        }
    }
}

/// The single food item on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodItem {
    pub cell: Cell,
    pub category: FoodCategory,
}

/// Difficulty selects the base tick interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Base movement interval in milliseconds (lower = faster).
    pub fn base_interval_ms(self) -> u64 {
        match self {
            Self::Easy => EASY_INTERVAL_MS,
            Self::Normal => NORMAL_INTERVAL_MS,
            Self::Hard => HARD_INTERVAL_MS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }

    /// Next entry in `ALL`, wrapping around. Used by the menu selector.
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Normal,
            Self::Normal => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::Easy => Self::Hard,
            Self::Normal => Self::Easy,
            Self::Hard => Self::Normal,
        }
    }
}

/// What the snake ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
    Obstacle,
}

impl Collision {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Wall => "hit the wall",
            Self::SelfCollision => "bit its own tail",
            Self::Obstacle => "crashed into an obstacle",
        }
    }
}

/// A temporary effect from special food, with its expiry deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEffect {
    pub category: FoodCategory,
    pub expires_at_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_cell_bounds() {
        assert!(Cell::new(0, 0).in_bounds());
        assert!(Cell::new(24, 24).in_bounds());
        assert!(!Cell::new(-1, 0).in_bounds());
        assert!(!Cell::new(25, 3).in_bounds());
        assert!(!Cell::new(3, 25).in_bounds());
    }

    #[test]
    fn test_manhattan_distance() {
        let center = Cell::spawn();
        assert_eq!(center.manhattan_distance(center), 0);
        assert_eq!(center.manhattan_distance(Cell::new(14, 13)), 3);
        assert_eq!(Cell::new(0, 0).manhattan_distance(center), 24);
    }

    #[test]
    fn test_food_table() {
        let total: f64 = FoodCategory::ALL.iter().map(|c| c.probability()).sum();
        assert!((total - 1.0).abs() < 1e-9);

        assert_eq!(FoodCategory::Normal.score(), 10);
        assert_eq!(FoodCategory::Speed.score(), 20);
        assert_eq!(FoodCategory::Slow.score(), 15);
        assert_eq!(FoodCategory::Bonus.score(), 50);
    }

    #[test]
    fn test_effective_intervals_floor() {
        assert_eq!(FoodCategory::Speed.effective_interval_ms(120), 84);
        assert_eq!(FoodCategory::Slow.effective_interval_ms(120), 168);
        assert_eq!(FoodCategory::Speed.effective_interval_ms(70), 49);
        assert_eq!(FoodCategory::Slow.effective_interval_ms(70), 98);
        assert_eq!(FoodCategory::Speed.effective_interval_ms(200), 140);
        assert_eq!(FoodCategory::Bonus.effective_interval_ms(200), 200);
    }

    #[test]
    fn test_difficulty_intervals() {
        assert_eq!(Difficulty::Easy.base_interval_ms(), 200);
        assert_eq!(Difficulty::Normal.base_interval_ms(), 120);
        assert_eq!(Difficulty::Hard.base_interval_ms(), 70);
        assert_eq!(Difficulty::default(), Difficulty::Normal);
    }

    #[test]
    fn test_difficulty_cycles() {
        for d in Difficulty::ALL {
            assert_eq!(d.next().previous(), d);
        }
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    }

    #[test]
    fn test_difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Hard).unwrap();
        assert_eq!(json, "\"hard\"");
        let back: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(back, Difficulty::Easy);
    }
}
