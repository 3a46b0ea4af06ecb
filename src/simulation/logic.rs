//! Snake simulation: movement, collision detection, eating and timed effects.

use super::placement::{generate_obstacles, random_food_category, random_free_cell};
use super::types::*;
use crate::core::constants::INITIAL_SNAKE_LENGTH;
use crate::timing::EffectTimer;
use log::{debug, warn};
use rand::rngs::StdRng;
use std::collections::{HashSet, VecDeque};

/// What a single movement step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Category of the food eaten this step, if any.
    pub ate: Option<FoodCategory>,
    /// Set when the step ended the run. The snake is left unmoved.
    pub collision: Option<Collision>,
    /// The tick interval must be restarted at `effective_interval_ms()`.
    pub restart_ticks: bool,
}

/// Everything a renderer needs to draw one frame of the board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    /// Head first.
    pub snake: Vec<Cell>,
    pub food: Option<FoodItem>,
    pub obstacles: Vec<Cell>,
    pub score: u32,
    pub effect: Option<ActiveEffect>,
}

/// One run's worth of board state.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    pub difficulty: Difficulty,
    /// Snake body segments. Head is at the front (index 0).
    pub snake: VecDeque<Cell>,
    /// Direction committed at the last step.
    pub direction: Direction,
    /// Buffered direction applied at the next step.
    pub pending_direction: Direction,
    /// `None` only while placement keeps failing; retried every step.
    pub food: Option<FoodItem>,
    pub obstacles: Vec<Cell>,
    pub score: u32,
    /// Movement steps taken so far.
    pub tick_count: u64,
    pub collision: Option<Collision>,

    effect: Option<ActiveEffect>,
    effect_timer: EffectTimer,
    rng: StdRng,
}

impl SimulationEngine {
    /// Spawn a fresh run: snake in the center heading right, obstacles when
    /// enabled, then the first food item.
    pub fn new(difficulty: Difficulty, obstacle_mode: bool, mut rng: StdRng) -> Self {
        let spawn = Cell::spawn();
        let snake: VecDeque<Cell> = (0..INITIAL_SNAKE_LENGTH as i16)
            .map(|i| Cell::new(spawn.x - i, spawn.y))
            .collect();

        let obstacles = if obstacle_mode {
            generate_obstacles(&mut rng)
        } else {
            Vec::new()
        };

        let mut engine = Self {
            difficulty,
            snake,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food: None,
            obstacles,
            score: 0,
            tick_count: 0,
            collision: None,
            effect: None,
            effect_timer: EffectTimer::new(),
            rng,
        };
        engine.spawn_food();
        engine
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn is_over(&self) -> bool {
        self.collision.is_some()
    }

    /// Buffer a direction change for the next step.
    ///
    /// Rejected when it reverses the committed direction. A later accepted
    /// request overwrites an earlier one.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.is_over() || direction == self.direction.opposite() {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Advance the snake by one cell.
    pub fn step(&mut self, now_ms: u64) -> StepResult {
        if self.is_over() {
            return StepResult::default();
        }
        self.tick_count += 1;

        self.direction = self.pending_direction;
        let new_head = self.head().step(self.direction);

        if let Some(collision) = self.check_collision(new_head) {
            self.collision = Some(collision);
            return StepResult {
                collision: Some(collision),
                ..StepResult::default()
            };
        }

        self.snake.push_front(new_head);

        let mut result = StepResult::default();
        match self.food {
            Some(food) if food.cell == new_head => {
                self.score += food.category.score();
                result.ate = Some(food.category);
                result.restart_ticks = self.apply_effect(food.category, now_ms);
                self.food = None;
                self.spawn_food();
            }
            _ => {
                self.snake.pop_back();
                if self.food.is_none() {
                    self.spawn_food();
                }
            }
        }

        result
    }

    /// Wall, then body, then obstacles. The whole current body counts,
    /// including the tail cell that would move away this step.
    fn check_collision(&self, cell: Cell) -> Option<Collision> {
        if !cell.in_bounds() {
            Some(Collision::Wall)
        } else if self.snake.contains(&cell) {
            Some(Collision::SelfCollision)
        } else if self.obstacles.contains(&cell) {
            Some(Collision::Obstacle)
        } else {
            None
        }
    }

    /// Replace any running effect with the one for `category`.
    ///
    /// Returns true when the tick schedule has to be restarted.
    fn apply_effect(&mut self, category: FoodCategory, now_ms: u64) -> bool {
        let Some(duration_ms) = category.effect_duration_ms() else {
            return false;
        };

        let interval_before = self.effective_interval_ms();
        if let Some(previous) = self.effect.take() {
            self.effect_timer.cancel();
            debug!("{} effect superseded by {}", previous.category.name(), category.name());
        }

        self.effect_timer.arm(duration_ms, now_ms);
        self.effect = Some(ActiveEffect {
            category,
            expires_at_ms: now_ms + duration_ms,
        });

        let changes_speed = matches!(category, FoodCategory::Speed | FoodCategory::Slow);
        changes_speed || self.effective_interval_ms() != interval_before
    }

    /// Clear the active effect once its deadline has passed.
    ///
    /// Returns the effect that just ended. The caller decides whether the tick
    /// schedule is restarted.
    pub fn poll_effect_expiry(&mut self, now_ms: u64) -> Option<ActiveEffect> {
        self.effect_timer.poll(now_ms)?;
        let ended = self.effect.take();
        if let Some(effect) = ended {
            debug!("{} effect expired at {}ms", effect.category.name(), now_ms);
        }
        ended
    }

    pub fn active_effect(&self) -> Option<ActiveEffect> {
        self.effect
    }

    /// When the pending effect expiry fires, if one is armed.
    pub fn effect_deadline_ms(&self) -> Option<u64> {
        self.effect_timer.deadline_ms()
    }

    pub fn base_interval_ms(&self) -> u64 {
        self.difficulty.base_interval_ms()
    }

    /// Tick interval with the active effect applied.
    pub fn effective_interval_ms(&self) -> u64 {
        let base = self.base_interval_ms();
        self.effect
            .map_or(base, |effect| effect.category.effective_interval_ms(base))
    }

    /// Place a new food item on a free cell, leaving the board without food if
    /// placement is exhausted.
    fn spawn_food(&mut self) {
        let occupied: HashSet<Cell> = self
            .snake
            .iter()
            .chain(self.obstacles.iter())
            .copied()
            .collect();

        match random_free_cell(&occupied, &mut self.rng) {
            Ok(cell) => {
                let category = random_food_category(&mut self.rng);
                self.food = Some(FoodItem { cell, category });
            }
            Err(err) => {
                warn!("food not placed this step: {err}");
                self.food = None;
            }
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            snake: self.snake.iter().copied().collect(),
            food: self.food,
            obstacles: self.obstacles.clone(),
            score: self.score,
            effect: self.effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn engine(difficulty: Difficulty) -> SimulationEngine {
        SimulationEngine::new(difficulty, false, StdRng::seed_from_u64(42))
    }

    fn place_food(engine: &mut SimulationEngine, cell: Cell, category: FoodCategory) {
        engine.food = Some(FoodItem { cell, category });
    }

    fn food_far_away(engine: &mut SimulationEngine) {
        place_food(engine, Cell::new(0, 0), FoodCategory::Normal);
    }

    #[test]
    fn test_spawn_layout() {
        let engine = engine(Difficulty::Normal);
        let body: Vec<Cell> = engine.snake.iter().copied().collect();
        assert_eq!(
            body,
            vec![Cell::new(12, 12), Cell::new(11, 12), Cell::new(10, 12)]
        );
        assert_eq!(engine.direction, Direction::Right);
        assert_eq!(engine.score, 0);
        assert!(engine.obstacles.is_empty());
        let food = engine.food.expect("food placed at spawn");
        assert!(!engine.snake.contains(&food.cell));
    }

    #[test]
    fn test_obstacle_mode_spawns_obstacles_clear_of_food() {
        let engine = SimulationEngine::new(Difficulty::Easy, true, StdRng::seed_from_u64(3));
        assert!(!engine.obstacles.is_empty());
        let food = engine.food.unwrap();
        assert!(!engine.obstacles.contains(&food.cell));
    }

    #[test]
    fn test_step_moves_right_without_growing() {
        let mut engine = engine(Difficulty::Normal);
        food_far_away(&mut engine);

        let result = engine.step(120);

        assert_eq!(result, StepResult::default());
        let body: Vec<Cell> = engine.snake.iter().copied().collect();
        assert_eq!(
            body,
            vec![Cell::new(13, 12), Cell::new(12, 12), Cell::new(11, 12)]
        );
        assert_eq!(engine.score, 0);
        assert_eq!(engine.tick_count, 1);
    }

    #[test]
    fn test_eating_normal_food_grows_and_scores() {
        let mut engine = engine(Difficulty::Normal);
        place_food(&mut engine, Cell::new(13, 12), FoodCategory::Normal);

        let result = engine.step(120);

        assert_eq!(result.ate, Some(FoodCategory::Normal));
        assert!(!result.restart_ticks);
        assert_eq!(engine.snake.len(), 4);
        assert_eq!(engine.score, 10);
        assert_eq!(engine.effective_interval_ms(), 120);
        let food = engine.food.unwrap();
        assert!(!engine.snake.contains(&food.cell));
    }

    #[test]
    fn test_wall_collision_leaves_snake_untouched() {
        let mut engine = engine(Difficulty::Normal);
        engine.snake = VecDeque::from(vec![
            Cell::new(24, 12),
            Cell::new(23, 12),
            Cell::new(22, 12),
        ]);
        let before = engine.snake.clone();

        let result = engine.step(120);

        assert_eq!(result.collision, Some(Collision::Wall));
        assert_eq!(engine.snake, before);
        assert!(engine.is_over());
    }

    #[test]
    fn test_wall_collision_top() {
        let mut engine = engine(Difficulty::Normal);
        engine.snake = VecDeque::from(vec![Cell::new(5, 0), Cell::new(5, 1), Cell::new(5, 2)]);
        engine.direction = Direction::Up;
        engine.pending_direction = Direction::Up;

        assert_eq!(engine.step(120).collision, Some(Collision::Wall));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine(Difficulty::Normal);
        // Head moving right into its own body at (6,5)
        engine.snake = VecDeque::from(vec![
            Cell::new(5, 5),
            Cell::new(5, 4),
            Cell::new(6, 4),
            Cell::new(6, 5),
            Cell::new(6, 6),
        ]);
        food_far_away(&mut engine);

        assert_eq!(engine.step(120).collision, Some(Collision::SelfCollision));
    }

    #[test]
    fn test_moving_into_tail_cell_collides() {
        let mut engine = engine(Difficulty::Normal);
        engine.snake = VecDeque::from(vec![
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 6),
            Cell::new(5, 6),
        ]);
        engine.direction = Direction::Down;
        engine.pending_direction = Direction::Down;
        food_far_away(&mut engine);

        assert_eq!(engine.step(120).collision, Some(Collision::SelfCollision));
    }

    #[test]
    fn test_obstacle_collision() {
        let mut engine = engine(Difficulty::Normal);
        engine.obstacles = vec![Cell::new(13, 12)];

        assert_eq!(engine.step(120).collision, Some(Collision::Obstacle));
        assert_eq!(engine.head(), Cell::new(12, 12));
    }

    #[test]
    fn test_wall_checked_before_obstacle() {
        let mut engine = engine(Difficulty::Normal);
        engine.snake = VecDeque::from(vec![
            Cell::new(24, 3),
            Cell::new(23, 3),
            Cell::new(22, 3),
        ]);
        engine.obstacles = vec![Cell::new(25, 3)];

        assert_eq!(engine.step(120).collision, Some(Collision::Wall));
    }

    #[test]
    fn test_reverse_direction_rejected() {
        let mut engine = engine(Difficulty::Normal);
        assert!(!engine.request_direction(Direction::Left));
        assert_eq!(engine.pending_direction, Direction::Right);
        assert!(engine.request_direction(Direction::Up));
        assert_eq!(engine.pending_direction, Direction::Up);
    }

    #[test]
    fn test_reverse_checked_against_committed_direction() {
        let mut engine = engine(Difficulty::Normal);
        food_far_away(&mut engine);
        // Up is pending, but Left is still only opposite of committed Right
        assert!(engine.request_direction(Direction::Up));
        assert!(!engine.request_direction(Direction::Left));
        // Down is not opposite of committed Right, so it overwrites Up
        assert!(engine.request_direction(Direction::Down));

        engine.step(120);
        assert_eq!(engine.direction, Direction::Down);
        assert_eq!(engine.head(), Cell::new(12, 13));
    }

    #[test]
    fn test_latest_request_wins() {
        let mut engine = engine(Difficulty::Normal);
        food_far_away(&mut engine);
        engine.request_direction(Direction::Up);
        engine.request_direction(Direction::Down);
        engine.step(120);
        assert_eq!(engine.direction, Direction::Down);
    }

    #[test]
    fn test_speed_food_shortens_interval_until_expiry() {
        let mut engine = engine(Difficulty::Normal);
        place_food(&mut engine, Cell::new(13, 12), FoodCategory::Speed);

        let result = engine.step(1_000);

        assert!(result.restart_ticks);
        assert_eq!(engine.score, 20);
        assert_eq!(engine.effective_interval_ms(), 84);
        assert_eq!(engine.poll_effect_expiry(5_999), None);

        let ended = engine.poll_effect_expiry(6_000).unwrap();
        assert_eq!(ended.category, FoodCategory::Speed);
        assert_eq!(engine.effective_interval_ms(), 120);
        assert!(engine.active_effect().is_none());
    }

    #[test]
    fn test_slow_food_lengthens_interval() {
        let mut engine = engine(Difficulty::Hard);
        place_food(&mut engine, Cell::new(13, 12), FoodCategory::Slow);

        let result = engine.step(0);

        assert!(result.restart_ticks);
        assert_eq!(engine.score, 15);
        assert_eq!(engine.effective_interval_ms(), 98);
    }

    #[test]
    fn test_bonus_food_keeps_interval() {
        let mut engine = engine(Difficulty::Easy);
        place_food(&mut engine, Cell::new(13, 12), FoodCategory::Bonus);

        let result = engine.step(0);

        assert!(!result.restart_ticks);
        assert_eq!(engine.score, 50);
        assert_eq!(engine.effective_interval_ms(), 200);
        let effect = engine.active_effect().unwrap();
        assert_eq!(effect.expires_at_ms, 2_000);
    }

    #[test]
    fn test_new_effect_supersedes_old() {
        let mut engine = engine(Difficulty::Normal);
        place_food(&mut engine, Cell::new(13, 12), FoodCategory::Speed);
        engine.step(0);
        assert_eq!(engine.effective_interval_ms(), 84);

        place_food(&mut engine, Cell::new(14, 12), FoodCategory::Bonus);
        let result = engine.step(1_000);

        // Bonus resets the interval to base, so ticks restart
        assert!(result.restart_ticks);
        assert_eq!(engine.effective_interval_ms(), 120);
        assert_eq!(engine.poll_effect_expiry(2_999), None);
        let ended = engine.poll_effect_expiry(3_000).unwrap();
        assert_eq!(ended.category, FoodCategory::Bonus);
        // The superseded speed deadline at 5000ms never fires
        assert_eq!(engine.poll_effect_expiry(5_000), None);
    }

    #[test]
    fn test_normal_food_keeps_active_effect() {
        let mut engine = engine(Difficulty::Normal);
        place_food(&mut engine, Cell::new(13, 12), FoodCategory::Slow);
        engine.step(0);

        place_food(&mut engine, Cell::new(14, 12), FoodCategory::Normal);
        let result = engine.step(500);

        assert!(!result.restart_ticks);
        assert_eq!(engine.effective_interval_ms(), 168);
        assert!(engine.active_effect().is_some());
    }

    #[test]
    fn test_missing_food_is_respawned_on_next_step() {
        let mut engine = engine(Difficulty::Normal);
        engine.food = None;

        engine.step(120);

        let food = engine.food.expect("food respawned");
        assert!(!engine.snake.contains(&food.cell));
    }

    #[test]
    fn test_full_board_leaves_no_food_until_space_frees() {
        use crate::core::constants::GRID_SIZE;

        let mut engine = engine(Difficulty::Normal);
        // Everything is wall except the snake and the cell it is about to eat
        let corridor: Vec<Cell> = (10..=13).map(|x| Cell::new(x, 12)).collect();
        engine.obstacles = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Cell::new(x, y)))
            .filter(|cell| !corridor.contains(cell))
            .collect();
        place_food(&mut engine, Cell::new(13, 12), FoodCategory::Normal);

        let result = engine.step(120);
        assert_eq!(result.ate, Some(FoodCategory::Normal));
        assert_eq!(engine.snake.len(), 4);
        assert!(engine.food.is_none());
        assert!(!engine.is_over());

        // Once cells free up, the next step places food again
        engine.obstacles.clear();
        let result = engine.step(240);
        assert!(result.collision.is_none());
        assert_eq!(engine.head(), Cell::new(14, 12));
        let food = engine.food.expect("food placed once space frees");
        assert!(!engine.snake.contains(&food.cell));
    }

    #[test]
    fn test_cloned_engine_steps_independently() {
        let mut engine = engine(Difficulty::Normal);
        place_food(&mut engine, Cell::new(13, 12), FoodCategory::Speed);
        engine.step(120);

        let mut copy = engine.clone();
        copy.step(204);

        assert_eq!(engine.head(), Cell::new(13, 12));
        assert_eq!(copy.head(), Cell::new(14, 12));
        assert_eq!(copy.effect_deadline_ms(), engine.effect_deadline_ms());
        assert_eq!(copy.effect_deadline_ms(), Some(5_120));
    }

    #[test]
    fn test_terminated_run_does_not_step() {
        let mut engine = engine(Difficulty::Normal);
        engine.collision = Some(Collision::Wall);
        let head = engine.head();

        assert_eq!(engine.step(120), StepResult::default());
        assert_eq!(engine.head(), head);
        assert_eq!(engine.tick_count, 0);
        assert!(!engine.request_direction(Direction::Up));
    }

    #[test]
    fn test_snapshot_reflects_board() {
        let mut engine = engine(Difficulty::Normal);
        engine.obstacles = vec![Cell::new(1, 1)];
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.snake[0], Cell::new(12, 12));
        assert_eq!(snapshot.obstacles, vec![Cell::new(1, 1)]);
        assert_eq!(snapshot.food, engine.food);
        assert_eq!(snapshot.score, 0);
        assert!(snapshot.effect.is_none());
    }
}
