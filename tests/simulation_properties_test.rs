//! Integration test: simulation invariants over many seeded runs
//!
//! Random walks over the board check growth accounting, direction rules,
//! food placement and obstacle layout for a sweep of seeds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_arcade::core::constants::{
    GRID_SIZE, OBSTACLE_MAX_COUNT, OBSTACLE_SPAWN_CLEARANCE,
};
use snake_arcade::simulation::{
    generate_obstacles, select_food_category, Cell, Difficulty, Direction, FoodCategory,
    SimulationEngine,
};
use std::collections::HashSet;

#[test]
fn test_length_accounting_over_random_walks() {
    for seed in 0..30u64 {
        let mut engine = SimulationEngine::new(
            Difficulty::Normal,
            seed % 2 == 0,
            StdRng::seed_from_u64(seed),
        );
        let mut steering = ChaCha8Rng::seed_from_u64(seed);
        let mut now_ms = 0;

        for _ in 0..500 {
            if steering.gen_bool(0.3) {
                let direction = Direction::ALL[steering.gen_range(0..4)];
                engine.request_direction(direction);
            }
            now_ms += engine.effective_interval_ms();
            engine.poll_effect_expiry(now_ms);

            let len_before = engine.snake.len();
            let score_before = engine.score;
            let result = engine.step(now_ms);

            if result.collision.is_some() {
                assert_eq!(engine.snake.len(), len_before, "seed {seed}");
                break;
            }
            match result.ate {
                Some(category) => {
                    assert_eq!(engine.snake.len(), len_before + 1, "seed {seed}");
                    assert_eq!(engine.score, score_before + category.score());
                }
                None => {
                    assert_eq!(engine.snake.len(), len_before, "seed {seed}");
                    assert_eq!(engine.score, score_before);
                }
            }

            let cells: HashSet<Cell> = engine.snake.iter().copied().collect();
            assert_eq!(cells.len(), engine.snake.len(), "seed {seed}: body overlaps");
            assert!(engine.snake.iter().all(|c| c.in_bounds()));
            if let Some(food) = engine.food {
                assert!(!cells.contains(&food.cell), "seed {seed}: food on snake");
                assert!(!engine.obstacles.contains(&food.cell), "seed {seed}: food on obstacle");
            }
        }
    }
}

#[test]
fn test_direction_accepted_unless_reversal() {
    for current in Direction::ALL {
        for requested in Direction::ALL {
            let mut engine =
                SimulationEngine::new(Difficulty::Easy, false, StdRng::seed_from_u64(1));
            engine.direction = current;
            engine.pending_direction = current;

            let accepted = engine.request_direction(requested);
            assert_eq!(
                accepted,
                requested != current.opposite(),
                "{current:?} -> {requested:?}"
            );
        }
    }
}

#[test]
fn test_obstacle_layouts() {
    let spawn = Cell::new(12, 12);
    for seed in 0..200u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let obstacles = generate_obstacles(&mut rng);

        assert!(obstacles.len() <= OBSTACLE_MAX_COUNT, "seed {seed}");
        let unique: HashSet<Cell> = obstacles.iter().copied().collect();
        assert_eq!(unique.len(), obstacles.len(), "seed {seed}: duplicate obstacle");
        for cell in &obstacles {
            assert!(cell.manhattan_distance(spawn) >= OBSTACLE_SPAWN_CLEARANCE);
            assert!(cell.x >= 1 && cell.x < GRID_SIZE - 1);
            assert!(cell.y >= 1 && cell.y < GRID_SIZE - 1);
        }
    }
}

#[test]
fn test_food_category_frequencies() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let draws = 20_000;
    let mut counts = [0u32; 4];
    for _ in 0..draws {
        let category = select_food_category(rng.gen::<f64>());
        let index = FoodCategory::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap();
        counts[index] += 1;
    }

    let share = |n: u32| n as f64 / draws as f64;
    assert!((share(counts[0]) - 0.7).abs() < 0.02, "normal {:?}", counts);
    for &count in &counts[1..] {
        assert!((share(count) - 0.1).abs() < 0.02, "special {:?}", counts);
    }
}
