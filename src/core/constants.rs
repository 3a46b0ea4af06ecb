// Grid
pub const GRID_SIZE: i16 = 25;
pub const SPAWN_X: i16 = 12;
pub const SPAWN_Y: i16 = 12;
pub const INITIAL_SNAKE_LENGTH: usize = 3;

// Placement
pub const FOOD_PLACEMENT_ATTEMPTS: u32 = 100;
pub const OBSTACLE_PLACEMENT_ATTEMPTS: u32 = 50;
pub const OBSTACLE_MIN_COUNT: usize = 12;
pub const OBSTACLE_MAX_COUNT: usize = 15;
/// Minimum Manhattan distance between an obstacle and the spawn cell.
pub const OBSTACLE_SPAWN_CLEARANCE: i16 = 3;

// Difficulty tick intervals (ms, lower = faster)
pub const EASY_INTERVAL_MS: u64 = 200;
pub const NORMAL_INTERVAL_MS: u64 = 120;
pub const HARD_INTERVAL_MS: u64 = 70;

// Timed effects
pub const SPEED_EFFECT_MS: u64 = 5_000;
pub const SLOW_EFFECT_MS: u64 = 5_000;
pub const BONUS_BANNER_MS: u64 = 2_000;
pub const SPEED_MULTIPLIER: f64 = 0.7;
pub const SLOW_MULTIPLIER: f64 = 1.4;

// Leaderboard
pub const LEADERBOARD_CAPACITY: usize = 10;

// Persistence
pub const DATA_DIR_ENV: &str = "SNAKE_ARCADE_HOME";
pub const DATA_DIR_NAME: &str = ".snake-arcade";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LEADERBOARD_FILE: &str = "leaderboard.json";
pub const LOG_FILE: &str = "snake-arcade.log";

// Terminal loop
/// Upper bound on how long the UI waits for input before redrawing.
pub const FRAME_POLL_MS: u64 = 50;
