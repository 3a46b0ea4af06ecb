//! Snake Arcade - terminal snake with timed power-up food.
//!
//! The library holds the whole game: the board simulation, the session state
//! machine, timing, persistence and the ratatui screens. The binary only owns
//! the terminal and the wall clock.

pub mod audio;
pub mod core;
pub mod input;
pub mod leaderboard;
pub mod session;
pub mod settings;
pub mod simulation;
pub mod timing;
pub mod ui;
pub mod utils;
