//! Game lifecycle state machine driven by an explicit clock.

pub mod logic;
pub mod types;

pub use logic::GameSession;
pub use types::{Phase, RunSummary, SessionEvent, SoundCue};
