//! Session lifecycle data: phases, side-effect events and run summaries.

use crate::simulation::{Collision, FoodCategory};

/// Where the player is in the game lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Menu => "Menu",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::GameOver => "Game Over",
        }
    }
}

/// Audio trigger for the sound adapter. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    SpecialEat,
    GameOver,
    BackgroundStart,
    BackgroundStop,
}

/// Result of a finished run, shown on the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u32,
    pub collision: Collision,
    /// The run took rank 0 on the leaderboard.
    pub new_record: bool,
}

/// Side effect produced by a session call.
///
/// The session never touches the terminal or audio itself; the presentation
/// layer maps these to sounds and redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Sound(SoundCue),
    /// The board changed and should be redrawn.
    BoardChanged,
    EffectStarted(FoodCategory),
    EffectEnded(FoodCategory),
    GameOver(RunSummary),
}
