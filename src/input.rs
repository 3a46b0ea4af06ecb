//! Keyboard handling.
//!
//! Keys map to a [`Command`] according to the current phase and overlay, then
//! the command is applied to the session. Mapping is pure so it can be tested
//! without a terminal.

use crate::session::{GameSession, Phase, SessionEvent};
use crate::simulation::Direction;
use crate::utils::persistence::Store;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Screen drawn over the current phase. At most one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Leaderboard,
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Start,
    Pause,
    Resume,
    Restart,
    PlayAgain,
    Menu,
    PreviousDifficulty,
    NextDifficulty,
    ToggleObstacles,
    ToggleSound,
    ShowLeaderboard,
    CloseOverlay,
    Quit,
    None,
}

/// Result of handling a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// Keep running; the session produced these side effects.
    Continue(Vec<SessionEvent>),
    Quit,
}

fn steer_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// Map a key to a command for the given phase and overlay.
pub fn map_key(key: KeyEvent, phase: Phase, overlay: Overlay) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }

    // Quit and sound work everywhere
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Command::Quit,
        KeyCode::Char('v') | KeyCode::Char('V') => return Command::ToggleSound,
        _ => {}
    }

    if overlay == Overlay::Leaderboard {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('l') | KeyCode::Char('L') => {
                Command::CloseOverlay
            }
            _ => Command::None,
        };
    }

    match phase {
        Phase::Menu => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Command::Start,
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::PreviousDifficulty,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::NextDifficulty,
            KeyCode::Char('o') | KeyCode::Char('O') => Command::ToggleObstacles,
            KeyCode::Char('l') | KeyCode::Char('L') => Command::ShowLeaderboard,
            KeyCode::Esc => Command::Quit,
            _ => Command::None,
        },
        Phase::Playing => match key.code {
            KeyCode::Char(' ') | KeyCode::Esc => Command::Pause,
            KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
            code => steer_key(code).map_or(Command::None, Command::Steer),
        },
        Phase::Paused => match key.code {
            KeyCode::Char(' ') | KeyCode::Esc => Command::Resume,
            KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
            KeyCode::Char('m') | KeyCode::Char('M') => Command::Menu,
            _ => Command::None,
        },
        Phase::GameOver => match key.code {
            KeyCode::Enter => Command::PlayAgain,
            KeyCode::Char('m') | KeyCode::Char('M') => Command::Menu,
            KeyCode::Char('l') | KeyCode::Char('L') => Command::ShowLeaderboard,
            _ => Command::None,
        },
    }
}

/// Apply a command to the session at time `now_ms`.
pub fn apply_command<S: Store>(
    command: Command,
    session: &mut GameSession<S>,
    overlay: &mut Overlay,
    now_ms: u64,
) -> InputResult {
    let events = match command {
        Command::Quit => return InputResult::Quit,
        Command::Steer(direction) => {
            session.request_direction(direction);
            Vec::new()
        }
        Command::Start => session.start(now_ms),
        Command::Pause => session.pause(),
        Command::Resume => session.resume(now_ms),
        Command::Restart => session.restart(now_ms),
        Command::PlayAgain => session.play_again(now_ms),
        Command::Menu => session.return_to_menu(),
        Command::PreviousDifficulty => {
            let difficulty = session.settings().difficulty.previous();
            session.set_difficulty(difficulty);
            Vec::new()
        }
        Command::NextDifficulty => {
            let difficulty = session.settings().difficulty.next();
            session.set_difficulty(difficulty);
            Vec::new()
        }
        Command::ToggleObstacles => {
            let enabled = !session.settings().obstacle_mode;
            session.set_obstacle_mode(enabled);
            Vec::new()
        }
        Command::ToggleSound => {
            let enabled = !session.settings().sound_enabled;
            session.set_sound_enabled(enabled)
        }
        Command::ShowLeaderboard => {
            *overlay = Overlay::Leaderboard;
            Vec::new()
        }
        Command::CloseOverlay => {
            *overlay = Overlay::None;
            Vec::new()
        }
        Command::None => Vec::new(),
    };
    InputResult::Continue(events)
}

/// Map and apply a key press in one go.
pub fn handle_key<S: Store>(
    key: KeyEvent,
    session: &mut GameSession<S>,
    overlay: &mut Overlay,
    now_ms: u64,
) -> InputResult {
    let command = map_key(key, session.phase(), *overlay);
    apply_command(command, session, overlay, now_ms)
}
