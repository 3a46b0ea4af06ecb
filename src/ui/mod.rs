//! Terminal rendering with ratatui.

pub mod board_scene;
pub mod game_common;
pub mod leaderboard_scene;
pub mod menu_scene;

use crate::input::Overlay;
use crate::session::{GameSession, Phase};
use crate::utils::persistence::Store;
use ratatui::Frame;

/// Draw the whole screen for the session's phase and any open overlay.
pub fn draw<S: Store>(frame: &mut Frame, session: &GameSession<S>, overlay: Overlay) {
    let size = frame.size();

    match session.phase() {
        Phase::Menu => menu_scene::render_menu_scene(
            frame,
            size,
            session.settings(),
            session.leaderboard().best_score(),
        ),
        Phase::Playing | Phase::Paused | Phase::GameOver => {
            board_scene::render_board_scene(frame, size, session)
        }
    }

    if overlay == Overlay::Leaderboard {
        leaderboard_scene::render_leaderboard_overlay(frame, size, session.leaderboard().list());
    }
}
