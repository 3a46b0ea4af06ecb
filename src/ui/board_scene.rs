//! Board rendering for the playing, paused and game-over phases.
//!
//! Uses half-block pixels: each grid cell is one colored pixel, and two
//! vertically adjacent pixels share one terminal row through `▀` with
//! fg = top and bg = bottom.

use super::game_common::{
    create_game_layout, label_value, render_info_panel_frame, render_modal, render_status_bar,
};
use crate::core::constants::GRID_SIZE;
use crate::session::{GameSession, Phase, RunSummary};
use crate::simulation::{ActiveEffect, BoardSnapshot, FoodCategory};
use crate::utils::persistence::Store;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀
const FULL_BLOCK: char = '\u{2588}'; // █

const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const BODY_BRIGHT: (f64, f64, f64) = (50.0, 220.0, 50.0);
const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const OBSTACLE_COLOR: Color = Color::Rgb(130, 130, 140);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);
const FRAME_COLOR: Color = Color::Rgb(80, 80, 80);

pub fn food_color(category: FoodCategory) -> Color {
    match category {
        FoodCategory::Normal => Color::Rgb(255, 80, 40),
        FoodCategory::Speed => Color::Rgb(255, 220, 40),
        FoodCategory::Slow => Color::Rgb(60, 160, 255),
        FoodCategory::Bonus => Color::Rgb(220, 80, 255),
    }
}

/// Banner for the active effect, if it has one.
pub fn effect_banner(effect: Option<ActiveEffect>) -> Option<&'static str> {
    effect.and_then(|e| e.category.banner())
}

/// Draw the board, HUD and the overlay for the current phase.
pub fn render_board_scene<S: Store>(frame: &mut Frame, area: Rect, session: &GameSession<S>) {
    let Some(board) = session.board() else {
        return;
    };

    let layout = create_game_layout(frame, area, " Snake Arcade ", Color::LightGreen, 24);
    render_play_field(frame, layout.content, &board);
    render_status(frame, layout.status_bar, session.phase());
    render_hud(frame, layout.info_panel, session, &board);

    match (session.phase(), session.last_run()) {
        (Phase::Paused, _) => render_paused(frame, layout.content),
        (Phase::GameOver, Some(summary)) => render_game_over(frame, layout.content, summary),
        _ => {}
    }
}

fn body_color(index: usize, snake_len: usize) -> Color {
    let t = index as f64 / (snake_len - 1).max(1) as f64;
    let r = (BODY_BRIGHT.0 * (1.0 - t) + BODY_DIM.0 * t) as u8;
    let g = (BODY_BRIGHT.1 * (1.0 - t) + BODY_DIM.1 * t) as u8;
    let b = (BODY_BRIGHT.2 * (1.0 - t) + BODY_DIM.2 * t) as u8;
    Color::Rgb(r, g, b)
}

/// One color per grid cell, row-major. `None` is an empty cell.
pub fn board_pixels(board: &BoardSnapshot) -> Vec<Vec<Option<Color>>> {
    let size = GRID_SIZE as usize;
    let mut pixels = vec![vec![None; size]; size];
    let mut paint = |x: i16, y: i16, color: Color| {
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
            if x < size && y < size {
                pixels[y][x] = Some(color);
            }
        }
    };

    for cell in &board.obstacles {
        paint(cell.x, cell.y, OBSTACLE_COLOR);
    }
    if let Some(food) = board.food {
        paint(food.cell.x, food.cell.y, food_color(food.category));
    }
    // Tail first so the head wins any overlap
    let len = board.snake.len();
    for (i, seg) in board.snake.iter().enumerate().rev() {
        let color = if i == 0 { HEAD_COLOR } else { body_color(i, len) };
        paint(seg.x, seg.y, color);
    }
    pixels
}

fn render_play_field(frame: &mut Frame, area: Rect, board: &BoardSnapshot) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let pixels = board_pixels(board);
    let grid = pixels.len();
    let content_rows = grid.div_ceil(2);
    let render_w = ((grid + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2;
    let x_off = area.x + area.width.saturating_sub(render_w) / 2;
    let y_off = area.y + area.height.saturating_sub(content_rows as u16 + 2) / 2;
    let frame_style = Style::default().fg(FRAME_COLOR);

    let top = format!(
        "{BORDER_TL}{}{BORDER_TR}",
        BORDER_H.to_string().repeat(inner_w)
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(top, frame_style))),
        Rect::new(x_off, y_off, render_w, 1),
    );

    let empty_row: Vec<Option<Color>> = vec![None; grid];
    for term_row in 0..content_rows {
        let top_row = pixels.get(term_row * 2).unwrap_or(&empty_row);
        let bot_row = pixels.get(term_row * 2 + 1).unwrap_or(&empty_row);

        let mut spans: Vec<Span> = vec![Span::styled(BORDER_V.to_string(), frame_style)];

        // Batch runs of identical fg/bg into one span
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();
        for (&top_c, &bot_c) in top_row.iter().zip(bot_row.iter()) {
            let fg = top_c.unwrap_or(EMPTY_BG);
            let bg = bot_c.unwrap_or(EMPTY_BG);
            if (fg != cur_fg || bg != cur_bg) && !cur_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut cur_text),
                    Style::default().fg(cur_fg).bg(cur_bg),
                ));
            }
            cur_fg = fg;
            cur_bg = bg;
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(cur_text, Style::default().fg(cur_fg).bg(cur_bg)));
        }
        spans.push(Span::styled(BORDER_V.to_string(), frame_style));

        let row_y = y_off + 1 + term_row as u16;
        if row_y < area.y + area.height {
            frame.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect::new(x_off, row_y, render_w, 1),
            );
        }
    }

    let bot_y = y_off + 1 + content_rows as u16;
    if bot_y < area.y + area.height {
        let bottom = format!(
            "{BORDER_BL}{}{BORDER_BR}",
            BORDER_H.to_string().repeat(inner_w)
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(bottom, frame_style))),
            Rect::new(x_off, bot_y, render_w, 1),
        );
    }
}

type Controls = &'static [(&'static str, &'static str)];

const PLAYING_CONTROLS: Controls =
    &[("[Arrows/WASD]", "Steer"), ("[Space]", "Pause"), ("[R]", "Restart")];
const PAUSED_CONTROLS: Controls = &[("[Space]", "Resume"), ("[R]", "Restart"), ("[M]", "Menu")];
const GAME_OVER_CONTROLS: Controls =
    &[("[Enter]", "Play again"), ("[L]", "Scores"), ("[M]", "Menu")];

/// Status bar text, color and key hints for a board phase. The menu has none.
fn status_line(phase: Phase) -> Option<(&'static str, Color, Controls)> {
    let (color, controls) = match phase {
        Phase::Playing => (Color::Green, PLAYING_CONTROLS),
        Phase::Paused => (Color::Yellow, PAUSED_CONTROLS),
        Phase::GameOver => (Color::Red, GAME_OVER_CONTROLS),
        Phase::Menu => return None,
    };
    Some((phase.name(), color, controls))
}

fn render_status(frame: &mut Frame, area: Rect, phase: Phase) {
    if let Some((text, color, controls)) = status_line(phase) {
        render_status_bar(frame, area, text, color, controls);
    }
}

fn render_hud<S: Store>(frame: &mut Frame, area: Rect, session: &GameSession<S>, board: &BoardSnapshot) {
    let inner = render_info_panel_frame(frame, area);
    let settings = session.settings();
    let white = Style::default().fg(Color::White);
    let interval = session
        .engine()
        .map_or(0, |engine| engine.effective_interval_ms());
    let best = session
        .leaderboard()
        .best_score()
        .map_or_else(|| "-".to_string(), |s| s.to_string());

    let mut lines = vec![
        label_value(
            "Score: ",
            board.score.to_string(),
            white.add_modifier(Modifier::BOLD),
        ),
        label_value("Best: ", best, white),
        Line::from(""),
        label_value(
            "Difficulty: ",
            settings.difficulty.name().to_string(),
            Style::default().fg(Color::Cyan),
        ),
        label_value("Speed: ", format!("{interval}ms"), white),
        label_value(
            "Obstacles: ",
            if settings.obstacle_mode { "on" } else { "off" }.to_string(),
            white,
        ),
        label_value(
            "Sound: ",
            if settings.sound_enabled { "on" } else { "off" }.to_string(),
            white,
        ),
        Line::from(""),
    ];

    if let Some(banner) = effect_banner(board.effect) {
        let color = board.effect.map_or(Color::White, |e| food_color(e.category));
        lines.push(Line::from(Span::styled(
            format!(">> {banner} <<"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Food:",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )));
    for category in FoodCategory::ALL {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {FULL_BLOCK} "),
                Style::default().fg(food_color(category)),
            ),
            Span::styled(
                format!("{} +{}", category.name(), category.score()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(OBSTACLE_COLOR)),
        Span::styled("Obstacle", Style::default().fg(Color::DarkGray)),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_paused(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "PAUSED",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "[Space] Resume",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_modal(frame, area, "", Color::Yellow, 24, lines);
}

fn render_game_over(frame: &mut Frame, area: Rect, summary: RunSummary) {
    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            summary.collision.describe(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Final score: {}", summary.score),
            Style::default().fg(Color::Cyan),
        )),
    ];
    if summary.new_record {
        lines.push(Line::from(Span::styled(
            "* NEW RECORD *",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Play again",
        Style::default().fg(Color::DarkGray),
    )));
    render_modal(frame, area, "", Color::Red, 30, lines);
}
