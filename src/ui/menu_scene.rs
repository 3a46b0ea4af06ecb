//! Title menu: difficulty, obstacle mode and sound.

use super::game_common::{centered_rect, controls_line};
use crate::settings::Settings;
use crate::simulation::Difficulty;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TITLE: [&str; 5] = [
    r" ___ _  _   _   _  _____ ",
    r"/ __| \| | /_\ | |/ / __|",
    r"\__ \ .` |/ _ \| ' <| _| ",
    r"|___/_|\_/_/ \_\_|\_\___|",
    "         A R C A D E      ",
];

const MENU_WIDTH: u16 = 44;
const MENU_HEIGHT: u16 = 20;

/// Difficulty row, current choice highlighted.
pub fn difficulty_line(selected: Difficulty) -> Line<'static> {
    let mut spans = vec![Span::styled("Difficulty  ", Style::default().fg(Color::DarkGray))];
    for difficulty in Difficulty::ALL {
        let style = if difficulty == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", difficulty.name()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn toggle_line(label: &'static str, key: &'static str, on: bool) -> Line<'static> {
    let (text, color) = if on { ("ON ", Color::Green) } else { ("OFF", Color::Red) };
    Line::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(Color::DarkGray)),
        Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {key}"), Style::default().fg(Color::DarkGray)),
    ])
}

pub fn render_menu_scene(frame: &mut Frame, area: Rect, settings: Settings, best: Option<u32>) {
    frame.render_widget(Clear, area);
    let menu_area = centered_rect(area, MENU_WIDTH, MENU_HEIGHT);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightGreen));
    let inner = block.inner(menu_area);
    frame.render_widget(block, menu_area);

    let title_style = Style::default()
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = TITLE
        .iter()
        .map(|row| Line::from(Span::styled(*row, title_style)))
        .collect();

    lines.push(Line::from(""));
    lines.push(difficulty_line(settings.difficulty));
    lines.push(Line::from(Span::styled(
        format!("{}ms per move", settings.difficulty.base_interval_ms()),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    lines.push(toggle_line("Obstacles", "[O]", settings.obstacle_mode));
    lines.push(toggle_line("Sound", "[V]", settings.sound_enabled));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        match best {
            Some(score) => format!("Best score: {score}"),
            None => "No scores yet".to_string(),
        },
        Style::default().fg(Color::Cyan),
    )));
    lines.push(Line::from(""));
    lines.push(controls_line(&[("[Enter]", "Start"), ("[←/→]", "Difficulty")]));
    lines.push(controls_line(&[("[L]", "Leaderboard"), ("[Q]", "Quit")]));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
