//! Leaderboard overlay and its plain-text rows.

use super::game_common::{centered_rect, controls_line};
use crate::leaderboard::LeaderboardEntry;
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

pub const HEADER: [&str; 5] = ["#", "Score", "Difficulty", "Obstacles", "Date"];

/// One row of cells per entry: rank, score, difficulty, obstacles, date.
pub fn leaderboard_rows(entries: &[LeaderboardEntry]) -> Vec<[String; 5]> {
    entries
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            [
                (rank + 1).to_string(),
                entry.score.to_string(),
                entry.difficulty.name().to_string(),
                if entry.obstacle_mode { "on" } else { "off" }.to_string(),
                entry.date.clone(),
            ]
        })
        .collect()
}

pub fn render_leaderboard_overlay(frame: &mut Frame, area: Rect, entries: &[LeaderboardEntry]) {
    let overlay = centered_rect(area, 56, 17);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" Leaderboard ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let footer = Rect {
        y: inner.y + inner.height.saturating_sub(1),
        height: inner.height.min(1),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(controls_line(&[("[Esc]", "Close")]))
            .alignment(Alignment::Center),
        footer,
    );

    let body = Rect {
        height: inner.height.saturating_sub(2),
        ..inner
    };
    if entries.is_empty() {
        frame.render_widget(
            Paragraph::new("No scores yet. Go play!")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            body,
        );
        return;
    }

    let rows = leaderboard_rows(entries)
        .into_iter()
        .enumerate()
        .map(|(i, cells)| {
            let style = if i == 0 {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(cells).style(style)
        });
    let widths = [
        Constraint::Length(3),
        Constraint::Length(7),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths).header(
        Row::new(HEADER).style(Style::default().fg(Color::DarkGray)).bottom_margin(1),
    );
    frame.render_widget(table, body);
}
