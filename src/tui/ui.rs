//! Stateless UI rendering for Neon Bomb.

use super::app::App;
use crate::banter;
use crate::games::neon_bomb::{Player, Position, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::time::Instant;

const CELL_WIDTH: u16 = 9;
const CELL_HEIGHT: u16 = 3;

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Min(CELL_HEIGHT * 3 + 2),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(frame.area());

    let title = Paragraph::new("N E O N   B O M B")
        .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_bubble(frame, chunks[1], app);

    let middle = Layout::horizontal([Constraint::Min(CELL_WIDTH * 3 + 2), Constraint::Length(28)])
        .split(chunks[2]);
    draw_board(frame, middle[0], app, now);
    draw_players(frame, middle[1], app);

    let status_style = if app.bomb_mode() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let status = Paragraph::new(app.status_message())
        .style(status_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new("arrows/1-9: pick  enter: play  b: bomb  r: reset  q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);

    if app.game().is_over() {
        draw_game_over(frame, app);
    }
}

fn draw_bubble(frame: &mut Frame, area: Rect, app: &App) {
    let text = if app.thinking() {
        format!("{} ...", app.ai_message())
    } else {
        app.ai_message().to_string()
    };
    let bubble = Paragraph::new(text)
        .style(Style::default().fg(Color::LightMagenta))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} says ", app.opponent_name())),
        );
    frame.render_widget(bubble, area);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let board_area = center_rect(area, CELL_WIDTH * 3, CELL_HEIGHT * 3);
    let rows = Layout::vertical([Constraint::Length(CELL_HEIGHT); 3]).split(board_area);
    let winning = app.game().winning_line();
    let exploded = app.explosion_at(now);

    for (r, row_area) in rows.iter().enumerate() {
        let cols = Layout::horizontal([Constraint::Length(CELL_WIDTH); 3]).split(*row_area);
        for (c, cell_area) in cols.iter().enumerate() {
            if let Some(pos) = Position::from_index(r * 3 + c) {
                let highlight = Highlight {
                    cursor: pos == app.cursor() && !app.game().is_over(),
                    bomb_mode: app.bomb_mode(),
                    winning: winning.is_some_and(|line| line.contains(&pos)),
                    exploded: exploded == Some(pos),
                };
                draw_cell(frame, *cell_area, app.game().board().get(pos), pos, highlight);
            }
        }
    }
}

#[derive(Clone, Copy)]
struct Highlight {
    cursor: bool,
    bomb_mode: bool,
    winning: bool,
    exploded: bool,
}

fn draw_cell(frame: &mut Frame, area: Rect, square: Square, pos: Position, highlight: Highlight) {
    let (symbol, mut style) = match square {
        Square::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Player::X) => (
            "X".to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            "O".to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
    };

    let mut border = Style::default().fg(Color::DarkGray);
    if highlight.winning {
        style = style.bg(Color::Green).fg(Color::Black);
        border = border.fg(Color::Green);
    }
    if highlight.exploded {
        style = Style::default().bg(Color::Red).fg(Color::Yellow).add_modifier(Modifier::BOLD);
        border = border.fg(Color::Red);
    }
    if highlight.cursor {
        border = if highlight.bomb_mode {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
    }

    let symbol = if highlight.exploded { "*".to_string() } else { symbol };
    let cell = Paragraph::new(Line::from(Span::styled(symbol, style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(cell, area);
}

fn draw_players(frame: &mut Frame, area: Rect, app: &App) {
    let bombs = app.game().bombs();
    let to_move = app.game().to_move();

    let seat = |player: Player, name: &str, color: Color| {
        let marker = if to_move == Some(player) { "> " } else { "  " };
        let stock = format!(
            "{}{}",
            "B".repeat(bombs.remaining(player) as usize),
            ".".repeat(bombs.spent(player) as usize)
        );
        vec![
            Line::from(Span::styled(
                format!("{}{} ({})", marker, name, player),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("  bombs: {}", stock)),
        ]
    };

    let mut lines = seat(Player::X, app.human_name(), Color::Cyan);
    lines.push(Line::from(""));
    lines.extend(seat(Player::O, app.opponent_name(), Color::Magenta));

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Players "));
    frame.render_widget(panel, area);
}

fn draw_game_over(frame: &mut Frame, app: &App) {
    let Some(outcome) = app.game().outcome() else {
        return;
    };
    let area = center_rect(frame.area(), 44, 7);
    let color = match outcome.winner() {
        Some(Player::X) => Color::Cyan,
        Some(Player::O) => Color::Magenta,
        None => Color::Yellow,
    };

    let lines = vec![
        Line::from(Span::styled(
            banter::headline(outcome),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(banter::verdict(outcome)),
        Line::from(""),
        Line::from(Span::styled(
            "r: play again   q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Clear, area);
    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
    frame.render_widget(popup, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::vertical([
        Constraint::Length(area.height.saturating_sub(height) / 2),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Length(area.width.saturating_sub(width) / 2),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .split(vert[1])[1]
}
