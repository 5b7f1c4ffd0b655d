//! Team list screens
//!
//! Renders the full team list (`home`) and the favorites list (`favorite`).
//! Both show one row per team with its area and venue.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::cache::Storage;
use crate::data::Fetch;
use crate::nav::RouteName;

/// One row of a team list
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRow {
    pub id: i64,
    pub name: String,
    pub area: String,
    pub venue: String,
    pub favorite: bool,
}

/// Builds the rows for the current list screen
pub fn rows<F: Fetch, S: Storage>(app: &App<F, S>) -> Vec<TeamRow> {
    let favorites = app.favorites();
    match app.route().route {
        RouteName::Home => app
            .teams()
            .into_iter()
            .map(|t| TeamRow {
                favorite: favorites.is_favorite(t.id),
                id: t.id,
                name: t.name,
                area: t.area.map(|a| a.name).unwrap_or_default(),
                venue: t.venue.unwrap_or_default(),
            })
            .collect(),
        RouteName::Favorite => favorites
            .teams()
            .into_iter()
            .map(|d| TeamRow {
                id: d.id,
                name: d.name,
                area: d.area.map(|a| a.name).unwrap_or_default(),
                venue: d.venue.unwrap_or_default(),
                favorite: true,
            })
            .collect(),
        RouteName::Detail | RouteName::NotFound => Vec::new(),
    }
}

/// Renders the team list or favorites screen
pub fn render<F: Fetch, S: Storage>(frame: &mut Frame, app: &App<F, S>, area: Rect) {
    let title = match app.route().route {
        RouteName::Favorite => " Favorites ",
        _ => " Teams ",
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let rows = rows(app);
    let lines: Vec<Line> = if rows.is_empty() {
        vec![Line::from(Span::styled(
            empty_message(app),
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        rows.iter()
            .enumerate()
            .map(|(i, row)| render_row(row, i == app.selected_index))
            .collect()
    };

    // Keep the selection on screen
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let scroll = if visible > 0 && app.selected_index >= visible {
        (app.selected_index + 1 - visible) as u16
    } else {
        0
    };

    let list = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .scroll((scroll, 0));
    frame.render_widget(list, chunks[0]);

    let help = Paragraph::new(Line::from(Span::styled(
        "↑/↓ select  Enter open  h teams  f favorites  b back  n forward  ? help  q quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, chunks[1]);
}

fn empty_message<F: Fetch, S: Storage>(app: &App<F, S>) -> &'static str {
    match app.route().route {
        RouteName::Favorite => "No favorites yet. Open a team and press s to add it.",
        _ if app.error.is_some() => "No teams available.",
        _ => "Loading teams...",
    }
}

fn render_row(row: &TeamRow, selected: bool) -> Line<'static> {
    let marker = if selected { "▶ " } else { "  " };
    let star = if row.favorite { "★ " } else { "  " };
    let name_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(star.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(format!("{:<32}", row.name), name_style),
        Span::styled(format!("{:<16}", row.area), Style::default().fg(Color::Gray)),
        Span::styled(row.venue.clone(), Style::default().fg(Color::DarkGray)),
    ])
}
