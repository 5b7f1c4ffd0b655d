//! UI rendering module for Kickoff
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components. The screen drawn is chosen
//! from the current navigation state alone.

pub mod help_overlay;
pub mod team_detail;
pub mod team_list;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::cache::Storage;
use crate::nav::History;
use crate::data::Fetch;
use crate::nav::RouteName;

pub use help_overlay::render as render_help_overlay;

/// Renders the whole frame for the current application state
pub fn render<F: Fetch, S: Storage>(frame: &mut Frame, app: &App<F, S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.route().route {
        RouteName::Home | RouteName::Favorite => team_list::render(frame, app, chunks[1]),
        RouteName::Detail => team_detail::render(frame, app, chunks[1]),
        RouteName::NotFound => render_not_found(frame, chunks[1]),
    }

    render_status(frame, app, chunks[2]);

    if app.show_help {
        render_help_overlay(frame);
    }
}

fn render_header<F: Fetch, S: Storage>(frame: &mut Frame, app: &App<F, S>, area: Rect) {
    let current = app.route().route;
    let tab = |label: &'static str, route: RouteName| {
        if current == route {
            Span::styled(
                format!(" {} ", label),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(Color::Gray))
        }
    };

    let line = Line::from(vec![
        Span::styled(
            "⚽ Kickoff  ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        tab("Teams", RouteName::Home),
        Span::raw(" "),
        tab("Favorites", RouteName::Favorite),
        Span::raw("   "),
        Span::styled(
            app.nav.history().current_path().to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(header, area);
}

fn render_not_found(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "404 - Page not found",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press h for the team list or b to go back",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(paragraph, area);
}

/// Bottom line: load error, last refresh time and history availability
fn render_status<F: Fetch, S: Storage>(frame: &mut Frame, app: &App<F, S>, area: Rect) {
    let mut spans = Vec::new();

    if let Some(error) = &app.error {
        spans.push(Span::styled(error.clone(), Style::default().fg(Color::Red)));
    } else if let Some(refreshed) = app.last_refresh {
        spans.push(Span::styled(
            format!("Updated {}", refreshed.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let history = app.nav.history();
    let arrow = |enabled: bool, label: &'static str| {
        let color = if enabled { Color::Gray } else { Color::DarkGray };
        Span::styled(label, Style::default().fg(color))
    };
    if !spans.is_empty() {
        spans.push(Span::raw("  "));
    }
    spans.push(arrow(history.can_go_back(), "◀ back"));
    spans.push(Span::raw(" "));
    spans.push(arrow(history.can_go_forward(), "forward ▶"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
