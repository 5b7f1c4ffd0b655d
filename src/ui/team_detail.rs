//! Team detail screen UI
//!
//! Renders club information, active competitions and the squad for a single
//! team in a scrollable bordered box.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, DetailView};
use crate::cache::Storage;
use crate::data::{Fetch, SquadRole, TeamDetail};

mod colors {
    use ratatui::style::Color;

    /// Section headers
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Favorite marker
    pub const FAVORITE: Color = Color::Yellow;
    /// Load failures
    pub const ERROR: Color = Color::Red;
}

/// Renders the team detail screen
pub fn render<F: Fetch, S: Storage>(frame: &mut Frame, app: &App<F, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let (title, lines) = match &app.detail {
        DetailView::Loaded(detail) if Some(detail.id) == app.route().team_id() => {
            let favorite = app.favorites().is_favorite(detail.id);
            (format!(" {} ", detail.name), detail_lines(detail, favorite))
        }
        DetailView::Failed { id, message } if Some(*id) == app.route().team_id() => (
            " Team ".to_string(),
            vec![Line::from(Span::styled(
                format!("Could not load team {}: {}", id, message),
                Style::default().fg(colors::ERROR),
            ))],
        ),
        _ => (
            " Team ".to_string(),
            vec![Line::from(Span::styled(
                "Loading team...",
                Style::default().fg(colors::SECONDARY),
            ))],
        ),
    };

    let content = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::HEADER)),
        )
        .scroll((app.detail_scroll_offset, 0));
    frame.render_widget(content, chunks[0]);

    let help = Paragraph::new(Line::from(Span::styled(
        "↑/↓ scroll  s favorite  b back  n forward  r refresh  ? help  q quit",
        Style::default().fg(colors::SECONDARY),
    )));
    frame.render_widget(help, chunks[1]);
}

/// Builds the body lines for a loaded team
pub fn detail_lines(detail: &TeamDetail, favorite: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut heading = vec![Span::styled(
        detail.name.clone(),
        Style::default()
            .fg(colors::PRIMARY)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(tla) = &detail.tla {
        heading.push(Span::styled(
            format!("  ({})", tla),
            Style::default().fg(colors::SECONDARY),
        ));
    }
    if favorite {
        heading.push(Span::styled("  ★ favorite", Style::default().fg(colors::FAVORITE)));
    }
    lines.push(Line::from(heading));
    lines.push(Line::from(""));

    let fields = [
        ("Area", detail.area.as_ref().map(|a| a.name.clone())),
        ("Founded", detail.founded.map(|y| y.to_string())),
        ("Venue", detail.venue.clone()),
        ("Colors", detail.club_colors.clone()),
        ("Address", detail.address.clone()),
        ("Website", detail.website.clone()),
        ("Email", detail.email.clone()),
        ("Phone", detail.phone.clone()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            lines.push(field_line(label, value));
        }
    }

    if !detail.active_competitions.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_header("Competitions"));
        for competition in &detail.active_competitions {
            lines.push(Line::from(format!("  {}", competition.name)));
        }
    }

    lines.push(Line::from(""));
    lines.push(section_header("Squad"));
    if detail.squad.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No squad listed",
            Style::default().fg(colors::SECONDARY),
        )));
    }
    for member in &detail.squad {
        let role = match member.role {
            SquadRole::Player => member.position.clone().unwrap_or_else(|| "Player".to_string()),
            SquadRole::Coach => "Coach".to_string(),
            SquadRole::Other => "Staff".to_string(),
        };
        let number = member
            .shirt_number
            .map(|n| format!("{:>3}", n))
            .unwrap_or_else(|| "   ".to_string());
        lines.push(Line::from(vec![
            Span::styled(number, Style::default().fg(colors::SECONDARY)),
            Span::raw("  "),
            Span::styled(format!("{:<28}", member.name), Style::default().fg(colors::PRIMARY)),
            Span::styled(role, Style::default().fg(colors::SECONDARY)),
        ]));
    }

    lines
}

fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(colors::HEADER)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), Style::default().fg(colors::SECONDARY)),
        Span::styled(value, Style::default().fg(colors::PRIMARY)),
    ])
}
