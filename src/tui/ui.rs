//! UI rendering functions
//!
//! Single-screen layout:
//! - Header: title, hostname, recording indicator
//! - Sensor view: scrollable component/sensor/value listing
//! - Footer: key help and the transient status line

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{App, DisplayRow};

/// Fractional digits shown for sensor values
const DISPLAY_PRECISION: usize = 4;

/// Main drawing function
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Sensor view
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_sensors(f, app, chunks[1]);
    draw_footer(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let mut spans = vec![
        Span::styled(
            "Telemetry Monitor",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {}", host)),
    ];

    if app.recording {
        spans.push(Span::styled(
            "  ● REC",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        if let Some(file) = &app.recording_file {
            spans.push(Span::styled(
                format!("  {}", file),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_sensors(f: &mut Frame, app: &mut App, area: ratatui::layout::Rect) {
    // Remember the viewport so scrolling can clamp against it
    app.viewport_height = area.height.saturating_sub(2);

    let lines: Vec<Line> = app
        .rows
        .iter()
        .map(|row| match row {
            DisplayRow::Component(name) => Line::from(Span::styled(
                name.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            DisplayRow::Sensor { name, kind, value } => {
                let value_text = match value {
                    Some(v) => format!("{:>14.prec$}", v, prec = DISPLAY_PRECISION),
                    None => format!("{:>14}", app.missing_placeholder),
                };
                let value_style = if value.is_some() {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Line::from(vec![
                    Span::raw(format!("  {:<28}", name)),
                    Span::styled(
                        format!("{:<14}", kind.to_string()),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(value_text, value_style),
                ])
            }
            DisplayRow::Blank => Line::from(""),
        })
        .collect();

    let sensors = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Sensors"))
        .scroll((app.scroll, 0));
    f.render_widget(sensors, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let help = "q quit │ ↑/↓ PgUp/PgDn scroll │ r record │ f flush";
    let line = match &app.status_message {
        Some(message) => Line::from(vec![
            Span::raw(help),
            Span::raw("  "),
            Span::styled(message.clone(), Style::default().fg(Color::Yellow)),
        ]),
        None => Line::from(help),
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
