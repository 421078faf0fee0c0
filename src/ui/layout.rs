//! Layout components (form area, status bar)

use crate::app::App;
use crate::state::NotificationKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the form area and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar with the newest notification
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.state.form.snapshot();
    let mut spans = vec![];

    let (marker, color) = if snapshot.submitting {
        (" ◌ ", Color::Yellow)
    } else {
        (" ● ", Color::Green)
    };
    spans.push(Span::styled(marker, Style::default().fg(color)));

    if let Some(notification) = app.state.current_notification() {
        let color = match notification.kind {
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
            NotificationKind::Info => Color::Yellow,
        };
        spans.push(Span::styled(
            notification.message.as_str(),
            Style::default().fg(color),
        ));
    } else {
        let pending = snapshot.errors.len();
        if pending > 0 {
            spans.push(Span::styled(
                format!("{pending} campo(s) com erro"),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
