//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rendering options for a single field
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldView<'a> {
    pub is_active: bool,
    /// Show secret fields in clear text
    pub reveal: bool,
    pub error: Option<&'a str>,
}

/// Draw a form field with its error in the bottom border
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, view: FieldView) {
    let (style, border_style) = if field.disabled {
        (
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            Style::default().fg(Color::DarkGray),
        )
    } else if view.is_active {
        (Style::default().fg(Color::Cyan), Style::default().fg(Color::Cyan))
    } else if view.error.is_some() {
        (Style::default(), Style::default().fg(Color::Red))
    } else {
        (Style::default(), Style::default().fg(Color::DarkGray))
    };

    let display_value = field.display_value(view.reveal);
    let cursor = if view.is_active { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_value, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let mut block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = view.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(content.block(block), area);
}

/// Draw a checkbox field
pub fn draw_checkbox_field(frame: &mut Frame, area: Rect, field: &FormField, view: FieldView) {
    let display = format!("{} {}", field.display_value(false), field.label());

    let style = if view.is_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let border_style = if view.is_active {
        Style::default().fg(Color::Yellow)
    } else if view.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = view.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(display).style(style).block(block);
    frame.render_widget(paragraph, area);
}
