//! Registration form rendering

use super::field_renderer::{draw_checkbox_field, draw_field, FieldView};
use crate::app::App;
use crate::controller::SubmitPhase;
use crate::state::{error_for, FieldName, Focus};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;

const LEFT_COLUMN: [FieldName; 5] = [
    FieldName::Name,
    FieldName::Email,
    FieldName::Password,
    FieldName::PasswordConfirmation,
    FieldName::Phone,
];

const RIGHT_COLUMN: [FieldName; 5] = [
    FieldName::Cpf,
    FieldName::Zipcode,
    FieldName::Address,
    FieldName::City,
    FieldName::Terms,
];

/// Draw the registration form
pub fn draw_register_form(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Cadastro ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT * LEFT_COLUMN.len() as u16), // Fields
            Constraint::Length(BUTTON_HEIGHT),                           // Submit
            Constraint::Length(1),                                       // Help text
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    draw_column(frame, columns[0], app, &LEFT_COLUMN);
    draw_column(frame, columns[1], app, &RIGHT_COLUMN);

    let submitting = app.phase() == SubmitPhase::Submitting;
    let label = if submitting { "Carregando..." } else { "Cadastrar" };
    render_button(
        frame,
        rows[1],
        label,
        app.state.focus == Focus::SubmitButton,
        !submitting,
    );

    draw_help(frame, rows[2], app);
}

fn draw_column(frame: &mut Frame, area: Rect, app: &App, fields: &[FieldName]) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let form = &app.state.form;
    for (name, chunk) in fields.iter().zip(chunks.iter()) {
        let view = FieldView {
            is_active: app.state.focus == Focus::Field(*name),
            reveal: app.state.reveal_password,
            error: error_for(form.errors(), *name),
        };
        let field = form.field(*name);
        if name.is_checkbox() {
            draw_checkbox_field(frame, *chunk, field, view);
        } else {
            draw_field(frame, *chunk, field, view);
        }
    }
}

fn draw_help(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(Color::Cyan);
    let mut spans = vec![
        Span::styled("Tab", key_style),
        Span::raw(": next field  "),
        Span::styled(crate::platform::SUBMIT_SHORTCUT, key_style),
        Span::raw(": submit  "),
        Span::styled(crate::platform::REVEAL_SHORTCUT, key_style),
        Span::raw(if app.state.reveal_password {
            ": hide password  "
        } else {
            ": show password  "
        }),
    ];
    if app.state.focus == Focus::Field(FieldName::Terms) {
        spans.push(Span::styled("Space", key_style));
        spans.push(Span::raw(": toggle  "));
    }
    spans.push(Span::styled("Esc", key_style));
    spans.push(Span::raw(": quit"));

    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
