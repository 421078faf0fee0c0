//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    forms::draw_register_form(frame, main_area, app);

    layout::draw_status_bar(frame, status_area, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockRegistrationApi;
    use crate::config::FormConfig;
    use crate::state::FieldName;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_labels_and_submit_button() {
        let app = App::with_api(FormConfig::default(), Arc::new(MockRegistrationApi::new()));
        let screen = render(&app);
        assert!(screen.contains("Cadastro"));
        assert!(screen.contains("Telefone Celular"));
        assert!(screen.contains("Cadastrar"));
    }

    #[test]
    fn test_renders_field_error_and_loading_state() {
        let mut app = App::with_api(FormConfig::default(), Arc::new(MockRegistrationApi::new()));
        app.state.form.set_error(FieldName::Cpf, "CPF inválido");
        app.state.form.set_submitting(true);
        let screen = render(&app);
        assert!(screen.contains("CPF inválido"));
        assert!(screen.contains("Carregando..."));
    }

    #[test]
    fn test_password_hidden_by_default() {
        let mut app = App::with_api(FormConfig::default(), Arc::new(MockRegistrationApi::new()));
        app.state.form.set_value(FieldName::Password, "Senha@123");
        assert!(!render(&app).contains("Senha@123"));
        app.state.reveal_password = true;
        assert!(render(&app).contains("Senha@123"));
    }
}
