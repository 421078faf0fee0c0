//! Application state and core logic

use crate::api::{Address, ApiError, HttpRegistrationApi, RegisterResponse, RegistrationApi};
use crate::config::FormConfig;
use crate::controller::{
    autofill, begin_submit, finish_submit, BeginSubmit, SubmitOutcome, SubmitPhase,
};
use crate::state::{AppState, FieldName, Focus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Completed network call, delivered back to the UI loop
#[derive(Debug)]
pub enum ApiEvent {
    AddressResolved {
        zipcode: String,
        result: Result<Option<Address>, ApiError>,
    },
    Registered(Result<RegisterResponse, ApiError>),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    config: FormConfig,
    api: Arc<dyn RegistrationApi>,
    events_tx: UnboundedSender<ApiEvent>,
    events_rx: UnboundedReceiver<ApiEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App talking to the configured endpoints
    pub fn new(config: FormConfig) -> Result<Self> {
        let api = HttpRegistrationApi::new(&config)?;
        Ok(Self::with_api(config, Arc::new(api)))
    }

    pub fn with_api(config: FormConfig, api: Arc<dyn RegistrationApi>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            config,
            api,
            events_tx,
            events_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn phase(&self) -> SubmitPhase {
        SubmitPhase::of(&self.state.form)
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let command = key.modifiers.contains(KeyModifiers::CONTROL)
            || key.modifiers.contains(crate::platform::COMMAND_MODIFIER);

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('s') if command => self.submit(),
            KeyCode::Char('p') if command => {
                self.state.reveal_password = !self.state.reveal_password;
            }
            KeyCode::Tab | KeyCode::Down => self.set_focus(self.state.next_focus()),
            KeyCode::BackTab | KeyCode::Up => self.set_focus(self.state.prev_focus()),
            KeyCode::Enter => match self.state.focus {
                Focus::SubmitButton => self.submit(),
                Focus::Field(FieldName::Terms) => self.toggle_terms(),
                Focus::Field(_) => self.set_focus(self.state.next_focus()),
            },
            KeyCode::Char(' ') if self.state.focus == Focus::Field(FieldName::Terms) => {
                self.toggle_terms();
            }
            KeyCode::Char(c) if !command => {
                if let Some(field) = self.state.focused_field() {
                    if self.state.form.field_mut(field).input_char(c) {
                        self.after_edit(field);
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.state.focused_field() {
                    if self.state.form.field_mut(field).backspace() {
                        self.after_edit(field);
                    }
                }
            }
            _ => {}
        }
    }

    fn toggle_terms(&mut self) {
        if self.state.form.field_mut(FieldName::Terms).toggle() {
            self.after_edit(FieldName::Terms);
        }
    }

    fn after_edit(&mut self, field: FieldName) {
        self.state
            .revalidate_after_edit(field, self.config.validation_mode);
    }

    /// Move focus, firing the blur handler of the field being left
    pub fn set_focus(&mut self, focus: Focus) {
        let previous = self.state.focus;
        self.state.focus = focus;
        if previous != focus {
            if let Focus::Field(field) = previous {
                self.on_field_blur(field);
            }
        }
    }

    fn on_field_blur(&mut self, field: FieldName) {
        if field == FieldName::Zipcode {
            self.on_zipcode_blur();
        }
    }

    /// Start one address lookup for the current zip code.
    ///
    /// Results are applied in completion order, so when lookups overlap the
    /// last one to resolve wins.
    pub fn on_zipcode_blur(&mut self) {
        let Some(zipcode) = autofill::lookup_key(&self.state.form) else {
            tracing::debug!("Zip code incomplete, skipping lookup");
            return;
        };

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.lookup_zipcode(&zipcode).await;
            // The receiver only goes away when the app is shutting down
            let _ = tx.send(ApiEvent::AddressResolved { zipcode, result });
        });
    }

    /// Validate and, when valid, send the registration request
    pub fn submit(&mut self) {
        match begin_submit(&mut self.state.form, self.config.payload_format) {
            BeginSubmit::Ignored => {
                tracing::debug!("Submission already in flight, ignoring submit");
            }
            BeginSubmit::Invalid(count) => {
                self.state.submit_attempted = true;
                tracing::debug!("Submit blocked by {count} field error(s)");
            }
            BeginSubmit::Ready(payload) => {
                self.state.submit_attempted = true;
                let api = Arc::clone(&self.api);
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = api.register(&payload).await;
                    let _ = tx.send(ApiEvent::Registered(result));
                });
            }
        }
    }

    /// Apply every network result that has arrived since the last tick
    pub fn poll_api_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_api_event(event);
        }
    }

    fn apply_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::AddressResolved { zipcode, result } => {
                if let Some(notice) = autofill::apply_lookup(&mut self.state.form, &zipcode, result)
                {
                    self.state.push_notification(notice);
                }
            }
            ApiEvent::Registered(result) => {
                let (outcome, notice) = finish_submit(&mut self.state.form, result);
                tracing::debug!("Submission finished: {outcome:?}");
                if outcome == SubmitOutcome::Success {
                    // The form is fresh again: no revalidation until the next submit
                    self.state.submit_attempted = false;
                }
                self.state.push_notification(notice);
            }
        }
    }

    /// Per-frame housekeeping
    pub fn tick(&mut self) {
        self.poll_api_events();
        self.state.prune_notifications(Instant::now());
    }

    /// Wait for the next network result and apply it
    #[cfg(test)]
    async fn next_api_event(&mut self) {
        let event = self
            .events_rx
            .recv()
            .await
            .expect("sender is owned by the app");
        self.apply_api_event(event);
    }
}
