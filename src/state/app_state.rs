//! Application state definitions

use super::forms::{validate_field, FieldName, FormStore, ValidationMode};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notification stays in the status bar
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Maximum queued notifications; the oldest is dropped first
pub const MAX_NOTIFICATIONS: usize = 3;

/// Which control has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldName),
    SubmitButton,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Field(FieldName::Name)
    }
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Non-blocking message shown in the status bar
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= NOTIFICATION_TTL
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub form: FormStore,
    pub focus: Focus,
    /// Show password fields in clear text
    pub reveal_password: bool,
    /// Set on the first submit attempt; enables re-validation while typing
    pub submit_attempted: bool,
    pub notifications: VecDeque<Notification>,
}

impl AppState {
    /// Controls that can take focus, in order. Disabled fields are skipped.
    pub fn focus_order(&self) -> Vec<Focus> {
        FieldName::ALL
            .into_iter()
            .filter(|f| !self.form.field(*f).disabled)
            .map(Focus::Field)
            .chain(std::iter::once(Focus::SubmitButton))
            .collect()
    }

    pub fn next_focus(&self) -> Focus {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        order[(current + 1) % order.len()]
    }

    pub fn prev_focus(&self) -> Focus {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        if current == 0 {
            order[order.len() - 1]
        } else {
            order[current - 1]
        }
    }

    pub fn focused_field(&self) -> Option<FieldName> {
        match self.focus {
            Focus::Field(f) => Some(f),
            Focus::SubmitButton => None,
        }
    }

    /// Refresh field errors after the user changed `field`
    pub fn revalidate_after_edit(&mut self, field: FieldName, mode: ValidationMode) {
        let active = match mode {
            ValidationMode::OnChange => true,
            ValidationMode::OnSubmit => self.submit_attempted,
        };
        if !active {
            return;
        }

        self.refresh_error(field);

        // The confirmation rule depends on the password
        if field == FieldName::Password {
            let confirmation = FieldName::PasswordConfirmation;
            let touched = self.form.error(confirmation).is_some()
                || !self.form.value(confirmation).as_text().is_empty();
            if touched {
                self.refresh_error(confirmation);
            }
        }
    }

    fn refresh_error(&mut self, field: FieldName) {
        match validate_field(field, &self.form.values()) {
            Some(message) => self.form.set_error(field, message),
            None => self.form.clear_error(field),
        }
    }

    pub fn push_notification(&mut self, notification: Notification) {
        if self.notifications.len() >= MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(notification);
    }

    /// Drop notifications older than the TTL
    pub fn prune_notifications(&mut self, now: Instant) {
        self.notifications.retain(|n| !n.is_expired(now));
    }

    /// Newest notification, shown in the status bar
    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.back()
    }
}
