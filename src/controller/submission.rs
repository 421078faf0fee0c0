//! Submission controller: validate, serialize, submit, then map the response
//!
//! The phase moves `Idle -> Submitting -> {Success, Failed} -> Idle`. The
//! `submitting` flag on the store is the only record of `Submitting`; the
//! outcome returned by [`finish_submit`] is transient.

use crate::api::{ApiError, RegisterResponse};
use crate::config::PayloadFormat;
use crate::state::{validate, FieldName, FormStore, FormValues, Notification};

pub const SUCCESS_MESSAGE: &str = "Usuário cadastrado com sucesso";
pub const FAILURE_MESSAGE: &str = "Erro ao cadastrar usuário";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
}

impl SubmitPhase {
    pub fn of(store: &FormStore) -> Self {
        if store.is_submitting() {
            SubmitPhase::Submitting
        } else {
            SubmitPhase::Idle
        }
    }
}

/// Result of a submit request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeginSubmit {
    /// A submission is already in flight; nothing changed
    Ignored,
    /// Local validation failed with this many field errors; still idle
    Invalid(usize),
    /// Store is now submitting; send this payload
    Ready(FormValues),
}

/// How a finished submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    Failed,
}

/// Validate the whole form and, when it passes, enter `Submitting`
pub fn begin_submit(store: &mut FormStore, format: PayloadFormat) -> BeginSubmit {
    if store.is_submitting() {
        return BeginSubmit::Ignored;
    }

    let errors = validate(&store.values());
    if !errors.is_empty() {
        let count = errors.len();
        store.replace_errors(errors);
        return BeginSubmit::Invalid(count);
    }

    store.replace_errors(Default::default());
    store.set_submitting(true);
    let payload = match format {
        PayloadFormat::Masked => store.values(),
        PayloadFormat::Canonical => store.canonical_values(),
    };
    BeginSubmit::Ready(payload)
}

/// Apply the registration response and return to `Idle`
pub fn finish_submit(
    store: &mut FormStore,
    result: Result<RegisterResponse, ApiError>,
) -> (SubmitOutcome, Notification) {
    store.set_submitting(false);

    match result {
        Ok(RegisterResponse::Accepted) => {
            tracing::info!("Registration accepted");
            store.reset();
            (SubmitOutcome::Success, Notification::success(SUCCESS_MESSAGE))
        }
        Ok(RegisterResponse::Rejected { status, errors }) => {
            tracing::info!("Registration rejected with status {status}: {} field error(s)", errors.len());
            for (key, message) in errors {
                match key.parse::<FieldName>() {
                    Ok(field) => store.set_error(field, message),
                    Err(e) => tracing::warn!("Ignoring server error for {e}: {message}"),
                }
            }
            (SubmitOutcome::Failed, Notification::error(FAILURE_MESSAGE))
        }
        Err(e) => {
            tracing::error!("Registration request failed: {e}");
            (SubmitOutcome::Failed, Notification::error(FAILURE_MESSAGE))
        }
    }
}
