//! Form state store: values, field errors and the submitting flag

use super::field::{FieldName, FieldValue, FormField};
use super::validation::FieldErrors;
use serde::Serialize;
use std::collections::BTreeMap;

/// Current value of every field, keyed by field name
///
/// Serializes as the registration payload: a JSON object with one key per
/// field and `terms` as a boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<FieldName, FieldValue>);

impl Default for FormValues {
    fn default() -> Self {
        Self(
            FieldName::ALL
                .into_iter()
                .map(|f| (f, FieldValue::initial(f)))
                .collect(),
        )
    }
}

impl FormValues {
    pub fn get(&self, field: FieldName) -> Option<&FieldValue> {
        self.0.get(&field)
    }

    /// Text of a field, empty for missing or boolean values
    pub fn text(&self, field: FieldName) -> &str {
        self.get(field).map(FieldValue::as_text).unwrap_or("")
    }

    pub fn flag(&self, field: FieldName) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_bool)
    }

    pub fn insert(&mut self, field: FieldName, value: FieldValue) {
        self.0.insert(field, value);
    }
}

/// Aggregate view of the form handed to renderers and tests
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSnapshot {
    pub values: FormValues,
    pub errors: FieldErrors,
    pub submitting: bool,
}

/// Lookup helper used by the field renderer
pub fn error_for(errors: &FieldErrors, name: FieldName) -> Option<&str> {
    errors.get(&name).map(String::as_str)
}

/// Single owner of the registration form state
#[derive(Debug, Clone)]
pub struct FormStore {
    fields: Vec<FormField>,
    errors: FieldErrors,
    submitting: bool,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStore {
    pub fn new() -> Self {
        Self {
            fields: FieldName::ALL.into_iter().map(FormField::new).collect(),
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    pub fn field(&self, name: FieldName) -> &FormField {
        // fields is built from FieldName::ALL, so every name has a slot
        &self.fields[Self::index(name)]
    }

    pub fn field_mut(&mut self, name: FieldName) -> &mut FormField {
        &mut self.fields[Self::index(name)]
    }

    fn index(name: FieldName) -> usize {
        FieldName::ALL
            .iter()
            .position(|f| *f == name)
            .unwrap_or_default()
    }

    /// Programmatic setter used by user input handlers and autofill.
    /// Works on disabled fields too.
    pub fn set_value(&mut self, field: FieldName, value: impl Into<FieldValue>) -> bool {
        let accepted = self.field_mut(field).set(value.into());
        if !accepted {
            tracing::warn!("Rejected value of the wrong kind for field {field}");
        }
        accepted
    }

    pub fn value(&self, field: FieldName) -> &FieldValue {
        &self.field(field).value
    }

    /// Mask-stripped value of a field
    pub fn canonical(&self, field: FieldName) -> String {
        self.field(field).canonical()
    }

    pub fn values(&self) -> FormValues {
        let mut values = FormValues::default();
        for field in &self.fields {
            values.insert(field.name, field.value.clone());
        }
        values
    }

    /// Values with masked fields replaced by their canonical digits
    pub fn canonical_values(&self) -> FormValues {
        let mut values = self.values();
        for field in self.fields.iter().filter(|f| f.mask.is_some()) {
            values.insert(field.name, FieldValue::Text(field.canonical()));
        }
        values
    }

    /// Set a field error, replacing any previous message for that field
    pub fn set_error(&mut self, field: FieldName, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear_error(&mut self, field: FieldName) {
        self.errors.remove(&field);
    }

    pub fn replace_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: FieldName) -> Option<&str> {
        error_for(&self.errors, field)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Restore the initial empty state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: self.values(),
            errors: self.errors.clone(),
            submitting: self.submitting,
        }
    }
}
