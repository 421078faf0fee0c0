//! Form field value objects

use super::mask::{apply_mask, unmask, MaskSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a registration form field
///
/// The declaration order is the form order: validation runs and errors are
/// reported in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Name,
    Email,
    Password,
    PasswordConfirmation,
    Phone,
    Cpf,
    Zipcode,
    Address,
    City,
    Terms,
}

impl FieldName {
    pub const ALL: [FieldName; 10] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Password,
        FieldName::PasswordConfirmation,
        FieldName::Phone,
        FieldName::Cpf,
        FieldName::Zipcode,
        FieldName::Address,
        FieldName::City,
        FieldName::Terms,
    ];

    /// Wire key used in submission payloads and server error bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::PasswordConfirmation => "password_confirmation",
            Self::Phone => "phone",
            Self::Cpf => "cpf",
            Self::Zipcode => "zipcode",
            Self::Address => "address",
            Self::City => "city",
            Self::Terms => "terms",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Nome Completo",
            Self::Email => "E-mail",
            Self::Password => "Senha",
            Self::PasswordConfirmation => "Confirmar Senha",
            Self::Phone => "Telefone Celular",
            Self::Cpf => "CPF",
            Self::Zipcode => "CEP",
            Self::Address => "Endereço",
            Self::City => "Cidade",
            Self::Terms => "Aceito os termos e condições",
        }
    }

    /// Display template for masked fields
    pub fn mask_template(&self) -> Option<&'static str> {
        match self {
            Self::Phone => Some("(99) 99999-9999"),
            Self::Cpf => Some("999.999.999-99"),
            Self::Zipcode => Some("99999-999"),
            _ => None,
        }
    }

    /// Fields filled only through autofill
    pub fn is_autofilled(&self) -> bool {
        matches!(self, Self::Address | Self::City)
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password | Self::PasswordConfirmation)
    }

    pub fn is_checkbox(&self) -> bool {
        matches!(self, Self::Terms)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a key is not part of the field vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field name: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Initial value for a field: empty text, or unchecked for the checkbox
    pub fn initial(field: FieldName) -> Self {
        if field.is_checkbox() {
            FieldValue::Bool(false)
        } else {
            FieldValue::Text(String::new())
        }
    }

    /// Get the text value (returns empty string for boolean values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Bool(_) => "",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }

    fn same_kind(&self, other: &FieldValue) -> bool {
        matches!(
            (self, other),
            (FieldValue::Text(_), FieldValue::Text(_)) | (FieldValue::Bool(_), FieldValue::Bool(_))
        )
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: FieldName,
    pub value: FieldValue,
    pub mask: Option<MaskSpec>,
    /// Disabled fields only change through `set`, never through keystrokes
    pub disabled: bool,
}

impl FormField {
    pub fn new(name: FieldName) -> Self {
        Self {
            name,
            value: FieldValue::initial(name),
            mask: name.mask_template().map(MaskSpec::parse),
            disabled: name.is_autofilled(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.name.label()
    }

    /// Programmatic assignment. Returns false when the value kind does not
    /// fit the field.
    pub fn set(&mut self, value: FieldValue) -> bool {
        if !self.value.same_kind(&value) {
            return false;
        }
        self.value = match (value, &self.mask) {
            (FieldValue::Text(s), Some(mask)) => FieldValue::Text(apply_mask(&s, mask)),
            (v, _) => v,
        };
        true
    }

    /// Push a typed character. Returns true when the value changed.
    pub fn input_char(&mut self, c: char) -> bool {
        if self.disabled {
            return false;
        }
        match (&mut self.value, &self.mask) {
            (FieldValue::Text(s), Some(mask)) => {
                let mut raw = unmask(s, mask);
                raw.push(c);
                let masked = apply_mask(&raw, mask);
                if masked == *s {
                    return false;
                }
                *s = masked;
                true
            }
            (FieldValue::Text(s), None) => {
                s.push(c);
                true
            }
            (FieldValue::Bool(_), _) => false,
        }
    }

    /// Remove the last character. Masked fields drop the last canonical char.
    pub fn backspace(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        match (&mut self.value, &self.mask) {
            (FieldValue::Text(s), Some(mask)) => {
                let mut raw = unmask(s, mask);
                if raw.pop().is_none() {
                    return false;
                }
                *s = apply_mask(&raw, mask);
                true
            }
            (FieldValue::Text(s), None) => s.pop().is_some(),
            (FieldValue::Bool(_), _) => false,
        }
    }

    /// Flip a checkbox value
    pub fn toggle(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        match &mut self.value {
            FieldValue::Bool(b) => {
                *b = !*b;
                true
            }
            FieldValue::Text(_) => false,
        }
    }

    /// True when a masked field holds as many chars as its template allows
    pub fn is_complete(&self) -> bool {
        match &self.mask {
            Some(mask) => self.canonical().chars().count() == mask.capacity(),
            None => !self.value.as_text().is_empty(),
        }
    }

    /// Mask-stripped value used for lookups
    pub fn canonical(&self) -> String {
        match (&self.value, &self.mask) {
            (FieldValue::Text(s), Some(mask)) => unmask(s, mask),
            (v, _) => v.as_text().to_string(),
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self, reveal: bool) -> String {
        match &self.value {
            FieldValue::Text(s) if self.name.is_secret() && !reveal => "•".repeat(s.chars().count()),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Bool(true) => "[x]".to_string(),
            FieldValue::Bool(false) => "[ ]".to_string(),
        }
    }
}
