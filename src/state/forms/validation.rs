//! Registration schema: per-field rules and their messages

use super::field::FieldName;
use super::form_state::FormValues;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Field errors keyed by field, iterated in form order
pub type FieldErrors = BTreeMap<FieldName, String>;

pub const NAME_MAX_LEN: usize = 255;
pub const PASSWORD_MIN_LEN: usize = 8;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("email regex is valid")
});

static PASSWORD_CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9@#$]{8,50}$").expect("password regex is valid")
});

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{2}\) \d{5}-\d{4}$").expect("phone regex is valid"));

static CPF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").expect("cpf regex is valid"));

static ZIPCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}-?\d{3}$").expect("zipcode regex is valid"));

/// When field errors are refreshed while the user types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Validate on submit, then re-validate edited fields after the first attempt
    #[default]
    OnSubmit,
    /// Re-validate every edited field immediately
    OnChange,
}

/// Message shown for an empty required field
pub fn required_message(field: FieldName) -> &'static str {
    match field {
        FieldName::Name => "O campo nome precisa ser preenchido",
        FieldName::Email => "O campo email precisa ser preenchido",
        FieldName::Password => "O campo de senha precisa ser preenchido",
        FieldName::PasswordConfirmation => "A confirmação da senha precisa ser preenchida",
        FieldName::Phone => "O campo de telefone precisa ser preenchido",
        FieldName::Cpf => "O campo de CPF precisa ser preenchido",
        FieldName::Zipcode => "O campo de CEP precisa ser preenchido",
        FieldName::Address => "O campo de endereço precisa ser preenchido",
        FieldName::City => "O campo de cidade precisa ser preenchido",
        FieldName::Terms => "Você precisa aceitar os termos de uso",
    }
}

pub const NAME_TOO_LONG: &str = "O nome deve ter no máximo 255 caracteres";
pub const EMAIL_INVALID: &str = "E-mail inválido";
pub const PASSWORD_TOO_SHORT: &str = "A senha deve ter no mínimo 8 caracteres";
pub const PASSWORD_INVALID: &str = "Formato de senha inválida";
pub const CONFIRMATION_TOO_SHORT: &str = "A confirmação da senha deve ter no mínimo 8 caracteres";
pub const PASSWORDS_MISMATCH: &str = "As senhas devem coincidir";
pub const PHONE_INVALID: &str = "Telefone inválido";
pub const CPF_INVALID: &str = "CPF inválido";
pub const ZIPCODE_INVALID: &str = "CEP inválido";

/// Validate every field and collect all violations, one message per field
pub fn validate(values: &FormValues) -> FieldErrors {
    FieldName::ALL
        .into_iter()
        .filter_map(|field| validate_field(field, values).map(|msg| (field, msg)))
        .collect()
}

/// Run one field's rules in order and return the first failing message
pub fn validate_field(field: FieldName, values: &FormValues) -> Option<String> {
    if field == FieldName::Terms {
        return match values.flag(FieldName::Terms) {
            Some(true) => None,
            _ => Some(required_message(field).to_string()),
        };
    }

    let value = values.text(field);
    if value.is_empty() {
        return Some(required_message(field).to_string());
    }

    let failure = match field {
        FieldName::Name => (value.chars().count() > NAME_MAX_LEN).then_some(NAME_TOO_LONG),
        FieldName::Email => (!EMAIL_REGEX.is_match(value)).then_some(EMAIL_INVALID),
        FieldName::Password => check_password(value),
        FieldName::PasswordConfirmation => {
            if value != values.text(FieldName::Password) {
                Some(PASSWORDS_MISMATCH)
            } else if value.chars().count() < PASSWORD_MIN_LEN {
                Some(CONFIRMATION_TOO_SHORT)
            } else {
                None
            }
        }
        FieldName::Phone => (!PHONE_REGEX.is_match(value)).then_some(PHONE_INVALID),
        FieldName::Cpf => (!CPF_REGEX.is_match(value)).then_some(CPF_INVALID),
        FieldName::Zipcode => (!ZIPCODE_REGEX.is_match(value)).then_some(ZIPCODE_INVALID),
        FieldName::Address | FieldName::City | FieldName::Terms => None,
    };

    failure.map(str::to_string)
}

fn check_password(value: &str) -> Option<&'static str> {
    if value.chars().count() < PASSWORD_MIN_LEN {
        return Some(PASSWORD_TOO_SHORT);
    }
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_symbol = value.chars().any(|c| matches!(c, '@' | '#' | '$'));

    if has_upper && has_lower && has_digit && has_symbol && PASSWORD_CHARSET_REGEX.is_match(value)
    {
        None
    } else {
        Some(PASSWORD_INVALID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FieldValue;
    use pretty_assertions::assert_eq;

    fn valid_values() -> FormValues {
        let mut values = FormValues::default();
        values.insert(FieldName::Name, "Maria Silva".into());
        values.insert(FieldName::Email, "maria@example.com".into());
        values.insert(FieldName::Password, "Senha@123".into());
        values.insert(FieldName::PasswordConfirmation, "Senha@123".into());
        values.insert(FieldName::Phone, "(11) 98765-4321".into());
        values.insert(FieldName::Cpf, "123.456.789-01".into());
        values.insert(FieldName::Zipcode, "01001-000".into());
        values.insert(FieldName::Address, "Praça da Sé".into());
        values.insert(FieldName::City, "São Paulo".into());
        values.insert(FieldName::Terms, FieldValue::Bool(true));
        values
    }

    #[test]
    fn test_valid_values_have_no_errors() {
        assert!(validate(&valid_values()).is_empty());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate(&FormValues::default());
        assert_eq!(errors.len(), FieldName::ALL.len());
        let order: Vec<_> = errors.keys().copied().collect();
        assert_eq!(order, FieldName::ALL.to_vec());
    }

    #[test]
    fn test_empty_required_field_yields_only_required_message() {
        for field in FieldName::ALL {
            let mut values = valid_values();
            values.insert(field, FieldValue::initial(field));
            let errors = validate(&values);
            assert_eq!(
                errors.get(&field).map(String::as_str),
                Some(required_message(field)),
                "field {field}"
            );
        }
    }

    #[test]
    fn test_name_max_length() {
        let mut values = valid_values();
        values.insert(FieldName::Name, "a".repeat(NAME_MAX_LEN).into());
        assert!(validate_field(FieldName::Name, &values).is_none());
        values.insert(FieldName::Name, "a".repeat(NAME_MAX_LEN + 1).into());
        assert_eq!(
            validate_field(FieldName::Name, &values).as_deref(),
            Some(NAME_TOO_LONG)
        );
    }

    #[test]
    fn test_email_pattern() {
        let mut values = valid_values();
        for bad in ["maria", "maria@", "maria@example", "@example.com", "ma ria@x.com"] {
            values.insert(FieldName::Email, bad.into());
            assert_eq!(
                validate_field(FieldName::Email, &values).as_deref(),
                Some(EMAIL_INVALID),
                "{bad}"
            );
        }
        values.insert(FieldName::Email, "Maria.Silva+x@Mail.COM.br".into());
        assert!(validate_field(FieldName::Email, &values).is_none());
    }

    #[test]
    fn test_password_rules() {
        let cases = [
            ("Ab@1", Some(PASSWORD_TOO_SHORT)),
            ("abcdefg@1", Some(PASSWORD_INVALID)),
            ("ABCDEFG@1", Some(PASSWORD_INVALID)),
            ("Abcdefg@x", Some(PASSWORD_INVALID)),
            ("Abcdefg12", Some(PASSWORD_INVALID)),
            ("Abcdef!@1", Some(PASSWORD_INVALID)),
            ("Abcdefg#1", None),
            ("Abcdefg$1", None),
        ];
        for (password, expected) in cases {
            let mut values = valid_values();
            values.insert(FieldName::Password, password.into());
            assert_eq!(
                validate_field(FieldName::Password, &values).as_deref(),
                expected,
                "{password}"
            );
        }

        let mut values = valid_values();
        values.insert(FieldName::Password, format!("Ab@1{}", "x".repeat(47)).into());
        assert_eq!(
            validate_field(FieldName::Password, &values).as_deref(),
            Some(PASSWORD_INVALID)
        );
    }

    #[test]
    fn test_mismatch_attaches_to_confirmation() {
        let mut values = valid_values();
        values.insert(FieldName::PasswordConfirmation, "Senha@124".into());
        let errors = validate(&values);
        assert_eq!(
            errors.get(&FieldName::PasswordConfirmation).map(String::as_str),
            Some(PASSWORDS_MISMATCH)
        );
        assert!(!errors.contains_key(&FieldName::Password));
    }

    #[test]
    fn test_mismatch_wins_over_confirmation_length() {
        let mut values = valid_values();
        values.insert(FieldName::PasswordConfirmation, "abc".into());
        assert_eq!(
            validate_field(FieldName::PasswordConfirmation, &values).as_deref(),
            Some(PASSWORDS_MISMATCH)
        );
    }

    #[test]
    fn test_matching_short_confirmation_reports_length() {
        let mut values = valid_values();
        values.insert(FieldName::Password, "Ab@1".into());
        values.insert(FieldName::PasswordConfirmation, "Ab@1".into());
        let errors = validate(&values);
        assert_eq!(
            errors.get(&FieldName::PasswordConfirmation).map(String::as_str),
            Some(CONFIRMATION_TOO_SHORT)
        );
        assert_eq!(
            errors.get(&FieldName::Password).map(String::as_str),
            Some(PASSWORD_TOO_SHORT)
        );
    }

    #[test]
    fn test_masked_field_patterns() {
        let cases = [
            (FieldName::Phone, "(11) 9876-4321", PHONE_INVALID),
            (FieldName::Phone, "11987654321", PHONE_INVALID),
            (FieldName::Cpf, "123.456.789", CPF_INVALID),
            (FieldName::Zipcode, "0100-000", ZIPCODE_INVALID),
        ];
        for (field, value, message) in cases {
            let mut values = valid_values();
            values.insert(field, value.into());
            assert_eq!(validate_field(field, &values).as_deref(), Some(message));
        }
    }

    #[test]
    fn test_zipcode_hyphen_optional() {
        let mut values = valid_values();
        values.insert(FieldName::Zipcode, "01001000".into());
        assert!(validate_field(FieldName::Zipcode, &values).is_none());
    }

    #[test]
    fn test_terms_must_be_true() {
        let mut values = valid_values();
        values.insert(FieldName::Terms, FieldValue::Bool(false));
        assert_eq!(
            validate_field(FieldName::Terms, &values).as_deref(),
            Some(required_message(FieldName::Terms))
        );
    }

    #[test]
    fn test_validation_mode_serde() {
        let mode: ValidationMode = serde_json::from_str("\"on_change\"").unwrap();
        assert_eq!(mode, ValidationMode::OnChange);
        assert_eq!(ValidationMode::default(), ValidationMode::OnSubmit);
    }
}
