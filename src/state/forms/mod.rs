//! Form domain layer
//!
//! Field values, input masks, the registration schema and the store that
//! owns the form state.

mod field;
mod form_state;
mod mask;
mod validation;

pub use field::{FieldName, FormField};
pub use form_state::{error_for, FormStore, FormValues};
pub use validation::{validate, validate_field, ValidationMode};

#[cfg(test)]
pub use field::FieldValue;
#[cfg(test)]
pub use form_state::FormSnapshot;
#[cfg(test)]
pub use validation::PASSWORDS_MISMATCH;
