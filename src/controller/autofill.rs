//! Zip-code autofill: fills address and city from a lookup result

use crate::api::{Address, ApiError};
use crate::state::{FieldName, FormStore, Notification};

pub const NOT_FOUND_MESSAGE: &str = "Não foi possível encontrar o CEP informado";

/// Digits to look up on blur, or `None` when the zip code is incomplete
pub fn lookup_key(store: &FormStore) -> Option<String> {
    store
        .field(FieldName::Zipcode)
        .is_complete()
        .then(|| store.canonical(FieldName::Zipcode))
}

/// Push a lookup result into the store.
///
/// A miss, a failed request, or an address lacking street or city leaves
/// address and city untouched and yields a notice instead.
pub fn apply_lookup(
    store: &mut FormStore,
    zipcode: &str,
    result: Result<Option<Address>, ApiError>,
) -> Option<Notification> {
    match result {
        Ok(Some(address)) if address.street.trim().is_empty() || address.city.trim().is_empty() => {
            tracing::info!("Zip code {zipcode} resolved without street or city");
            Some(Notification::info(NOT_FOUND_MESSAGE))
        }
        Ok(Some(address)) => {
            tracing::debug!(
                "Zip code {zipcode} resolved to {}, {} ({})",
                address.street,
                address.city,
                address.state.as_deref().unwrap_or("-")
            );
            store.set_value(FieldName::Address, address.street);
            store.set_value(FieldName::City, address.city);
            store.clear_error(FieldName::Address);
            store.clear_error(FieldName::City);
            None
        }
        Ok(None) => {
            tracing::info!("Zip code {zipcode} not found");
            Some(Notification::info(NOT_FOUND_MESSAGE))
        }
        Err(e) => {
            tracing::warn!("Zip code lookup for {zipcode} failed: {e}");
            Some(Notification::info(NOT_FOUND_MESSAGE))
        }
    }
}
