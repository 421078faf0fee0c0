//! Trait abstraction for the remote endpoints to enable mocking in tests

use super::types::{Address, ApiError, RegisterResponse};
use crate::state::FormValues;
use async_trait::async_trait;

/// Remote operations used by the registration form
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Resolve a zip code (digits only) to an address.
    /// `Ok(None)` means the service has no match.
    async fn lookup_zipcode(&self, zipcode: &str) -> Result<Option<Address>, ApiError>;

    /// Submit the registration payload
    async fn register(&self, payload: &FormValues) -> Result<RegisterResponse, ApiError>;
}
