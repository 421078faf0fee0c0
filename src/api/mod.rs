//! HTTP clients for the zip-code lookup and registration endpoints

mod client;
mod traits;
mod types;

pub use client::HttpRegistrationApi;
pub use traits::RegistrationApi;
pub use types::{Address, ApiError, RegisterResponse};

#[cfg(test)]
pub use traits::MockRegistrationApi;
