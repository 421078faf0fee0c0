//! Form rendering module
//!
//! - `field_renderer`: text and checkbox field rendering
//! - `register_form`: the registration form screen

mod field_renderer;
mod register_form;

pub use register_form::draw_register_form;
