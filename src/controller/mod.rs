//! Form controllers
//!
//! Pure state transitions driven by the app: the submission pipeline and the
//! zip-code autofill. Network calls happen elsewhere; these only consume
//! their results.

pub mod autofill;
pub mod submission;

pub use submission::{begin_submit, finish_submit, BeginSubmit, SubmitOutcome, SubmitPhase};
