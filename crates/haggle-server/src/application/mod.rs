//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod call_service;

#[cfg(test)]
pub mod fakes;

pub use call_service::{CallService, CompletionOutcome, PersistOutcome, Submission, SubmittedCall};
