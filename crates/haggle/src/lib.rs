//! Haggle Domain Library
//!
//! Core domain types and interfaces for the Haggle dealer-negotiation gateway.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (CallRecord, CallRequest, AgentCall)
//!   - `value_objects/`: Immutable value types (CallStatus, BestDeal)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Call Store and Best-Deal Query
//!   - `services/`: Calling agent and listing search collaborators
//!
//! # Usage
//!
//! ```rust,ignore
//! use haggle::domain::{CallRecord, CallStatus};
//! use haggle::ports::{CallRepository, CallAgent};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AgentCall, BestDeal, CallCompletion, CallRecord, CallRequest, CallStatus, DomainError,
    NewCallRecord, DEALER_MAKE,
};
pub use ports::{CallAgent, CallRepository, ListingQuery, ListingSearch};
