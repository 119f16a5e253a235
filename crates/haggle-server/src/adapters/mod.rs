//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod agent;
pub mod carfax;
pub mod postgres;

// Re-exports
pub use agent::HttpCallAgent;
pub use carfax::CarfaxClient;
pub use postgres::PgCallRepository;
