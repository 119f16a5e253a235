//! Service Ports
//!
//! Abstract interfaces for external services.

mod call_agent;
mod listing_search;

pub use call_agent::*;
pub use listing_search::*;
