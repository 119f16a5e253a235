//! Haggle Data Models
//!
//! Request/response DTOs for the HTTP gateway.
//! - Call: submission, completion and call record listings
//! - Dealer: mock dealer search
//! - Listing: CARFAX listing proxy
//! - Error: shared error body

mod call;
mod dealer;
mod error;
mod listing;

pub use call::*;
pub use dealer::*;
pub use error::*;
pub use listing::*;
