//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod best_deal;
mod call_status;

pub use best_deal::*;
pub use call_status::*;
