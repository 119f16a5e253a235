//! Services
//!
//! Stand-alone helpers used by the routes.

pub mod mock_dealers;
