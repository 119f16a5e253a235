//! Haggle API Routes
//!
//! - /api/sellers - CARFAX listing proxy
//! - /api/dealers/search - Mock dealer search
//! - /api/calls - Call submission, completion callbacks and record lookups
//! - /api/deals/best - Best confirmed deal for an identical car

pub mod calls;
pub mod dealers;
pub mod deals;
pub mod sellers;
pub mod swagger;

#[cfg(test)]
pub mod test_support;
