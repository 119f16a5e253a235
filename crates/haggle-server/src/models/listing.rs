//! Listing DTOs - CARFAX proxy

use serde::Deserialize;
use utoipa::IntoParams;

/// Listing search query string
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SellersQuery {
    /// Zip code to search around (required)
    pub zip: Option<String>,
    /// Search radius in miles (default 50)
    pub radius: Option<String>,
    /// Vehicle model (default RAV4)
    pub model: Option<String>,
}
