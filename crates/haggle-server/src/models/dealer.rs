//! Dealer DTOs - Mock dealer search

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Dealer search criteria
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DealerSearchRequest {
    pub make: String,
    pub model: String,
    pub version: String,
    pub zip_code: String,
    pub radius_miles: i32,
}

impl DealerSearchRequest {
    pub fn is_complete(&self) -> bool {
        !(self.make.is_empty()
            || self.model.is_empty()
            || self.version.is_empty()
            || self.zip_code.is_empty())
    }
}

/// A dealer with a priced listing
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealerResponse {
    pub dealer_name: String,
    pub phone: String,
    pub address: String,
    pub msrp: f64,
    pub discounted_price: f64,
    pub mpg: i32,
    pub distance: f64,
}

/// Dealer search envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct DealerSearchResponse {
    pub success: bool,
    pub dealers: Vec<DealerResponse>,
    pub count: usize,
    pub message: String,
}

/// Dealer search error envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct DealerErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}
