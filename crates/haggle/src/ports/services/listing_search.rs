//! Listing Search Port
//!
//! Abstract interface for the third-party vehicle listing search.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

pub const DEFAULT_RADIUS: &str = "50";
pub const DEFAULT_MODEL: &str = "RAV4";

/// Listing search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub zip: String,
    pub radius: String,
    pub model: String,
}

impl ListingQuery {
    /// Build a query, filling in the default radius and model
    pub fn new(zip: impl Into<String>, radius: Option<String>, model: Option<String>) -> Self {
        Self {
            zip: zip.into(),
            radius: radius
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_RADIUS.to_string()),
            model: model
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

/// Service interface for vehicle listing search
#[async_trait]
pub trait ListingSearch: Send + Sync {
    /// Search listings near a zip code; returns the upstream payload
    async fn search(&self, query: &ListingQuery) -> Result<serde_json::Value, DomainError>;
}
