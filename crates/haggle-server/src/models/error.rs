//! Error DTOs - Shared by every route

use serde::Serialize;
use utoipa::ToSchema;

/// Plain error body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
