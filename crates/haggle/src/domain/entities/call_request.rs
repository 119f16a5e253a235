//! CallRequest - One requested dealer call in a submission batch

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// A single call the client wants the agent to place
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallRequest {
    pub model: String,
    pub year: i32,
    pub zipcode: String,
    pub dealer_name: String,
    pub phone_number: String,
    pub msrp: i64,
    pub listing_price: i64,
    /// Caller-supplied correlation string, not unique
    pub user_id: String,
}

impl CallRequest {
    /// Check the required negotiation-target fields
    pub fn validate(&self, index: usize) -> Result<(), DomainError> {
        if self.model.is_empty()
            || self.year == 0
            || self.zipcode.is_empty()
            || self.dealer_name.is_empty()
            || self.phone_number.is_empty()
        {
            return Err(DomainError::Validation(format!(
                "Request {index}: Missing required fields (model, year, zipcode, dealer_name, phone_number)"
            )));
        }
        Ok(())
    }

    /// Validate a whole batch. One bad element rejects all of them.
    pub fn validate_batch(batch: &[CallRequest]) -> Result<(), DomainError> {
        if batch.is_empty() {
            return Err(DomainError::Validation(
                "At least one call request is required".to_string(),
            ));
        }
        batch
            .iter()
            .enumerate()
            .try_for_each(|(index, request)| request.validate(index))
    }
}
