//! CallRecord - Negotiation Call Attempt
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CallStatus;

/// CallRecord - One persisted phone-call attempt and its eventual outcome
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallRecord {
    pub id: i64,
    pub call_id: String,
    pub user_id: String,
    pub model: String,
    pub year: i32,
    pub zipcode: String,
    pub dealer_name: String,
    pub phone_number: String,
    pub msrp: i64,
    pub listing_price: i64,
    pub status: CallStatus,
    pub is_available: Option<bool>,
    pub deal_price: Option<i64>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a new pending CallRecord.
///
/// The store assigns `id`, `status` and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCallRecord {
    pub user_id: String,
    pub call_id: String,
    pub model: String,
    pub year: i32,
    pub zipcode: String,
    pub dealer_name: String,
    pub phone_number: String,
    pub msrp: i64,
    pub listing_price: i64,
}

/// Outcome reported by the calling agent once a call has ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallCompletion {
    pub call_id: String,
    pub is_available: bool,
    pub deal_price: i64,
    pub remarks: String,
}

impl CallRecord {
    /// Materialize a pending record from its insert fields
    pub fn pending(id: i64, new: NewCallRecord) -> Self {
        let now = Utc::now();
        Self {
            id,
            call_id: new.call_id,
            user_id: new.user_id,
            model: new.model,
            year: new.year,
            zipcode: new.zipcode,
            dealer_name: new.dealer_name,
            phone_number: new.phone_number,
            msrp: new.msrp,
            listing_price: new.listing_price,
            status: CallStatus::Pending,
            is_available: None,
            deal_price: None,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a completion callback. Later callbacks overwrite earlier ones.
    pub fn complete(&mut self, completion: &CallCompletion) {
        self.status = CallStatus::from_availability(completion.is_available);
        self.is_available = Some(completion.is_available);
        self.deal_price = Some(completion.deal_price);
        self.remarks = Some(completion.remarks.clone());
        self.updated_at = Utc::now();
    }

    /// Whether this record counts toward the best-deal lookup
    pub fn is_confirmed_deal(&self) -> bool {
        self.status == CallStatus::Completed
            && self.is_available == Some(true)
            && self.deal_price.is_some_and(|p| p > 0)
    }

    /// Whether this record describes the given car
    pub fn matches_car(&self, model: &str, year: i32, zipcode: &str) -> bool {
        self.model == model && self.year == year && self.zipcode == zipcode
    }
}
