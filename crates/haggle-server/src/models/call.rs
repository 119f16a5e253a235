//! Call DTOs - Submission, completion and record views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use haggle::{BestDeal, CallCompletion, CallRecord, CallRequest};

/// One requested dealer call in a submission batch
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CallSubmitRequest {
    pub model: String,
    pub year: i32,
    pub zipcode: String,
    pub dealer_name: String,
    pub phone_number: String,
    pub msrp: f64,
    pub listing_price: f64,
    pub user_id: String,
}

impl From<CallSubmitRequest> for CallRequest {
    fn from(req: CallSubmitRequest) -> Self {
        Self {
            model: req.model,
            year: req.year,
            zipcode: req.zipcode,
            dealer_name: req.dealer_name,
            phone_number: req.phone_number,
            msrp: req.msrp.round() as i64,
            listing_price: req.listing_price.round() as i64,
            user_id: req.user_id,
        }
    }
}

/// Envelope returned by the submit endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct CallSubmitResponse {
    pub success: bool,
    pub message: String,
    /// Calling agent response, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Completion callback sent by the calling agent.
///
/// `user_id` carries the call id the agent was given at submission.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CallFinishRequest {
    pub user_id: String,
    pub is_available: bool,
    pub deal_price: i64,
    pub remarks: String,
}

impl From<CallFinishRequest> for CallCompletion {
    fn from(req: CallFinishRequest) -> Self {
        Self {
            call_id: req.user_id,
            is_available: req.is_available,
            deal_price: req.deal_price,
            remarks: req.remarks,
        }
    }
}

/// Envelope returned by the finish endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct CallFinishResponse {
    pub success: bool,
    pub message: String,
}

/// Status filter for call listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCallsQuery {
    /// pending, completed or failed
    pub status: Option<String>,
}

/// Call record view
#[derive(Debug, Serialize, ToSchema)]
pub struct CallRecordResponse {
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
    pub status: String,
    pub is_available: Option<bool>,
    pub deal_price: Option<i64>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CallRecord> for CallRecordResponse {
    fn from(record: CallRecord) -> Self {
        Self {
            id: record.id,
            call_id: record.call_id,
            user_id: record.user_id,
            model: record.model,
            year: record.year,
            zipcode: record.zipcode,
            dealer_name: record.dealer_name,
            phone_number: record.phone_number,
            msrp: record.msrp,
            listing_price: record.listing_price,
            status: record.status.to_string(),
            is_available: record.is_available,
            deal_price: record.deal_price,
            remarks: record.remarks,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Call listing envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct CallListResponse {
    pub success: bool,
    pub calls: Vec<CallRecordResponse>,
    pub count: usize,
}

/// Single call envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct CallLookupResponse {
    pub success: bool,
    pub call: CallRecordResponse,
}

/// Best-deal lookup parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct BestDealQuery {
    pub model: Option<String>,
    pub year: Option<i32>,
    pub zipcode: Option<String>,
}

/// Best-deal lookup result
#[derive(Debug, Serialize, ToSchema)]
pub struct BestDealResponse {
    pub found: bool,
    pub price: i64,
}

impl From<BestDeal> for BestDealResponse {
    fn from(deal: BestDeal) -> Self {
        Self {
            found: deal.found,
            price: deal.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_tolerates_missing_fields() {
        let req: CallSubmitRequest = serde_json::from_str(r#"{"model": "Camry"}"#).unwrap();
        let domain = CallRequest::from(req);
        assert_eq!(domain.model, "Camry");
        assert_eq!(domain.year, 0);
        assert!(domain.validate(0).is_err());
    }

    #[test]
    fn test_submit_request_rounds_prices() {
        let req: CallSubmitRequest = serde_json::from_str(
            r#"{"model": "Camry", "year": 2024, "msrp": 30000.4, "listing_price": 27999.5}"#,
        )
        .unwrap();
        let domain = CallRequest::from(req);
        assert_eq!(domain.msrp, 30000);
        assert_eq!(domain.listing_price, 28000);
    }

    #[test]
    fn test_finish_request_maps_user_id_to_call_id() {
        let req: CallFinishRequest = serde_json::from_str(
            r#"{"user_id": "abc", "is_available": true, "deal_price": 26000, "remarks": "ok"}"#,
        )
        .unwrap();
        let completion = CallCompletion::from(req);
        assert_eq!(completion.call_id, "abc");
        assert_eq!(completion.deal_price, 26000);
    }

    #[test]
    fn test_submit_response_omits_missing_data() {
        let body = serde_json::to_value(CallSubmitResponse {
            success: false,
            message: "bad".to_string(),
            data: None,
        })
        .unwrap();
        assert!(body.get("data").is_none());
    }
}
