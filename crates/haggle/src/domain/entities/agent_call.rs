//! AgentCall - Enriched call forwarded to the calling agent

use serde::{Deserialize, Serialize};

use crate::domain::entities::CallRequest;
use crate::domain::value_objects::BestDeal;

/// Make sent with every call; the dealer network is single-brand
pub const DEALER_MAKE: &str = "toyota";

/// Wire element of the agent's `/calls/init` batch.
///
/// The agent echoes `user_id` back on completion, so it carries the
/// server-generated call id rather than the client's user id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentCall {
    pub user_id: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub zipcode: String,
    pub dealer_name: String,
    pub phone_number: String,
    pub msrp: String,
    pub listing_price: String,
    pub is_dealing: bool,
    pub competing_price: i64,
}

impl AgentCall {
    pub fn new(call_id: &str, request: &CallRequest, best_deal: BestDeal) -> Self {
        Self {
            user_id: call_id.to_string(),
            make: DEALER_MAKE.to_string(),
            model: request.model.clone(),
            year: request.year.to_string(),
            zipcode: request.zipcode.clone(),
            dealer_name: request.dealer_name.clone(),
            phone_number: request.phone_number.clone(),
            msrp: request.msrp.to_string(),
            listing_price: request.listing_price.to_string(),
            is_dealing: best_deal.found,
            competing_price: best_deal.price,
        }
    }

    /// Call id this element is correlated by
    pub fn call_id(&self) -> &str {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CallRequest {
        CallRequest {
            model: "Camry".to_string(),
            year: 2024,
            zipcode: "75007".to_string(),
            dealer_name: "X Toyota".to_string(),
            phone_number: "555-1234".to_string(),
            msrp: 30000,
            listing_price: 28000,
            user_id: "u1".to_string(),
        }
    }

    #[test]
    fn test_fields_are_stringified() {
        let call = AgentCall::new("call-1", &request(), BestDeal::none());
        assert_eq!(call.call_id(), "call-1");
        assert_eq!(call.make, "toyota");
        assert_eq!(call.year, "2024");
        assert_eq!(call.msrp, "30000");
        assert_eq!(call.listing_price, "28000");
        assert!(!call.is_dealing);
        assert_eq!(call.competing_price, 0);
    }

    #[test]
    fn test_best_deal_sets_dealing() {
        let call = AgentCall::new("call-1", &request(), BestDeal::at(27000));
        assert!(call.is_dealing);
        assert_eq!(call.competing_price, 27000);
    }

    #[test]
    fn test_wire_shape() {
        let call = AgentCall::new("call-1", &request(), BestDeal::none());
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["user_id"], "call-1");
        assert_eq!(json["dealer_name"], "X Toyota");
        assert_eq!(json["is_dealing"], false);
        assert_eq!(json["competing_price"], 0);
    }
}
