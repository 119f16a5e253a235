//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    BestDealResponse,
    // Call models
    CallFinishRequest,
    CallFinishResponse,
    CallListResponse,
    CallLookupResponse,
    CallRecordResponse,
    CallSubmitRequest,
    CallSubmitResponse,
    // Dealer models
    DealerErrorResponse,
    DealerResponse,
    DealerSearchRequest,
    DealerSearchResponse,
    // Shared
    ErrorResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Call endpoints
        super::calls::submit_calls,
        super::calls::finish_call,
        super::calls::list_calls,
        super::calls::get_call_by_user,
        // Deal endpoints
        super::deals::best_deal,
        // Dealer endpoints
        super::dealers::search_dealers,
        // Seller endpoints
        super::sellers::get_sellers,
    ),
    info(
        title = "Haggle API",
        version = "0.1.0",
        description = "Dealer negotiation gateway\n\nProxies listing search, returns dealer matches and hands dealer calls to the calling agent.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Calls", description = "Calls - Dealer call submission and completion"),
        (name = "Deals", description = "Deals - Best confirmed price lookup"),
        (name = "Dealers", description = "Dealers - Dealer search"),
        (name = "Sellers", description = "Sellers - CARFAX listing search"),
    ),
    components(
        schemas(
            // Calls
            CallSubmitRequest,
            CallSubmitResponse,
            CallFinishRequest,
            CallFinishResponse,
            CallRecordResponse,
            CallListResponse,
            CallLookupResponse,
            // Deals
            BestDealResponse,
            // Dealers
            DealerSearchRequest,
            DealerResponse,
            DealerSearchResponse,
            DealerErrorResponse,
            // Shared
            ErrorResponse,
        )
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/calls",
            "/api/calls/submit",
            "/api/calls/finish",
            "/api/calls/user/{user_id}",
            "/api/deals/best",
            "/api/dealers/search",
            "/api/sellers",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
