//! Seller Routes - CARFAX listing proxy

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use haggle::ListingQuery;

use crate::models::{ErrorResponse, SellersQuery};
use crate::AppState;

/// Search vehicle listings near a zip code
#[utoipa::path(
    get,
    path = "/api/sellers",
    params(SellersQuery),
    responses(
        (status = 200, description = "Upstream listing payload"),
        (status = 400, description = "Missing zip", body = ErrorResponse),
        (status = 500, description = "Upstream failure", body = ErrorResponse)
    ),
    tag = "Sellers"
)]
pub async fn get_sellers(
    State(state): State<AppState>,
    Query(params): Query<SellersQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let zip = params.zip.filter(|z| !z.is_empty()).ok_or((
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("zip parameter is required")),
    ))?;

    let query = ListingQuery::new(zip, params.radius, params.model);

    let listings = state.listings.search(&query).await.map_err(|e| {
        tracing::error!("Listing search failed for zip {}: {}", query.zip, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(format!("Failed to fetch data: {e}"))),
        )
    })?;

    Ok(Json(listings))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/sellers", get(get_sellers))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::application::fakes::StaticListings;
    use crate::routes::test_support::{get, TestApp};

    #[tokio::test]
    async fn test_defaults_applied_and_payload_passed_through() {
        let app = TestApp::with_listings(StaticListings::returning(
            json!({"searchArea": {"zip": "75007"}, "listings": [{"vin": "X1"}]}),
        ));

        let (status, body) = app.send(get("/api/sellers?zip=75007")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["listings"][0]["vin"], "X1");
        let query = &app.listings.queries()[0];
        assert_eq!(query.radius, "50");
        assert_eq!(query.model, "RAV4");
    }

    #[tokio::test]
    async fn test_missing_zip() {
        let app = TestApp::new();

        let (status, body) = app.send(get("/api/sellers?model=Camry")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "zip parameter is required");
        assert!(app.listings.queries().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let app = TestApp::with_listings(StaticListings::failing("CARFAX API returned status 403: denied"));

        let (status, body) = app.send(get("/api/sellers?zip=75007&radius=10")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Failed to fetch data"));
        assert!(error.contains("403"));
    }
}
