//! Dealer Routes - Mock dealer search

use axum::{extract::rejection::JsonRejection, http::StatusCode, routing::post, Json, Router};

use crate::models::{DealerErrorResponse, DealerSearchRequest, DealerSearchResponse};
use crate::services::mock_dealers;
use crate::AppState;

fn dealer_error(error: &str, message: String) -> (StatusCode, Json<DealerErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(DealerErrorResponse {
            success: false,
            error: error.to_string(),
            message,
        }),
    )
}

/// Search dealers carrying a vehicle
#[utoipa::path(
    post,
    path = "/api/dealers/search",
    request_body = DealerSearchRequest,
    responses(
        (status = 200, description = "Matching dealers", body = DealerSearchResponse),
        (status = 400, description = "Invalid or incomplete criteria", body = DealerErrorResponse)
    ),
    tag = "Dealers"
)]
pub async fn search_dealers(
    payload: Result<Json<DealerSearchRequest>, JsonRejection>,
) -> Result<Json<DealerSearchResponse>, (StatusCode, Json<DealerErrorResponse>)> {
    let Json(req) =
        payload.map_err(|rejection| dealer_error("Invalid request body", rejection.body_text()))?;

    if !req.is_complete() {
        return Err(dealer_error(
            "Missing required fields",
            "Make, Model, Version, and ZipCode are required".to_string(),
        ));
    }

    tracing::info!(
        "Searching for: {} {} {} near {} (radius: {} miles)",
        req.make,
        req.model,
        req.version,
        req.zip_code,
        req.radius_miles
    );

    let dealers = mock_dealers::generate(&req);

    Ok(Json(DealerSearchResponse {
        success: true,
        count: dealers.len(),
        dealers,
        message: "Successfully retrieved dealers".to_string(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/dealers/search", post(search_dealers))
}
