//! Deal Routes - Best confirmed deal lookup

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::models::{BestDealQuery, BestDealResponse, ErrorResponse};
use crate::AppState;

/// Lowest confirmed deal price for a model, year and zip code
#[utoipa::path(
    get,
    path = "/api/deals/best",
    params(BestDealQuery),
    responses(
        (status = 200, description = "Best deal (found=false when none)", body = BestDealResponse),
        (status = 400, description = "Missing parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Deals"
)]
pub async fn best_deal(
    State(state): State<AppState>,
    params: Result<Query<BestDealQuery>, QueryRejection>,
) -> Result<Json<BestDealResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Query(params) = params.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(rejection.body_text())),
        )
    })?;

    let (Some(model), Some(year), Some(zipcode)) = (
        params.model.filter(|m| !m.is_empty()),
        params.year.filter(|y| *y != 0),
        params.zipcode.filter(|z| !z.is_empty()),
    ) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("model, year and zipcode are required")),
        ));
    };

    let deal = state
        .call_service
        .best_deal(&model, year, &zipcode)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(e.to_string()))))?;

    Ok(Json(deal.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/deals/best", get(best_deal))
}
