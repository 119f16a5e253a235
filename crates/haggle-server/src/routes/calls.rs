//! Call Routes - Dealer call lifecycle
//!
//! HTTP handlers that delegate to CallService for business logic.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use haggle::{CallRequest, CallStatus, DomainError};

use crate::application::CompletionOutcome;
use crate::models::{
    CallFinishRequest, CallFinishResponse, CallListResponse, CallLookupResponse,
    CallRecordResponse, CallSubmitRequest, CallSubmitResponse, ErrorResponse, ListCallsQuery,
};
use crate::AppState;

fn submit_error(status: StatusCode, message: String) -> (StatusCode, Json<CallSubmitResponse>) {
    (
        status,
        Json(CallSubmitResponse {
            success: false,
            message,
            data: None,
        }),
    )
}

/// Submit a batch of dealer calls
#[utoipa::path(
    post,
    path = "/api/calls/submit",
    request_body = Vec<CallSubmitRequest>,
    responses(
        (status = 200, description = "Calls initiated", body = CallSubmitResponse),
        (status = 400, description = "Invalid or incomplete batch", body = CallSubmitResponse),
        (status = 500, description = "Calling agent failed", body = CallSubmitResponse)
    ),
    tag = "Calls"
)]
pub async fn submit_calls(
    State(state): State<AppState>,
    payload: Result<Json<Vec<CallSubmitRequest>>, JsonRejection>,
) -> (StatusCode, Json<CallSubmitResponse>) {
    let Json(requests) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("Error decoding call submission: {}", rejection.body_text());
            return submit_error(
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", rejection.body_text()),
            );
        }
    };

    let batch: Vec<CallRequest> = requests.into_iter().map(Into::into).collect();

    match state.call_service.submit(batch).await {
        Ok(submission) => {
            let unpersisted = submission
                .calls
                .iter()
                .filter(|c| !c.persistence.is_persisted())
                .count();
            if unpersisted > 0 {
                tracing::warn!("{} call(s) forwarded without a stored record", unpersisted);
            }

            (
                StatusCode::OK,
                Json(CallSubmitResponse {
                    success: true,
                    message: "Calls initiated successfully".to_string(),
                    data: Some(submission.agent_response),
                }),
            )
        }
        Err(DomainError::Validation(message)) => submit_error(StatusCode::BAD_REQUEST, message),
        Err(e) => submit_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to initiate calls: {e}"),
        ),
    }
}

/// Completion callback from the calling agent
#[utoipa::path(
    post,
    path = "/api/calls/finish",
    request_body = CallFinishRequest,
    responses(
        (status = 200, description = "Completion acknowledged", body = CallFinishResponse),
        (status = 400, description = "Missing user_id", body = CallFinishResponse)
    ),
    tag = "Calls"
)]
pub async fn finish_call(
    State(state): State<AppState>,
    payload: Result<Json<CallFinishRequest>, JsonRejection>,
) -> (StatusCode, Json<CallFinishResponse>) {
    let bad_request = |message: String| {
        (
            StatusCode::BAD_REQUEST,
            Json(CallFinishResponse {
                success: false,
                message,
            }),
        )
    };

    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("Error decoding call finish request: {}", rejection.body_text());
            return bad_request(format!("Invalid request body: {}", rejection.body_text()));
        }
    };

    match state.call_service.complete(request.into()).await {
        Ok(outcome) => {
            if !matches!(outcome, CompletionOutcome::Recorded) {
                tracing::debug!("Completion acknowledged without update: {:?}", outcome);
            }
            (
                StatusCode::OK,
                Json(CallFinishResponse {
                    success: true,
                    message: "Call completion recorded successfully".to_string(),
                }),
            )
        }
        Err(e) => bad_request(match e {
            DomainError::Validation(message) => message,
            other => other.to_string(),
        }),
    }
}

/// List call records, newest first
#[utoipa::path(
    get,
    path = "/api/calls",
    params(ListCallsQuery),
    responses(
        (status = 200, description = "Call records", body = CallListResponse),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Calls"
)]
pub async fn list_calls(
    State(state): State<AppState>,
    Query(params): Query<ListCallsQuery>,
) -> Result<Json<CallListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let status = params
        .status
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<CallStatus>())
        .transpose()
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e))))?;

    let calls: Vec<CallRecordResponse> = state
        .call_service
        .list_calls(status)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(e.to_string()))))?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(CallListResponse {
        success: true,
        count: calls.len(),
        calls,
    }))
}

/// Get the first call recorded for a user
#[utoipa::path(
    get,
    path = "/api/calls/user/{user_id}",
    params(("user_id" = String, Path, description = "Client user id")),
    responses(
        (status = 200, description = "Call found", body = CallLookupResponse),
        (status = 404, description = "No call for this user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Calls"
)]
pub async fn get_call_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<CallLookupResponse>, (StatusCode, Json<ErrorResponse>)> {
    let record = state
        .call_service
        .get_by_user_id(&user_id)
        .await
        .map_err(|e| match e {
            DomainError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Call not found")))
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(e.to_string()))),
        })?;

    Ok(Json(CallLookupResponse {
        success: true,
        call: record.into(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/calls", get(list_calls))
        .route("/api/calls/submit", post(submit_calls))
        .route("/api/calls/finish", post(finish_call))
        .route("/api/calls/user/:user_id", get(get_call_by_user))
}
