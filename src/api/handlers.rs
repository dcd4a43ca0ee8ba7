//! HTTP request handlers for the garde pay API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{recompute_shifts, summarize, valuate_shift};
use crate::config::RateBook;
use crate::models::{Intervention, RateTable, Shift};

use super::request::{RecomputeRequest, ValuationRequest};
use super::response::{ApiError, ApiErrorResponse, RecomputeResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
///
/// - `POST /valuate` values one shift
/// - `POST /recompute` revalues a list of shifts and totals them
/// - `GET /grades` lists the configured grade rates
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/valuate", post(valuate_handler))
        .route("/recompute", post(recompute_handler))
        .route("/grades", get(grades_handler))
        .with_state(state)
}

/// Handler for POST /valuate endpoint.
async fn valuate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValuationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing valuation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let rates = match resolve_rates(state.rate_book(), request.grade.as_deref(), request.rates) {
        Ok(rates) => rates,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                code = %err.error.code,
                "Could not resolve rates"
            );
            return err.into_response();
        }
    };

    let zone = state.rate_book().time_zone();
    let shift = request.shift.into_shift(zone);
    let interventions: Vec<Intervention> = request
        .interventions
        .into_iter()
        .map(|intervention| intervention.into_intervention(zone))
        .collect();

    let start_time = Instant::now();
    let valuation = valuate_shift(&shift, &interventions, &rates);
    info!(
        correlation_id = %correlation_id,
        shift_id = %shift.id,
        activity_type = %shift.activity_type,
        duration_minutes = valuation.duration_minutes,
        total_amount = %valuation.total_amount,
        duration_us = start_time.elapsed().as_micros(),
        "Valuation completed successfully"
    );

    json_response(StatusCode::OK, valuation)
}

/// Handler for POST /recompute endpoint.
async fn recompute_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecomputeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing recompute request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let rates = match resolve_rates(state.rate_book(), request.grade.as_deref(), request.rates) {
        Ok(rates) => rates,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                code = %err.error.code,
                "Could not resolve rates"
            );
            return err.into_response();
        }
    };

    let zone = state.rate_book().time_zone();
    let shifts: Vec<Shift> = request
        .shifts
        .into_iter()
        .map(|shift| shift.into_shift(zone))
        .collect();
    let interventions: Vec<Intervention> = request
        .interventions
        .into_iter()
        .map(|intervention| intervention.into_intervention(zone))
        .collect();

    let start_time = Instant::now();
    let valued = recompute_shifts(&shifts, &interventions, &rates);
    let summary = summarize(&valued);
    info!(
        correlation_id = %correlation_id,
        shifts_count = valued.len(),
        total_hours = %summary.total_hours,
        total_amount = %summary.total_amount,
        duration_us = start_time.elapsed().as_micros(),
        "Recompute completed successfully"
    );

    json_response(
        StatusCode::OK,
        RecomputeResponse {
            shifts: valued,
            summary,
        },
    )
}

/// Handler for GET /grades endpoint.
async fn grades_handler(State(state): State<AppState>) -> impl IntoResponse {
    json_response(StatusCode::OK, state.rate_book().clone())
}

/// Picks the rates for a request: explicit rates first, then the selected
/// grade, then the default grade.
fn resolve_rates(
    rate_book: &RateBook,
    grade: Option<&str>,
    explicit: Option<RateTable>,
) -> Result<RateTable, ApiErrorResponse> {
    if let Some(rates) = explicit {
        rates.validate("request").map_err(|err| {
            ApiErrorResponse::bad_request(ApiError::validation_error(err.to_string()))
        })?;
        return Ok(rates);
    }

    rate_book
        .rate_table_or_default(grade)
        .cloned()
        .map_err(Into::into)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
