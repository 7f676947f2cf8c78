//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, ResultsQuery, SummaryResponse};

/// Returns run parameters, the summary report, and the final-year record.
///
/// `GET /summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        run: state.run,
        summary: state.summary.clone(),
        final_year: state.results.last().cloned(),
    })
}

/// Returns per-year records, optionally filtered by calendar-year range.
///
/// `GET /results` → 200 + `Vec<AnnualResult>` JSON
/// `GET /results?from_year=N&to_year=M` → filtered range (inclusive)
/// `GET /results?from_year=2030&to_year=2026` → 400 + `ErrorResponse`
pub async fn get_results(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResultsQuery>,
) -> impl IntoResponse {
    let from = query.from_year.unwrap_or(i32::MIN);
    let to = query.to_year.unwrap_or(i32::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from_year` ({from}) must be <= `to_year` ({to})"),
            }),
        ));
    }

    let records: Vec<_> = state
        .results
        .iter()
        .filter(|r| r.year >= from && r.year <= to)
        .cloned()
        .collect();

    Ok(Json(records))
}
