use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::parse_stay_range;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub checkin: Option<String>,
    pub checkout: Option<String>,
}

pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Response {
    let (checkin, checkout) =
        match parse_stay_range(query.checkin.as_deref(), query.checkout.as_deref()) {
            Ok(range) => range,
            Err(reason) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "available": false, "reason": reason })),
                )
                    .into_response();
            }
        };

    match state.store.find_reserved_overlap(checkin, checkout).await {
        Ok(Some(_)) => Json(serde_json::json!({
            "available": false,
            "reason": "Those dates are already booked."
        }))
        .into_response(),
        Ok(None) => Json(serde_json::json!({ "available": true })).into_response(),
        Err(e) => AppError::Store(e.to_string()).into_response(),
    }
}
