use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{BookingPatch, BookingStatus, PaymentStatus};
use crate::services::notify;
use crate::state::AppState;

/// Admin calls must present the shared token before anything else runs. An
/// unset server-side token locks the admin surface entirely.
fn check_admin(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let token = headers
        .get("x-admin-token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if expected_token.is_empty() || token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Value>, AppError> {
    check_admin(&headers, &state.config.admin_token)?;

    let status = match query.status.as_deref() {
        Some(s) => Some(
            BookingStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("unknown status filter: {s}")))?,
        ),
        None => None,
    };

    let rows = state
        .store
        .list_bookings(status)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    Ok(Json(serde_json::json!({ "ok": true, "rows": rows })))
}

/// Only these two fields may be patched; anything else in the body is
/// ignored, and values outside the closed enums are rejected.
#[derive(Deserialize)]
pub struct AdminPatchRequest {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
}

pub async fn patch_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    payload: Result<Json<AdminPatchRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    check_admin(&headers, &state.config.admin_token)?;

    let Json(req) = payload.map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))?;

    let patch = BookingPatch {
        status: req.status,
        payment_status: req.payment_status,
        ..Default::default()
    };
    if patch.is_empty() {
        return Err(AppError::BadRequest(
            "nothing to update: allowed fields are status and payment_status".to_string(),
        ));
    }

    state
        .store
        .update_booking(id, &patch)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    let mut changes = Vec::new();
    if let Some(status) = patch.status {
        changes.push(format!("status={}", status.as_str()));
    }
    if let Some(payment_status) = patch.payment_status {
        changes.push(format!("payment_status={}", payment_status.as_str()));
    }
    tracing::info!(booking_id = id, changes = %changes.join(", "), "booking updated by admin");

    let alert = format!("Booking #{id} updated by admin: {}", changes.join(", "));
    notify::broadcast(state.notifier.as_ref(), &alert).await;

    Ok(Json(serde_json::json!({ "ok": true })))
}
