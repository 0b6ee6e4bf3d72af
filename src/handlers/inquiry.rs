use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::{parse_stay_range, BookingStatus, NewBooking, PaymentMethod, PaymentStatus};
use crate::services::notify;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct InquiryRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub guests: Option<Value>,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    pub message: Option<String>,
    pub source: Option<String>,
    pub preferred_contact: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

/// `guests` arrives as whatever the form sent; keep it only when it is a
/// finite number or a numeric string.
fn coerce_guests(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

pub async fn submit_inquiry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InquiryRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))?;

    let name = req.name.as_deref().map(str::trim).unwrap_or_default();
    let email = req.email.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() || email.is_empty() {
        return Err(AppError::BadRequest("name and email are required".to_string()));
    }

    let (checkin, checkout) = parse_stay_range(req.checkin.as_deref(), req.checkout.as_deref())
        .map_err(AppError::BadRequest)?;

    // Best-effort only: a concurrent inquiry can pass this check before
    // either insert lands. The store has no exclusion constraint.
    let overlap = state
        .store
        .find_reserved_overlap(checkin, checkout)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;
    if overlap.is_some() {
        return Err(AppError::Conflict("Those dates are already booked.".to_string()));
    }

    let new = NewBooking {
        name: name.to_string(),
        email: email.to_string(),
        phone: req.phone.filter(|s| !s.trim().is_empty()),
        guests: coerce_guests(req.guests.as_ref()),
        checkin,
        checkout,
        message: req.message.filter(|s| !s.trim().is_empty()),
        preferred_contact: req.preferred_contact.filter(|s| !s.trim().is_empty()),
        source: req
            .source
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "website".to_string()),
        status: BookingStatus::Inquiry,
        payment_method: req.payment_method.unwrap_or(PaymentMethod::PayLater),
        payment_status: PaymentStatus::Unpaid,
        amount_lkr: state.config.deposit_lkr,
    };

    let booking = state
        .store
        .insert_booking(&new)
        .await
        .map_err(|e| AppError::Store(e.to_string()))?;

    tracing::info!(booking_id = booking.id, "new inquiry recorded");

    let nights = (checkout - checkin).num_days();
    let mut summary = format!(
        "New booking inquiry #{}\nName: {}\nEmail: {}\nDates: {} to {} ({} night{})\nPayment: {}",
        booking.id,
        booking.name,
        booking.email,
        checkin,
        checkout,
        nights,
        if nights == 1 { "" } else { "s" },
        booking.payment_method.as_str(),
    );
    if let Some(guests) = booking.guests {
        summary.push_str(&format!("\nGuests: {guests}"));
    }
    if let Some(phone) = &booking.phone {
        summary.push_str(&format!("\nPhone: {phone}"));
    }
    if let Some(message) = &booking.message {
        summary.push_str(&format!("\nMessage: {message}"));
    }
    notify::broadcast(state.notifier.as_ref(), &summary).await;

    Ok(Json(serde_json::json!({ "ok": true, "booking_id": booking.id })))
}
