use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;

use crate::models::{BookingPatch, PaymentMethod, PaymentStatus};
use crate::services::notify;
use crate::services::payments::{self, CheckoutForm};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PayQuery {
    pub booking_id: Option<i64>,
}

pub async fn checkout_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PayQuery>,
) -> Response {
    let Some(booking_id) = query.booking_id else {
        return (
            StatusCode::BAD_REQUEST,
            Html(payments::render_info_page(
                "Missing booking",
                "No booking_id was provided.",
            )),
        )
            .into_response();
    };

    let booking = match state.store.get_booking(booking_id).await {
        Ok(Some(b)) => b,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Html(payments::render_info_page(
                    "Booking not found",
                    "We could not find that booking.",
                )),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, booking_id, "failed to load booking for checkout");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(payments::render_info_page(
                    "Something went wrong",
                    "Please try again later.",
                )),
            )
                .into_response();
        }
    };

    if booking.payment_method != PaymentMethod::PayOnline {
        return Html(payments::render_info_page(
            "No payment needed",
            "This booking is set to pay on arrival. We look forward to welcoming you.",
        ))
        .into_response();
    }

    let payhere = &state.config.payhere;
    if !payhere.is_configured() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(payments::render_info_page(
                "Payments unavailable",
                "Online payments are temporarily unavailable. Please contact us to complete your booking.",
            )),
        )
            .into_response();
    }

    let amount = payments::format_amount(booking.amount_lkr.unwrap_or(state.config.deposit_lkr));
    let order_id = payments::order_id_for(booking.id);
    let hash = payments::checkout_hash(
        &payhere.merchant_id,
        &order_id,
        &amount,
        &payhere.currency,
        &payhere.merchant_secret,
    );

    // The webhook resolves bookings through this order id, so it must be on
    // the row before the guest reaches the provider.
    let patch = BookingPatch {
        payhere_order_id: Some(order_id.clone()),
        ..Default::default()
    };
    if let Err(e) = state.store.update_booking(booking.id, &patch).await {
        tracing::error!(error = %e, booking_id = booking.id, "failed to record order id");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(payments::render_info_page(
                "Something went wrong",
                "Please try again later.",
            )),
        )
            .into_response();
    }

    let (first_name, last_name) = payments::split_guest_name(&booking.name);
    let form = CheckoutForm {
        action_url: payhere.checkout_url.clone(),
        fields: vec![
            ("merchant_id", payhere.merchant_id.clone()),
            ("return_url", payhere.return_url.clone()),
            ("cancel_url", payhere.cancel_url.clone()),
            ("notify_url", payhere.notify_url.clone()),
            ("order_id", order_id),
            ("items", format!("Villa booking deposit #{}", booking.id)),
            ("currency", payhere.currency.clone()),
            ("amount", amount),
            ("first_name", first_name),
            ("last_name", last_name),
            ("email", booking.email.clone()),
            ("phone", booking.phone.clone().unwrap_or_default()),
            ("address", "Mirissa Zen Villa".to_string()),
            ("city", "Mirissa".to_string()),
            ("country", "Sri Lanka".to_string()),
            ("hash", hash),
        ],
    };

    Html(payments::render_checkout_page(&form)).into_response()
}

#[derive(Deserialize)]
pub struct NotifyForm {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub payment_id: String,
    #[serde(default)]
    pub payhere_amount: String,
    #[serde(default)]
    pub payhere_currency: String,
    #[serde(default)]
    pub status_code: String,
    #[serde(default)]
    pub md5sig: String,
}

/// PayHere notify callback. The provider retries on connectivity failures
/// only, so every application-level outcome is acknowledged with 200 "ok";
/// the booking row and an operator alert carry the real result.
pub async fn payhere_notify(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NotifyForm>,
) -> Response {
    let payhere = &state.config.payhere;
    if !payhere.is_configured() {
        tracing::error!("payment webhook received but provider is not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "payment provider not configured",
        )
            .into_response();
    }

    let booking = match state.store.find_by_order_id(&form.order_id).await {
        Ok(Some(b)) => b,
        Ok(None) => {
            // Unknown order ids are acknowledged so the provider stops
            // retrying and callers cannot probe for existing orders.
            tracing::warn!(order_id = %form.order_id, "webhook for unknown order id");
            return ok_response();
        }
        Err(e) => {
            tracing::error!(error = %e, order_id = %form.order_id, "failed to resolve webhook order id");
            return ok_response();
        }
    };

    let expected = payments::notify_signature(
        &payhere.merchant_id,
        &form.order_id,
        &form.payment_id,
        &form.payhere_amount,
        &form.payhere_currency,
        &form.status_code,
        &payhere.merchant_secret,
    );

    let mut patch = BookingPatch {
        payhere_payment_id: Some(form.payment_id.clone()),
        ..Default::default()
    };

    if !expected.eq_ignore_ascii_case(&form.md5sig) {
        tracing::warn!(booking_id = booking.id, order_id = %form.order_id, "webhook signature mismatch");
        patch.payment_status = Some(PaymentStatus::Failed);
        apply_patch(&state, booking.id, &patch).await;
        let alert = format!(
            "Payment signature verification FAILED for booking #{} (order {}). Payment marked as failed.",
            booking.id, form.order_id
        );
        notify::broadcast(state.notifier.as_ref(), &alert).await;
        return ok_response();
    }

    if form.status_code == "2" {
        patch.payment_status = Some(PaymentStatus::Paid);
        apply_patch(&state, booking.id, &patch).await;
        tracing::info!(booking_id = booking.id, payment_id = %form.payment_id, "payment confirmed");
        let alert = format!(
            "Payment received for booking #{}\nOrder: {}\nPayHere payment: {}\nAmount: {} {}",
            booking.id, form.order_id, form.payment_id, form.payhere_amount, form.payhere_currency
        );
        notify::broadcast(state.notifier.as_ref(), &alert).await;
    } else {
        patch.payment_status = Some(PaymentStatus::Failed);
        apply_patch(&state, booking.id, &patch).await;
        let alert = format!(
            "Payment for booking #{} did not complete (status code {}). Payment marked as failed.",
            booking.id, form.status_code
        );
        notify::broadcast(state.notifier.as_ref(), &alert).await;
    }

    ok_response()
}

async fn apply_patch(state: &Arc<AppState>, booking_id: i64, patch: &BookingPatch) {
    if let Err(e) = state.store.update_booking(booking_id, patch).await {
        tracing::error!(error = %e, booking_id, "failed to update payment status");
    }
}

fn ok_response() -> Response {
    (StatusCode::OK, "ok").into_response()
}
