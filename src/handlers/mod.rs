pub mod admin;
pub mod availability;
pub mod health;
pub mod inquiry;
pub mod payment;

use crate::errors::AppError;

/// Catch-all for unknown routes. OPTIONS never reaches this handler; the
/// CORS layer answers preflights itself.
pub async fn not_found() -> AppError {
    AppError::NotFound("Not found.".to_string())
}
