use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use villa_booking::config::AppConfig;
use villa_booking::services::notify::telegram::TelegramNotifier;
use villa_booking::state::AppState;
use villa_booking::store::rest::RestStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(!config.store_url.is_empty(), "SUPABASE_URL must be set");
    anyhow::ensure!(
        !config.store_service_key.is_empty(),
        "SUPABASE_SERVICE_KEY must be set"
    );
    if !config.payhere.is_configured() {
        tracing::warn!("PayHere credentials not configured; online payments are disabled");
    }
    if config.telegram_chat_ids.is_empty() {
        tracing::warn!("TELEGRAM_CHAT_IDS not configured; operator notifications are disabled");
    }

    let store = RestStore::new(config.store_url.clone(), config.store_service_key.clone());
    let notifier = TelegramNotifier::new(
        config.telegram_bot_token.clone(),
        config.telegram_chat_ids.clone(),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        store: Box::new(store),
        notifier: Box::new(notifier),
    });

    let app = villa_booking::app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
