use std::env;

pub const DEFAULT_DEPOSIT_LKR: f64 = 5000.0;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub admin_token: String,
    pub store_url: String,
    pub store_service_key: String,
    pub deposit_lkr: f64,
    pub payhere: PayHereConfig,
    pub telegram_bot_token: String,
    pub telegram_chat_ids: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct PayHereConfig {
    pub merchant_id: String,
    pub merchant_secret: String,
    pub currency: String,
    pub checkout_url: String,
    pub return_url: String,
    pub cancel_url: String,
    pub notify_url: String,
}

impl PayHereConfig {
    pub fn is_configured(&self) -> bool {
        !self.merchant_id.is_empty() && !self.merchant_secret.is_empty()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_default(),
            store_url: env::var("SUPABASE_URL").unwrap_or_default(),
            store_service_key: env::var("SUPABASE_SERVICE_KEY").unwrap_or_default(),
            deposit_lkr: env::var("DEPOSIT_AMOUNT_LKR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DEPOSIT_LKR),
            payhere: PayHereConfig {
                merchant_id: env::var("PAYHERE_MERCHANT_ID").unwrap_or_default(),
                merchant_secret: env::var("PAYHERE_MERCHANT_SECRET").unwrap_or_default(),
                currency: env::var("PAYHERE_CURRENCY").unwrap_or_else(|_| "LKR".to_string()),
                checkout_url: env::var("PAYHERE_CHECKOUT_URL")
                    .unwrap_or_else(|_| "https://sandbox.payhere.lk/pay/checkout".to_string()),
                return_url: env::var("PAYHERE_RETURN_URL").unwrap_or_default(),
                cancel_url: env::var("PAYHERE_CANCEL_URL").unwrap_or_default(),
                notify_url: env::var("PAYHERE_NOTIFY_URL").unwrap_or_default(),
            },
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default(),
            telegram_chat_ids: env::var("TELEGRAM_CHAT_IDS")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}
