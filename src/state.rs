use crate::config::AppConfig;
use crate::services::notify::Notifier;
use crate::store::BookingStore;

pub struct AppState {
    pub config: AppConfig,
    pub store: Box<dyn BookingStore>,
    pub notifier: Box<dyn Notifier>,
}
