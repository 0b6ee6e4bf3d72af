use anyhow::Context;
use async_trait::async_trait;

use super::Notifier;

pub struct TelegramNotifier {
    bot_token: String,
    chat_ids: Vec<String>,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_ids: Vec<String>) -> Self {
        Self {
            bot_token,
            chat_ids,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn destinations(&self) -> &[String] {
        &self.chat_ids
    }

    async fn send(&self, chat_id: &str, text: &str) -> anyhow::Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);

        self.client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": chat_id,
                "text": text,
            }))
            .send()
            .await
            .context("failed to reach Telegram")?
            .error_for_status()
            .context("Telegram API returned error")?;

        Ok(())
    }
}
