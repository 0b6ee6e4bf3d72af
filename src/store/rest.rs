use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;

use super::BookingStore;
use crate::models::{Booking, BookingPatch, BookingStatus, NewBooking};

const TABLE: &str = "bookings";

/// Client for a PostgREST-style table resource (Supabase). Filters are
/// expressed as query operators (`eq.`, `lt.`, `gt.`, `in.(...)`) and
/// ordering as `order=id.desc`.
pub struct RestStore {
    base_url: String,
    service_key: String,
    client: reqwest::Client,
}

impl RestStore {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, TABLE);
        self.client
            .request(method, url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

/// Surface non-2xx store responses with the raw upstream body so callers can
/// pass the text through for diagnosis.
async fn check_status(resp: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    anyhow::bail!("store returned {status}: {body}")
}

async fn read_rows(resp: reqwest::Response) -> anyhow::Result<Vec<Booking>> {
    check_status(resp)
        .await?
        .json()
        .await
        .context("failed to decode store response")
}

#[async_trait]
impl BookingStore for RestStore {
    async fn find_reserved_overlap(
        &self,
        checkin: NaiveDate,
        checkout: NaiveDate,
    ) -> anyhow::Result<Option<Booking>> {
        // Overlap iff existing.checkin < checkout AND existing.checkout > checkin.
        let resp = self
            .request(Method::GET)
            .query(&[
                ("select", "*".to_string()),
                ("status", "in.(confirmed,blocked)".to_string()),
                ("checkin", format!("lt.{checkout}")),
                ("checkout", format!("gt.{checkin}")),
                ("limit", "1".to_string()),
            ])
            .send()
            .await
            .context("store request failed")?;

        Ok(read_rows(resp).await?.into_iter().next())
    }

    async fn insert_booking(&self, new: &NewBooking) -> anyhow::Result<Booking> {
        let resp = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(new)
            .send()
            .await
            .context("store request failed")?;

        read_rows(resp)
            .await?
            .into_iter()
            .next()
            .context("store returned no inserted row")
    }

    async fn get_booking(&self, id: i64) -> anyhow::Result<Option<Booking>> {
        let resp = self
            .request(Method::GET)
            .query(&[
                ("select", "*".to_string()),
                ("id", format!("eq.{id}")),
                ("limit", "1".to_string()),
            ])
            .send()
            .await
            .context("store request failed")?;

        Ok(read_rows(resp).await?.into_iter().next())
    }

    async fn find_by_order_id(&self, order_id: &str) -> anyhow::Result<Option<Booking>> {
        let resp = self
            .request(Method::GET)
            .query(&[
                ("select", "*".to_string()),
                ("payhere_order_id", format!("eq.{order_id}")),
                ("limit", "1".to_string()),
            ])
            .send()
            .await
            .context("store request failed")?;

        Ok(read_rows(resp).await?.into_iter().next())
    }

    async fn update_booking(&self, id: i64, patch: &BookingPatch) -> anyhow::Result<()> {
        let resp = self
            .request(Method::PATCH)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(patch)
            .send()
            .await
            .context("store request failed")?;

        check_status(resp).await?;
        Ok(())
    }

    async fn list_bookings(&self, status: Option<BookingStatus>) -> anyhow::Result<Vec<Booking>> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("order", "id.desc".to_string()),
        ];
        if let Some(status) = status {
            params.push(("status", format!("eq.{}", status.as_str())));
        }

        let resp = self
            .request(Method::GET)
            .query(&params)
            .send()
            .await
            .context("store request failed")?;

        read_rows(resp).await
    }
}
