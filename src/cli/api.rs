use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::json;

use super::state::{FireOutcome, SavingEntryDto};

/// REST client for the backend. The base URL is set once at construction
/// and owned by this struct; no process-global defaults.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct EntriesResponse {
    entries: Vec<SavingEntryDto>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ============= Savings =============

    pub async fn list_savings(&self) -> Result<Vec<SavingEntryDto>> {
        let resp = self.http.get(self.url("/api/savings")).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json::<EntriesResponse>().await?.entries)
    }

    /// Posts one entry; the server responds with the refreshed full list.
    pub async fn add_saving(&self, name: &str, amount: &str) -> Result<Vec<SavingEntryDto>> {
        let body = json!({ "savings": [{ "name": name, "amount": amount }] });
        let resp = self
            .http
            .post(self.url("/api/savings"))
            .json(&body)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json::<EntriesResponse>().await?.entries)
    }

    pub async fn delete_saving(&self, id: i64) -> Result<()> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/savings/{id}")))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    // ============= FIRE =============

    pub async fn fire_projection(
        &self,
        monthly_income: f64,
        monthly_expenses: f64,
        return_rate: Option<f64>,
    ) -> Result<FireOutcome> {
        let mut body = json!({
            "monthly_income": monthly_income,
            "monthly_expenses": monthly_expenses,
        });
        if let Some(rate) = return_rate {
            body["return_rate"] = json!(rate);
        }

        let resp = self
            .http
            .post(self.url("/api/fire"))
            .json(&body)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json::<FireOutcome>().await?)
    }

    // Surface the server's error envelope as the failure message.
    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let message = resp
            .json::<ErrorResponse>()
            .await
            .map(|e| e.error)
            .unwrap_or_else(|_| status.to_string());
        Err(anyhow!(message))
    }
}
