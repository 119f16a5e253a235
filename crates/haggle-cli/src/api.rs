//! Haggle API Client

use anyhow::{bail, Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// API Client for Haggle
pub struct HaggleClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct CallRecord {
    pub call_id: String,
    pub user_id: String,
    pub model: String,
    pub year: i32,
    pub zipcode: String,
    pub dealer_name: String,
    pub phone_number: String,
    pub listing_price: i64,
    pub status: String,
    pub deal_price: Option<i64>,
    pub remarks: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CallListResponse {
    pub calls: Vec<CallRecord>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct CallLookupResponse {
    pub call: CallRecord,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct BestDealResponse {
    pub found: bool,
    pub price: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    pub dealer_name: String,
    pub phone: String,
    pub address: String,
    pub discounted_price: f64,
    pub distance: f64,
}

#[derive(Debug, Deserialize)]
pub struct DealerSearchResponse {
    pub dealers: Vec<Dealer>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct FinishCallRequest {
    pub user_id: String,
    pub is_available: bool,
    pub deal_price: i64,
    pub remarks: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerSearchRequest {
    pub make: String,
    pub model: String,
    pub version: String,
    pub zip_code: String,
    pub radius_miles: i32,
}

impl HaggleClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    /// List call records, optionally by status
    pub async fn list_calls(&self, status: Option<&str>) -> Result<CallListResponse> {
        let mut request = self.client.get(self.url("/api/calls"));
        if let Some(status) = status {
            request = request.query(&[("status", status)]);
        }
        let resp = request.send().await.context("Failed to connect to Haggle API")?;
        parse(resp).await
    }

    /// Get the first call recorded for a user
    pub async fn get_call(&self, user_id: &str) -> Result<CallLookupResponse> {
        let path = format!("/api/calls/user/{}", urlencoding::encode(user_id));
        let resp = self
            .client
            .get(self.url(&path))
            .send()
            .await
            .context("Failed to connect to Haggle API")?;
        parse(resp).await
    }

    /// Submit a batch of calls (raw JSON array)
    pub async fn submit_calls(&self, batch: &serde_json::Value) -> Result<MessageResponse> {
        let resp = self
            .client
            .post(self.url("/api/calls/submit"))
            .json(batch)
            .send()
            .await
            .context("Failed to connect to Haggle API")?;
        parse(resp).await
    }

    /// Report a call outcome, as the calling agent would.
    ///
    /// A rejected callback comes back as `success: false` rather than an error.
    pub async fn finish_call(&self, request: &FinishCallRequest) -> Result<MessageResponse> {
        let resp = self
            .client
            .post(self.url("/api/calls/finish"))
            .json(request)
            .send()
            .await
            .context("Failed to connect to Haggle API")?;
        let status = resp.status();
        let body = resp.text().await.context("Failed to read response")?;
        message_from(status, &body)
    }

    /// Lowest confirmed deal for a car
    pub async fn best_deal(&self, model: &str, year: i32, zipcode: &str) -> Result<BestDealResponse> {
        let year = year.to_string();
        let resp = self
            .client
            .get(self.url("/api/deals/best"))
            .query(&[("model", model), ("year", year.as_str()), ("zipcode", zipcode)])
            .send()
            .await
            .context("Failed to connect to Haggle API")?;
        parse(resp).await
    }

    /// Search dealers
    pub async fn search_dealers(&self, request: &DealerSearchRequest) -> Result<DealerSearchResponse> {
        let resp = self
            .client
            .post(self.url("/api/dealers/search"))
            .json(request)
            .send()
            .await
            .context("Failed to connect to Haggle API")?;
        parse(resp).await
    }

    /// Search CARFAX listings (raw payload)
    pub async fn sellers(&self, zip: &str, radius: Option<&str>, model: Option<&str>) -> Result<serde_json::Value> {
        let mut query = vec![("zip", zip)];
        if let Some(radius) = radius {
            query.push(("radius", radius));
        }
        if let Some(model) = model {
            query.push(("model", model));
        }
        let resp = self
            .client
            .get(self.url("/api/sellers"))
            .query(&query)
            .send()
            .await
            .context("Failed to connect to Haggle API")?;
        parse(resp).await
    }
}

async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T> {
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("API error ({}): {}", status, body);
    }

    resp.json().await.context("Failed to parse response")
}

/// Decode a message envelope, keeping client errors that carry one
fn message_from(status: StatusCode, body: &str) -> Result<MessageResponse> {
    if status.is_success() {
        return serde_json::from_str(body).context("Failed to parse response");
    }
    if status.is_client_error() {
        if let Ok(message) = serde_json::from_str::<MessageResponse>(body) {
            return Ok(message);
        }
    }
    bail!("API error ({}): {}", status, body);
}
