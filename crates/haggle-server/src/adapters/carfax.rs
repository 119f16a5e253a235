//! CARFAX listing search client
//!
//! Proxies vehicle listing searches to the CARFAX helix API.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};

use haggle::{DomainError, ListingQuery, ListingSearch};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:140.0) Gecko/20100101 Firefox/140.0";

/// Fixed search parameters sent with every query
const FIXED_PARAMS: [(&str, &str); 7] = [
    ("sort", "BEST"),
    ("dynamicRadius", "true"),
    ("make", "Toyota"),
    ("vehicleCondition", "NEW"),
    ("rows", "24"),
    ("fetchImageLimit", "6"),
    ("tpPositions", "1,2,3"),
];

/// HTTP implementation of ListingSearch backed by CARFAX
#[derive(Clone)]
pub struct CarfaxClient {
    client: Client,
    base_url: String,
}

impl CarfaxClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Query pairs for a search, in the order they are sent
    fn query_pairs(query: &ListingQuery) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("zip", query.zip.clone()),
            ("radius", query.radius.clone()),
            ("model", query.model.clone()),
        ];
        pairs.extend(FIXED_PARAMS.iter().map(|(k, v)| (*k, v.to_string())));
        pairs
    }
}

#[async_trait]
impl ListingSearch for CarfaxClient {
    async fn search(&self, query: &ListingQuery) -> Result<serde_json::Value, DomainError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&Self::query_pairs(query))
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "application/json")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
            .header(header::REFERER, "https://www.carfax.com/")
            .header(header::ORIGIN, "https://www.carfax.com")
            .header("Sec-Fetch-Dest", "empty")
            .header("Sec-Fetch-Mode", "cors")
            .header("Sec-Fetch-Site", "same-site")
            .send()
            .await
            .map_err(|e| DomainError::ExternalService(format!("failed to execute request: {e}")))?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::ExternalService(format!(
                "CARFAX API returned status {}: {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| DomainError::ExternalService(format!("failed to parse JSON response: {e}")))
    }
}
