use crate::domain::model::LookupResult;
use crate::domain::ports::PlaceLookup;
use crate::utils::error::{EnrichError, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://api.yelp.com/v3/businesses/search";
const DEFAULT_LIMIT: u32 = 5;
const PROVIDER_NAME: &str = "Yelp Fusion";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<Business>,
}

#[derive(Debug, Deserialize)]
struct Business {
    name: Option<String>,
    location: Option<BusinessLocation>,
    display_phone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BusinessLocation {
    #[serde(default)]
    display_address: Vec<String>,
}

/// Yelp Fusion 商家搜尋，只取第一頁
pub struct YelpClient {
    client: Client,
    api_key: SecretString,
    endpoint: String,
    location: String,
    limit: u32,
}

impl YelpClient {
    pub fn new(api_key: SecretString, location: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            location: location.into(),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[cfg(test)]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }
}

#[async_trait]
impl PlaceLookup for YelpClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn lookup(&self, query: &str) -> Result<Vec<LookupResult>> {
        let limit = self.limit.to_string();
        tracing::debug!("📡 GET {} term='{}'", self.endpoint, query);

        let response = self
            .client
            .get(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .query(&[
                ("term", query),
                ("location", self.location.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EnrichError::ApiError {
                provider: PROVIDER_NAME.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        if parsed.businesses.is_empty() {
            return Err(EnrichError::NotFound {
                query: query.to_string(),
            });
        }

        Ok(parsed
            .businesses
            .into_iter()
            .map(|business| LookupResult {
                business_name: business.name.unwrap_or_else(|| query.to_string()),
                address: business
                    .location
                    .map(|location| location.display_address.join(", "))
                    .unwrap_or_default(),
                phone_number: business.display_phone.unwrap_or_default(),
            })
            .collect())
    }
}
