use crate::domain::model::LookupResult;
use crate::domain::ports::PlaceLookup;
use crate::utils::error::{EnrichError, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://places.googleapis.com/v1/places:searchText";
pub const DEFAULT_LOCATION: &str = "Denver, Colorado";
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(100);

const FIELD_MASK: &str =
    "places.displayName,places.formattedAddress,places.internationalPhoneNumber,nextPageToken";
const PROVIDER_NAME: &str = "Google Places";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    text_query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    places: Vec<Place>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Place {
    display_name: Option<DisplayName>,
    formatted_address: Option<String>,
    international_phone_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DisplayName {
    text: Option<String>,
}

impl Place {
    fn into_result(self, query: &str) -> LookupResult {
        LookupResult {
            business_name: self
                .display_name
                .and_then(|name| name.text)
                .unwrap_or_else(|| query.to_string()),
            address: self.formatted_address.unwrap_or_default(),
            phone_number: self.international_phone_number.unwrap_or_default(),
        }
    }
}

/// Google Places (New) Text Search 客戶端，會跟著 `nextPageToken` 取完所有頁面
pub struct GooglePlacesClient {
    client: Client,
    api_key: SecretString,
    endpoint: String,
    location: Option<String>,
    page_delay: Duration,
}

impl GooglePlacesClient {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            location: Some(DEFAULT_LOCATION.to_string()),
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// `None` 代表不附加地區，直接以名稱搜尋
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location.filter(|l| !l.trim().is_empty());
        self
    }

    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    fn text_query(&self, query: &str) -> String {
        match &self.location {
            Some(location) => format!("{} {}", query, location),
            None => query.to_string(),
        }
    }

    async fn fetch_page(&self, text_query: &str, page_token: Option<&str>) -> Result<SearchResponse> {
        let body = SearchRequest {
            text_query,
            page_token,
        };

        tracing::debug!(
            "📡 POST {} (page token: {})",
            self.endpoint,
            page_token.unwrap_or("-")
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Goog-Api-Key", self.api_key.expose_secret())
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&body)
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

        // 解碼失敗歸為 SerializationError，而非連線錯誤
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PlaceLookup for GooglePlacesClient {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn lookup(&self, query: &str) -> Result<Vec<LookupResult>> {
        let text_query = self.text_query(query);
        let mut places = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            if page_token.is_some() {
                // 分頁之間稍作停頓，避免觸發速率限制
                tokio::time::sleep(self.page_delay).await;
            }

            let page = self.fetch_page(&text_query, page_token.as_deref()).await?;
            pages += 1;
            places.extend(page.places);

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(
            "📄 '{}': {} place(s) across {} page(s)",
            query,
            places.len(),
            pages
        );

        if places.is_empty() {
            return Err(EnrichError::NotFound {
                query: query.to_string(),
            });
        }

        Ok(places
            .into_iter()
            .map(|place| place.into_result(query))
            .collect())
    }
}
