use crate::utils::error::{EnrichError, Result};
use crate::utils::validation::validate_endpoint;
use secrecy::SecretString;
use std::io;

pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_PLACES_API_KEY";
pub const YELP_API_KEY_VAR: &str = "YELP_API_KEY";
pub const PLACES_ENDPOINT_VAR: &str = "PLACES_API_ENDPOINT";

/// 從環境變數讀取的供應商金鑰，只在啟動時讀一次
#[derive(Debug, Clone)]
pub struct ProviderKeys {
    pub google_places: SecretString,
    pub yelp: Option<SecretString>,
    pub places_endpoint: Option<String>,
}

impl ProviderKeys {
    pub fn from_env() -> Result<Self> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let google_places = non_empty(GOOGLE_API_KEY_VAR)
            .map(SecretString::from)
            .ok_or_else(|| EnrichError::MissingConfigError {
                field: GOOGLE_API_KEY_VAR.to_string(),
            })?;

        let places_endpoint = non_empty(PLACES_ENDPOINT_VAR);
        if let Some(endpoint) = &places_endpoint {
            validate_endpoint(PLACES_ENDPOINT_VAR, endpoint)?;
        }

        Ok(Self {
            google_places,
            yelp: non_empty(YELP_API_KEY_VAR).map(SecretString::from),
            places_endpoint,
        })
    }

    pub fn has_yelp(&self) -> bool {
        self.yelp.is_some()
    }
}

fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        match &err {
            dotenvy::Error::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {}
            _ => tracing::debug!(?err, "unable to load .env file"),
        }
    }
}
