//! HTTP client for the Overpass API interpreter endpoint.
//!
//! Sends Overpass QL as a plain-text POST body and decodes the `[out:json]`
//! response. There is no retry policy: a failed request fails the call.

use std::time::Duration;

use cafefind_core::{AppConfig, Location, NewVenue};
use reqwest::{Client, Url};

use crate::error::OverpassError;
use crate::parse::parse_elements;
use crate::query::{build_query, QueryArea};
use crate::types::OverpassResponse;

pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";
const DEFAULT_USER_AGENT: &str = "cafefind/0.1 (coffee-finder)";

/// Client for the Overpass interpreter.
///
/// Use [`OverpassClient::new`] for the public endpoint or
/// [`OverpassClient::with_endpoint`] to point at a mirror or a mock server.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    /// Creates a client for the public Overpass endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, OverpassError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, timeout_secs, DEFAULT_USER_AGENT)
    }

    /// Creates a client from the `CAFEFIND_OVERPASS_*` settings.
    ///
    /// # Errors
    ///
    /// See [`OverpassClient::with_endpoint`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, OverpassError> {
        Self::with_endpoint(
            &config.overpass_url,
            config.overpass_timeout_secs,
            &config.overpass_user_agent,
        )
    }

    /// Creates a client with a custom endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`OverpassError::InvalidEndpoint`] if `endpoint` is not
    /// a valid URL.
    pub fn with_endpoint(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, OverpassError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| OverpassError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, endpoint })
    }

    /// Fetches coffee venues within `radius_m` meters of `location`.
    ///
    /// # Errors
    ///
    /// - [`OverpassError::Http`] on network failure or timeout.
    /// - [`OverpassError::UnexpectedStatus`] on a non-2xx response.
    /// - [`OverpassError::Deserialize`] if the body is not Overpass JSON.
    pub async fn fetch_nearby(
        &self,
        location: Location,
        radius_m: u32,
    ) -> Result<Vec<NewVenue>, OverpassError> {
        let query = build_query(&QueryArea::Around { location, radius_m });
        let response = self.interpret(&query).await?;
        let venues = parse_elements(response);
        tracing::info!(
            lat = location.lat,
            lon = location.lon,
            radius_m,
            count = venues.len(),
            "fetched venues from Overpass"
        );
        Ok(venues)
    }

    /// Fetches every coffee venue in a country, for bulk seeding.
    ///
    /// `iso_code` is an ISO 3166-1 alpha-2 code such as `"NZ"`; it is
    /// upper-cased before use. This is a heavy query against a shared public
    /// service and should only be run deliberately.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::InvalidCountryCode`] if `iso_code` is not two
    /// ASCII letters, otherwise the same errors as [`Self::fetch_nearby`].
    pub async fn fetch_country(&self, iso_code: &str) -> Result<Vec<NewVenue>, OverpassError> {
        let code = iso_code.trim().to_ascii_uppercase();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(OverpassError::InvalidCountryCode(iso_code.to_string()));
        }

        let query = build_query(&QueryArea::Country {
            iso_code: code.clone(),
        });
        let response = self.interpret(&query).await?;
        let venues = parse_elements(response);
        tracing::info!(country = %code, count = venues.len(), "fetched country venues from Overpass");
        Ok(venues)
    }

    /// POSTs `query`, asserts a 2xx status, and decodes the JSON body.
    async fn interpret(&self, query: &str) -> Result<OverpassResponse, OverpassError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .body(query.to_owned())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OverpassError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| OverpassError::Deserialize {
            context: self.endpoint.to_string(),
            source: e,
        })
    }
}
