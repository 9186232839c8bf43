use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::info;

use crate::{error::Error, model::Location, provider::truncate_body, zipcode};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/geo/1.0";
const PROVIDER: &str = "geocoding";

/// Client for the OpenWeatherMap geocoding endpoints.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl GeocodingClient {
    pub fn new(api_key: String, http: Client) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        }
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve a US zipcode to coordinates via the `/zip` endpoint.
    ///
    /// The endpoint does not report a state code for zipcode lookups, so
    /// `state` is always the `"US"` placeholder on this path. A 404 from the
    /// provider means the zipcode does not exist and maps to
    /// [`Error::NotFound`] carrying the original input.
    pub async fn by_zipcode(&self, zipcode_input: &str) -> Result<Location, Error> {
        let trimmed = zipcode_input.trim();
        if !zipcode::is_valid(trimmed) {
            return Err(Error::invalid_input(format!(
                "invalid US zipcode {zipcode_input:?}, expected 12345 or 12345-6789"
            )));
        }

        let url = format!("{}/zip", self.base_url);
        let zip_param = format!("{},US", zipcode::normalize(trimmed));
        let res = self
            .http
            .get(&url)
            .query(&[("zip", zip_param.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| Error::transport(PROVIDER, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| Error::transport(PROVIDER, e))?;

        if status == StatusCode::NOT_FOUND {
            return Err(Error::not_found(format!("zipcode {trimmed}")));
        }
        if !status.is_success() {
            return Err(Error::transport(
                PROVIDER,
                format!("status {}: {}", status, truncate_body(&body)),
            ));
        }

        let parsed: ZipResponse =
            serde_json::from_str(&body).map_err(|e| Error::parse(PROVIDER, e))?;

        let location = Location {
            zipcode: trimmed.to_string(),
            city: parsed.name.unwrap_or_default(),
            // The /zip endpoint never includes a state code for US lookups.
            state: "US".to_string(),
            latitude: parsed.lat.unwrap_or_default(),
            longitude: parsed.lon.unwrap_or_default(),
        };
        info!(zipcode = trimmed, %location, "resolved zipcode");
        Ok(location)
    }

    /// Resolve a city/state pair via the `/direct` endpoint, limited to one
    /// result.
    ///
    /// `city` and `state` on the returned `Location` echo the caller's input
    /// rather than whatever spelling the provider returns; only the
    /// coordinates come from the response.
    pub async fn by_city(&self, city: &str, state: &str) -> Result<Location, Error> {
        let city = city.trim();
        let state = state.trim();
        if city.is_empty() {
            return Err(Error::invalid_input("city must not be empty"));
        }
        if state.is_empty() {
            return Err(Error::invalid_input("state must not be empty"));
        }

        let url = format!("{}/direct", self.base_url);
        let query = format!("{city},{state},US");
        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("limit", "1"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::transport(PROVIDER, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| Error::transport(PROVIDER, e))?;

        if !status.is_success() {
            return Err(Error::transport(
                PROVIDER,
                format!("status {}: {}", status, truncate_body(&body)),
            ));
        }

        let parsed: Vec<DirectEntry> =
            serde_json::from_str(&body).map_err(|e| Error::parse(PROVIDER, e))?;

        let Some(first) = parsed.first() else {
            return Err(Error::not_found(format!("location {city}, {state}")));
        };

        let location = Location {
            zipcode: String::new(),
            city: city.to_string(),
            state: state.to_string(),
            latitude: first.lat.unwrap_or_default(),
            longitude: first.lon.unwrap_or_default(),
        };
        info!(%location, "resolved city/state");
        Ok(location)
    }
}

#[derive(Debug, Deserialize)]
struct ZipResponse {
    name: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DirectEntry {
    lat: Option<f64>,
    lon: Option<f64>,
}
