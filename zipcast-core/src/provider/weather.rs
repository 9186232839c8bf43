use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::{
    error::Error,
    model::{Location, Weather},
    provider::truncate_body,
    zipcode,
};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const PROVIDER: &str = "weather";

/// Client for the OpenWeatherMap current-conditions endpoint.
///
/// Units are fixed to imperial.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherClient {
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

    /// Current conditions looked up by zipcode.
    ///
    /// The `location` field comes from the response's `name` and
    /// `sys.country` on this path.
    pub async fn by_zipcode(&self, zipcode_input: &str) -> Result<Weather, Error> {
        let zip = zipcode::normalize(zipcode_input);
        if zip.is_empty() {
            return Err(Error::invalid_input("zipcode must not be empty"));
        }

        let zip_param = format!("{zip},US");
        let raw = self.fetch(&[("zip", zip_param.as_str())]).await?;

        let location = match raw.sys.as_ref().and_then(|sys| sys.country.as_deref()) {
            Some(country) => format!("{}, {}", raw.name, country),
            None => raw.name.clone(),
        };
        normalize(raw, location)
    }

    /// Current conditions for an already-resolved location, looked up by
    /// coordinates.
    ///
    /// The `location` field is the caller's location rendered as a string,
    /// not anything echoed by the provider.
    pub async fn by_location(&self, location: &Location) -> Result<Weather, Error> {
        let lat = format!("{:.4}", location.latitude);
        let lon = format!("{:.4}", location.longitude);
        let raw = self
            .fetch(&[("lat", lat.as_str()), ("lon", lon.as_str())])
            .await?;
        normalize(raw, location.to_string())
    }

    async fn fetch(&self, params: &[(&str, &str)]) -> Result<WeatherResponse, Error> {
        let url = format!("{}/weather", self.base_url);
        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", "imperial")])
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

        serde_json::from_str(&body).map_err(|e| Error::parse(PROVIDER, e))
    }
}

/// Map a raw provider response onto the stable `Weather` shape.
///
/// `main` and the first `weather` entry are structurally required; wind and
/// visibility default to zero when absent.
fn normalize(raw: WeatherResponse, location: String) -> Result<Weather, Error> {
    let main = raw
        .main
        .ok_or_else(|| Error::parse(PROVIDER, "response is missing the `main` block"))?;
    let condition = raw
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| Error::parse(PROVIDER, "response has no `weather` conditions"))?;
    let wind = raw.wind.unwrap_or_default();

    let weather = Weather {
        location,
        temperature: main.temp,
        feels_like: main.feels_like,
        main_condition: condition.main,
        description: condition.description,
        icon: condition.icon,
        humidity: main.humidity,
        pressure: main.pressure,
        wind_speed: wind.speed,
        wind_direction: wind.deg,
        visibility: raw.visibility.unwrap_or_default(),
    };
    info!(location = %weather.location, "fetched current conditions");
    Ok(weather)
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    #[serde(default)]
    name: String,
    sys: Option<SysBlock>,
    main: Option<MainBlock>,
    #[serde(default)]
    weather: Vec<ConditionEntry>,
    wind: Option<WindBlock>,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SysBlock {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct WindBlock {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: u16,
}
