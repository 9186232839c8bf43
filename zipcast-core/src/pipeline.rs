//! The resolution pipeline: validate the zipcode, geocode it, then fan out
//! to the weather and news providers.

use anyhow::Context;
use std::fmt;
use tracing::{debug, warn};

use crate::{
    config::Credentials,
    error::Error,
    model::{Article, Location, Weather},
    provider::{self, geocoding::GeocodingClient, news::NewsClient, weather::WeatherClient},
    zipcode,
};

/// Stage a run was in when it failed.
///
/// Validation and resolution failures abort the run. Once the pipeline
/// reaches the fetching stage it always produces a [`Report`]; per-fetch
/// failures live inside the report instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Resolving,
    Fetching,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Validating => "validating",
            Stage::Resolving => "resolving",
            Stage::Fetching => "fetching",
        })
    }
}

/// A pipeline run that aborted before any fetch could happen.
#[derive(Debug, thiserror::Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

/// Outcome of one pipeline run.
///
/// Weather and news are independent sections: one may fail while the other
/// succeeds, and both outcomes are surfaced as-is. Partial success is a
/// normal result, not an error.
#[derive(Debug)]
pub struct Report {
    pub location: Location,
    pub weather: Result<Weather, Error>,
    pub articles: Result<Vec<Article>, Error>,
}

/// Sequences the zipcode validator, the geocoding resolver and the weather
/// and news fetchers.
///
/// The pipeline owns the shared HTTP transport; the provider clients hold
/// clones of the same pool, which is released when the pipeline (and any
/// outstanding clones) drop.
#[derive(Debug, Clone)]
pub struct Pipeline {
    geocoding: GeocodingClient,
    weather: WeatherClient,
    news: NewsClient,
}

impl Pipeline {
    /// Build a pipeline from provider credentials, constructing the shared
    /// HTTP transport.
    pub fn new(credentials: Credentials) -> anyhow::Result<Self> {
        let http = provider::build_http_client().context("Failed to build HTTP client")?;
        Ok(Self::with_clients(
            GeocodingClient::new(credentials.weather_api_key.clone(), http.clone()),
            WeatherClient::new(credentials.weather_api_key, http.clone()),
            NewsClient::new(credentials.news_api_key, http),
        ))
    }

    /// Assemble a pipeline from already-configured clients. Used by tests to
    /// point the clients at a mock server.
    pub fn with_clients(
        geocoding: GeocodingClient,
        weather: WeatherClient,
        news: NewsClient,
    ) -> Self {
        Self {
            geocoding,
            weather,
            news,
        }
    }

    /// Run the full zipcode pipeline.
    ///
    /// A malformed zipcode or a failed geocode aborts the run with a
    /// [`PipelineError`]. Once a location is resolved, the weather and news
    /// fetches each report their own outcome; a weather failure never blocks
    /// the news fetch.
    pub async fn run(
        &self,
        zipcode_input: &str,
        max_articles: usize,
    ) -> Result<Report, PipelineError> {
        debug!(zipcode = zipcode_input, "validating zipcode");
        if !zipcode::is_valid(zipcode_input) {
            return Err(PipelineError {
                stage: Stage::Validating,
                source: Error::invalid_input(format!(
                    "invalid US zipcode {zipcode_input:?}, expected 12345 or 12345-6789"
                )),
            });
        }

        debug!(zipcode = zipcode_input, "resolving location");
        let location = self
            .geocoding
            .by_zipcode(zipcode_input)
            .await
            .map_err(|source| PipelineError {
                stage: Stage::Resolving,
                source,
            })?;

        debug!(%location, "fetching weather and news");
        let weather = self.weather.by_zipcode(zipcode_input).await;
        if let Err(err) = &weather {
            warn!(%err, "weather fetch failed, continuing with news");
        }
        let articles = self.news.local_news(&location, max_articles).await;
        if let Err(err) = &articles {
            warn!(%err, "news fetch failed");
        }

        Ok(Report {
            location,
            weather,
            articles,
        })
    }

    /// Run the pipeline for a city/state pair instead of a zipcode.
    ///
    /// Same contract as [`Pipeline::run`]: resolution failures abort, fetch
    /// failures are reported per-section.
    pub async fn run_city(
        &self,
        city: &str,
        state: &str,
        max_articles: usize,
    ) -> Result<Report, PipelineError> {
        if city.trim().is_empty() || state.trim().is_empty() {
            return Err(PipelineError {
                stage: Stage::Validating,
                source: Error::invalid_input("city and state must both be non-empty"),
            });
        }

        debug!(city, state, "resolving location");
        let location = self
            .geocoding
            .by_city(city, state)
            .await
            .map_err(|source| PipelineError {
                stage: Stage::Resolving,
                source,
            })?;

        debug!(%location, "fetching weather and news");
        let weather = self.weather.by_location(&location).await;
        if let Err(err) = &weather {
            warn!(%err, "weather fetch failed, continuing with news");
        }
        let articles = self.news.local_news(&location, max_articles).await;
        if let Err(err) = &articles {
            warn!(%err, "news fetch failed");
        }

        Ok(Report {
            location,
            weather,
            articles,
        })
    }
}
