//! Core library for the `zipcast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Zipcode validation and the geocoding, weather and news provider clients
//! - The pipeline that resolves a zipcode into weather and local news
//!
//! It is used by `zipcast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod zipcode;

pub use config::{Config, Credentials};
pub use error::Error;
pub use model::{Article, Location, Weather};
pub use pipeline::{Pipeline, PipelineError, Report, Stage};
pub use provider::{geocoding::GeocodingClient, news::NewsClient, weather::WeatherClient};
