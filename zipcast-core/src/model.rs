use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic location produced by the geocoding resolver.
///
/// `zipcode` is empty on the city/state path; `city` and `state` may be
/// empty when the provider omits them on the zipcode path. Coordinates are
/// always populated on a successful geocode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub zipcode: String,
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.zipcode.is_empty() {
            write!(
                f,
                "{}, {} ({:.4}, {:.4})",
                self.city, self.state, self.latitude, self.longitude
            )
        } else {
            write!(
                f,
                "{}, {} {} ({:.4}, {:.4})",
                self.city, self.state, self.zipcode, self.latitude, self.longitude
            )
        }
    }
}

/// Current conditions normalized from the weather provider.
///
/// Units are imperial (°F, mph); `pressure` is hPa and `visibility` meters.
/// A missing wind block or visibility field is reported as zero, not an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub location: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub main_condition: String,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub visibility: u32,
}

/// A news article normalized from the news provider.
///
/// Only the title is guaranteed; everything else is whatever the provider
/// chose to include.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub source: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}
