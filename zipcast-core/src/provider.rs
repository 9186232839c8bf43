//! Clients for the three upstream HTTP providers: geocoding, weather, news.
//!
//! All three share one `reqwest::Client`; the pool it owns is the only
//! process-wide resource, and it is released when the last clone drops.

use reqwest::Client;
use std::time::Duration;

pub mod geocoding;
pub mod news;
pub mod weather;

/// Connect and read timeout applied to every upstream call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client shared by the provider clients.
///
/// Every call through this client carries a fixed 10-second connect and
/// request timeout and is attempted exactly once.
pub fn build_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .connect_timeout(REQUEST_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
}

/// Clip an error body before embedding it in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let clipped: String = body.chars().take(MAX).collect();
        format!("{clipped}...")
    } else {
        body.to_string()
    }
}
