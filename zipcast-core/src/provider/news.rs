use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
    error::Error,
    model::{Article, Location},
    provider::truncate_body,
};

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
const PROVIDER: &str = "news";

/// Upstream page-size ceiling; larger requests are clamped before sending.
const MAX_PAGE_SIZE: usize = 100;

/// Client for the NewsAPI search and top-headlines endpoints.
#[derive(Debug, Clone)]
pub struct NewsClient {
    api_key: String,
    base_url: String,
    http: Client,
}

/// One attempt in the fallback sequence for local news.
#[derive(Debug)]
enum Tier {
    Query(String),
    TopHeadlines(&'static str),
}

impl NewsClient {
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

    /// Local news for a location, with tiered fallback.
    ///
    /// Tiers run in order, city query, then state query, then US-wide top
    /// headlines, and the first tier that yields any article wins. A state
    /// tier identical to the city tier is skipped. The tier list always ends
    /// with top headlines, so an empty result means even country-wide
    /// headlines came back empty.
    pub async fn local_news(
        &self,
        location: &Location,
        max_articles: usize,
    ) -> Result<Vec<Article>, Error> {
        let city = location.city.trim();
        let state = location.state.trim();

        let mut tiers = Vec::new();
        if !city.is_empty() {
            tiers.push(Tier::Query(city.to_string()));
        }
        if !state.is_empty() && state != city {
            tiers.push(Tier::Query(state.to_string()));
        }
        tiers.push(Tier::TopHeadlines("us"));

        for tier in tiers {
            let articles = match &tier {
                Tier::Query(query) => self.by_query(query, max_articles).await?,
                Tier::TopHeadlines(country) => self.top_headlines(country, max_articles).await?,
            };
            if !articles.is_empty() {
                return Ok(articles);
            }
            debug!(?tier, "news tier yielded nothing, falling back");
        }

        Ok(Vec::new())
    }

    /// Search articles matching a query, newest first.
    pub async fn by_query(&self, query: &str, max_articles: usize) -> Result<Vec<Article>, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::invalid_input("news query must not be empty"));
        }

        let url = format!("{}/everything", self.base_url);
        let page_size = clamp_page_size(max_articles);
        let body = self
            .fetch(
                &url,
                &[
                    ("q", query),
                    ("sortBy", "publishedAt"),
                    ("pageSize", page_size.as_str()),
                ],
            )
            .await?;
        Ok(parse_articles(&body))
    }

    /// Country-wide top headlines, e.g. for country code `"us"`.
    pub async fn top_headlines(
        &self,
        country: &str,
        max_articles: usize,
    ) -> Result<Vec<Article>, Error> {
        let url = format!("{}/top-headlines", self.base_url);
        let page_size = clamp_page_size(max_articles);
        let body = self
            .fetch(&url, &[("country", country), ("pageSize", page_size.as_str())])
            .await?;
        Ok(parse_articles(&body))
    }

    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<String, Error> {
        let res = self
            .http
            .get(url)
            .query(params)
            .query(&[("apiKey", self.api_key.as_str())])
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

        Ok(body)
    }
}

fn clamp_page_size(max_articles: usize) -> String {
    max_articles.min(MAX_PAGE_SIZE).to_string()
}

/// Normalize a news response body into articles.
///
/// The provider reports errors in-band through its `status` field; anything
/// other than `"ok"` (and any body that does not decode) reads as "no news"
/// rather than an error, so the caller's fallback tiers still run. Articles
/// without a title survive neither filtering nor display and are dropped
/// here; a bad `publishedAt` only costs that article its date.
fn parse_articles(body: &str) -> Vec<Article> {
    let parsed: NewsResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(%err, "failed to decode news response, treating as empty");
            return Vec::new();
        }
    };

    if parsed.status.as_deref() != Some("ok") {
        warn!(
            status = parsed.status.as_deref().unwrap_or("<missing>"),
            "news provider returned a non-ok status"
        );
        return Vec::new();
    }

    let mut articles = Vec::new();
    for raw in parsed.articles {
        let Some(title) = raw
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
        else {
            continue;
        };

        articles.push(Article {
            title: title.to_string(),
            description: raw.description,
            content: raw.content,
            source: raw.source.and_then(|source| source.name),
            author: raw.author,
            url: raw.url,
            image_url: raw.url_to_image,
            published_at: raw.published_at.as_deref().and_then(parse_published_at),
        });
    }

    info!(count = articles.len(), "parsed news articles");
    articles
}

fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(err) => {
            warn!(raw, %err, "failed to parse article publish date");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    status: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    author: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    source: Option<RawSource>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}
