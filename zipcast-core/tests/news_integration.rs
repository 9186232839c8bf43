//! Integration tests for NewsClient, including the fallback tiers.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zipcast_core::{Error, Location, NewsClient, provider::build_http_client};

fn client(server: &MockServer) -> NewsClient {
    NewsClient::new("KEY".to_string(), build_http_client().unwrap()).with_base_url(server.uri())
}

fn springfield() -> Location {
    Location {
        zipcode: "62701".to_string(),
        city: "Springfield".to_string(),
        state: "Illinois".to_string(),
        latitude: 39.7817,
        longitude: -89.6501,
    }
}

fn ok_body(titles: &[&str]) -> serde_json::Value {
    let articles: Vec<serde_json::Value> = titles
        .iter()
        .map(|title| {
            serde_json::json!({
                "title": title,
                "description": "details",
                "url": "https://example.com/story",
                "source": {"id": null, "name": "Example Times"},
                "publishedAt": "2026-08-01T09:30:00Z"
            })
        })
        .collect();
    serde_json::json!({"status": "ok", "totalResults": articles.len(), "articles": articles})
}

fn empty_body() -> serde_json::Value {
    serde_json::json!({"status": "ok", "totalResults": 0, "articles": []})
}

#[tokio::test]
async fn city_tier_win_stops_the_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "Springfield"))
        .and(query_param("sortBy", "publishedAt"))
        .and(query_param("pageSize", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["City story"])))
        .expect(1)
        .mount(&server)
        .await;

    // Neither the state tier nor top headlines may be called.
    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "Illinois"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["State story"])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["US story"])))
        .expect(0)
        .mount(&server)
        .await;

    let articles = client(&server).local_news(&springfield(), 5).await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "City story");
}

#[tokio::test]
async fn empty_city_tier_falls_back_to_the_state_tier() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "Springfield"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "Illinois"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["State story"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["US story"])))
        .expect(0)
        .mount(&server)
        .await;

    let articles = client(&server).local_news(&springfield(), 5).await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "State story");
}

#[tokio::test]
async fn title_less_articles_make_a_tier_effectively_empty() {
    let server = MockServer::start().await;

    // The city tier returns entries, but none carries a usable title, so
    // the tier's effective yield is zero and the fallback continues.
    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "Springfield"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["", "   "])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "Illinois"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["State story"])))
        .expect(1)
        .mount(&server)
        .await;

    let articles = client(&server).local_news(&springfield(), 5).await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "State story");
}

#[tokio::test]
async fn exhausted_query_tiers_fall_back_to_top_headlines() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .and(query_param("country", "us"))
        .and(query_param("pageSize", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["US story"])))
        .expect(1)
        .mount(&server)
        .await;

    let articles = client(&server).local_news(&springfield(), 5).await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title, "US story");
}

#[tokio::test]
async fn state_tier_is_skipped_when_identical_to_the_city_tier() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "Springfield"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["US story"])))
        .expect(1)
        .mount(&server)
        .await;

    let location = Location {
        city: "Springfield".to_string(),
        state: "Springfield".to_string(),
        ..springfield()
    };
    let articles = client(&server).local_news(&location, 5).await.unwrap();

    assert_eq!(articles[0].title, "US story");
}

#[tokio::test]
async fn non_ok_status_counts_as_an_empty_tier() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "Springfield"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "error",
            "code": "parameterInvalid"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "Illinois"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["State story"])))
        .expect(1)
        .mount(&server)
        .await;

    let articles = client(&server).local_news(&springfield(), 5).await.unwrap();

    assert_eq!(articles[0].title, "State story");
}

#[tokio::test]
async fn page_size_is_clamped_to_the_provider_maximum() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/everything"))
        .and(query_param("q", "Springfield"))
        .and(query_param("pageSize", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(&["Story"])))
        .expect(1)
        .mount(&server)
        .await;

    let articles = client(&server).by_query("Springfield", 250).await.unwrap();

    assert_eq!(articles.len(), 1);
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/everything"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let err = client(&server)
        .local_news(&springfield(), 5)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
    assert!(err.to_string().contains("429"));
}

#[tokio::test]
async fn by_query_rejects_a_blank_query() {
    let server = MockServer::start().await;

    let err = client(&server).by_query("   ", 5).await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
}
