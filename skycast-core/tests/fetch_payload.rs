//! Transport tests against a mock HTTP server, plus an end-to-end check
//! that fetched text normalizes through a provider.

use skycast_core::{WeatherProvider, fetch};
use skycast_core::provider::forecastio::ForecastIoProvider;
use skycast_core::units::UnitSystem;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_payload() -> serde_json::Value {
    serde_json::json!({
        "latitude": 45.0,
        "longitude": 9.0,
        "currently": { "summary": "Clear", "icon": "clear-day", "temperature": 18.0 },
        "hourly": { "data": [ { "time": 1000, "temperature": 17.0 } ] },
        "daily": { "data": [ {
            "time": 900,
            "temperatureMin": 10.0,
            "temperatureMax": 20.0,
            "sunriseTime": 800,
            "sunsetTime": 70000,
        } ] },
    })
}

#[tokio::test]
async fn fetch_payload_returns_body_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast/KEY/45,9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .mount(&server)
        .await;

    let http = reqwest::Client::new();
    let url = format!("{}/forecast/KEY/45,9", server.uri());
    let body = fetch::fetch_payload(&http, &url).await.expect("fetch should succeed");

    assert!(body.contains("currently"));
}

#[tokio::test]
async fn fetch_payload_surfaces_error_status_with_body_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
        .mount(&server)
        .await;

    let http = reqwest::Client::new();
    let err = fetch::fetch_payload(&http, &server.uri()).await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("403"));
    assert!(msg.contains("permission denied"));
}

#[tokio::test]
async fn fetched_payload_normalizes_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .mount(&server)
        .await;

    let provider = ForecastIoProvider::new("KEY".to_string(), UnitSystem::Metric);

    let http = reqwest::Client::new();
    let payload = fetch::fetch_payload(&http, &server.uri()).await.expect("fetch should succeed");

    let current = provider.current_conditions(&payload).expect("payload should normalize");
    assert_eq!(current.temperature.current, 18.0);
    assert_eq!(current.temperature.min, 10.0);
    assert_eq!(current.temperature.max, 20.0);
}
