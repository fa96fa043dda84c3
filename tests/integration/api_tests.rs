//! API integration tests
//!
//! Require a running server on localhost:8080 backed by a migrated database.

use reqwest::Client;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_get_effective_day() {
    let client = Client::new();

    let response = client
        .get(format!("{}/availability/days/2025-07-15", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["date"], "2025-07-15");
    assert_eq!(body["weekday"], "tuesday");
    assert!(body["is_open"].is_boolean());
    assert!(body["blocks"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_get_reservable_slots() {
    let client = Client::new();

    let response = client
        .get(format!("{}/availability/slots/2025-07-15?granularity=30", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["granularity_minutes"], 30);
    let slots = body["slots"].as_array().expect("No slots in response");
    let mut sorted = slots.clone();
    sorted.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
    assert_eq!(slots, &sorted);
}

#[tokio::test]
#[ignore]
async fn test_inverted_range() {
    let client = Client::new();

    let response = client
        .get(format!("{}/availability/days?from=2025-07-10&to=2025-07-01", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "InvalidRange");
}

#[tokio::test]
#[ignore]
async fn test_range_too_large() {
    let client = Client::new();

    let response = client
        .get(format!("{}/availability/open-days?from=2025-01-01&to=2027-01-01", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "RangeTooLarge");
}

#[tokio::test]
#[ignore]
async fn test_unknown_route() {
    let client = Client::new();

    let response = client
        .get(format!("{}/reservations", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
