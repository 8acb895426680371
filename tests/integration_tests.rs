//! Integration tests using a mock HTTP server
//!
//! Drives the full flow for both API generations: query → HTTP requests →
//! parsed pages → pagination engine → merged response.

use chrono::{TimeZone, Utc};
use crmkit::auth::{AuthConfig, Location};
use crmkit::client::CrmClient;
use crmkit::config::FetchConfig;
use crmkit::error::Error;
use crmkit::http::{BackoffType, HttpClientConfig};
use crmkit::query::QueryBuilder;
use crmkit::types::ApiVersion;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_http(server: &MockServer) -> HttpClientConfig {
    HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(100),
        )
        .no_rate_limit()
        .build()
}

fn client(server: &MockServer, fetch: FetchConfig) -> CrmClient {
    CrmClient::builder(server.uri())
        .http_config(fast_http(server))
        .fetch_config(fetch)
        .build()
        .unwrap()
}

fn v2_fetch(page_size: u64) -> FetchConfig {
    FetchConfig::builder()
        .api_version(ApiVersion::V2)
        .page_size(page_size)
        .build()
        .unwrap()
}

// ============================================================================
// V2 Generation
// ============================================================================

#[tokio::test]
async fn test_v2_fetch_all_two_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/Leads"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ { "id": 1 }, { "id": 2 } ],
            "info": { "page": 1, "per_page": 2, "more_records": true }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/Leads"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ { "id": 3 } ],
            "info": { "page": 2, "per_page": 2, "more_records": false }
        })))
        .mount(&server)
        .await;

    let client = client(&server, v2_fetch(2));
    let query = QueryBuilder::new("Leads").build();
    let response = client.fetch_all(query).await.unwrap();

    assert_eq!(response.pages_fetched, 2);
    assert_eq!(response.page_count(), 2);

    let ids: Vec<_> = response
        .content
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_v2_query_params_reach_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/Contacts"))
        .and(query_param("fields", "id,email"))
        .and(query_param("criteria", "(status:equals:active)"))
        .and(query_param("sort_by", "modified_time"))
        .and(query_param("sort_order", "desc"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = client(&server, v2_fetch(2));
    let query = QueryBuilder::new("Contacts")
        .select(["id", "email"])
        .criteria("(status:equals:active)")
        .sort("modified_time", crmkit::types::SortOrder::Desc)
        .build();

    let response = client.fetch_all(query).await.unwrap();
    assert_eq!(response.pages_fetched, 1);
    assert!(response.content.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_v2_concurrent_fetch_stops_at_short_page() {
    let server = MockServer::start().await;

    for (page, records) in [
        (1, json!([ { "id": 1 }, { "id": 2 } ])),
        (2, json!([ { "id": 3 }, { "id": 4 } ])),
        (3, json!([ { "id": 5 } ])),
    ] {
        Mock::given(method("GET"))
            .and(path("/v2/Leads"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": records })),
            )
            .mount(&server)
            .await;
    }

    let fetch = FetchConfig::builder()
        .api_version(ApiVersion::V2)
        .page_size(2)
        .concurrency(3)
        .build()
        .unwrap();
    let client = client(&server, fetch);

    let response = client.fetch_all(QueryBuilder::new("Leads").build()).await.unwrap();

    assert_eq!(response.pages_fetched, 3);
    assert_eq!(response.content.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_v2_cutoff_filters_and_stops() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/Leads"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 1, "modified_time": "2024-06-01T10:00:00Z" },
                { "id": 2, "modified_time": "2024-06-01T12:00:00Z" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fetch = FetchConfig::builder()
        .api_version(ApiVersion::V2)
        .page_size(2)
        .max_modified_time(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
        .build()
        .unwrap();
    let client = client(&server, fetch);

    let response = client.fetch_all(QueryBuilder::new("Leads").build()).await.unwrap();

    // The record at the cutoff is excluded and page 2 is never requested
    let ids: Vec<_> = response
        .content
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(response.pages_fetched, 1);
}

// ============================================================================
// V1 Generation
// ============================================================================

#[tokio::test]
async fn test_v1_offset_windows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Leads"))
        .and(query_param("fromIndex", "1"))
        .and(query_param("toIndex", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "rows": [ { "id": 1 }, { "id": 2 } ] }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/Leads"))
        .and(query_param("fromIndex", "3"))
        .and(query_param("toIndex", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": null })))
        .mount(&server)
        .await;

    let fetch = FetchConfig::builder()
        .api_version(ApiVersion::V1)
        .page_size(2)
        .build()
        .unwrap();
    let client = client(&server, fetch);

    let response = client.fetch_all(QueryBuilder::new("Leads").build()).await.unwrap();

    assert_eq!(response.pages_fetched, 2);
    assert_eq!(response.content.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_v1_api_key_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Leads"))
        .and(query_param("authtoken", "v1-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "rows": [ { "id": 1 } ] }
        })))
        .mount(&server)
        .await;

    let fetch = FetchConfig::builder()
        .api_version(ApiVersion::V1)
        .page_size(2)
        .build()
        .unwrap();
    let client = CrmClient::builder(server.uri())
        .http_config(fast_http(&server))
        .auth(AuthConfig::ApiKey {
            location: Location::Query,
            name: "authtoken".to_string(),
            prefix: None,
            value: "v1-secret".to_string(),
        })
        .fetch_config(fetch)
        .build()
        .unwrap();

    let response = client.fetch_all(QueryBuilder::new("Leads").build()).await.unwrap();
    assert_eq!(response.content.as_array().unwrap().len(), 1);
}

// ============================================================================
// Transport Behavior Through the Engine
// ============================================================================

#[tokio::test]
async fn test_transient_500_is_retried_below_the_engine() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/Leads"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/Leads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ { "id": 1 } ]
        })))
        .mount(&server)
        .await;

    let client = client(&server, v2_fetch(2));
    let response = client.fetch_all(QueryBuilder::new("Leads").build()).await.unwrap();
    assert_eq!(response.content.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_persistent_failure_surfaces_from_fetch_all() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/Leads"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&server)
        .await;

    let client = client(&server, v2_fetch(2));
    let err = client
        .fetch_all(QueryBuilder::new("Leads").build())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 401, .. }));
}

#[tokio::test]
async fn test_engine_fetch_up_to_over_http() {
    let server = MockServer::start().await;

    for page in 1..=3 {
        Mock::given(method("GET"))
            .and(path("/v2/Leads"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [ { "id": page * 10 }, { "id": page * 10 + 1 } ]
            })))
            .mount(&server)
            .await;
    }

    let client = client(&server, v2_fetch(2));
    let mut engine = client.engine(QueryBuilder::new("Leads").build()).unwrap();

    engine.fetch_up_to(2).await.unwrap();
    assert_eq!(engine.pages_fetched(), 2);
    assert!(engine.has_more());
    assert_eq!(engine.state().records_fetched(), 4);
}

#[tokio::test]
async fn test_empty_body_is_an_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/Leads"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client(&server, v2_fetch(2));
    let response = client.fetch_all(QueryBuilder::new("Leads").build()).await.unwrap();

    assert_eq!(response.pages_fetched, 1);
    assert!(response.content.as_array().unwrap().is_empty());
}
