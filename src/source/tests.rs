//! Tests for source module

use super::*;
use crate::config::ApiConfig;
use crate::error::Error;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, page_size: u32) -> SourceClient {
    let config = ApiConfig {
        base_url: server.uri(),
        page_size,
        ..ApiConfig::default()
    };
    SourceClient::new(&config).unwrap()
}

fn page_of(ids: &[u32]) -> Vec<Value> {
    ids.iter()
        .map(|id| json!({"id": id.to_string(), "name": format!("brewery {id}")}))
        .collect()
}

async fn mount_page(server: &MockServer, page: &str, body: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/breweries"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_all_concatenates_pages_in_order() {
    let server = MockServer::start().await;
    mount_page(&server, "1", page_of(&[1, 2])).await;
    mount_page(&server, "2", page_of(&[3, 4])).await;
    mount_page(&server, "3", vec![]).await;

    let records = client_for(&server, 2).fetch_all().await.unwrap();

    let ids: Vec<&str> = records
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_fetch_all_requests_the_configured_page_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breweries"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server, 100).fetch_all().await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_full_page_then_empty_page_yields_exactly_those_records() {
    let server = MockServer::start().await;
    let ids: Vec<u32> = (1..=100).collect();
    mount_page(&server, "1", page_of(&ids)).await;
    mount_page(&server, "2", vec![]).await;

    let records = client_for(&server, 100).fetch_all().await.unwrap();
    assert_eq!(records.len(), 100);
    assert_eq!(records[0]["id"], "1");
    assert_eq!(records[99]["id"], "100");
}

#[tokio::test]
async fn test_non_success_status_aborts_without_partial_data() {
    let server = MockServer::start().await;
    mount_page(&server, "1", page_of(&[1, 2])).await;

    Mock::given(method("GET"))
        .and(path("/breweries"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server, 2).fetch_all().await.unwrap_err();

    match err {
        Error::Fetch { page, status } => {
            assert_eq!(page, 2);
            assert_eq!(status, 500);
        }
        other => panic!("expected Fetch error, got {other}"),
    }
}

#[tokio::test]
async fn test_probe_requests_one_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breweries"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_of(&[1])))
        .expect(1)
        .mount(&server)
        .await;

    let seen = client_for(&server, 100).probe().await.unwrap();
    assert_eq!(seen, 1);
}
