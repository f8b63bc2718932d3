//! Integration tests for the API layer
//!
//! These tests run the lister and detail fetcher against a wiremock server
//! and check both the requests sent and how responses are classified.

use plugin_catalog::api::{fetch_page, fetch_plugin_details, ApiClient};
use plugin_catalog::config::Config;
use plugin_catalog::CatalogError;
use serde_json::json;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(server: &MockServer, per_page: u32) -> ApiClient {
    ApiClient::new(&Config::new(server.uri(), per_page, 1)).expect("Failed to build client")
}

#[tokio::test]
async fn test_fetch_page_sends_popular_browse_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("action", "query_plugins"))
        .and(query_param("request[page]", "3"))
        .and(query_param("request[per_page]", "25"))
        .and(query_param("request[browse]", "popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": {"page": 3, "pages": 40},
            "plugins": [
                {"name": "Akismet", "slug": "akismet", "rating": 90},
                {"name": "Jetpack", "slug": "jetpack"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server, 25);
    let entries = fetch_page(&client, 3).await.expect("Listing failed");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name.as_deref(), Some("Akismet"));
    assert_eq!(entries[0].slug(), Some("akismet"));
    assert_eq!(entries[1].slug(), Some("jetpack"));
}

#[tokio::test]
async fn test_fetch_page_uses_clamped_page_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("request[per_page]", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plugins": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server, 500);
    let entries = fetch_page(&client, 1).await.expect("Listing failed");

    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_fetch_page_without_plugins_field_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"info": {"page": 99}})))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server, 10);
    let entries = fetch_page(&client, 99).await.expect("Listing failed");

    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_fetch_page_server_error_is_not_an_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server, 10);
    let result = fetch_page(&client, 1).await;

    assert!(matches!(
        result,
        Err(CatalogError::UnexpectedStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_fetch_page_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server, 10);
    let result = fetch_page(&client, 1).await;

    assert!(matches!(result, Err(CatalogError::Decode { .. })));
}

#[tokio::test]
async fn test_fetch_page_connection_refused() {
    // Nothing listens on the discard port
    let mut config = Config::new("http://127.0.0.1:9/", 10, 1);
    config.request_timeout_secs = 5;
    let client = ApiClient::new(&config).expect("Failed to build client");

    let result = fetch_page(&client, 1).await;

    assert!(matches!(result, Err(CatalogError::Http { .. })));
}

#[tokio::test]
async fn test_fetch_plugin_details_selects_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("action", "plugin_information"))
        .and(query_param("request[slug]", "akismet"))
        .and(query_param("request[fields][sections]", "0"))
        .and(query_param("request[fields][reviews]", "0"))
        .and(query_param("request[fields][downloaded]", "1"))
        .and(query_param("request[fields][active_installs]", "1"))
        .and(query_param("request[fields][last_updated]", "1"))
        .and(query_param("request[fields][rating]", "1"))
        .and(query_param("request[fields][homepage]", "1"))
        .and(query_param("request[fields][versions]", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Akismet",
            "slug": "akismet",
            "active_installs": 5000000,
            "versions": {"5.3": "https://downloads.example.org/akismet.5.3.zip"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server, 10);
    let record = fetch_plugin_details(&client, "akismet")
        .await
        .expect("Detail fetch failed");

    assert_eq!(record["slug"], json!("akismet"));
    assert_eq!(record["active_installs"], json!(5000000));
    assert!(record["versions"].is_object());
}

#[tokio::test]
async fn test_fetch_plugin_details_non_object_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server, 10);
    let result = fetch_plugin_details(&client, "ghost").await;

    assert!(matches!(result, Err(CatalogError::Decode { .. })));
}

#[tokio::test]
async fn test_fetch_plugin_details_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("request[slug]", "missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Plugin not found."})),
        )
        .mount(&mock_server)
        .await;

    let client = create_client(&mock_server, 10);
    let result = fetch_plugin_details(&client, "missing").await;

    assert!(matches!(
        result,
        Err(CatalogError::UnexpectedStatus { status: 404, .. })
    ));
}
