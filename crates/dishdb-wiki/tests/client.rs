//! Integration tests for `WikiClient` using wiremock HTTP mocks.

use dishdb_core::ErrorKind;
use dishdb_fetch::{HttpFetcher, RetryPolicy};
use dishdb_wiki::{Encyclopedia, WikiClient, WikiError};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> WikiClient {
    let fetcher = HttpFetcher::new(5, "dishdb-test/0.1", RetryPolicy::none())
        .expect("fetcher construction should not fail");
    WikiClient::new(fetcher, base_url).expect("client construction should not fail")
}

#[tokio::test]
async fn category_members_returns_first_page_with_cursor() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "batchcomplete": true,
        "continue": { "cmcontinue": "page|WAAKYE|77", "continue": "-||" },
        "query": { "categorymembers": [
            { "pageid": 10, "ns": 0, "title": "Banku" },
            { "pageid": 11, "ns": 0, "title": "Kenkey" },
            { "pageid": 12, "ns": 14, "title": "Category:Ghanaian soups" }
        ]}
    });

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "categorymembers"))
        .and(query_param("cmtitle", "Category:Ghanaian cuisine"))
        .and(query_param_is_missing("cmcontinue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .category_members("Ghanaian cuisine", None)
        .await
        .expect("should parse members");

    assert_eq!(page.articles.len(), 2);
    assert_eq!(page.articles[0].title, "Banku");
    assert_eq!(page.articles[0].page_id, 10);
    assert_eq!(page.subcategories, vec!["Ghanaian soups".to_string()]);
    assert_eq!(page.next_cursor.as_deref(), Some("page|WAAKYE|77"));
}

#[tokio::test]
async fn category_members_passes_cursor_and_ends_without_continue() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "batchcomplete": true,
        "query": { "categorymembers": [
            { "pageid": 77, "ns": 0, "title": "Waakye" }
        ]}
    });

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("cmcontinue", "page|WAAKYE|77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .category_members("Ghanaian cuisine", Some("page|WAAKYE|77"))
        .await
        .expect("should parse second page");

    assert_eq!(page.articles.len(), 1);
    assert!(page.subcategories.is_empty());
    assert!(page.next_cursor.is_none());
}

#[tokio::test]
async fn page_summary_extracts_intro_thumbnail_and_categories() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "batchcomplete": true,
        "query": { "pages": [{
            "pageid": 77,
            "ns": 0,
            "title": "Waakye",
            "extract": "Waakye is a traditional Ghanaian dish of rice and beans. It is eaten at breakfast.",
            "thumbnail": { "source": "https://upload.example/waakye.jpg", "width": 400, "height": 300 },
            "fullurl": "https://en.wikipedia.org/wiki/Waakye",
            "categories": [
                { "ns": 14, "title": "Category:Ghanaian cuisine" },
                { "ns": 14, "title": "Category:Legume dishes" }
            ]
        }]}
    });

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("titles", "Waakye"))
        .and(query_param("exintro", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let summary = client
        .page_summary("Waakye")
        .await
        .expect("request should succeed")
        .expect("page should exist");

    assert_eq!(summary.page_id, 77);
    assert!(summary
        .extract
        .as_deref()
        .is_some_and(|e| e.starts_with("Waakye is a traditional")));
    assert_eq!(
        summary.thumbnail.as_deref(),
        Some("https://upload.example/waakye.jpg")
    );
    assert_eq!(
        summary.url.as_deref(),
        Some("https://en.wikipedia.org/wiki/Waakye")
    );
    assert_eq!(summary.categories, vec!["Ghanaian cuisine", "Legume dishes"]);
}

#[tokio::test]
async fn page_summary_missing_page_is_none() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "batchcomplete": true,
        "query": { "pages": [{ "ns": 0, "title": "Not a real dish", "missing": true }] }
    });

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let summary = client
        .page_summary("Not a real dish")
        .await
        .expect("request should succeed");
    assert!(summary.is_none());
}

#[tokio::test]
async fn api_error_envelope_is_surfaced() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": { "code": "invalidcategory", "info": "The category name you entered is not valid." }
    });

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.category_members("<bad>", None).await.unwrap_err();
    assert!(
        matches!(err, WikiError::Api { ref code, .. } if code == "invalidcategory"),
        "got: {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::Permanent);
}

#[tokio::test]
async fn server_error_maps_to_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.page_summary("Fufu").await.unwrap_err();
    assert!(matches!(err, WikiError::Fetch(_)), "got: {err:?}");
    assert_eq!(err.kind(), ErrorKind::Transient);
}
