use std::time::Duration;

use httpmock::{Method::GET, MockServer};
use pretty_assertions::assert_eq;
use serde_json::json;

use bookfinder::{
    client::CatalogClient,
    config::CatalogConfig,
    error::CatalogError,
    query,
    traits::CatalogService,
    types::{book::BookRecord, cover::CoverSize},
};

fn client(server: &MockServer) -> CatalogClient {
    CatalogClient::new(CatalogConfig {
        base_url: server.base_url(),
        timeout_secs: 1,
        ..CatalogConfig::default()
    })
    .unwrap()
}

fn hobbit_docs() -> serde_json::Value {
    json!({
        "numFound": 2,
        "docs": [
            {
                "key": "/works/OL27482W",
                "title": "The Hobbit",
                "author_name": ["J.R.R. Tolkien"],
                "cover_i": 14627509,
                "number_of_pages_median": 320,
                "publisher_facet": ["Allen & Unwin"],
                "publish_date": ["1937"]
            },
            {
                "key": "/works/OL262758W",
                "title": "The Hobbit, or, There and Back Again"
            }
        ]
    })
}

#[tokio::test]
async fn search_sends_built_query_and_decodes_docs() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search.json")
                .query_param("q", "tolkien hobbit")
                .query_param("page", "1")
                .query_param("limit", "10");
            then.status(200).json_body(hobbit_docs());
        })
        .await;

    let query = query::build("tolkien hobbit");
    assert_eq!(query, "tolkien+hobbit&page=1&limit=10");
    let results = client(&server).search(&query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(results.len(), 2);
    assert!(results
        .iter()
        .any(|x| x.title.as_deref().unwrap_or_default().contains("Hobbit")));
    assert_eq!(results.first().unwrap().authors, vec!["J.R.R. Tolkien"]);
    assert!(results.get(1).unwrap().authors.is_empty());
}

#[tokio::test]
async fn empty_docs_are_an_empty_result_set() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search.json");
            then.status(200).json_body(json!({ "numFound": 0, "docs": [] }));
        })
        .await;

    let results = client(&server).search(&query::build("zzzz")).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn repeated_search_is_idempotent() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search.json");
            then.status(200).json_body(hobbit_docs());
        })
        .await;

    let client = client(&server);
    let query = query::build("tolkien hobbit");
    let first = client.search(&query).await.unwrap();
    let second = client.search(&query).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search.json");
            then.status(503);
        })
        .await;

    let err = client(&server).search(&query::build("a")).await.unwrap_err();
    match err {
        CatalogError::Status { status, .. } => assert_eq!(status.as_u16(), 503),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search.json");
            then.status(200).body(r#"{"docs": [{"title": 12}]}"#);
        })
        .await;

    let err = client(&server).search(&query::build("a")).await.unwrap_err();
    match err {
        CatalogError::Decode(e) => assert!(e.path().to_string().contains("title"), "{e}"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn slow_catalog_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search.json");
            then.status(200)
                .json_body(hobbit_docs())
                .delay(Duration::from_secs(3));
        })
        .await;

    let err = client(&server).search(&query::build("a")).await.unwrap_err();
    assert!(err.is_timeout(), "{err:?}");
}

#[tokio::test]
async fn lookup_prefers_exact_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search.json")
                .query_param("q", "/works/OL262758W");
            then.status(200).json_body(hobbit_docs());
        })
        .await;

    let record = client(&server).lookup("/works/OL262758W").await.unwrap();
    mock.assert_async().await;
    assert_eq!(record.key.as_deref(), Some("/works/OL262758W"));
}

#[tokio::test]
async fn lookup_falls_back_to_first_record() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search.json");
            then.status(200).json_body(hobbit_docs());
        })
        .await;

    let record = client(&server).lookup("hobbit").await.unwrap();
    assert_eq!(record.key.as_deref(), Some("/works/OL27482W"));
}

#[tokio::test]
async fn lookup_without_matches_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search.json");
            then.status(200).json_body(json!({ "docs": [] }));
        })
        .await;

    let record = client(&server).lookup("/works/OL0W").await.unwrap();
    assert!(record.is_not_found());
    assert_eq!(record, BookRecord::not_found());
}

#[test]
fn cover_urls_follow_config() {
    let client = CatalogClient::new(CatalogConfig::default()).unwrap();
    let record = BookRecord {
        cover_id: Some("14627509".into()),
        ..BookRecord::default()
    };
    assert_eq!(
        client.cover_url(&record, CoverSize::Small).as_deref(),
        Some("https://covers.openlibrary.org/b/id/14627509-S.jpg")
    );
    assert_eq!(client.cover_url(&BookRecord::default(), CoverSize::Large), None);
}
