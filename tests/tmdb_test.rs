//! TMDB API client tests
//!
//! Tests movie detail retrieval and error handling.

use std::time::Duration;

use mockito::Server;
use moviescope::api::{MovieProvider, TmdbClient, TmdbError};

const MATRIX_RESPONSE: &str = r#"{
    "id": 603,
    "imdb_id": "tt0133093",
    "title": "The Matrix",
    "overview": "Set in the 22nd century, The Matrix tells the story of a computer hacker.",
    "release_date": "1999-03-31",
    "runtime": 136,
    "vote_average": 8.2,
    "vote_count": 26000,
    "genres": [
        {"id": 28, "name": "Action"},
        {"id": 878, "name": "Science Fiction"}
    ],
    "production_companies": [
        {"id": 79, "name": "Village Roadshow Pictures", "logo_path": null, "origin_country": "US"},
        {"id": 372, "name": "Groucho II Film Partnership", "logo_path": null, "origin_country": ""}
    ],
    "budget": 63000000,
    "revenue": 463517383,
    "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
    "backdrop_path": "/icmmSD4vTTDKOq2vvdulafOGw93.jpg"
}"#;

// =============================================================================
// Movie Detail Tests
// =============================================================================

#[tokio::test]
async fn test_movie_detail_parses_record() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/movie/603")
        .match_header("authorization", "Bearer test_key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MATRIX_RESPONSE)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let movie = client.movie_detail("603").await.unwrap();

    mock.assert_async().await;

    assert_eq!(movie.id, Some(603));
    assert_eq!(movie.title, "The Matrix");
    assert_eq!(movie.release_year(), "1999");
    assert_eq!(movie.runtime_label(), "136m");
    assert_eq!(movie.rating_label(), "8/10");
    assert_eq!(movie.votes_label(), "26000 votes");
    assert_eq!(movie.genres_label(), "Action - Science Fiction");
    assert_eq!(
        movie.companies_label(),
        "Village Roadshow Pictures - Groucho II Film Partnership"
    );
    assert_eq!(movie.budget_label(), "$63.0 million");
    assert_eq!(movie.revenue_label(), "$463.5 million");
    assert_eq!(
        movie.poster_url("https://image.tmdb.org/t/p").as_deref(),
        Some("https://image.tmdb.org/t/p/w500/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg")
    );
}

#[tokio::test]
async fn test_movie_detail_sparse_fields() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/movie/42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "title": "Sample",
                "vote_average": 7.4,
                "vote_count": 120,
                "genres": [],
                "production_companies": [],
                "budget": 2000000,
                "revenue": 5000000
            }"#,
        )
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let movie = client.movie_detail("42").await.unwrap();

    mock.assert_async().await;

    assert_eq!(movie.title, "Sample");
    assert_eq!(movie.rating_label(), "7/10");
    assert_eq!(movie.votes_label(), "120 votes");
    assert_eq!(movie.budget_label(), "$2.0 million");
    assert_eq!(movie.revenue_label(), "$5.0 million");
    assert_eq!(movie.genres_label(), "N/A");
    assert_eq!(movie.companies_label(), "N/A");
    assert_eq!(movie.runtime_label(), "N/A");
    assert!(movie.poster_url("https://image.tmdb.org/t/p").is_none());
}

#[tokio::test]
async fn test_movie_detail_encodes_id_as_one_segment() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/movie/a%2Fb%3Fc")
        .with_status(200)
        .with_body(r#"{"title": "Odd"}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let movie = client.movie_detail("a/b?c").await.unwrap();

    mock.assert_async().await;
    assert_eq!(movie.title, "Odd");
}

#[tokio::test]
async fn test_provider_trait_delegates_to_client() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/movie/603")
        .with_status(200)
        .with_body(MATRIX_RESPONSE)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let provider: &dyn MovieProvider = &client;
    let movie = provider.movie_details("603").await.unwrap();

    mock.assert_async().await;
    assert_eq!(movie.title, "The Matrix");
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[tokio::test]
async fn test_not_found() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/movie/999999999")
        .with_status(404)
        .with_body(r#"{"status_code": 34, "status_message": "The resource you requested could not be found."}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let err = client.movie_detail("999999999").await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, TmdbError::NotFound));
}

#[tokio::test]
async fn test_not_found_through_provider_is_anyhow() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/movie/1")
        .with_status(404)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let err = client.movie_details("1").await.unwrap_err();

    assert!(matches!(err.downcast_ref::<TmdbError>(), Some(TmdbError::NotFound)));
}

#[tokio::test]
async fn test_server_error() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/movie/603")
        .with_status(503)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let err = client.movie_detail("603").await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, TmdbError::ServerError(503)));
}

#[tokio::test]
async fn test_invalid_json() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/movie/603")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let err = client.movie_detail("603").await.unwrap_err();

    match err {
        TmdbError::InvalidResponse(msg) => assert!(msg.contains("JSON parse error")),
        other => panic!("expected InvalidResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_retries_then_gives_up() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/movie/603")
        .with_status(429)
        .with_header("Retry-After", "0")
        .expect(3)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url());
    let err = client.movie_detail("603").await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(err, TmdbError::RateLimited));
}

#[tokio::test]
async fn test_rate_limit_huge_retry_after_is_capped() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/movie/42")
        .with_status(429)
        .with_header("Retry-After", "86400")
        .expect(3)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url("test_key", server.url())
        .with_max_retry_wait(Duration::from_millis(50));
    let result = tokio::time::timeout(Duration::from_secs(5), client.movie_detail("42"))
        .await
        .expect("rate-limited lookup should give up within the wait cap");

    mock.assert_async().await;
    assert!(matches!(result, Err(TmdbError::RateLimited)));
}
