//! Tests for the catalog client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real catalog connection.

use popcorn_catalog_client::{CatalogConfig, CatalogError, OmdbClient};
use popcorn_core::{FetchError, MovieCatalog, MovieId};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn client_for(server: &MockServer) -> OmdbClient {
    OmdbClient::new(CatalogConfig::new(server.uri(), API_KEY)).unwrap()
}

fn matrix_search_body() -> serde_json::Value {
    serde_json::json!({
        "Search": [
            {"Title": "The Matrix", "Year": "1999", "imdbID": "tt0133093", "Type": "movie", "Poster": "https://example.com/matrix.jpg"},
            {"Title": "The Matrix Reloaded", "Year": "2003", "imdbID": "tt0234215", "Type": "movie", "Poster": "N/A"}
        ],
        "totalResults": "2",
        "Response": "True"
    })
}

fn shawshank_detail_body() -> serde_json::Value {
    serde_json::json!({
        "Title": "The Shawshank Redemption",
        "Year": "1994",
        "Rated": "R",
        "Released": "14 Oct 1994",
        "Runtime": "142 min",
        "Genre": "Drama",
        "Director": "Frank Darabont",
        "Actors": "Tim Robbins, Morgan Freeman, Bob Gunton",
        "Plot": "Over the course of several years, two convicts form a friendship.",
        "Poster": "https://example.com/shawshank.jpg",
        "imdbRating": "9.3",
        "imdbID": "tt0111161",
        "Response": "True"
    })
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        let result = OmdbClient::new(CatalogConfig::new("", API_KEY));

        match result.unwrap_err() {
            CatalogError::InvalidUrl(msg) => {
                assert!(msg.contains("empty"));
            }
            e => panic!("Expected InvalidUrl error, got: {:?}", e),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let result = OmdbClient::new(CatalogConfig::new("www.omdbapi.com", API_KEY));

        match result.unwrap_err() {
            CatalogError::InvalidUrl(msg) => {
                assert!(msg.contains("http://") || msg.contains("https://"));
            }
            e => panic!("Expected InvalidUrl error, got: {:?}", e),
        }
    }

    #[test]
    fn test_url_normalization_multiple_trailing_slashes() {
        let client = OmdbClient::new(CatalogConfig::new("https://www.omdbapi.com///", API_KEY))
            .unwrap();

        assert_eq!(client.base_url(), "https://www.omdbapi.com");
    }
}

// =============================================================================
// Search Tests
// =============================================================================

mod search {
    use super::*;

    #[tokio::test]
    async fn test_successful_search() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("apikey", API_KEY))
            .and(query_param("s", "matrix"))
            .respond_with(ResponseTemplate::new(200).set_body_json(matrix_search_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let results = client
            .search_movies("matrix", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results.total_results, 2);
        assert_eq!(results.movies[0].id, MovieId::new("tt0133093"));
        assert_eq!(results.movies[0].title, "The Matrix");
        assert_eq!(results.movies[1].year, "2003");
        assert_eq!(results.movies[1].poster_url, "N/A");
    }

    #[tokio::test]
    async fn test_title_is_url_encoded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("s", "star wars & more"))
            .respond_with(ResponseTemplate::new(200).set_body_json(matrix_search_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client
            .search_movies("star wars & more", &CancellationToken::new())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_response_false_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": "False",
                "Error": "Movie not found!"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .search_movies("qwertyuiop", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        match err {
            CatalogError::NotFound(reason) => assert_eq!(reason, "Movie not found!"),
            e => panic!("Expected NotFound, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_too_many_results_is_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": "False",
                "Error": "Too many results."
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .search("a", &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::NotFound("Too many results.".into()));
        assert_eq!(err.user_message(), Some("Movie not found!"));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .search_movies("matrix", &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            CatalogError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("Internal Server Error"));
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_unauthorized_key_is_network_class() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "Response": "False",
                "Error": "Invalid API key!"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .search("matrix", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
        assert_eq!(
            err.user_message(),
            Some("An error occurred while fetching the data")
        );
    }

    #[tokio::test]
    async fn test_invalid_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .search_movies("matrix", &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            CatalogError::ParseError(_) => {}
            e => panic!("Expected ParseError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_unreachable_catalog() {
        let client = OmdbClient::new(CatalogConfig::new("http://127.0.0.1:1", API_KEY)).unwrap();

        let err = client
            .search("matrix", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn test_cancel_aborts_slow_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(matrix_search_body())
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let err = client.search_movies("matrix", &cancel).await.unwrap_err();

        assert!(err.is_cancelled());
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}

// =============================================================================
// Detail Tests
// =============================================================================

mod detail {
    use super::*;

    #[tokio::test]
    async fn test_successful_detail() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("apikey", API_KEY))
            .and(query_param("i", "tt0111161"))
            .respond_with(ResponseTemplate::new(200).set_body_json(shawshank_detail_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let detail = client
            .movie_detail(&MovieId::new("tt0111161"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(detail.title, "The Shawshank Redemption");
        assert_eq!(detail.runtime, "142 min");
        assert_eq!(detail.runtime_minutes, Some(142));
        assert_eq!(detail.catalog_rating, Some(9.3));
        assert_eq!(detail.director, "Frank Darabont");
        assert_eq!(detail.genre, "Drama");
        assert_eq!(detail.release_date, "14 Oct 1994");
    }

    #[tokio::test]
    async fn test_same_id_is_fetched_every_time() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("i", "tt0111161"))
            .respond_with(ResponseTemplate::new(200).set_body_json(shawshank_detail_body()))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let id = MovieId::new("tt0111161");
        let cancel = CancellationToken::new();

        client.get_detail(&id, &cancel).await.unwrap();
        client.get_detail(&id, &cancel).await.unwrap();
    }

    #[tokio::test]
    async fn test_incorrect_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Response": "False",
                "Error": "Incorrect IMDb ID."
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .movie_detail(&MovieId::new("tt-bogus"), &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            CatalogError::NotFound(reason) => assert_eq!(reason, "Incorrect IMDb ID."),
            e => panic!("Expected NotFound, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_detail_cancelled() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(shawshank_detail_body())
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = client
            .get_detail(&MovieId::new("tt0111161"), &cancel)
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::Cancelled);
    }
}
