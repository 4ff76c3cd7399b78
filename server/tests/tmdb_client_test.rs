//! TMDB client tests against a mock HTTP server.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mediainfod::domain::value_objects::MediaType;
use mediainfod::infrastructure::external::TmdbClient;
use mediainfod::interfaces::external_services::CatalogService;

async fn client_for(server: &MockServer) -> TmdbClient {
    TmdbClient::new("test-token").unwrap().with_base_url(&server.uri())
}

#[tokio::test]
async fn search_movie_maps_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "The Matrix"))
        .and(query_param("year", "1999"))
        .and(query_param("include_adult", "true"))
        .and(query_param("language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                {
                    "id": 603,
                    "title": "The Matrix",
                    "original_title": "The Matrix",
                    "overview": "A computer hacker learns the truth.",
                    "release_date": "1999-03-30",
                    "original_language": "en",
                    "genre_ids": [28, 878]
                },
                { "id": 999, "title": "The Matrix Reloaded", "release_date": "2003-05-15" }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.search_movie("The Matrix", Some(1999)).await.unwrap();

    assert_eq!(result.tmdb_id, Some(603));
    assert_eq!(result.title.as_deref(), Some("The Matrix"));
    assert_eq!(result.year, Some(1999));
    assert_eq!(result.media_type, Some(MediaType::Movie));
    assert!(result.used_tmdb);
}

#[tokio::test]
async fn search_series_sets_series_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/tv"))
        .and(query_param("query", "Friends"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "id": 1668, "name": "Friends", "original_name": "Friends", "first_air_date": "1994-09-22" }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.search_series("Friends", None).await.unwrap();

    assert_eq!(result.tmdb_id, Some(1668));
    assert_eq!(result.tmdb_series_id, Some(1668));
    assert_eq!(result.media_type, Some(MediaType::Tv));
}

#[tokio::test]
async fn empty_results_return_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.search_movie("No Such Film", None).await.is_none());
}

#[tokio::test]
async fn http_errors_return_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status_message": "The resource you requested could not be found."
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.get_movie_details(42).await.is_none());
}

#[tokio::test]
async fn malformed_payload_returns_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/603"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.get_movie_details(603).await.is_none());
}

#[tokio::test]
async fn episode_details_use_episode_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tv/1668/season/2/episode/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 85987,
            "name": "The One with the Apothecary Table",
            "overview": "Rachel buys a table.",
            "season_number": 2,
            "episode_number": 11,
            "air_date": "1996-01-04"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.get_episode_details(1668, 2, 11).await.unwrap();

    assert_eq!(result.tmdb_id, Some(85987));
    assert_eq!(result.tmdb_series_id, Some(1668));
    assert_eq!(result.season, Some(2));
    assert_eq!(result.episode, Some(11));
    assert_eq!(
        result.episode_title.as_deref(),
        Some("The One with the Apothecary Table")
    );
}

#[tokio::test]
async fn external_ids_hit_the_right_endpoint_per_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/603/external_ids"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "imdb_id": "tt0133093",
            "wikidata_id": "Q83495"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tv/1668/external_ids"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "imdb_id": "tt0108778",
            "tvdb_id": 79168
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let movie = client
        .get_external_ids(603, MediaType::Movie, None, None)
        .await
        .unwrap();
    assert_eq!(movie.imdb_id.as_deref(), Some("tt0133093"));
    assert_eq!(movie.tmdb_id, Some(603));

    let series = client.get_external_ids(1668, MediaType::Tv, None, None).await.unwrap();
    assert_eq!(series.imdb_id.as_deref(), Some("tt0108778"));
    assert_eq!(series.tvdb_id, Some(79168));
}

#[tokio::test]
#[ignore = "exercises the full jittered rate-limit back-off (sleeps ~10s)"]
async fn rate_limit_retries_once_after_backoff() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/movie/603"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/603"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 603,
            "title": "The Matrix",
            "release_date": "1999-03-30"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.get_movie_details(603).await.unwrap();
    assert_eq!(result.tmdb_id, Some(603));
}
