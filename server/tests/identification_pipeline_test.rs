//! End-to-end pipeline scenarios with the catalog and the language model
//! replaced by scripted doubles. The filename parser runs for real - it is
//! deterministic.

mod support;

use std::sync::Arc;

use assert_matches::assert_matches;

use mediainfod::application::IdentifyMediaUseCase;
use mediainfod::domain::entities::media_info::MediaInfo;
use mediainfod::domain::services::GuessItScanner;
use mediainfod::domain::value_objects::MediaType;
use mediainfod::shared::error::{ApplicationError, DomainError};

use support::{BlindScanner, InMemoryMediaCache, StubCatalog, StubLlm};

fn movie_catalog() -> StubCatalog {
    let mut catalog = StubCatalog::new();

    catalog.movie_search.insert(
        "The Matrix".to_string(),
        MediaInfo::builder().with_tmdb_id(603).with_media_type(MediaType::Movie).build(),
    );
    catalog.movie_details.insert(
        603,
        MediaInfo::builder()
            .with_tmdb_id(603)
            .with_title("The Matrix")
            .with_original_title("The Matrix")
            .with_searchable_reference("The Matrix")
            .with_overview("A computer hacker learns the truth about his reality.")
            .with_year(1999)
            .with_media_type(MediaType::Movie)
            .with_used_tmdb(true)
            .build(),
    );
    catalog.external_ids.insert(
        603,
        MediaInfo::builder()
            .with_tmdb_id(603)
            .with_imdb_id("tt0133093")
            .with_used_tmdb(true)
            .build(),
    );

    catalog
}

fn series_catalog() -> StubCatalog {
    let mut catalog = StubCatalog::new();

    catalog.series_search.insert(
        "Friends".to_string(),
        MediaInfo::builder()
            .with_tmdb_id(1668)
            .with_tmdb_series_id(1668)
            .with_media_type(MediaType::Tv)
            .build(),
    );
    catalog.series_details.insert(
        1668,
        MediaInfo::builder()
            .with_tmdb_id(1668)
            .with_tmdb_series_id(1668)
            .with_title("Friends")
            .with_original_title("Friends")
            .with_searchable_reference("Friends")
            .with_year(1994)
            .with_media_type(MediaType::Tv)
            .with_used_tmdb(true)
            .build(),
    );
    catalog.episode_details.insert(
        (1668, 2, 11),
        MediaInfo::builder()
            .with_tmdb_id(85987)
            .with_tmdb_series_id(1668)
            .with_season(2)
            .with_episode(11)
            .with_episode_title("The One with the Apothecary Table")
            .with_media_type(MediaType::Tv)
            .with_used_tmdb(true)
            .build(),
    );
    catalog.external_ids.insert(
        1668,
        MediaInfo::builder()
            .with_tmdb_id(1668)
            .with_imdb_id("tt0108778")
            .with_tvdb_id(79168)
            .with_used_tmdb(true)
            .build(),
    );

    catalog
}

fn use_case(
    cache: Arc<InMemoryMediaCache>,
    catalog: Arc<StubCatalog>,
    llm: Arc<StubLlm>,
) -> IdentifyMediaUseCase {
    IdentifyMediaUseCase::new(Arc::new(GuessItScanner::new()), cache, catalog, llm)
}

#[tokio::test]
async fn movie_identification_end_to_end() {
    let cache = Arc::new(InMemoryMediaCache::new());
    let catalog = Arc::new(movie_catalog());
    let llm = Arc::new(StubLlm::new());
    let identifier = use_case(cache.clone(), catalog.clone(), llm.clone());

    let record = identifier
        .identify_by_filename("The.Matrix.1999.1080p.BluRay.x264.mkv", None)
        .await
        .unwrap()
        .expect("expected an identification");

    assert_eq!(record.media_type, Some(MediaType::Movie));
    assert_eq!(record.title.as_deref(), Some("The Matrix"));
    assert_eq!(record.year, Some(1999));
    assert_eq!(record.tmdb_id, Some(603));
    assert_eq!(record.imdb_id.as_deref(), Some("tt0133093"));
    assert!(record.used_guessit);
    assert!(record.used_tmdb);
    assert!(!record.used_openai);

    // Persisted with a surrogate id
    assert!(record.id.is_some());
    assert_eq!(cache.row_count(), 1);

    // The parser sufficed; the model never ran
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn repeat_identification_short_circuits_on_cache() {
    let cache = Arc::new(InMemoryMediaCache::new());
    let catalog = Arc::new(movie_catalog());
    let llm = Arc::new(StubLlm::new());
    let identifier = use_case(cache.clone(), catalog.clone(), llm.clone());

    let first = identifier
        .identify_by_filename("The.Matrix.1999.1080p.BluRay.x264.mkv", None)
        .await
        .unwrap()
        .unwrap();
    let calls_after_first = catalog.total_calls();

    let second = identifier
        .identify_by_filename("The.Matrix.1999.1080p.BluRay.x264.mkv", None)
        .await
        .unwrap()
        .unwrap();

    // No catalog traffic the second time, and no new row
    assert_eq!(catalog.total_calls(), calls_after_first);
    assert_eq!(llm.call_count(), 0);
    assert_eq!(cache.row_count(), 1);
    assert_eq!(second.id, first.id);
    assert_eq!(
        serde_json::to_string(&second).unwrap(),
        serde_json::to_string(&first).unwrap()
    );
}

#[tokio::test]
async fn episode_identification_end_to_end() {
    let cache = Arc::new(InMemoryMediaCache::new());
    let catalog = Arc::new(series_catalog());
    let llm = Arc::new(StubLlm::new());
    let identifier = use_case(cache.clone(), catalog.clone(), llm.clone());

    let record = identifier
        .identify_by_filename("Friends.2x11.mkv", None)
        .await
        .unwrap()
        .expect("expected an identification");

    assert_eq!(record.media_type, Some(MediaType::Tv));
    assert_eq!(record.tmdb_series_id, Some(1668));
    // The record's id is the episode's, not the series'
    assert_eq!(record.tmdb_id, Some(85987));
    assert_eq!(record.season, Some(2));
    assert_eq!(record.episode, Some(11));
    assert_eq!(
        record.episode_title.as_deref(),
        Some("The One with the Apothecary Table")
    );
    assert_eq!(record.imdb_id.as_deref(), Some("tt0108778"));
    assert_eq!(llm.call_count(), 0);
    assert_eq!(cache.row_count(), 1);
}

#[tokio::test]
async fn poster_sidecar_resolves_through_parent_directory() {
    let cache = Arc::new(InMemoryMediaCache::new());
    let mut catalog = series_catalog();
    catalog.series_search.insert(
        "Friends".to_string(),
        MediaInfo::builder()
            .with_tmdb_id(1668)
            .with_tmdb_series_id(1668)
            .with_media_type(MediaType::Tv)
            .build(),
    );
    let catalog = Arc::new(catalog);
    let llm = Arc::new(StubLlm::new());
    let identifier = use_case(cache.clone(), catalog.clone(), llm.clone());

    let record = identifier
        .identify_by_filename("shows/Friends.2x11.480p.DVD.x264-SAiNTS/poster.jpg", None)
        .await
        .unwrap()
        .expect("expected an identification");

    assert_eq!(record.media_type, Some(MediaType::Tv));
    assert_eq!(record.season, Some(2));
    assert_eq!(record.episode, Some(11));
}

#[tokio::test]
async fn tv_metadata_without_episode_fails_before_any_stage() {
    let cache = Arc::new(InMemoryMediaCache::new());
    let catalog = Arc::new(StubCatalog::new());
    let llm = Arc::new(StubLlm::new());
    let identifier = use_case(cache.clone(), catalog.clone(), llm.clone());

    let result = identifier
        .identify_by_metadata("tv", 2024, "Example", None, Some(1), None)
        .await;

    assert_matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidInput(_)))
    );
    assert_eq!(catalog.total_calls(), 0);
    assert_eq!(llm.call_count(), 0);
    assert_eq!(cache.row_count(), 0);
}

#[tokio::test]
async fn failed_movie_search_retries_with_basename_then_surfaces() {
    let cache = Arc::new(InMemoryMediaCache::new());
    // Empty catalog: every search misses
    let catalog = Arc::new(StubCatalog::new());
    let llm = Arc::new(StubLlm::new());
    let identifier = use_case(cache.clone(), catalog.clone(), llm.clone());

    let result = identifier
        .identify_by_filename("movies/Some.Movie.2020.1080p.BluRay.x264.mkv", None)
        .await;

    assert_matches!(result, Err(ApplicationError::Pipeline(_)));
    // One search for the full path, one for the basename retry
    assert_eq!(catalog.search_calls.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[tokio::test]
async fn model_fallback_identifies_when_parser_is_blind() {
    let cache = Arc::new(InMemoryMediaCache::new());
    let catalog = Arc::new(movie_catalog());
    let llm = Arc::new(StubLlm {
        media_type: Some("movie".to_string()),
        movie_title: Some("The Matrix".to_string()),
        ..StubLlm::new()
    });

    let identifier = IdentifyMediaUseCase::new(
        Arc::new(BlindScanner),
        cache.clone(),
        catalog.clone(),
        llm.clone(),
    );

    let record = identifier
        .identify_by_filename("matrix-unreadable-name.mkv", None)
        .await
        .unwrap()
        .expect("expected an identification");

    assert_eq!(record.tmdb_id, Some(603));
    assert!(record.used_openai);
    assert!(!record.used_guessit);
    assert!(llm.call_count() >= 2);
}

#[tokio::test]
async fn unidentifiable_input_returns_none() {
    let cache = Arc::new(InMemoryMediaCache::new());
    let catalog = Arc::new(StubCatalog::new());
    // The model cannot classify either
    let llm = Arc::new(StubLlm {
        media_type: Some("unknown".to_string()),
        ..StubLlm::new()
    });

    let identifier = IdentifyMediaUseCase::new(
        Arc::new(BlindScanner),
        cache.clone(),
        catalog.clone(),
        llm.clone(),
    );

    let result = identifier
        .identify_by_filename("gibberish-name.bin", None)
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(cache.row_count(), 0);
}
