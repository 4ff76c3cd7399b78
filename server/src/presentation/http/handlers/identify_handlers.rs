//! Identification Handlers
//!
//! The two façade endpoints plus direct cache retrieval by id. Every
//! request writes an audit row at arrival and completes it with the
//! outcome before the response leaves.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};
use uuid::Uuid;

use crate::domain::entities::media_info::MediaInfo;
use crate::domain::repositories::CacheLookupKey;
use crate::presentation::http::dto::MediaInfoResponse;
use crate::presentation::http::AppState;
use crate::shared::error::ApplicationError;

/// Query parameters of `/api/guess`
#[derive(Debug, Deserialize)]
pub struct GuessQuery {
    /// Filename to analyze
    pub it: Option<String>,
}

/// Query parameters of `/api/media-info`
#[derive(Debug, Deserialize)]
pub struct MediaInfoQuery {
    pub media_type: Option<String>,
    pub year: Option<i32>,
    pub title: Option<String>,
    pub season: Option<i32>,
    pub episode: Option<i32>,
}

/// Query parameters of `/api/statistics`
#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    pub num_requests: Option<i64>,
}

fn error_body(detail: &str) -> Json<serde_json::Value> {
    Json(json!({ "detail": detail }))
}

/// Completes the audit row and renders an identification outcome
async fn respond_with_media(
    state: &AppState,
    request_id: Uuid,
    media: Option<MediaInfo>,
) -> Response {
    match media {
        Some(media) => {
            log_completed(state, request_id, 200, media.id, None).await;
            (StatusCode::OK, Json(MediaInfoResponse::from(&media))).into_response()
        }
        None => {
            log_completed(state, request_id, 204, None, None).await;
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

/// Completes the audit row and renders an identification failure
async fn respond_with_error(state: &AppState, request_id: Uuid, err: ApplicationError) -> Response {
    let status = match &err {
        ApplicationError::Domain(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let detail = err.to_string();

    log_completed(state, request_id, status.as_u16() as i32, None, Some(&detail)).await;
    (status, error_body(&detail)).into_response()
}

async fn log_completed(
    state: &AppState,
    request_id: Uuid,
    status: i32,
    media_id: Option<Uuid>,
    error_message: Option<&str>,
) {
    if let Err(err) = state
        .request_log
        .log_completed(request_id, status, media_id, error_message)
        .await
    {
        warn!("Failed to complete audit row {}: {}", request_id, err);
    }
}

/// GET /api/guess?it=<filename>
///
/// Identifies media from a filename. 400 when the filename is missing,
/// 204 when nothing could be identified, 500 on pipeline failure.
pub async fn guess_filename(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(query): Query<GuessQuery>,
) -> Response {
    let filename = match query.it.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        Some(filename) => filename.to_string(),
        None => {
            return (StatusCode::BAD_REQUEST, error_body("Filename not provided")).into_response()
        }
    };

    let request_id = match state
        .request_log
        .log_start("/api/guess", &filename, &addr.ip().to_string())
        .await
    {
        Ok(id) => id,
        Err(err) => {
            error!("Failed to record request start: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Failed to record request"),
            )
                .into_response();
        }
    };

    match state
        .identify_use_case
        .identify_by_filename(&filename, Some(request_id))
        .await
    {
        Ok(media) => respond_with_media(&state, request_id, media).await,
        Err(err) => respond_with_error(&state, request_id, err).await,
    }
}

/// GET /api/media-info?media_type=&year=&title=&season=&episode=
///
/// Identifies media from explicit metadata, skipping the filename stages.
pub async fn get_media_info(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Query(query): Query<MediaInfoQuery>,
) -> Response {
    let (media_type, year, title) = match (&query.media_type, query.year, &query.title) {
        (Some(media_type), Some(year), Some(title)) => (media_type.clone(), year, title.clone()),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                error_body(
                    "Required information is missing. You must provide media_type, year, and title.",
                ),
            )
                .into_response()
        }
    };

    let query_description = format!(
        "media_type={}&year={}&title={}&season={}&episode={}",
        media_type,
        year,
        title,
        query.season.map(|s| s.to_string()).unwrap_or_default(),
        query.episode.map(|e| e.to_string()).unwrap_or_default(),
    );

    let request_id = match state
        .request_log
        .log_start("/api/media-info", &query_description, &addr.ip().to_string())
        .await
    {
        Ok(id) => id,
        Err(err) => {
            error!("Failed to record request start: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Failed to record request"),
            )
                .into_response();
        }
    };

    match state
        .identify_use_case
        .identify_by_metadata(
            &media_type,
            year,
            &title,
            query.season,
            query.episode,
            Some(request_id),
        )
        .await
    {
        Ok(media) => respond_with_media(&state, request_id, media).await,
        Err(err) => respond_with_error(&state, request_id, err).await,
    }
}

/// GET /api/media-info/{media_id}
///
/// Direct cache retrieval by surrogate id; 404 when absent.
pub async fn get_media_info_by_id(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(media_id): Path<String>,
) -> Response {
    if Uuid::parse_str(&media_id).is_err() {
        return (StatusCode::BAD_REQUEST, error_body("Invalid media id")).into_response();
    }

    let request_id = match state
        .request_log
        .log_start("/api/media-info/{media_id}", &media_id, &addr.ip().to_string())
        .await
    {
        Ok(id) => id,
        Err(err) => {
            error!("Failed to record request start: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Failed to record request"),
            )
                .into_response();
        }
    };

    match state
        .cache_repository
        .get_cached(&media_id, None, CacheLookupKey::Id)
        .await
    {
        Ok(Some(media)) => respond_with_media(&state, request_id, Some(media)).await,
        Ok(None) => {
            log_completed(&state, request_id, 404, None, Some("Media not found")).await;
            (StatusCode::NOT_FOUND, error_body("Media not found")).into_response()
        }
        Err(err) => {
            let detail = format!("Error retrieving media by id: {}", err);
            log_completed(&state, request_id, 500, None, Some(&detail)).await;
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(&detail)).into_response()
        }
    }
}

/// GET /api/statistics?num_requests=N
///
/// Request-history totals plus the N most recent rows.
pub async fn get_statistics(
    State(state): State<AppState>,
    Query(query): Query<StatisticsQuery>,
) -> Response {
    let limit = query.num_requests.unwrap_or(100).clamp(1, 1000);

    match state.request_log.get_statistics(limit).await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(err) => {
            error!("Error retrieving statistics: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body(&format!("Error retrieving statistics: {}", err)),
            )
                .into_response()
        }
    }
}
