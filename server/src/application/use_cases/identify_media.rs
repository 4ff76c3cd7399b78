//! IdentifyMediaUseCase - the request facade over the pipeline
//!
//! Accepts either a filename or a metadata tuple, drives the controller,
//! and persists the final record. Filename requests that abort fatally are
//! retried once with just the basename before the failure surfaces.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::pipeline::{build_pipeline, PipelineContext, PipelineController, PipelineServices};
use crate::domain::entities::identification_request::{CatalogSeeds, MediaIdentificationRequest};
use crate::domain::entities::media_info::MediaInfo;
use crate::domain::repositories::MediaCacheRepository;
use crate::domain::services::FilenameScanner;
use crate::interfaces::external_services::{CatalogService, LlmClassifier};
use crate::shared::error::ApplicationError;

/// Drives identification requests end to end
pub struct IdentifyMediaUseCase {
    services: PipelineServices,
}

impl IdentifyMediaUseCase {
    pub fn new(
        scanner: Arc<dyn FilenameScanner>,
        cache: Arc<dyn MediaCacheRepository>,
        catalog: Arc<dyn CatalogService>,
        llm: Arc<dyn LlmClassifier>,
    ) -> Self {
        Self {
            services: PipelineServices { scanner, cache, catalog, llm },
        }
    }

    /// Identify media from a filename or path.
    ///
    /// A fatal pipeline abort on the full path is retried once with only
    /// the basename; a second abort surfaces to the caller.
    pub async fn identify_by_filename(
        &self,
        file_path: &str,
        request_id: Option<Uuid>,
    ) -> Result<Option<MediaInfo>, ApplicationError> {
        let request = MediaIdentificationRequest::from_filename(file_path)?;

        match self.identify(request, request_id).await {
            Ok(result) => Ok(result),
            Err(err) if err.is_pipeline_fatal() => {
                let basename = Path::new(file_path.trim())
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(file_path)
                    .to_string();

                if basename == file_path.trim() {
                    return Err(err);
                }

                warn!(
                    "Pipeline failed for full path; retrying with basename '{}'",
                    basename
                );
                let retry = MediaIdentificationRequest::from_filename(&basename)?;
                self.identify(retry, request_id).await
            }
            Err(err) => Err(err),
        }
    }

    /// Identify media from an explicit metadata tuple
    pub async fn identify_by_metadata(
        &self,
        media_type: &str,
        year: i32,
        title: &str,
        season: Option<i32>,
        episode: Option<i32>,
        request_id: Option<Uuid>,
    ) -> Result<Option<MediaInfo>, ApplicationError> {
        let request = MediaIdentificationRequest::from_metadata(
            media_type,
            year,
            title,
            season,
            episode,
            CatalogSeeds::default(),
        )?;

        self.identify(request, request_id).await
    }

    async fn identify(
        &self,
        request: MediaIdentificationRequest,
        request_id: Option<Uuid>,
    ) -> Result<Option<MediaInfo>, ApplicationError> {
        let stages = build_pipeline(&request);
        let controller = PipelineController::new(stages);
        let context = PipelineContext::new(request, request_id);

        let result = controller.run(context, &self.services).await?;

        if let Some(cached) = result.cached {
            debug!("Returning cached result from pipeline");
            return Ok(Some(cached));
        }

        let media = result.media;
        if !media.has_valid_media_type() {
            warn!("Final record has no valid media type; skipping persistence");
            return Ok(None);
        }

        self.persist_media(media).await.map(Some)
    }

    /// Persist the final record, going through the duplicate fast paths
    /// first so concurrent identifications of the same entity converge on
    /// one row.
    async fn persist_media(&self, media: MediaInfo) -> Result<MediaInfo, ApplicationError> {
        let cache = &self.services.cache;

        if media.is_movie() {
            let tmdb_id = match media.tmdb_id {
                Some(id) => id,
                None => {
                    debug!("Movie record lacks a catalog id; returning without caching");
                    return Ok(media);
                }
            };

            if let Some(existing) = cache.get_cached_by_tmdb_id(tmdb_id).await? {
                debug!("Movie already cached by catalog id");
                return Ok(existing);
            }

            return Ok(cache.cache_data(&media).await?);
        }

        if media.is_tv() {
            if let Some(tmdb_id) = media.tmdb_id {
                if let Some(existing) = cache.get_cached_by_tmdb_id(tmdb_id).await? {
                    debug!("Episode already cached by catalog id");
                    return Ok(existing);
                }
            }

            if let (Some(series_id), Some(season), Some(episode)) =
                (media.tmdb_series_id, media.season, media.episode)
            {
                if let Some(existing) =
                    cache.get_cached_tv_episode(series_id, season, episode).await?
                {
                    debug!("Episode already cached by series/season/episode");
                    return Ok(existing);
                }
            }

            // A tmdb_id equal to the series id means episode details never
            // arrived; such a record is not canonical enough to persist.
            if media.tmdb_id.is_none() || media.tmdb_id == media.tmdb_series_id {
                debug!("Episode record lacks an episode-level catalog id; returning without caching");
                return Ok(media);
            }

            return Ok(cache.cache_data(&media).await?);
        }

        debug!("Record has no media type; returning without caching");
        Ok(media)
    }
}
