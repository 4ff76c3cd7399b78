//! The pipeline stages.
//!
//! Each stage is a variant with two operations: a cheap `handles` predicate
//! and an `invoke` that does the work. Guards mirror the resolver design:
//! the deterministic parser runs first, the cache is consulted at every
//! point where new evidence could produce a hit, the language model fills
//! the gaps the parser left, and the catalog makes the record canonical.

use tracing::debug;

use crate::application::pipeline::base::{PipelineContext, PipelineServices, StepResult};
use crate::domain::entities::identification_request::RequestMode;
use crate::domain::entities::media_info::{apply_basic_media_attributes, MediaInfoBuilder};
use crate::domain::value_objects::MediaType;
use crate::interfaces::external_services::parse_season_episode;
use crate::shared::error::ApplicationError;

/// One unit of work in the identification pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStage {
    GuessItIdentification,
    CacheLookup { label: &'static str },
    OpenAiBasicIdentification,
    TmdbIdentifyMovie,
    TmdbIdentifySeries,
    OpenAiSeriesSeasonEpisode,
    TmdbMovieExternalIds,
    TmdbSeriesExternalIds,
    TmdbEpisodeDetails,
}

impl PipelineStage {
    pub fn name(&self) -> String {
        match self {
            PipelineStage::GuessItIdentification => "guessit_identification".to_string(),
            PipelineStage::CacheLookup { label } => format!("cache_lookup[{}]", label),
            PipelineStage::OpenAiBasicIdentification => "openai_basic_identification".to_string(),
            PipelineStage::TmdbIdentifyMovie => "tmdb_identify_movie".to_string(),
            PipelineStage::TmdbIdentifySeries => "tmdb_identify_series".to_string(),
            PipelineStage::OpenAiSeriesSeasonEpisode => "openai_series_season_episode".to_string(),
            PipelineStage::TmdbMovieExternalIds => "tmdb_movie_external_ids".to_string(),
            PipelineStage::TmdbSeriesExternalIds => "tmdb_series_external_ids".to_string(),
            PipelineStage::TmdbEpisodeDetails => "tmdb_episode_details".to_string(),
        }
    }

    /// Cheap predicate deciding whether the stage applies to this context
    pub fn handles(&self, ctx: &PipelineContext) -> bool {
        match self {
            PipelineStage::GuessItIdentification => {
                ctx.mode() == RequestMode::Filename
                    && ctx.request.has_file_path()
                    && !ctx.media.used_guessit
            }

            PipelineStage::CacheLookup { .. } => {
                !ctx.completed && ctx.media.title.is_some() && ctx.has_media_type()
            }

            PipelineStage::OpenAiBasicIdentification => {
                ctx.mode() == RequestMode::Filename
                    && ctx.request.has_file_path()
                    && !(ctx.media.title.is_some() && ctx.has_media_type())
            }

            PipelineStage::TmdbIdentifyMovie => {
                ctx.media_type() == Some(MediaType::Movie) && ctx.media.tmdb_id.is_none()
            }

            PipelineStage::TmdbIdentifySeries => {
                ctx.media_type() == Some(MediaType::Tv) && ctx.media.tmdb_series_id.is_none()
            }

            PipelineStage::OpenAiSeriesSeasonEpisode => {
                ctx.media_type() == Some(MediaType::Tv)
                    && ctx.media.tmdb_series_id.is_some()
                    && (ctx.media.season.is_none() || ctx.media.episode.is_none())
                    && ctx.request.has_file_path()
            }

            PipelineStage::TmdbMovieExternalIds => {
                ctx.media_type() == Some(MediaType::Movie) && ctx.media.tmdb_id.is_some()
            }

            PipelineStage::TmdbSeriesExternalIds => {
                ctx.media_type() == Some(MediaType::Tv) && ctx.media.tmdb_series_id.is_some()
            }

            PipelineStage::TmdbEpisodeDetails => {
                // The series stages leave tmdb_id holding the series id; a
                // genuine episode id is anything different from it.
                ctx.media_type() == Some(MediaType::Tv)
                    && ctx.media.tmdb_series_id.is_some()
                    && ctx.media.season.is_some()
                    && ctx.media.episode.is_some()
                    && (ctx.media.tmdb_id.is_none() || ctx.media.tmdb_id == ctx.media.tmdb_series_id)
            }
        }
    }

    /// Runs the stage against the context
    pub async fn invoke(
        &self,
        ctx: &mut PipelineContext,
        services: &PipelineServices,
    ) -> Result<StepResult, ApplicationError> {
        match self {
            PipelineStage::GuessItIdentification => self.invoke_guessit(ctx, services),
            PipelineStage::CacheLookup { label } => self.invoke_cache_lookup(ctx, services, label).await,
            PipelineStage::OpenAiBasicIdentification => self.invoke_openai_basic(ctx, services).await,
            PipelineStage::TmdbIdentifyMovie => self.invoke_identify_movie(ctx, services).await,
            PipelineStage::TmdbIdentifySeries => self.invoke_identify_series(ctx, services).await,
            PipelineStage::OpenAiSeriesSeasonEpisode => {
                self.invoke_openai_season_episode(ctx, services).await
            }
            PipelineStage::TmdbMovieExternalIds => {
                self.invoke_external_ids(ctx, services, MediaType::Movie).await
            }
            PipelineStage::TmdbSeriesExternalIds => {
                self.invoke_external_ids(ctx, services, MediaType::Tv).await
            }
            PipelineStage::TmdbEpisodeDetails => self.invoke_episode_details(ctx, services).await,
        }
    }

    fn invoke_guessit(
        &self,
        ctx: &mut PipelineContext,
        services: &PipelineServices,
    ) -> Result<StepResult, ApplicationError> {
        let file_path = match ctx.file_path() {
            Some(path) => path.to_string(),
            None => return Ok(StepResult::skip("No file path available")),
        };

        match services.scanner.scan(&file_path) {
            Some(parsed) => {
                ctx.update_media(&parsed);
                debug!("[guessit_identification] parse merged into context");
                Ok(StepResult::success())
            }
            None => Ok(StepResult::skip("Filename parser returned no data")),
        }
    }

    async fn invoke_cache_lookup(
        &self,
        ctx: &mut PipelineContext,
        services: &PipelineServices,
        label: &str,
    ) -> Result<StepResult, ApplicationError> {
        let cached = services.cache.get_cached_by_obj(&ctx.media).await?;

        match cached {
            Some(record) => {
                debug!("[cache_lookup[{}]] cache hit; stopping pipeline", label);
                ctx.mark_cached_result(record);
                Ok(StepResult::done(format!("Cache hit during {}", label)))
            }
            None => Ok(StepResult::success()),
        }
    }

    async fn invoke_openai_basic(
        &self,
        ctx: &mut PipelineContext,
        services: &PipelineServices,
    ) -> Result<StepResult, ApplicationError> {
        let file_path = match ctx.file_path() {
            Some(path) => path.to_string(),
            None => return Ok(StepResult::skip("No file path available")),
        };

        let media_type_token = services
            .llm
            .classify_media_type(&file_path, ctx.request_id)
            .await;

        let media_type = match media_type_token.as_deref().and_then(MediaType::normalize) {
            Some(media_type) => media_type,
            None => return Ok(StepResult::skip("Model could not classify the media type")),
        };

        let title = if media_type.is_movie() {
            services.llm.extract_movie_title(&file_path, ctx.request_id).await
        } else {
            services.llm.extract_series_title(&file_path, ctx.request_id).await
        };

        let contribution = apply_basic_media_attributes(
            MediaInfoBuilder::new(),
            title.as_deref().filter(|t| !t.eq_ignore_ascii_case("unknown")),
            Some(media_type.as_str()),
            None,
            None,
            None,
        )
        .with_used_openai(true)
        .build();

        ctx.update_media(&contribution);
        debug!("[openai_basic_identification] model data merged into context");
        Ok(StepResult::success())
    }

    async fn invoke_identify_movie(
        &self,
        ctx: &mut PipelineContext,
        services: &PipelineServices,
    ) -> Result<StepResult, ApplicationError> {
        let title = match ctx.media.title.clone() {
            Some(title) => title,
            None => return Ok(StepResult::fatal("No title available for movie search")),
        };

        let search = match services.catalog.search_movie(&title, ctx.media.year).await {
            Some(result) => result,
            None => {
                return Ok(StepResult::fatal(format!(
                    "No catalog search result for movie title '{}'",
                    title
                )))
            }
        };

        let tmdb_id = match search.tmdb_id {
            Some(id) => id,
            None => {
                return Ok(StepResult::fatal(format!(
                    "Catalog search result for '{}' carries no id",
                    title
                )))
            }
        };

        let details = match services.catalog.get_movie_details(tmdb_id).await {
            Some(details) => details,
            None => {
                return Ok(StepResult::fatal(format!(
                    "No movie details for catalog id {}",
                    tmdb_id
                )))
            }
        };

        ctx.update_media(&details);
        debug!("[tmdb_identify_movie] catalog movie data merged");
        Ok(StepResult::success())
    }

    async fn invoke_identify_series(
        &self,
        ctx: &mut PipelineContext,
        services: &PipelineServices,
    ) -> Result<StepResult, ApplicationError> {
        let title = match ctx.media.title.clone() {
            Some(title) => title,
            None => return Ok(StepResult::fatal("No title available for series search")),
        };

        let search = match services.catalog.search_series(&title, ctx.media.year).await {
            Some(result) => result,
            None => {
                return Ok(StepResult::fatal(format!(
                    "No catalog search result for series title '{}'",
                    title
                )))
            }
        };

        let series_id = match search.tmdb_series_id.or(search.tmdb_id) {
            Some(id) => id,
            None => {
                return Ok(StepResult::fatal(format!(
                    "Catalog search result for '{}' carries no id",
                    title
                )))
            }
        };

        let details = match services.catalog.get_series_details(series_id).await {
            Some(details) => details,
            None => {
                return Ok(StepResult::fatal(format!(
                    "No series details for catalog id {}",
                    series_id
                )))
            }
        };

        ctx.update_media(&details);
        debug!("[tmdb_identify_series] catalog series data merged");
        Ok(StepResult::success())
    }

    async fn invoke_openai_season_episode(
        &self,
        ctx: &mut PipelineContext,
        services: &PipelineServices,
    ) -> Result<StepResult, ApplicationError> {
        let file_path = match ctx.file_path() {
            Some(path) => path.to_string(),
            None => return Ok(StepResult::skip("No file path available")),
        };

        let raw = match services.llm.extract_season_episode(&file_path, ctx.request_id).await {
            Some(raw) => raw,
            None => return Ok(StepResult::skip("Model could not extract season/episode")),
        };

        let (season, episode) = parse_season_episode(&raw);
        let (season, episode) = match (season, episode) {
            (Some(s), Some(e)) => (s, e),
            _ => return Ok(StepResult::skip("Season/episode response was malformed")),
        };

        let contribution = MediaInfoBuilder::new()
            .with_season(season)
            .with_episode(episode)
            .with_used_openai(true)
            .build();

        ctx.update_media(&contribution);
        debug!("[openai_series_season_episode] season/episode merged");
        Ok(StepResult::success())
    }

    async fn invoke_external_ids(
        &self,
        ctx: &mut PipelineContext,
        services: &PipelineServices,
        media_type: MediaType,
    ) -> Result<StepResult, ApplicationError> {
        let tmdb_id = match media_type {
            MediaType::Movie => ctx.media.tmdb_id,
            MediaType::Tv => ctx.media.tmdb_series_id,
        };
        let tmdb_id = match tmdb_id {
            Some(id) => id,
            None => return Ok(StepResult::skip("No catalog id for external-id lookup")),
        };

        let external_ids = match services
            .catalog
            .get_external_ids(tmdb_id, media_type, None, None)
            .await
        {
            Some(ids) => ids,
            None => return Ok(StepResult::skip("External ids not available")),
        };

        let external_ids = match media_type {
            MediaType::Movie => external_ids,
            MediaType::Tv => {
                // The response echoes the series id as tmdb_id; clearing it
                // keeps the slot free for the episode id fetched later.
                let mut ids = external_ids;
                ids.tmdb_id = None;
                ids
            }
        };

        ctx.update_media(&external_ids);
        debug!("[{}] external ids merged", self.name());
        Ok(StepResult::success())
    }

    async fn invoke_episode_details(
        &self,
        ctx: &mut PipelineContext,
        services: &PipelineServices,
    ) -> Result<StepResult, ApplicationError> {
        let (series_id, season, episode) = match (
            ctx.media.tmdb_series_id,
            ctx.media.season,
            ctx.media.episode,
        ) {
            (Some(series_id), Some(season), Some(episode)) => (series_id, season, episode),
            _ => return Ok(StepResult::skip("Missing series id, season, or episode")),
        };

        let details = match services
            .catalog
            .get_episode_details(series_id, season, episode)
            .await
        {
            Some(details) => details,
            None => return Ok(StepResult::skip("Episode details not available")),
        };

        ctx.update_media(&details);
        debug!("[tmdb_episode_details] episode details merged");
        Ok(StepResult::success())
    }
}
