//! Pipeline construction.
//!
//! Filename requests start from raw evidence (parser, then model); metadata
//! requests arrive with title and type already known, so they open with a
//! cache check against the seed. Both converge on the catalog tail.

use crate::application::pipeline::stages::PipelineStage;
use crate::domain::entities::identification_request::{MediaIdentificationRequest, RequestMode};

/// Builds the stage sequence for a request
pub fn build_pipeline(request: &MediaIdentificationRequest) -> Vec<PipelineStage> {
    let mut stages: Vec<PipelineStage> = Vec::new();

    match request.mode {
        RequestMode::Filename => {
            stages.push(PipelineStage::GuessItIdentification);
            stages.push(PipelineStage::CacheLookup { label: "post-guessit" });
            stages.push(PipelineStage::OpenAiBasicIdentification);
            stages.push(PipelineStage::CacheLookup { label: "post-openai" });
        }
        RequestMode::Metadata => {
            stages.push(PipelineStage::CacheLookup { label: "metadata-seed" });
        }
    }

    stages.extend([
        PipelineStage::TmdbIdentifyMovie,
        PipelineStage::TmdbIdentifySeries,
        PipelineStage::CacheLookup { label: "post-tmdb-identify" },
        PipelineStage::OpenAiSeriesSeasonEpisode,
        PipelineStage::TmdbMovieExternalIds,
        PipelineStage::TmdbSeriesExternalIds,
        PipelineStage::TmdbEpisodeDetails,
        PipelineStage::CacheLookup { label: "post-tmdb-enrichment" },
    ]);

    stages
}
