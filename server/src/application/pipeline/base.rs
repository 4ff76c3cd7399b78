//! Pipeline primitives: step results, the per-request context, and the
//! controller loop.
//!
//! Stages communicate exclusively through [`StepResult`]; the controller is
//! a plain loop that interprets them. Unexpected errors inside a stage are
//! converted into a pipeline failure rather than unwinding further.

use std::sync::Arc;

use tracing::{debug, error};
use uuid::Uuid;

use crate::application::pipeline::stages::PipelineStage;
use crate::domain::entities::identification_request::{MediaIdentificationRequest, RequestMode};
use crate::domain::entities::media_info::{merge_media_info, MediaInfo};
use crate::domain::repositories::MediaCacheRepository;
use crate::domain::services::FilenameScanner;
use crate::domain::value_objects::MediaType;
use crate::interfaces::external_services::{CatalogService, LlmClassifier};
use crate::shared::error::{ApplicationError, PipelineError};

/// Outcome of one stage invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Stage ran and contributed; continue
    Success,
    /// Stage opted out; continue
    Skip,
    /// Short-circuit: the context already holds the answer
    Done,
    /// Unrecoverable failure for this request
    Fatal,
}

/// A stage outcome with an optional human-readable message
#[derive(Debug, Clone)]
pub struct StepResult {
    pub status: StepStatus,
    pub message: Option<String>,
}

impl StepResult {
    pub fn success() -> Self {
        Self { status: StepStatus::Success, message: None }
    }

    pub fn skip(message: impl Into<String>) -> Self {
        Self { status: StepStatus::Skip, message: Some(message.into()) }
    }

    pub fn done(message: impl Into<String>) -> Self {
        Self { status: StepStatus::Done, message: Some(message.into()) }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self { status: StepStatus::Fatal, message: Some(message.into()) }
    }
}

/// The collaborators stages draw on
#[derive(Clone)]
pub struct PipelineServices {
    pub scanner: Arc<dyn FilenameScanner>,
    pub cache: Arc<dyn MediaCacheRepository>,
    pub catalog: Arc<dyn CatalogService>,
    pub llm: Arc<dyn LlmClassifier>,
}

/// Per-request mutable pipeline state
pub struct PipelineContext {
    pub request: MediaIdentificationRequest,
    pub media: MediaInfo,
    pub cached_result: Option<MediaInfo>,
    pub completed: bool,
    pub errors: Vec<String>,
    pub request_id: Option<Uuid>,
}

impl PipelineContext {
    pub fn new(request: MediaIdentificationRequest, request_id: Option<Uuid>) -> Self {
        let media = request.seed_media_info();
        Self {
            request,
            media,
            cached_result: None,
            completed: false,
            errors: Vec::new(),
            request_id,
        }
    }

    pub fn mode(&self) -> RequestMode {
        self.request.mode
    }

    pub fn file_path(&self) -> Option<&str> {
        self.request.file_path.as_deref()
    }

    pub fn media_type(&self) -> Option<MediaType> {
        self.media.media_type
    }

    pub fn has_media_type(&self) -> bool {
        self.media.media_type.is_some()
    }

    /// Merges a stage's contribution into the accumulating record
    pub fn update_media(&mut self, new_media: &MediaInfo) {
        self.media = merge_media_info(&self.media, new_media);
    }

    pub fn mark_cached_result(&mut self, cached: MediaInfo) {
        self.cached_result = Some(cached);
        self.completed = true;
    }

    pub fn record_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn finalize(self) -> PipelineResult {
        PipelineResult {
            media: self.media,
            cached: self.cached_result,
            completed: self.completed,
        }
    }
}

/// What the pipeline hands back to the request facade
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub media: MediaInfo,
    pub cached: Option<MediaInfo>,
    pub completed: bool,
}

/// Runs stages in order, interpreting their outcomes
pub struct PipelineController {
    stages: Vec<PipelineStage>,
}

impl PipelineController {
    pub fn new(stages: Vec<PipelineStage>) -> Self {
        Self { stages }
    }

    /// Walks the stage sequence. `Done` short-circuits with the current
    /// result; `Fatal` (or an unexpected error) aborts with a
    /// [`PipelineError`].
    pub async fn run(
        &self,
        mut context: PipelineContext,
        services: &PipelineServices,
    ) -> Result<PipelineResult, ApplicationError> {
        for stage in &self.stages {
            if !stage.handles(&context) {
                continue;
            }

            let result = match stage.invoke(&mut context, services).await {
                Ok(result) => result,
                Err(err) => {
                    error!("[{}] raised unhandled error: {}", stage.name(), err);
                    context.record_error(err.to_string());
                    return Err(PipelineError::ExecutionFailed {
                        stage: stage.name(),
                        message: err.to_string(),
                    }
                    .into());
                }
            };

            match result.status {
                StepStatus::Success | StepStatus::Skip => {
                    if let Some(message) = &result.message {
                        debug!("[{}] {}", stage.name(), message);
                    }
                }
                StepStatus::Done => {
                    debug!("[{}] pipeline complete", stage.name());
                    context.completed = true;
                    return Ok(context.finalize());
                }
                StepStatus::Fatal => {
                    let message = result
                        .message
                        .unwrap_or_else(|| "Pipeline stage failed".to_string());
                    error!("[{}] {}", stage.name(), message);
                    context.record_error(message.clone());
                    return Err(PipelineError::ExecutionFailed {
                        stage: stage.name(),
                        message,
                    }
                    .into());
                }
            }
        }

        Ok(context.finalize())
    }
}
