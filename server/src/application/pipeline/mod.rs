//! The staged identification pipeline

pub mod base;
pub mod builder;
pub mod stages;

pub use base::{
    PipelineContext, PipelineController, PipelineResult, PipelineServices, StepResult, StepStatus,
};
pub use builder::build_pipeline;
pub use stages::PipelineStage;
