//! HTTP presentation layer

pub mod dto;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use crate::application::IdentifyMediaUseCase;
use crate::domain::repositories::{MediaCacheRepository, RequestLogRepository};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub identify_use_case: Arc<IdentifyMediaUseCase>,
    pub cache_repository: Arc<dyn MediaCacheRepository>,
    pub request_log: Arc<dyn RequestLogRepository>,
}
