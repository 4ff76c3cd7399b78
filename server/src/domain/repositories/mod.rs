//! Repository Interfaces - Abstractions for data access

pub mod media_cache_repository;
pub mod openai_usage_repository;
pub mod request_log_repository;

pub use media_cache_repository::{CacheLookupKey, MediaCacheRepository};
pub use openai_usage_repository::{OpenAiUsageRepository, TokenUsage};
pub use request_log_repository::{RequestHistoryEntry, RequestLogRepository, RequestStatistics};
