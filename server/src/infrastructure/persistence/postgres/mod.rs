//! Postgres repository implementations

pub mod media_cache_repository;
pub mod openai_usage_repository;
pub mod request_log_repository;

pub use media_cache_repository::PgMediaCacheRepository;
pub use openai_usage_repository::PgOpenAiUsageRepository;
pub use request_log_repository::PgRequestLogRepository;
