//! External service adapters

pub mod openai;
pub mod tmdb;

pub use openai::OpenAiClient;
pub use tmdb::TmdbClient;
