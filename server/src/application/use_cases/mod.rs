//! Use Cases - Application entry points

pub mod identify_media;

pub use identify_media::IdentifyMediaUseCase;
