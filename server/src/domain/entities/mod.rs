//! Entities - Core business objects of the identification domain

pub mod identification_request;
pub mod media_info;

pub use identification_request::{CatalogSeeds, MediaIdentificationRequest, RequestMode};
pub use media_info::{apply_basic_media_attributes, merge_media_info, MediaInfo, MediaInfoBuilder};
