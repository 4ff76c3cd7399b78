//! Value Objects - Immutable objects defined by their attributes

pub mod media_type;

pub use media_type::MediaType;
