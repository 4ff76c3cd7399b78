//! Domain Layer - Pure business logic and domain models
//!
//! This layer contains:
//! - Entities: Core business objects with identity
//! - Value Objects: Immutable objects defined by their attributes
//! - Domain Services: Stateless services containing business logic
//! - Repository Interfaces: Abstractions for data access

pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::{MediaIdentificationRequest, MediaInfo, RequestMode};
pub use value_objects::MediaType;
