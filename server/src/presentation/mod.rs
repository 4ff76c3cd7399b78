//! Presentation Layer - HTTP transport

pub mod http;
