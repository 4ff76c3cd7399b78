//! Database infrastructure: pooling and schema bootstrap

pub mod connection_pool;
pub mod schema;

pub use connection_pool::{create_pool, ConnectionPoolConfig};
pub use schema::initialize_schema;
