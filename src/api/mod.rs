//! API Module
//!
//! Admin HTTP surface over the cache registry.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /caches` - Statistics for every registered cache
//! - `GET /caches/:name` - Statistics for one cache
//! - `DELETE /caches/:name` - Drop every entry of one cache

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
