//! Domain entities and admin API response models
//!
//! `entities` holds the persisted types the caches front; `responses` holds
//! the DTOs serialized by the admin API.

pub mod entities;
pub mod responses;

// Re-export commonly used types
pub use entities::{Patient, Prescription, Role, User};
pub use responses::{CacheStatsResponse, ClearResponse, ErrorResponse, HealthResponse};
