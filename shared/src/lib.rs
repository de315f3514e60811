//! Shared types for the camp registration service
//!
//! Common types used across crates: domain models, error types
//! and response structures.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
