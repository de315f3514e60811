//! Database access layer

pub mod campers;
pub mod payments;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
