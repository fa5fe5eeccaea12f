//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic; terminal I/O stays in the CLI layer.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
