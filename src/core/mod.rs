//! Core system types and foundations
//!
//! Identifier types, error handling and configuration shared by the graph,
//! window and stream modules.

pub mod types;
pub mod error;
pub mod config;

// Re-export commonly used items
pub use types::{Expiration, Label, Timestamp, VertexId};
pub use error::{Error, Result};
pub use config::{Config, DecayConfig, GeneratorKind, LambdaScope, LoggingConfig, StreamConfig};
