//! Degree Window - adaptive window assignment for streaming graph edges
//!
//! Each streamed edge is claimed by the endpoint with the larger share of
//! historical degree and placed in that vertex's window. The window's
//! expiration is recomputed on every admission with an exponential-decay
//! formula whose amplitude is raised whenever the result would already lie
//! in the past.

#![warn(missing_docs)]

// Core foundational modules
pub mod core;

// Main functional modules
pub mod graph;
pub mod window;
pub mod stream;

// Re-export commonly used items for convenience
pub use crate::core::{Config, Error, Result};
pub use graph::{Edge, SnapshotGraph};
pub use stream::StreamProcessor;
pub use window::{Assignment, WindowAssigner, WindowTable};

use crate::core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over
/// the configured level. Logs go to stderr so reports on stdout stay clean.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::config(format!("Invalid log filter: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match config.format.as_str() {
        "compact" => builder.compact().try_init(),
        _ => builder.try_init(),
    };
    installed.map_err(|e| Error::config(format!("Failed to install logger: {}", e)))?;

    tracing::info!("Initializing {} v{}", NAME, VERSION);
    Ok(())
}
