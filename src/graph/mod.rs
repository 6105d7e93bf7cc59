//! Graph data structures
//!
//! The streamed edge record and the snapshot graph used for degree queries.

pub mod edge;
pub mod snapshot;

// Re-export main graph types
pub use edge::Edge;
pub use snapshot::{DegreeReading, SnapshotGraph};
