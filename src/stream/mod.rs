//! Edge stream sources and the sequential driver

pub mod driver;
pub mod generator;
pub mod reader;

pub use driver::{RunSummary, StreamProcessor, WindowReport, WindowSummary};
pub use generator::SyntheticStream;
pub use reader::{parse_edge, read_edges, EdgeReader};
