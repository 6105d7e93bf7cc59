//! Window assignment
//!
//! Vertex-owned windows, the degree-weighted assigner that fills them, and the
//! standalone decay formulas the assigner grew out of.

pub mod assigner;
pub mod decay;
#[allow(clippy::module_inception)]
pub mod window;

pub use assigner::{compute_theta, select_owner, Assignment, WindowAssigner};
pub use decay::{
    decayed_expiration, edge_expiration, neighbor_expiration_estimate, weighted_mean_expiration,
    DEFAULT_BASE_OFFSET, DEFAULT_DECAY_LAMBDA,
};
pub use window::{Window, WindowTable};
