//! Streamed graph edge

use crate::core::types::{Label, Timestamp, VertexId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One labeled, timestamped edge from the stream. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    v: VertexId,
    u: VertexId,
    label: Label,
    timestamp: Timestamp,
}

impl Edge {
    /// Create a new edge
    pub fn new(
        v: impl Into<VertexId>,
        u: impl Into<VertexId>,
        label: impl Into<Label>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            v: v.into(),
            u: u.into(),
            label: label.into(),
            timestamp,
        }
    }

    /// First endpoint
    pub fn v(&self) -> &VertexId {
        &self.v
    }

    /// Second endpoint
    pub fn u(&self) -> &VertexId {
        &self.u
    }

    /// Edge label
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Arrival timestamp
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Whether both endpoints are the same vertex
    pub fn is_self_loop(&self) -> bool {
        self.v == self.u
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Edge({}-{}, label={}, ts={})",
            self.v, self.u, self.label, self.timestamp
        )
    }
}
