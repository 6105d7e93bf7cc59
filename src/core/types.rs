//! Identifier and time types shared by the graph and window modules

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Edge timestamp in stream time units (seconds in the reference datasets)
pub type Timestamp = i64;

/// Expiration instant; real-valued because the decay formula is
pub type Expiration = f64;

/// Vertex identifier with an interned string body.
///
/// Integer ids are stored in decimal form, so `VertexId::from(7)` and
/// `VertexId::from("7")` name the same vertex.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(Arc<str>);

/// Edge label with an interned string body
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(Arc<str>);

impl VertexId {
    /// Create a vertex id from a string
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(Arc::from(s.as_ref()))
    }

    /// Get as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Label {
    /// Create a label from a string
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(Arc::from(s.as_ref()))
    }

    /// Get as string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VertexId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VertexId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<u64> for VertexId {
    fn from(n: u64) -> Self {
        Self(Arc::from(n.to_string()))
    }
}

impl From<i64> for VertexId {
    fn from(n: i64) -> Self {
        Self(Arc::from(n.to_string()))
    }
}

impl From<i32> for VertexId {
    fn from(n: i32) -> Self {
        Self(Arc::from(n.to_string()))
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexId({})", self.0)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({})", self.0)
    }
}
