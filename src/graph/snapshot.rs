//! Cumulative undirected adjacency view of the edge stream
//!
//! The snapshot exists to answer degree queries for window ownership. Reads
//! and writes are split into two calls: [`SnapshotGraph::read_degrees`] takes
//! `&self` and must be called before [`SnapshotGraph::add_edge`], so an edge
//! never counts towards the degrees used to place it.

use crate::core::types::{Timestamp, VertexId};
use crate::graph::edge::Edge;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Degrees of both endpoints of an edge, read before the edge is inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeReading {
    /// Degree of `edge.v`
    pub degree_v: usize,
    /// Degree of `edge.u`
    pub degree_u: usize,
}

/// Mutable adjacency structure. Grows monotonically; nothing is evicted.
#[derive(Debug, Default, Clone)]
pub struct SnapshotGraph {
    /// Undirected neighbor sets
    adjacency: HashMap<VertexId, HashSet<VertexId>>,
    /// Timestamp of the latest edge touching each vertex
    last_seen: HashMap<VertexId, Timestamp>,
    /// Edges ingested so far, duplicates included
    edges_seen: usize,
}

impl SnapshotGraph {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Degree of a vertex; 0 for a vertex never seen
    pub fn degree(&self, vertex: &VertexId) -> usize {
        self.adjacency.get(vertex).map_or(0, HashSet::len)
    }

    /// Read both endpoint degrees of an edge without mutating the graph
    pub fn read_degrees(&self, edge: &Edge) -> DegreeReading {
        DegreeReading {
            degree_v: self.degree(edge.v()),
            degree_u: self.degree(edge.u()),
        }
    }

    /// Insert an edge: link both endpoints and stamp them with the edge timestamp
    pub fn add_edge(&mut self, edge: &Edge) {
        self.adjacency
            .entry(edge.v().clone())
            .or_default()
            .insert(edge.u().clone());
        self.adjacency
            .entry(edge.u().clone())
            .or_default()
            .insert(edge.v().clone());

        self.last_seen.insert(edge.v().clone(), edge.timestamp());
        self.last_seen.insert(edge.u().clone(), edge.timestamp());
        self.edges_seen += 1;
    }

    /// Timestamp of the most recent edge touching the vertex
    pub fn last_seen(&self, vertex: &VertexId) -> Option<Timestamp> {
        self.last_seen.get(vertex).copied()
    }

    /// Neighbors of a vertex
    pub fn neighbors(&self, vertex: &VertexId) -> impl Iterator<Item = &VertexId> {
        self.adjacency.get(vertex).into_iter().flatten()
    }

    /// Whether `a` and `b` are adjacent
    pub fn contains_edge(&self, a: &VertexId, b: &VertexId) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(b))
    }

    /// Number of distinct vertices
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges ingested
    pub fn edge_count(&self) -> usize {
        self.edges_seen
    }

    /// Whether nothing has been ingested
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Ascii rendering, one vertex per line: `v1t100: [v2t100, v3t200]`.
/// Vertices and neighbors are sorted so the output is stable.
impl fmt::Display for SnapshotGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stamp = |v: &VertexId| self.last_seen.get(v).copied().unwrap_or_default();

        let mut vertices: Vec<_> = self.adjacency.iter().collect();
        vertices.sort_by(|a, b| a.0.cmp(b.0));

        for (vertex, neighbors) in vertices {
            let mut neighbors: Vec<_> = neighbors.iter().collect();
            neighbors.sort();
            let connections = neighbors
                .iter()
                .map(|n| format!("{}t{}", n, stamp(n)))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "{}t{}: [{}]", vertex, stamp(vertex), connections)?;
        }
        Ok(())
    }
}
