//! Windows and the table that owns them

use crate::core::types::{Expiration, Timestamp, VertexId};
use crate::graph::Edge;
use std::collections::{BTreeSet, HashMap};

/// A time-bounded bucket of edges anchored to its owning vertex
#[derive(Debug, Clone)]
pub struct Window {
    /// Owning vertex
    id: VertexId,
    /// Timestamp of the first edge admitted
    opening_time: Timestamp,
    /// Latest computed expiration
    expiration_time: Expiration,
    /// Number of edges admitted
    update_count: u64,
    /// Amplitude used when corrections are scoped per window
    lambda: f64,
    /// Admitted edges, in admission order
    edges: Vec<Edge>,
    /// Endpoints of admitted edges
    vertices: BTreeSet<VertexId>,
}

impl Window {
    /// Open an empty window. Expiration starts at the opening time.
    pub fn new(id: VertexId, opening_time: Timestamp, lambda: f64) -> Self {
        Self {
            id,
            opening_time,
            expiration_time: opening_time as Expiration,
            update_count: 0,
            lambda,
            edges: Vec::new(),
            vertices: BTreeSet::new(),
        }
    }

    /// Owning vertex
    pub fn id(&self) -> &VertexId {
        &self.id
    }

    /// Timestamp of the first admitted edge
    pub fn opening_time(&self) -> Timestamp {
        self.opening_time
    }

    /// Expiration computed at the latest admission
    pub fn expiration_time(&self) -> Expiration {
        self.expiration_time
    }

    /// Number of admissions
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Amplitude carried by this window under per-window scoping
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Member edges in admission order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Endpoints of every member edge
    pub fn vertices(&self) -> &BTreeSet<VertexId> {
        &self.vertices
    }

    /// Number of member edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the window has lapsed at `now`. Read-only; nothing is evicted.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        (now as Expiration) > self.expiration_time
    }

    /// Admit an edge with its freshly computed expiration
    pub(crate) fn admit(&mut self, edge: &Edge, expiration: Expiration) {
        if self.edges.is_empty() {
            self.opening_time = edge.timestamp();
        }
        self.expiration_time = expiration;
        self.update_count += 1;
        self.edges.push(edge.clone());
        self.vertices.insert(edge.v().clone());
        self.vertices.insert(edge.u().clone());
    }

    pub(crate) fn set_lambda(&mut self, lambda: f64) {
        self.lambda = lambda;
    }
}

/// Windows keyed by owning vertex. Entries are inserted on first use and never removed.
#[derive(Debug, Default, Clone)]
pub struct WindowTable {
    windows: HashMap<VertexId, Window>,
}

impl WindowTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Window owned by `owner`, if one has been opened
    pub fn get(&self, owner: &VertexId) -> Option<&Window> {
        self.windows.get(owner)
    }

    /// Look up the owner's window, opening it at `timestamp` on a miss.
    /// The flag reports whether a window was created.
    pub fn get_or_open(
        &mut self,
        owner: &VertexId,
        timestamp: Timestamp,
        lambda: f64,
    ) -> (&mut Window, bool) {
        let created = !self.windows.contains_key(owner);
        let window = self
            .windows
            .entry(owner.clone())
            .or_insert_with(|| Window::new(owner.clone(), timestamp, lambda));
        (window, created)
    }

    /// Number of open windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether no window has been opened yet
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Windows ordered by owner id
    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        let mut windows: Vec<_> = self.windows.values().collect();
        windows.sort_by(|a, b| a.id.cmp(&b.id));
        windows.into_iter()
    }

    /// Windows that have lapsed at `now`, ordered by owner id
    pub fn expired_at(&self, now: Timestamp) -> Vec<&Window> {
        self.iter().filter(|w| w.is_expired(now)).collect()
    }

    /// Total edges held across all windows
    pub fn total_edges(&self) -> usize {
        self.windows.values().map(Window::edge_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_open() {
        let mut table = WindowTable::new();
        let owner = VertexId::from("a");

        let (window, created) = table.get_or_open(&owner, 100, 5.0);
        assert!(created);
        assert_eq!(window.opening_time(), 100);
        assert_eq!(window.expiration_time(), 100.0);
        assert_eq!(window.update_count(), 0);

        let (window, created) = table.get_or_open(&owner, 900, 5.0);
        assert!(!created);
        assert_eq!(window.opening_time(), 100);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_admit() {
        let mut window = Window::new(VertexId::from("a"), 50, 1.0);
        window.admit(&Edge::new("a", "b", "l", 70), 500.0);
        window.admit(&Edge::new("c", "a", "l", 80), 600.0);

        assert_eq!(window.opening_time(), 70);
        assert_eq!(window.expiration_time(), 600.0);
        assert_eq!(window.update_count(), 2);
        assert_eq!(window.edge_count(), 2);
        let vertices: Vec<_> = window.vertices().iter().map(VertexId::as_str).collect();
        assert_eq!(vertices, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_expired_at() {
        let mut table = WindowTable::new();
        table.get_or_open(&VertexId::from("a"), 0, 1.0).0.admit(&Edge::new("a", "b", "l", 0), 10.0);
        table.get_or_open(&VertexId::from("b"), 0, 1.0).0.admit(&Edge::new("b", "c", "l", 0), 20.0);

        assert!(table.expired_at(10).is_empty());
        let expired: Vec<_> = table.expired_at(15).iter().map(|w| w.id().to_string()).collect();
        assert_eq!(expired, vec!["a"]);
        assert_eq!(table.expired_at(21).len(), 2);
        assert_eq!(table.total_edges(), 2);
    }
}
