//! Sequential stream processing
//!
//! [`StreamProcessor`] owns the snapshot graph and window table for one run.
//! Each edge is fully committed before the next is pulled; the first error
//! ends the run.

use crate::core::config::DecayConfig;
use crate::core::error::Result;
use crate::core::types::{Expiration, Timestamp};
use crate::graph::{Edge, SnapshotGraph};
use crate::window::{Assignment, Window, WindowAssigner, WindowTable};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::info;

/// Totals for a completed run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Edges processed in this run
    pub edges: usize,
    /// Windows in the table afterwards
    pub windows: usize,
    /// Distinct vertices in the snapshot afterwards
    pub vertices: usize,
    /// Edges whose expiration needed an amplitude correction
    pub lambda_adjustments: usize,
    /// Amplitude the next fresh assignment starts from
    pub effective_lambda: f64,
}

/// Per-window diagnostic row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    /// Owning vertex
    pub id: String,
    /// Timestamp of the first admitted edge
    pub opening_time: Timestamp,
    /// Current expiration
    pub expiration_time: Expiration,
    /// Admissions so far
    pub update_count: u64,
    /// Member edges
    pub edge_count: usize,
    /// Member vertices, sorted
    pub vertices: Vec<String>,
}

/// Final window table contents, ordered by window id
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowReport {
    /// One row per window
    pub windows: Vec<WindowSummary>,
}

impl From<&Window> for WindowSummary {
    fn from(window: &Window) -> Self {
        Self {
            id: window.id().to_string(),
            opening_time: window.opening_time(),
            expiration_time: window.expiration_time(),
            update_count: window.update_count(),
            edge_count: window.edge_count(),
            vertices: window.vertices().iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl WindowReport {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for WindowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for w in &self.windows {
            writeln!(
                f,
                "Window {} | Opening Time: {}, Expiration Time: {:.2}, Last Update: {}, Edges: {}",
                w.id, w.opening_time, w.expiration_time, w.update_count, w.edge_count
            )?;
            writeln!(f, "  vertices: {}", w.vertices.join(", "))?;
        }
        Ok(())
    }
}

/// Drives one edge stream through a [`WindowAssigner`]
#[derive(Debug)]
pub struct StreamProcessor {
    snapshot: SnapshotGraph,
    table: WindowTable,
    assigner: WindowAssigner,
    processed: usize,
    adjustments: usize,
}

impl StreamProcessor {
    /// Create a processor with an empty snapshot and window table
    pub fn new(params: DecayConfig) -> Result<Self> {
        Ok(Self {
            snapshot: SnapshotGraph::new(),
            table: WindowTable::new(),
            assigner: WindowAssigner::new(params)?,
            processed: 0,
            adjustments: 0,
        })
    }

    /// Place one edge
    pub fn process(&mut self, edge: &Edge) -> Result<Assignment> {
        let assignment = self
            .assigner
            .assign(edge, &mut self.snapshot, &mut self.table)?;
        self.processed += 1;
        if assignment.lambda_adjusted {
            self.adjustments += 1;
        }
        Ok(assignment)
    }

    /// Process every edge in order, handing each assignment to `sink`.
    /// Stops at the first malformed edge or computation error.
    pub fn run<I, F>(&mut self, edges: I, mut sink: F) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Result<Edge>>,
        F: FnMut(&Assignment),
    {
        let started = Instant::now();
        let before = self.processed;
        info!("Processing edge stream");

        for edge in edges {
            let assignment = self.process(&edge?)?;
            sink(&assignment);
        }

        let summary = RunSummary {
            edges: self.processed - before,
            windows: self.table.len(),
            vertices: self.snapshot.vertex_count(),
            lambda_adjustments: self.adjustments,
            effective_lambda: self.assigner.effective_lambda(),
        };
        info!(
            edges = summary.edges,
            windows = summary.windows,
            vertices = summary.vertices,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Stream processed"
        );
        Ok(summary)
    }

    /// Degrees and adjacency seen so far
    pub fn snapshot(&self) -> &SnapshotGraph {
        &self.snapshot
    }

    /// Window table
    pub fn windows(&self) -> &WindowTable {
        &self.table
    }

    /// Assigner and its current amplitude
    pub fn assigner(&self) -> &WindowAssigner {
        &self.assigner
    }

    /// Edges placed so far
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Snapshot of the window table for printing
    pub fn report(&self) -> WindowReport {
        WindowReport {
            windows: self.table.iter().map(WindowSummary::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;

    fn processor() -> StreamProcessor {
        StreamProcessor::new(DecayConfig::default()).unwrap()
    }

    #[test]
    fn test_run_collects_assignments() {
        let mut processor = processor();
        let edges = vec![
            Ok(Edge::new(1u64, 2u64, "a", 100)),
            Ok(Edge::new(1u64, 3u64, "a", 200)),
            Ok(Edge::new(2u64, 4u64, "a", 300)),
        ];

        let mut owners = Vec::new();
        let summary = processor
            .run(edges, |a| owners.push(a.owner.to_string()))
            .unwrap();

        assert_eq!(owners, vec!["2", "1", "2"]);
        assert_eq!(summary.edges, 3);
        assert_eq!(summary.windows, 2);
        assert_eq!(summary.vertices, 4);
        assert_eq!(summary.lambda_adjustments, 0);
    }

    #[test]
    fn test_run_halts_on_bad_input() {
        let mut processor = processor();
        let edges = vec![
            Ok(Edge::new("a", "b", "l", 1)),
            Err(Error::invalid_input("line 2: expected 4 fields")),
            Ok(Edge::new("c", "d", "l", 3)),
        ];

        let result = processor.run(edges, |_| {});
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(processor.processed(), 1);
        assert!(processor.windows().get(&"d".into()).is_none());
    }

    #[test]
    fn test_report() {
        let mut processor = processor();
        processor.process(&Edge::new("x", "y", "l", 10)).unwrap();
        processor.process(&Edge::new("y", "z", "l", 20)).unwrap();

        let report = processor.report();
        assert_eq!(report.windows.len(), 1);
        let w = &report.windows[0];
        assert_eq!(w.id, "y");
        assert_eq!(w.update_count, 2);
        assert_eq!(w.edge_count, 2);
        assert_eq!(w.vertices, vec!["x", "y", "z"]);

        let text = report.to_string();
        assert!(text.starts_with("Window y | Opening Time: 10, Expiration Time: "));
        assert!(text.contains("vertices: x, y, z"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["windows"][0]["update_count"], 2);
    }
}
