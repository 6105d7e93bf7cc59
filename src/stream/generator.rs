//! Synthetic edge streams for demonstrations and benchmarks

use crate::core::config::{GeneratorKind, StreamConfig, DATASET_MAX_GAP, DATASET_MIN_GAP};
use crate::core::error::Result;
use crate::core::types::Timestamp;
use crate::graph::Edge;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Finite, seeded stream of random edges
#[derive(Debug)]
pub struct SyntheticStream {
    rng: StdRng,
    kind: GeneratorKind,
    total: usize,
    emitted: usize,
    max_vertex: u64,
    labels: u64,
    start_time: Timestamp,
    max_step: Timestamp,
    /// Running clock of the dataset-shaped stream
    clock: Timestamp,
}

impl SyntheticStream {
    /// Build a stream from stream settings. Validation bounds every
    /// generated timestamp, so the arithmetic below cannot overflow.
    pub fn from_config(config: &StreamConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            rng,
            kind: config.generator,
            total: config.edges,
            emitted: 0,
            max_vertex: config.max_vertex,
            labels: config.labels,
            start_time: config.start_time,
            max_step: config.max_step,
            clock: config.start_time,
        })
    }

    /// Seeded simulation-shaped stream with default settings otherwise
    pub fn seeded(edges: usize, max_vertex: u64, seed: u64) -> Result<Self> {
        Self::from_config(&StreamConfig {
            edges,
            max_vertex,
            seed: Some(seed),
            ..Default::default()
        })
    }

    fn simulation_edge(&mut self, i: i64) -> Edge {
        let v = format!("v{}", self.rng.random_range(1..=self.max_vertex));
        let u = format!("v{}", self.rng.random_range(1..=self.max_vertex));
        let step = self.rng.random_range(1..=self.max_step);
        Edge::new(v, u, format!("l{}", i), self.start_time + i * step)
    }

    fn dataset_edge(&mut self) -> Edge {
        let v = self.rng.random_range(1..=self.max_vertex);
        let mut u = self.rng.random_range(1..=self.max_vertex);
        while u == v {
            u = self.rng.random_range(1..=self.max_vertex);
        }
        let label = self.rng.random_range(1..=self.labels);
        self.clock += self.rng.random_range(DATASET_MIN_GAP..=DATASET_MAX_GAP);
        Edge::new(v, u, label.to_string(), self.clock)
    }
}

impl Iterator for SyntheticStream {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        if self.emitted == self.total {
            return None;
        }
        self.emitted += 1;

        let edge = match self.kind {
            GeneratorKind::Simulation => self.simulation_edge(self.emitted as i64),
            GeneratorKind::Dataset => self.dataset_edge(),
        };
        Some(edge)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.emitted;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SyntheticStream {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_streams_repeat() {
        let a: Vec<_> = SyntheticStream::seeded(50, 20, 42).unwrap().collect();
        let b: Vec<_> = SyntheticStream::seeded(50, 20, 42).unwrap().collect();
        assert_eq!(a.len(), 50);
        assert_eq!(a, b);
    }

    #[test]
    fn test_simulation_shape() {
        let config = StreamConfig {
            edges: 200,
            max_vertex: 10,
            seed: Some(1),
            start_time: 1000,
            max_step: 60,
            ..Default::default()
        };
        for (i, edge) in SyntheticStream::from_config(&config).unwrap().enumerate() {
            let i = i as i64 + 1;
            assert!(edge.v().as_str().starts_with('v'));
            let k: u64 = edge.u().as_str()[1..].parse().unwrap();
            assert!((1..=10).contains(&k));
            assert_eq!(edge.label().as_str(), format!("l{}", i));
            assert!(edge.timestamp() >= 1000 + i && edge.timestamp() <= 1000 + i * 60);
        }
    }

    #[test]
    fn test_dataset_shape() {
        let config = StreamConfig {
            generator: GeneratorKind::Dataset,
            edges: 300,
            max_vertex: 3,
            labels: 4,
            seed: Some(9),
            start_time: 0,
            ..Default::default()
        };
        let edges: Vec<_> = SyntheticStream::from_config(&config).unwrap().collect();
        let mut previous = 0;
        for edge in &edges {
            assert!(!edge.is_self_loop());
            let label: u64 = edge.label().as_str().parse().unwrap();
            assert!((1..=4).contains(&label));
            let gap = edge.timestamp() - previous;
            assert!((100..=500).contains(&gap));
            previous = edge.timestamp();
        }
    }

    #[test]
    fn test_rejects_bad_settings() {
        let config = StreamConfig {
            max_vertex: 0,
            ..Default::default()
        };
        assert!(SyntheticStream::from_config(&config).is_err());
    }

    #[test]
    fn test_rejects_overflowing_clock() {
        let config = StreamConfig {
            edges: 10,
            max_step: i64::MAX / 5,
            ..Default::default()
        };
        assert!(SyntheticStream::from_config(&config).is_err());

        let config = StreamConfig {
            generator: GeneratorKind::Dataset,
            edges: 3,
            start_time: i64::MAX - 1_500,
            ..Default::default()
        };
        let last = config.last_timestamp().unwrap();
        assert_eq!(last, i64::MAX);
        let edges: Vec<_> = SyntheticStream::from_config(&config).unwrap().collect();
        assert!(edges.iter().all(|e| e.timestamp() <= last));
    }

    #[test]
    fn test_exact_size() {
        let mut stream = SyntheticStream::seeded(3, 5, 0).unwrap();
        assert_eq!(stream.len(), 3);
        stream.next();
        assert_eq!(stream.len(), 2);
    }
}
