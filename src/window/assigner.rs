//! Degree-weighted window assignment
//!
//! Each incoming edge is claimed by whichever endpoint has the larger share of
//! historical degree, `theta(v) = deg(v)^alpha / (deg(v)^alpha + deg(u)^alpha)`.
//! The owner's window then has its expiration recomputed as
//! `lambda * exp(-gamma / n) + opening_time`, where `n` counts the edges the
//! window has admitted including this one. When that instant is already behind
//! the edge, the amplitude is raised by `(timestamp - expiration) * beta` and
//! the expiration recomputed.

use crate::core::config::{DecayConfig, LambdaScope};
use crate::core::error::{Error, Result};
use crate::core::types::{Expiration, VertexId};
use crate::graph::{Edge, SnapshotGraph};
use crate::window::window::WindowTable;
use serde::Serialize;
use tracing::{debug, trace};

/// Outcome of placing one edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    /// The edge that was placed
    pub edge: Edge,
    /// Owner of the window that admitted it
    pub owner: VertexId,
    /// Window expiration after admitting the edge
    pub expiration: Expiration,
    /// Ownership share of `edge.v`
    pub theta_v: f64,
    /// Ownership share of `edge.u`
    pub theta_u: f64,
    /// Whether the window was opened by this edge
    pub created: bool,
    /// Whether the amplitude had to be raised
    pub lambda_adjusted: bool,
}

/// Ownership shares `(theta_v, theta_u)` for two endpoint degrees.
///
/// Two unseen endpoints split evenly. Non-finite weights are a
/// [`Error::NumericRange`], never clamped.
pub fn compute_theta(degree_v: usize, degree_u: usize, alpha: f64) -> Result<(f64, f64)> {
    let weighted_v = (degree_v as f64).powf(alpha);
    let weighted_u = (degree_u as f64).powf(alpha);

    if !weighted_v.is_finite() || !weighted_u.is_finite() {
        return Err(Error::numeric_range(format!(
            "degree weight overflow: {}^{} = {}, {}^{} = {}",
            degree_v, alpha, weighted_v, degree_u, alpha, weighted_u
        )));
    }

    let total = weighted_v + weighted_u;
    if total == 0.0 {
        return Ok((0.5, 0.5));
    }
    if !total.is_finite() {
        return Err(Error::numeric_range(format!(
            "degree weight sum overflow for degrees {} and {}",
            degree_v, degree_u
        )));
    }

    let theta_v = weighted_v / total;
    Ok((theta_v, 1.0 - theta_v))
}

/// Endpoint that claims the edge; ties go to `u`
pub fn select_owner(edge: &Edge, theta_v: f64, theta_u: f64) -> &VertexId {
    if theta_v > theta_u {
        edge.v()
    } else {
        edge.u()
    }
}

/// Places streamed edges into vertex-owned windows.
///
/// The snapshot graph and window table belong to the caller; the assigner
/// holds the policy parameters and, under [`LambdaScope::Global`], the
/// amplitude shared by every window. Under the default
/// [`LambdaScope::PerEdge`] every assignment starts from `lambda_base`.
#[derive(Debug, Clone)]
pub struct WindowAssigner {
    params: DecayConfig,
    lambda: f64,
}

impl WindowAssigner {
    /// Create an assigner after validating the parameters
    pub fn new(params: DecayConfig) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            lambda: params.lambda_base,
            params,
        })
    }

    /// Policy parameters
    pub fn params(&self) -> &DecayConfig {
        &self.params
    }

    /// Amplitude shared across windows under global scoping; `lambda_base`
    /// under the other scopes
    pub fn effective_lambda(&self) -> f64 {
        self.lambda
    }

    /// Place `edge` into its owner's window and return the new expiration.
    ///
    /// Degrees are read before the edge enters `snapshot`. Nothing is mutated
    /// unless the whole computation succeeds.
    pub fn assign(
        &mut self,
        edge: &Edge,
        snapshot: &mut SnapshotGraph,
        table: &mut WindowTable,
    ) -> Result<Assignment> {
        let reading = snapshot.read_degrees(edge);
        let (theta_v, theta_u) =
            compute_theta(reading.degree_v, reading.degree_u, self.params.alpha)?;
        let owner = select_owner(edge, theta_v, theta_u).clone();

        let timestamp = edge.timestamp();
        let (opening_time, update_count, lambda) = match table.get(&owner) {
            Some(window) => (
                window.opening_time(),
                window.update_count(),
                self.lambda_for(window.lambda()),
            ),
            None => (timestamp, 0, self.lambda_for(self.params.lambda_base)),
        };

        let n = update_count + 1;
        let decay = (-self.params.gamma / n as f64).exp();
        let opening = opening_time as f64;
        let now = timestamp as f64;

        let mut lambda = lambda;
        let mut expiration = finite(lambda * decay + opening, &owner)?;
        let lambda_adjusted = expiration < now;
        if lambda_adjusted {
            lambda += (now - expiration) * self.params.beta;
            expiration = finite(lambda * decay + opening, &owner)?;
            debug!(
                owner = %owner,
                lambda,
                expiration,
                timestamp,
                "expiration behind edge, raised lambda"
            );
            if expiration < now {
                return Err(Error::numeric_range(format!(
                    "expiration {} of window {} still precedes edge timestamp {} \
                     after correction (beta = {})",
                    expiration, owner, timestamp, self.params.beta
                )));
            }
        }

        // Commit: snapshot first, then the window.
        snapshot.add_edge(edge);
        let (window, created) = table.get_or_open(&owner, timestamp, self.params.lambda_base);
        window.admit(edge, expiration);
        if lambda_adjusted {
            match self.params.lambda_scope {
                LambdaScope::PerEdge => {}
                LambdaScope::Global => self.lambda = lambda,
                LambdaScope::PerWindow => window.set_lambda(lambda),
            }
        }

        if created {
            debug!(owner = %owner, opening_time = timestamp, "opened window");
        }
        trace!(edge = %edge, owner = %owner, theta_v, expiration, "assigned edge");

        Ok(Assignment {
            edge: edge.clone(),
            owner,
            expiration,
            theta_v,
            theta_u,
            created,
            lambda_adjusted,
        })
    }

    fn lambda_for(&self, window_lambda: f64) -> f64 {
        match self.params.lambda_scope {
            LambdaScope::PerEdge => self.params.lambda_base,
            LambdaScope::Global => self.lambda,
            LambdaScope::PerWindow => window_lambda,
        }
    }
}

fn finite(expiration: f64, owner: &VertexId) -> Result<f64> {
    if expiration.is_finite() {
        Ok(expiration)
    } else {
        Err(Error::numeric_range(format!(
            "non-finite expiration for window {}",
            owner
        )))
    }
}
