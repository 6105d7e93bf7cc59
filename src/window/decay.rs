//! Earlier forms of the decay policy
//!
//! These formulas predate the per-window assigner and are kept bit-for-bit so
//! benchmark data produced with them can be regenerated. Their quirks are part
//! of the contract: the sign of `expiration - current_time` is not normalised,
//! and the "weighted mean" only looks at the largest neighbor expiration.

use crate::core::error::Result;
use crate::window::assigner::compute_theta;

/// Default amplitude of [`decayed_expiration`]
pub const DEFAULT_DECAY_LAMBDA: f64 = 5.0;

/// Default offset added by [`edge_expiration`]
pub const DEFAULT_BASE_OFFSET: f64 = 5.0;

/// `lambda * exp(-gamma / (expiration - current_time))`, or `current_time`
/// when the two instants coincide.
pub fn decayed_expiration(expiration: f64, current_time: f64, gamma: f64, lambda: f64) -> f64 {
    if current_time == expiration {
        return current_time;
    }
    lambda * (-gamma * (1.0 / (expiration - current_time))).exp()
}

/// Decayed expiration of the largest neighbor expiration; `current_time` with no neighbors.
pub fn weighted_mean_expiration(
    neighbor_expirations: &[f64],
    current_time: f64,
    gamma: f64,
) -> f64 {
    match neighbor_expirations.iter().copied().reduce(f64::max) {
        Some(latest) => decayed_expiration(latest, current_time, gamma, DEFAULT_DECAY_LAMBDA),
        None => current_time,
    }
}

/// `base_offset + theta_v * weighted_exp_v + theta_u * weighted_exp_u`
pub fn edge_expiration(
    theta_v: f64,
    theta_u: f64,
    weighted_exp_v: f64,
    weighted_exp_u: f64,
    base_offset: f64,
) -> f64 {
    base_offset + (theta_v * weighted_exp_v + theta_u * weighted_exp_u)
}

/// Expiration of an edge estimated from its endpoints' neighbor expirations.
///
/// Each endpoint's degree is the length of its neighbor list. Two isolated
/// endpoints split ownership evenly.
pub fn neighbor_expiration_estimate(
    current_time: f64,
    neighbors_v: &[f64],
    neighbors_u: &[f64],
    gamma: f64,
    alpha: f64,
) -> Result<f64> {
    let weighted_v = weighted_mean_expiration(neighbors_v, current_time, gamma);
    let weighted_u = weighted_mean_expiration(neighbors_u, current_time, gamma);
    let (theta_v, theta_u) = compute_theta(neighbors_v.len(), neighbors_u.len(), alpha)?;

    Ok(edge_expiration(theta_v, theta_u, weighted_v, weighted_u, DEFAULT_BASE_OFFSET))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_instants_short_circuit() {
        for gamma in [0.0, 0.01, 3.0, -2.0] {
            assert_eq!(decayed_expiration(100.0, 100.0, gamma, DEFAULT_DECAY_LAMBDA), 100.0);
        }
    }

    #[test]
    fn test_decay_formula() {
        let got = decayed_expiration(110.0, 100.0, 0.5, 5.0);
        assert_eq!(got, 5.0 * (-0.5f64 / 10.0).exp());
    }

    #[test]
    fn test_negative_gap_flips_sign() {
        // Expiration already behind current time: exponent becomes positive.
        let got = decayed_expiration(90.0, 100.0, 0.5, 5.0);
        assert_eq!(got, 5.0 * (0.05f64).exp());
        assert!(got > 5.0);
    }

    #[test]
    fn test_no_neighbors() {
        assert_eq!(weighted_mean_expiration(&[], 1234.0, 0.01), 1234.0);
    }

    #[test]
    fn test_only_max_neighbor_counts() {
        let t = 40.0;
        assert_eq!(
            weighted_mean_expiration(&[50.0, 90.0, 30.0], t, 0.01),
            decayed_expiration(90.0, t, 0.01, DEFAULT_DECAY_LAMBDA)
        );
    }

    #[test]
    fn test_edge_expiration() {
        assert_eq!(edge_expiration(0.25, 0.75, 4.0, 8.0, 5.0), 5.0 + 1.0 + 6.0);
    }

    #[test]
    fn test_estimate_with_isolated_endpoints() {
        let estimate = neighbor_expiration_estimate(10.0, &[], &[], 0.01, 1.5).unwrap();
        assert_eq!(estimate, DEFAULT_BASE_OFFSET + 0.5 * 10.0 + 0.5 * 10.0);
    }

    #[test]
    fn test_estimate_favours_higher_degree() {
        let v = [20.0, 30.0, 25.0];
        let u = [15.0];
        let estimate = neighbor_expiration_estimate(10.0, &v, &u, 0.01, 1.5).unwrap();

        let (theta_v, theta_u) = compute_theta(3, 1, 1.5).unwrap();
        let expected = edge_expiration(
            theta_v,
            theta_u,
            decayed_expiration(30.0, 10.0, 0.01, DEFAULT_DECAY_LAMBDA),
            decayed_expiration(15.0, 10.0, 0.01, DEFAULT_DECAY_LAMBDA),
            DEFAULT_BASE_OFFSET,
        );
        assert_eq!(estimate, expected);
        assert!(theta_v > theta_u);
    }
}
