//! Weighted least-squares jet fitting.

use super::{monomial_count, monomial_exponents, JetCoefficients};
use crate::error::FitError;
use crate::types::WeightVector;
use log::debug;
use nalgebra::{DMatrix, DVector, Vector3};
use serde::{Deserialize, Serialize};

/// Options for the weighted polynomial solve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JetFitOptions {
    /// Singular values below `rank_tol · σ_max` count as zero.
    pub rank_tol: f64,
}

impl Default for JetFitOptions {
    fn default() -> Self {
        Self { rank_tol: 1e-10 }
    }
}

/// Fits `z = Σ β(a,b) xᵃ yᵇ` to local points minimizing `Σ wᵢ rᵢ²`.
///
/// Rows with zero weight are dropped before the solve, so they contribute
/// exactly nothing. The remaining rows are scaled by `√wᵢ` and the system is
/// solved through an SVD of the weighted design matrix; the normal equations
/// are never formed. A numerical rank below N(order) is reported as
/// [`FitError::RankDeficientFit`] rather than returning a minimum-norm β.
pub fn fit_jet(
    points: &[Vector3<f64>],
    weights: &WeightVector,
    order: usize,
    opts: &JetFitOptions,
) -> Result<JetCoefficients, FitError> {
    if order < 1 {
        return Err(FitError::InvalidOrder { order, minimum: 1 });
    }
    if weights.len() != points.len() {
        return Err(FitError::WeightLengthMismatch {
            weights: weights.len(),
            points: points.len(),
        });
    }

    let required = monomial_count(order);
    let rows: Vec<(usize, f64)> = weights
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(_, &w)| w > 0.0)
        .map(|(i, &w)| (i, w.sqrt()))
        .collect();
    let effective = rows.len();
    if effective < required {
        return Err(FitError::RankDeficientFit {
            order,
            required,
            effective,
            rank: effective,
        });
    }

    let exponents = monomial_exponents(order);
    let mut design = DMatrix::<f64>::zeros(effective, required);
    let mut rhs = DVector::<f64>::zeros(effective);
    for (r, &(i, sw)) in rows.iter().enumerate() {
        let p = &points[i];
        for (c, &(a, b)) in exponents.iter().enumerate() {
            design[(r, c)] = sw * p.x.powi(a as i32) * p.y.powi(b as i32);
        }
        rhs[r] = sw * p.z;
    }

    let svd = design.svd(true, true);
    let sigma_max = svd.singular_values.max();
    let threshold = opts.rank_tol * sigma_max;
    let rank = svd
        .singular_values
        .iter()
        .filter(|&&s| s > threshold)
        .count();
    if !sigma_max.is_finite() || sigma_max <= 0.0 || rank < required {
        debug!(
            "jet fit: order {order} rank {rank} < {required} with {effective} effective points"
        );
        return Err(FitError::RankDeficientFit {
            order,
            required,
            effective,
            rank,
        });
    }

    let beta = svd
        .solve(&rhs, threshold)
        .map_err(|_| FitError::RankDeficientFit {
            order,
            required,
            effective,
            rank,
        })?;
    Ok(JetCoefficients {
        order,
        coefficients: beta.iter().copied().collect(),
    })
}

/// Weighted RMS of `z - jet(x, y)` over the positively weighted points.
pub fn fit_residual_rms(
    points: &[Vector3<f64>],
    weights: &WeightVector,
    jet: &JetCoefficients,
) -> f64 {
    let mut sum_w = 0.0;
    let mut sum_r2 = 0.0;
    for (p, &w) in points.iter().zip(weights.as_slice()) {
        if w <= 0.0 {
            continue;
        }
        let r = p.z - jet.evaluate(p.x, p.y);
        sum_w += w;
        sum_r2 += w * r * r;
    }
    if sum_w <= 0.0 {
        0.0
    } else {
        (sum_r2 / sum_w).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(f: impl Fn(f64, f64) -> f64) -> Vec<Vector3<f64>> {
        let mut pts = Vec::new();
        for i in -3..=3 {
            for j in -3..=3 {
                let x = i as f64 / 3.0;
                let y = j as f64 / 3.0 + 0.05 * x;
                pts.push(Vector3::new(x, y, f(x, y)));
            }
        }
        pts
    }

    fn max_abs_diff(a: &JetCoefficients, b: &JetCoefficients) -> f64 {
        a.coefficients
            .iter()
            .zip(&b.coefficients)
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn recovers_exact_cubic() {
        let f = |x: f64, y: f64| {
            0.2 - 0.1 * x + 0.3 * y + 0.7 * x * x - 0.4 * x * y + 0.25 * y * y + 0.05 * x * x * x
                - 0.02 * y * y * y
        };
        let pts = grid(f);
        let jet = fit_jet(&pts, &WeightVector::uniform(pts.len()), 3, &JetFitOptions::default())
            .unwrap();
        assert!((jet.get(0, 0) - 0.2).abs() < 1e-10);
        assert!((jet.get(1, 0) + 0.1).abs() < 1e-10);
        assert!((jet.get(2, 0) - 0.7).abs() < 1e-10);
        assert!((jet.get(1, 1) + 0.4).abs() < 1e-10);
        assert!((jet.get(3, 0) - 0.05).abs() < 1e-10);
        assert!((jet.get(0, 3) + 0.02).abs() < 1e-10);
        assert!(fit_residual_rms(&pts, &WeightVector::uniform(pts.len()), &jet) < 1e-10);
    }

    #[test]
    fn uniform_weight_scaling_is_invariant() {
        let pts = grid(|x, y| (1.3 * x).sin() * (0.7 * y).cos());
        let raw: Vec<f64> = (0..pts.len()).map(|i| 0.1 + (i % 7) as f64).collect();
        let w = WeightVector::new(raw).unwrap();
        let opts = JetFitOptions::default();
        let a = fit_jet(&pts, &w, 2, &opts).unwrap();
        let b = fit_jet(&pts, &w.scaled(1234.5).unwrap(), 2, &opts).unwrap();
        assert!(max_abs_diff(&a, &b) < 1e-10, "{a:?} vs {b:?}");
    }

    #[test]
    fn zero_weight_equals_removal() {
        let pts = grid(|x, y| x * x - 0.5 * y + 0.1 * x * y * y);
        let mut raw = vec![1.0; pts.len()];
        raw[5] = 0.0;
        let with_zero = fit_jet(
            &pts,
            &WeightVector::new(raw).unwrap(),
            3,
            &JetFitOptions::default(),
        )
        .unwrap();

        let mut removed = pts.clone();
        removed.remove(5);
        let without = fit_jet(
            &removed,
            &WeightVector::uniform(removed.len()),
            3,
            &JetFitOptions::default(),
        )
        .unwrap();
        assert!(max_abs_diff(&with_zero, &without) < 1e-12);
    }

    #[test]
    fn too_few_points_is_rank_deficient() {
        let pts = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.1),
            Vector3::new(0.0, 1.0, 0.2),
            Vector3::new(-1.0, -1.0, 0.3),
        ];
        let err = fit_jet(&pts, &WeightVector::uniform(4), 2, &JetFitOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            FitError::RankDeficientFit {
                order: 2,
                required: 6,
                effective: 4,
                rank: 4
            }
        );
    }

    #[test]
    fn collapsed_weights_are_rank_deficient() {
        let pts = grid(|x, _| x);
        let raw: Vec<f64> = (0..pts.len()).map(|i| if i < 4 { 1.0 } else { 0.0 }).collect();
        let err = fit_jet(
            &pts,
            &WeightVector::new(raw).unwrap(),
            2,
            &JetFitOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FitError::RankDeficientFit { effective: 4, .. }));
    }

    #[test]
    fn points_on_a_line_are_rank_deficient() {
        // Enough points, but all with x = y: columns x and y coincide.
        let pts: Vec<_> = (0..10)
            .map(|i| {
                let t = i as f64 / 10.0;
                Vector3::new(t, t, t * t)
            })
            .collect();
        let err = fit_jet(&pts, &WeightVector::uniform(10), 2, &JetFitOptions::default())
            .unwrap_err();
        assert!(matches!(err, FitError::RankDeficientFit { rank, .. } if rank < 6));
    }

    #[test]
    fn rejects_order_zero_and_length_mismatch() {
        let pts = grid(|_, _| 0.0);
        assert_eq!(
            fit_jet(&pts, &WeightVector::uniform(pts.len()), 0, &JetFitOptions::default()),
            Err(FitError::InvalidOrder {
                order: 0,
                minimum: 1
            })
        );
        assert!(matches!(
            fit_jet(&pts, &WeightVector::uniform(3), 1, &JetFitOptions::default()),
            Err(FitError::WeightLengthMismatch { weights: 3, .. })
        ));
    }
}
