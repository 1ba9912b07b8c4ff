//! Bivariate polynomial height functions ("jets") over the local frame.
//!
//! A jet of order `n` is `z = Σ β(a,b) xᵃ yᵇ` over all monomials with
//! `a + b ≤ n`. Coefficients are stored in a fixed order: ascending total
//! degree, and within a degree descending x-exponent:
//!
//! ```text
//! (0,0) (1,0) (0,1) (2,0) (1,1) (0,2) (3,0) (2,1) ...
//! ```
//!
//! Because the model has no ½ factors, the Monge-patch derivatives at the
//! origin are `f_x = β₁₀`, `f_y = β₀₁`, `f_xx = 2β₂₀`, `f_xy = β₁₁` and
//! `f_yy = 2β₀₂`.

mod fit;

pub use fit::{fit_jet, fit_residual_rms, JetFitOptions};

use serde::Serialize;

/// Number of monomials of total degree ≤ `order`: (n+1)(n+2)/2.
#[inline]
pub const fn monomial_count(order: usize) -> usize {
    (order + 1) * (order + 2) / 2
}

/// Position of xᵃyᵇ in the canonical ordering.
#[inline]
pub const fn monomial_index(a: usize, b: usize) -> usize {
    let d = a + b;
    d * (d + 1) / 2 + b
}

/// Exponent pairs `(a, b)` in canonical order.
pub fn monomial_exponents(order: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(monomial_count(order));
    for d in 0..=order {
        for b in 0..=d {
            out.push((d - b, b));
        }
    }
    out
}

/// Fitted jet coefficients in the normalized local frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JetCoefficients {
    pub order: usize,
    pub coefficients: Vec<f64>,
}

impl JetCoefficients {
    /// Wraps raw coefficients. Returns `None` if the length is not N(order).
    pub fn new(order: usize, coefficients: Vec<f64>) -> Option<Self> {
        (coefficients.len() == monomial_count(order)).then_some(Self {
            order,
            coefficients,
        })
    }

    /// Coefficient of xᵃyᵇ, zero beyond the fitted order.
    pub fn get(&self, a: usize, b: usize) -> f64 {
        if a + b > self.order {
            0.0
        } else {
            self.coefficients[monomial_index(a, b)]
        }
    }

    /// Evaluates the height function at local `(x, y)`.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        monomial_exponents(self.order)
            .into_iter()
            .zip(self.coefficients.iter())
            .map(|((a, b), c)| c * x.powi(a as i32) * y.powi(b as i32))
            .sum()
    }

    /// `(f_x, f_y)` at the origin.
    pub fn gradient_at_origin(&self) -> (f64, f64) {
        (self.get(1, 0), self.get(0, 1))
    }

    /// `(f_xx, f_xy, f_yy)` at the origin; zeros for a plane fit.
    pub fn hessian_at_origin(&self) -> (f64, f64, f64) {
        (2.0 * self.get(2, 0), self.get(1, 1), 2.0 * self.get(0, 2))
    }

    /// Whether second-order terms exist.
    pub fn has_curvature(&self) -> bool {
        self.order >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monomial_counts() {
        assert_eq!(monomial_count(1), 3);
        assert_eq!(monomial_count(2), 6);
        assert_eq!(monomial_count(3), 10);
        assert_eq!(monomial_count(4), 15);
    }

    #[test]
    fn canonical_ordering_matches_index() {
        let exps = monomial_exponents(3);
        assert_eq!(&exps[..6], &[(0, 0), (1, 0), (0, 1), (2, 0), (1, 1), (0, 2)]);
        for (i, &(a, b)) in exps.iter().enumerate() {
            assert_eq!(monomial_index(a, b), i);
        }
    }

    #[test]
    fn derivatives_account_for_missing_half_factor() {
        // z = 0.5 x² + 3 xy - y²
        let jet = JetCoefficients::new(2, vec![0.0, 0.0, 0.0, 0.5, 3.0, -1.0]).unwrap();
        assert_eq!(jet.hessian_at_origin(), (1.0, 3.0, -2.0));
        assert!((jet.evaluate(2.0, 1.0) - (2.0 + 6.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn plane_jet_has_no_curvature() {
        let jet = JetCoefficients::new(1, vec![0.1, 0.2, -0.3]).unwrap();
        assert!(!jet.has_curvature());
        assert_eq!(jet.get(2, 0), 0.0);
        assert_eq!(jet.gradient_at_origin(), (0.2, -0.3));
        assert!(JetCoefficients::new(2, vec![0.0; 3]).is_none());
    }
}
