//! Epsilon-aware scalar comparisons, used throughout the evolver,
//! partial-trace engine and statistics layer.
//!
//! Tolerances are taken as an explicit parameter rather than a fixed
//! ULPs constant, since the global configuration ties tolerance to a
//! user-adjustable ε rather than to float ULPs.

use super::{C, R};

#[inline]
pub fn approx_eq_real(x: R, y: R, eps: R) -> bool {
    (x - y).abs() <= eps
}

#[inline]
pub fn approx_zero_real(x: R, eps: R) -> bool {
    x.abs() <= eps
}

#[inline]
pub fn approx_eq(a: C, b: C, eps: R) -> bool {
    approx_eq_real(a.re, b.re, eps) && approx_eq_real(a.im, b.im, eps)
}

#[inline]
pub fn approx_real(x: C, eps: R) -> bool {
    approx_zero_real(x.im, eps)
}

#[inline]
pub fn approx_eq_conj(a: C, b: C, eps: R) -> bool {
    approx_eq_real(a.re, b.re, eps) && approx_eq_real(a.im, -b.im, eps)
}

/// Project a value known to be real-valued up to noise onto its real
/// part, discarding the (small) imaginary residue.
#[inline]
pub fn clamp_real_part(x: C, _eps: R) -> R {
    x.re
}

/// Clamp a value known to be nonnegative up to noise into `[0, +inf)`.
#[inline]
pub fn clamp_nonnegative(x: R, eps: R) -> R {
    if x < 0.0 && x >= -eps {
        0.0
    } else {
        x
    }
}

/// Clamp a probability-like value into `[0, 1]`, tolerating ε overshoot.
#[inline]
pub fn clamp_unit_interval(x: R, eps: R) -> R {
    clamp_nonnegative(x, eps).min(1.0 + eps).min(1.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_nonnegative_snaps_small_negatives() {
        assert_eq!(clamp_nonnegative(-1e-10, 1e-7), 0.0);
        assert_eq!(clamp_nonnegative(-1.0, 1e-7), -1.0);
    }

    #[test]
    fn approx_eq_conj_matches_hermitian_pairs() {
        let a = C::new(1.0, 2.0);
        let b = C::new(1.0, -2.0);
        assert!(approx_eq_conj(a, b, 1e-9));
    }
}
