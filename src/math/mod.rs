//! Complex-scalar and complex-matrix primitives.

pub mod approx_cmp;
pub mod matrix;

/// Qubit/basis-index width.
pub type N = usize;
/// Signed index, used where a difference of two [`N`] may be negative.
pub type Z = isize;
/// Real scalar.
pub type R = f64;
/// Complex scalar: a pair (re, im) of `f64`.
pub type C = num_complex::Complex<R>;

pub const C_ZERO: C = C { re: 0.0, im: 0.0 };
pub const C_ONE: C = C { re: 1.0, im: 0.0 };
pub const C_IMAG: C = C { re: 0.0, im: 1.0 };

#[inline]
pub fn is_power_of_two(n: N) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// `log2(n)` for `n` a power of two, else `None`.
#[inline]
pub fn ilog2_exact(n: N) -> Option<N> {
    if is_power_of_two(n) {
        Some(n.trailing_zeros() as N)
    } else {
        None
    }
}
