//! A reduced density matrix and the invariants it must satisfy.
//!
//! Any `R` coming out of [`crate::partial_trace`] is Hermitian, has
//! trace 1, and has eigenvalues in `[0, 1]` up to numerical noise.
//! `DensityMatrix` wraps a [`Matrix`] and checks exactly those three
//! things once, at construction, so the statistics layer can assume
//! them rather than re-verifying on every call.

use crate::error::{CoreError, CoreResult};
use crate::math::approx_cmp::{approx_eq_real, clamp_real_part};
use crate::math::matrix::Matrix;
use crate::math::{ilog2_exact, N};

/// A validated reduced density matrix on `m` qubits (shape `2^m x 2^m`).
#[derive(Debug, Clone, PartialEq)]
pub struct DensityMatrix {
    m: N,
    matrix: Matrix,
}

impl DensityMatrix {
    /// Wraps `matrix`, checking it is square with a power-of-two
    /// dimension, Hermitian within `eps`, and of trace 1 within `eps`.
    pub fn from_matrix(matrix: Matrix, eps: f64) -> CoreResult<Self> {
        if !matrix.is_square() {
            return Err(CoreError::shape("density matrix must be square"));
        }
        let m = ilog2_exact(matrix.rows())
            .ok_or_else(|| CoreError::shape(format!("density matrix dimension {} is not a power of two", matrix.rows())))?;
        if !matrix.is_hermitian(eps) {
            return Err(CoreError::numerical("density matrix is not Hermitian within tolerance"));
        }
        let trace = clamp_real_part(matrix.trace()?, eps);
        if !approx_eq_real(trace, 1.0, eps) {
            return Err(CoreError::numerical(format!(
                "density matrix trace {} deviates from 1 beyond tolerance",
                trace
            )));
        }
        Ok(Self { m, matrix })
    }

    pub fn num_qubits(&self) -> N {
        self.m
    }

    pub fn dim(&self) -> N {
        self.matrix.rows()
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }
}
