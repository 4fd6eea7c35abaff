//! Eigendecomposition of reduced density matrices.
//!
//! The statistics layer never diagonalizes anything itself. It asks
//! a [`HermitianEigenSolver`] for the spectrum of a Hermitian matrix
//! and works from the returned eigenvalues. The only implementation
//! shipped here is [`NalgebraEigenSolver`], built on `nalgebra`'s
//! dense Hermitian eigensolver; the trait boundary exists so that a
//! caller with its own numerical backend can swap it in.

use nalgebra::{Complex as NaComplex, DMatrix};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::math::approx_cmp::clamp_nonnegative;
use crate::math::matrix::Matrix;
use crate::math::{C, N};

/// A real eigenvalue paired with its (not necessarily unit-phase
/// normalized beyond `nalgebra`'s own convention) eigenvector.
#[derive(Debug, Clone)]
pub struct Eigenpair {
    pub value: f64,
    pub vector: Vec<crate::math::C>,
}

/// An external collaborator providing the spectrum of Hermitian
/// matrices up to shape `2^6 x 2^6`.
pub trait HermitianEigenSolver {
    /// Returns the eigenpairs of Hermitian `matrix`, ascending by
    /// eigenvalue, or [`CoreError::OracleFailure`] if the underlying
    /// routine does not converge.
    fn eigendecompose(&self, matrix: &Matrix) -> CoreResult<Vec<Eigenpair>>;

    /// Returns only the eigenvalues, ascending.
    fn eigenvalues(&self, matrix: &Matrix) -> CoreResult<Vec<f64>> {
        Ok(self.eigendecompose(matrix)?.into_iter().map(|p| p.value).collect())
    }
}

/// [`HermitianEigenSolver`] backed by `nalgebra`'s `SymmetricEigen`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NalgebraEigenSolver;

impl HermitianEigenSolver for NalgebraEigenSolver {
    fn eigendecompose(&self, matrix: &Matrix) -> CoreResult<Vec<Eigenpair>> {
        if !matrix.is_square() {
            return Err(CoreError::shape("eigendecomposition requires a square matrix"));
        }
        let n = matrix.rows();

        let na_matrix = DMatrix::<NaComplex<f64>>::from_fn(n, n, |i, j| {
            let c = matrix.get(i, j);
            NaComplex::new(c.re, c.im)
        });

        // nalgebra's Hermitian eigensolver wants a `ComplexHermitianMatrix`
        // wrapper in recent versions; operate on the raw hermitian part to
        // stay robust across minor-version matrix-view API changes.
        let hermitian = na_matrix.adjoint();
        let symmetrized = (&na_matrix + &hermitian) * NaComplex::new(0.5, 0.0);

        let eigen = symmetrized.symmetric_eigen();
        let mut pairs: Vec<Eigenpair> = Vec::with_capacity(n);
        for k in 0..n {
            let value = eigen.eigenvalues[k];
            if !value.is_finite() {
                return Err(CoreError::oracle("eigendecomposition did not converge"));
            }
            let vector = (0..n)
                .map(|row| {
                    let entry = eigen.eigenvectors.column(k)[row];
                    crate::math::C::new(entry.re, entry.im)
                })
                .collect();
            pairs.push(Eigenpair { value, vector });
        }
        pairs.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));
        debug!(dim = n, "eigendecomposition oracle invoked");
        Ok(pairs)
    }
}

/// Convenience entry point used throughout `stats`: eigenvalues of a
/// Hermitian matrix at most `2^6 x 2^6`, via the default solver.
pub fn eigenvalues_of(matrix: &Matrix) -> CoreResult<Vec<f64>> {
    const MAX_DIM: N = 64;
    if matrix.rows() > MAX_DIM {
        return Err(CoreError::invalid(format!(
            "eigendecomposition of a {}x{} matrix exceeds the supported 64x64 bound",
            matrix.rows(),
            matrix.cols()
        )));
    }
    NalgebraEigenSolver.eigenvalues(matrix)
}

/// The positive semidefinite square root of a Hermitian matrix,
/// `V * diag(sqrt(clamp(lambda_k))) * V^dagger`, rebuilt from its own
/// eigendecomposition. Negative eigenvalues within `eps` of zero
/// (numerical noise on an otherwise-PSD input) are clamped before the
/// square root is taken.
pub fn psd_sqrt(matrix: &Matrix, eps: f64) -> CoreResult<Matrix> {
    let pairs = NalgebraEigenSolver.eigendecompose(matrix)?;
    let n = matrix.rows();

    let mut eigenvectors = Matrix::zeros(n, n);
    let mut sqrt_eigenvalues = Matrix::zeros(n, n);
    for (col, pair) in pairs.iter().enumerate() {
        for row in 0..n {
            eigenvectors.set(row, col, pair.vector[row]);
        }
        let clamped = clamp_nonnegative(pair.value, eps);
        sqrt_eigenvalues.set(col, col, C::new(clamped.sqrt(), 0.0));
    }

    let dagger = eigenvectors.conjugate_transpose();
    eigenvectors.mult(&sqrt_eigenvalues)?.mult(&dagger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{C, C_ONE, C_ZERO};

    #[test]
    fn identity_has_all_eigenvalues_one() {
        let id = Matrix::identity(2);
        let values = eigenvalues_of(&id).unwrap();
        assert_eq!(values.len(), 2);
        for v in values {
            assert!((v - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn diagonal_projector_has_eigenvalues_zero_and_one() {
        let rho = Matrix::from_rows(vec![vec![C_ONE, C_ZERO], vec![C_ZERO, C_ZERO]]).unwrap();
        let mut values = eigenvalues_of(&rho).unwrap();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((values[0] - 0.0).abs() < 1e-9);
        assert!((values[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn off_diagonal_hermitian_matrix_eigenvalues_sum_to_trace() {
        let rho = Matrix::from_rows(vec![
            vec![C::new(0.5, 0.0), C::new(0.0, 0.25)],
            vec![C::new(0.0, -0.25), C::new(0.5, 0.0)],
        ])
        .unwrap();
        let values = eigenvalues_of(&rho).unwrap();
        let sum: f64 = values.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_square_matrix() {
        let m = Matrix::zeros(2, 3);
        assert!(NalgebraEigenSolver.eigendecompose(&m).is_err());
    }

    #[test]
    fn psd_sqrt_of_identity_is_identity() {
        let id = Matrix::identity(2);
        let root = psd_sqrt(&id, 1e-9).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert!((root.get(i, j) - id.get(i, j)).norm() < 1e-9);
            }
        }
    }

    #[test]
    fn psd_sqrt_squares_back_to_the_original() {
        let rho = Matrix::from_rows(vec![
            vec![C::new(0.75, 0.0), C::new(0.0, 0.1)],
            vec![C::new(0.0, -0.1), C::new(0.25, 0.0)],
        ])
        .unwrap();
        let root = psd_sqrt(&rho, 1e-9).unwrap();
        let squared = root.mult(&root).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert!((squared.get(i, j) - rho.get(i, j)).norm() < 1e-9);
            }
        }
    }
}
