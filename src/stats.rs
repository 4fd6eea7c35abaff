//! Derived descriptors of reduced density matrices: phase, Bloch
//! coordinates, purity, entropy, concurrence and the stabilizer Rényi
//! entropy ("magic").
//!
//! Every descriptor here is read off an already-validated
//! [`DensityMatrix`]; this module never computes a partial trace
//! itself, it only consumes one.

use tracing::debug;

use crate::density::DensityMatrix;
use crate::eig::eigenvalues_of;
use crate::error::{CoreError, CoreResult};
use crate::math::approx_cmp::{approx_zero_real, clamp_nonnegative, clamp_real_part, clamp_unit_interval};
use crate::math::matrix::Matrix;
use crate::math::{C, N};
use crate::partial_trace::partial_trace_from_density;
use crate::state::StateVector;

/// Descriptors of a single qubit's reduced state, from
/// ρ = [[a, b], [b*, d]].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleQubitStats {
    pub probability_one: f64,
    pub phase: f64,
    pub bloch: (f64, f64, f64),
    pub purity: f64,
    pub linear_entropy: f64,
    pub von_neumann_entropy: f64,
}

/// Descriptors of a pair of qubits' reduced state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairwiseStats {
    pub purity: f64,
    pub von_neumann_entropy: f64,
    pub correlation: f64,
    pub concurrence: f64,
}

fn von_neumann_entropy_from_eigenvalues(eigenvalues: &[f64], eps: f64) -> f64 {
    eigenvalues
        .iter()
        .map(|&lambda| {
            let clamped = clamp_unit_interval(lambda, eps);
            if approx_zero_real(clamped, eps) {
                0.0
            } else {
                -clamped * clamped.log2()
            }
        })
        .sum()
}

/// Single-qubit descriptors from a 2x2 reduced density matrix.
pub fn single_qubit_stats(rho: &DensityMatrix, eps: f64) -> CoreResult<SingleQubitStats> {
    if rho.dim() != 2 {
        return Err(CoreError::shape(format!(
            "single-qubit stats require a 2x2 density matrix, got {}x{}",
            rho.dim(),
            rho.dim()
        )));
    }
    let m = rho.matrix();
    let a = clamp_real_part(m.get(0, 0), eps);
    let d = clamp_real_part(m.get(1, 1), eps);
    let b = m.get(0, 1);

    let probability_one = clamp_unit_interval(d, eps);
    let phase = if b.norm() > eps { b.arg() } else { 0.0 };
    let bloch = (2.0 * b.re, -2.0 * b.im, a - d);

    let purity = clamp_unit_interval(a * a + d * d + 2.0 * b.norm_sqr(), eps);
    let linear_entropy = 1.0 - purity;
    let eigenvalues = eigenvalues_of(m)?;
    let von_neumann_entropy = von_neumann_entropy_from_eigenvalues(&eigenvalues, eps);

    debug!(probability_one, purity, "computed single-qubit stats");

    Ok(SingleQubitStats {
        probability_one,
        phase,
        bloch,
        purity,
        linear_entropy,
        von_neumann_entropy,
    })
}

fn pauli_y() -> Matrix {
    Matrix::from_rows(vec![
        vec![C::new(0.0, 0.0), C::new(0.0, -1.0)],
        vec![C::new(0.0, 1.0), C::new(0.0, 0.0)],
    ])
    .expect("2x2 literal is always well-formed")
}

/// Wootters' concurrence of a two-qubit reduced density matrix, plus
/// its purity, von Neumann entropy, and `ZZ` correlation.
pub fn pairwise_stats(rho: &DensityMatrix, eps: f64) -> CoreResult<PairwiseStats> {
    if rho.dim() != 4 {
        return Err(CoreError::shape(format!(
            "pairwise stats require a 4x4 density matrix, got {}x{}",
            rho.dim(),
            rho.dim()
        )));
    }
    let m = rho.matrix();

    let squared = m.mult(m)?;
    let purity = clamp_unit_interval(clamp_real_part(squared.trace()?, eps), eps);
    let eigenvalues = eigenvalues_of(m)?;
    let von_neumann_entropy = von_neumann_entropy_from_eigenvalues(&eigenvalues, eps);

    let marginal_i = partial_trace_from_density(2, m, &[1], false)?;
    let marginal_j = partial_trace_from_density(2, m, &[0], false)?;
    let z_i = clamp_real_part(marginal_i.get(0, 0), eps) - clamp_real_part(marginal_i.get(1, 1), eps);
    let z_j = clamp_real_part(marginal_j.get(0, 0), eps) - clamp_real_part(marginal_j.get(1, 1), eps);
    let zz = clamp_real_part(m.get(0, 0), eps) - clamp_real_part(m.get(1, 1), eps) - clamp_real_part(m.get(2, 2), eps)
        + clamp_real_part(m.get(3, 3), eps);
    let correlation = zz - z_i * z_j;

    let yy = pauli_y().tensor(&pauli_y());
    let rho_tilde = yy.mult(&m.conjugate())?.mult(&yy)?;
    // rho * rho_tilde is generally not Hermitian, but sqrt(rho) * rho_tilde
    // * sqrt(rho) is (rho_tilde is Hermitian, and conjugating it by the
    // Hermitian sqrt(rho) preserves that), and is similar to rho * rho_tilde
    // via A = sqrt(rho), B = sqrt(rho) * rho_tilde: AB = rho * rho_tilde and
    // BA = sqrt(rho) * rho_tilde * sqrt(rho) share the same eigenvalues.
    let sqrt_rho = crate::eig::psd_sqrt(m, eps)?;
    let conjugated = sqrt_rho.mult(&rho_tilde)?.mult(&sqrt_rho)?;
    let product_eigenvalues = eigenvalues_of(&conjugated)?;
    let mut sqrt_eigenvalues: Vec<f64> = product_eigenvalues
        .iter()
        .map(|&lambda| clamp_nonnegative(lambda, eps).sqrt())
        .collect();
    sqrt_eigenvalues.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let concurrence = (sqrt_eigenvalues[0] - sqrt_eigenvalues[1] - sqrt_eigenvalues[2] - sqrt_eigenvalues[3]).max(0.0);

    debug!(purity, concurrence, "computed pairwise stats");

    Ok(PairwiseStats {
        purity,
        von_neumann_entropy,
        correlation,
        concurrence,
    })
}

const PAULI_LABELS: [char; 4] = ['I', 'X', 'Y', 'Z'];

fn pauli_matrix(label: char) -> Matrix {
    match label {
        'I' => Matrix::identity(2),
        'X' => Matrix::from_rows(vec![
            vec![C::new(0.0, 0.0), C::new(1.0, 0.0)],
            vec![C::new(1.0, 0.0), C::new(0.0, 0.0)],
        ])
        .expect("2x2 literal is always well-formed"),
        'Y' => pauli_y(),
        'Z' => Matrix::from_rows(vec![
            vec![C::new(1.0, 0.0), C::new(0.0, 0.0)],
            vec![C::new(0.0, 0.0), C::new(-1.0, 0.0)],
        ])
        .expect("2x2 literal is always well-formed"),
        _ => unreachable!("pauli_matrix is only ever called with an I/X/Y/Z label"),
    }
}

/// Decodes the base-4 Pauli-string index `s` into one label per qubit,
/// most significant qubit first.
fn pauli_string_labels(s: N, m: N) -> Vec<char> {
    (0..m)
        .rev()
        .map(|k| PAULI_LABELS[(s >> (2 * k)) & 0b11])
        .collect()
}

/// The second stabilizer Rényi entropy ("magic") of an `m`-qubit
/// reduced density matrix.
pub fn stabilizer_renyi_entropy(rho: &DensityMatrix, eps: f64) -> CoreResult<f64> {
    let m = rho.num_qubits();
    let dim = rho.dim();
    let rho_matrix = rho.matrix();
    let num_strings = 1usize << (2 * m);

    let mut xi = Vec::with_capacity(num_strings);
    for s in 0..num_strings {
        let labels = pauli_string_labels(s, m);
        let pauli_factors: Vec<Matrix> = labels.iter().map(|&label| pauli_matrix(label)).collect();
        let pauli_string = Matrix::nary_tensor(&pauli_factors)?;
        let product = rho_matrix.mult(&pauli_string)?;
        let expectation = clamp_real_part(product.trace()?, eps);
        xi.push((expectation * expectation) / dim as f64);
    }

    let sum_xi: f64 = xi.iter().sum();
    if !approx_zero_real(sum_xi - 1.0, 1e-6) {
        return Err(CoreError::numerical(format!(
            "stabilizer purity distribution does not normalize to 1 (got {})",
            sum_xi
        )));
    }

    let sum_xi_squared: f64 = xi.iter().map(|p| p * p).sum();
    let ssre = -sum_xi_squared.log2() - m as f64;
    Ok(clamp_nonnegative(ssre, eps))
}

/// Single-qubit descriptors for every wire of an `n`-qubit state,
/// each computed from its own partial trace directly off `ψ`.
pub fn all_single_qubit_stats(psi: &StateVector, eps: f64) -> CoreResult<Vec<SingleQubitStats>> {
    let n = psi.num_qubits();
    (0..n)
        .map(|wire| {
            let reduced = crate::partial_trace::partial_trace_from_state(n, psi, &[wire], true)?;
            let rho = DensityMatrix::from_matrix(reduced, eps)?;
            single_qubit_stats(&rho, eps)
        })
        .collect()
}

/// Pairwise descriptors for every unordered pair of wires of an
/// `n`-qubit state, each computed from its own partial trace directly
/// off `ψ`.
pub fn all_pairwise_stats(psi: &StateVector, eps: f64) -> CoreResult<Vec<((N, N), PairwiseStats)>> {
    let n = psi.num_qubits();
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let reduced = crate::partial_trace::partial_trace_from_state(n, psi, &[i, j], true)?;
            let rho = DensityMatrix::from_matrix(reduced, eps)?;
            out.push(((i, j), pairwise_stats(&rho, eps)?));
        }
    }
    Ok(out)
}
