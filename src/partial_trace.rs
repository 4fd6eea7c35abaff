//! Reducing a state vector or density matrix onto a subset of wires.
//!
//! Two equivalent reductions are exposed: the direct-from-ψ path
//! (preferred, time O(2^(n+M)), memory O(4^M) for an M-wire target)
//! and the from-density-matrix path, used when only a full D is on
//! hand. Both boil down to scattering a pair of M-bit indices into the
//! kept-wire positions, a fixed T-bit "filler" index into the
//! traced-out positions, and accumulating the resulting outer product.

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::math::matrix::Matrix;
use crate::math::{C, N};
use crate::state::StateVector;

/// Scatters bit `j` of `index` to `positions[j]` and bit `k` of `fill`
/// to `fill_positions[k]`, building a full `n`-bit basis index.
fn scatter(index: N, fill: N, positions: &[N], fill_positions: &[N]) -> N {
    let mut out = 0usize;
    for (j, &pos) in positions.iter().enumerate() {
        if (index >> j) & 1 != 0 {
            out |= 1 << pos;
        }
    }
    for (k, &pos) in fill_positions.iter().enumerate() {
        if (fill >> k) & 1 != 0 {
            out |= 1 << pos;
        }
    }
    out
}

fn validate_qubits(qubits: &[N], n: N) -> CoreResult<()> {
    let mut seen = Vec::with_capacity(qubits.len());
    for &q in qubits {
        if q >= n {
            return Err(CoreError::invalid(format!(
                "qubit {} out of range for {} qubits",
                q, n
            )));
        }
        if seen.contains(&q) {
            return Err(CoreError::invalid(format!("duplicate qubit {} in partial trace", q)));
        }
        seen.push(q);
    }
    Ok(())
}

/// Splits `[0, n)` into the kept wires `K` and traced-out wires `T`,
/// honoring `keep` (whether `qubits` names `K` directly or its
/// complement).
fn kept_and_traced(n: N, qubits: &[N], keep: bool) -> (Vec<N>, Vec<N>) {
    if keep {
        let traced = (0..n).filter(|w| !qubits.contains(w)).collect();
        (qubits.to_vec(), traced)
    } else {
        let kept = (0..n).filter(|w| !qubits.contains(w)).collect();
        (kept, qubits.to_vec())
    }
}

/// Reduces a state vector `ψ` on `n` qubits onto the wires selected by
/// `qubits`/`keep`, in time O(2^(n+M)) and memory O(4^M) where
/// `M = |K|`.
pub fn partial_trace_from_state(n: N, psi: &StateVector, qubits: &[N], keep: bool) -> CoreResult<Matrix> {
    if psi.num_qubits() != n {
        return Err(CoreError::shape(format!(
            "state has {} qubits, expected {}",
            psi.num_qubits(),
            n
        )));
    }
    validate_qubits(qubits, n)?;
    let (kept, traced) = kept_and_traced(n, qubits, keep);
    let m = kept.len();
    if m == 0 {
        return Err(CoreError::invalid("partial trace needs at least one kept qubit"));
    }

    let dim_k = 1usize << m;
    let dim_t = 1usize << traced.len();
    let amps = psi.amplitudes();

    let mut reduced = Matrix::zeros(dim_k, dim_k);
    for a in 0..dim_k {
        for b in 0..dim_k {
            let mut acc = C::new(0.0, 0.0);
            for t in 0..dim_t {
                let r_a = scatter(a, t, &kept, &traced);
                let r_b = scatter(b, t, &kept, &traced);
                acc += amps[r_a] * amps[r_b].conj();
            }
            reduced.set(a, b, acc);
        }
    }
    debug!(n, kept = m, traced = traced.len(), "computed reduced density matrix from state vector");
    Ok(reduced)
}

/// Reduces a full density matrix `D` on `n` qubits onto the wires
/// selected by `qubits`/`keep`.
pub fn partial_trace_from_density(n: N, d: &Matrix, qubits: &[N], keep: bool) -> CoreResult<Matrix> {
    let dim = 1usize << n;
    if d.rows() != dim || d.cols() != dim {
        return Err(CoreError::shape(format!(
            "density matrix is {}x{}, expected {}x{} for {} qubits",
            d.rows(),
            d.cols(),
            dim,
            dim,
            n
        )));
    }
    validate_qubits(qubits, n)?;
    let (kept, traced) = kept_and_traced(n, qubits, keep);
    let m = kept.len();
    if m == 0 {
        return Err(CoreError::invalid("partial trace needs at least one kept qubit"));
    }

    let dim_k = 1usize << m;
    let dim_t = 1usize << traced.len();

    let mut reduced = Matrix::zeros(dim_k, dim_k);
    for a in 0..dim_k {
        for b in 0..dim_k {
            let mut acc = C::new(0.0, 0.0);
            for t in 0..dim_t {
                let r_a = scatter(a, t, &kept, &traced);
                let r_b = scatter(b, t, &kept, &traced);
                acc += d.get(r_a, r_b);
            }
            reduced.set(a, b, acc);
        }
    }
    debug!(n, kept = m, traced = traced.len(), "computed reduced density matrix from full density matrix");
    Ok(reduced)
}
